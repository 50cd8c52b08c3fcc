//! Logging Infrastructure
//!
//! Structured logging via `tracing`, filtered through `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Initialize the logger
///
/// Level defaults to `info`; override with `RUST_LOG`
/// (e.g. `RUST_LOG=store_server=debug`).
pub fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .init();
}
