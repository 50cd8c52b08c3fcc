//! Swarna Store Server - jewellery storefront backend
//!
//! # Architecture
//!
//! The server is a thin HTTP layer over an embedded document database;
//! the interesting logic lives in variant resolution, cart consistency
//! and order snapshotting:
//!
//! - **Catalog** (`db/repository/product`): product lookups by slug,
//!   id and id-set; admin mutations. Never mutated by the cart/order core.
//! - **Carts** (`carts`): the per-identity cart aggregate — merge-adds,
//!   quantity updates, materialized views with dangling-reference
//!   pruning, and the login-time sync/reconciliation merge.
//! - **Checkout** (`checkout`): converts a validated cart into an
//!   immutable order snapshot with server-side pricing.
//! - **Auth** (`auth`): JWT + Argon2; supplies the trusted identity to
//!   every cart/order operation.
//!
//! # Module structure
//!
//! ```text
//! store-server/src/
//! ├── core/          # Config, state, server
//! ├── auth/          # JWT service, extractor
//! ├── api/           # HTTP routes and handlers
//! ├── carts/         # Cart service, views, sync/reconciliation
//! ├── checkout/      # Order snapshot builder
//! ├── db/            # Database layer and repositories
//! └── utils/         # Errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod carts;
pub mod checkout;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};
pub use utils::logger::init_logger;
