//! Shared types for the Swarna storefront
//!
//! Domain types and pure logic used by both the store server and the
//! browser-facing client layer: catalog models, the variant resolver,
//! cart/order/wishlist aggregates, the anonymous session cache and
//! display-currency conversion.

pub mod client;
pub mod currency;
pub mod models;
pub mod types;
pub mod util;
pub mod variant;

// Re-exports
pub use currency::Currency;
pub use types::Language;
pub use variant::{Selection, VariantResolution};
