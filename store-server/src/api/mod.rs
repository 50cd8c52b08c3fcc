//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`auth`] - register/login/me and login-time sync
//! - [`products`] - catalog browsing and admin mutations
//! - [`cart`] - per-identity cart operations
//! - [`wishlist`] - per-identity wishlist
//! - [`orders`] - checkout and order history
//! - [`addresses`] - saved address book

pub mod addresses;
pub mod auth;
pub mod cart;
pub mod health;
pub mod orders;
pub mod products;
pub mod wishlist;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
