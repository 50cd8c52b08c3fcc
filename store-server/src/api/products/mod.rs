//! Product API Module
//!
//! Catalog browsing for the storefront plus admin-only mutations.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/", post(handler::create))
        .route("/{slug}", get(handler::get_by_slug))
        .route("/{slug}", put(handler::update))
        .route("/{slug}", delete(handler::remove))
}
