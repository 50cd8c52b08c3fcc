//! Cart API Module
//!
//! All routes operate on the authenticated identity's cart; anonymous
//! visitors keep their cart client-side until the login-time sync.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_cart))
        .route("/", post(handler::add_item))
        .route("/", put(handler::set_quantity))
        .route("/", delete(handler::remove_item))
}
