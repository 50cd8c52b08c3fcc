//! Address Book API Module
//!
//! Saved addresses are embedded sub-documents on the user; checkout
//! resolves an address id against this list.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/account/addresses", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/", post(handler::create))
        .route("/", put(handler::update))
        .route("/", delete(handler::remove))
}
