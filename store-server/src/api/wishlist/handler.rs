//! Wishlist API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use shared::models::{Product, Wishlist};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{ProductRepository, WishlistRepository};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub product_id: String,
}

#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    /// Materialized product list; ids whose product vanished are dropped
    pub products: Vec<Product>,
}

/// GET /api/wishlist - materialized wishlist
///
/// Dangling product ids are removed from the persisted document so the
/// wishlist converges the same way the cart does.
pub async fn get_wishlist(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<WishlistResponse>>> {
    let wishlists = WishlistRepository::new(state.get_db());
    let products_repo = ProductRepository::new(state.get_db());

    let Some(mut wishlist) = wishlists.find_by_user(&user.user_id).await? else {
        return Ok(ok(WishlistResponse { products: Vec::new() }));
    };

    let products = products_repo.find_by_ids(&wishlist.products).await?;
    if products.len() != wishlist.products.len() {
        let live: Vec<String> = products.iter().filter_map(|p| p.id.clone()).collect();
        wishlist.products.retain(|id| live.contains(id));
        wishlists.upsert(&wishlist).await?;
    }

    Ok(ok(WishlistResponse { products }))
}

/// POST /api/wishlist - toggle a product in/out of the wishlist
pub async fn toggle(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<ToggleRequest>,
) -> AppResult<Json<AppResponse<WishlistResponse>>> {
    let products_repo = ProductRepository::new(state.get_db());
    if products_repo.find_by_id(&req.product_id).await?.is_none() {
        return Err(AppError::not_found(format!("Product {}", req.product_id)));
    }

    let wishlists = WishlistRepository::new(state.get_db());
    let mut wishlist = wishlists
        .find_by_user(&user.user_id)
        .await?
        .unwrap_or_else(|| Wishlist::new(&user.user_id));

    let added = wishlist.toggle(&req.product_id);
    wishlists.upsert(&wishlist).await?;

    let products = products_repo.find_by_ids(&wishlist.products).await?;
    let message = if added {
        "Added to wishlist"
    } else {
        "Removed from wishlist"
    };
    Ok(ok_with_message(WishlistResponse { products }, message))
}
