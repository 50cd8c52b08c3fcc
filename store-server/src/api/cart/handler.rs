//! Cart API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use shared::currency::Currency;
use shared::types::Language;

use crate::auth::CurrentUser;
use crate::carts::{CartService, CartView};
use crate::core::ServerState;
use crate::utils::validation::{validate_add_quantity, validate_set_quantity};
use crate::utils::{AppResponse, AppResult, ok};

/// Display options accepted by every cart route
#[derive(Debug, Deserialize, Default)]
pub struct DisplayQuery {
    pub lang: Option<String>,
    pub currency: Option<String>,
}

impl DisplayQuery {
    fn resolve(&self) -> (Language, Currency) {
        (
            Language::parse_or_default(self.lang.as_deref().unwrap_or("en")),
            Currency::parse_or_default(self.currency.as_deref().unwrap_or("INR")),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
    pub variation_key: Option<String>,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub product_id: String,
    pub variation_key: Option<String>,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct RemoveItemQuery {
    pub product_id: String,
    pub variation_key: Option<String>,
    pub lang: Option<String>,
    pub currency: Option<String>,
}

/// GET /api/cart - materialized cart in the requested language/currency
pub async fn get_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(display): Query<DisplayQuery>,
) -> AppResult<Json<AppResponse<CartView>>> {
    let (language, currency) = display.resolve();
    let service = CartService::new(state.get_db());
    let view = service.view(&user.user_id, language, currency).await?;
    Ok(ok(view))
}

/// POST /api/cart - add quantity of a (product, variation) line
pub async fn add_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(display): Query<DisplayQuery>,
    Json(req): Json<AddItemRequest>,
) -> AppResult<Json<AppResponse<CartView>>> {
    let quantity = validate_add_quantity(req.quantity)?;
    let (language, currency) = display.resolve();
    let service = CartService::new(state.get_db());
    let view = service
        .add_item(
            &user.user_id,
            &req.product_id,
            req.variation_key.as_deref(),
            quantity,
            language,
            currency,
        )
        .await?;
    Ok(ok(view))
}

/// PUT /api/cart - overwrite a line's quantity (0 removes)
pub async fn set_quantity(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(display): Query<DisplayQuery>,
    Json(req): Json<SetQuantityRequest>,
) -> AppResult<Json<AppResponse<CartView>>> {
    let quantity = validate_set_quantity(req.quantity)?;
    let (language, currency) = display.resolve();
    let service = CartService::new(state.get_db());
    let view = service
        .set_quantity(
            &user.user_id,
            &req.product_id,
            req.variation_key.as_deref(),
            quantity,
            language,
            currency,
        )
        .await?;
    Ok(ok(view))
}

/// DELETE /api/cart - remove a line (idempotent)
pub async fn remove_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<RemoveItemQuery>,
) -> AppResult<Json<AppResponse<CartView>>> {
    let language = Language::parse_or_default(query.lang.as_deref().unwrap_or("en"));
    let currency = Currency::parse_or_default(query.currency.as_deref().unwrap_or("INR"));
    let service = CartService::new(state.get_db());
    let view = service
        .remove_item(
            &user.user_id,
            &query.product_id,
            query.variation_key.as_deref(),
            language,
            currency,
        )
        .await?;
    Ok(ok(view))
}
