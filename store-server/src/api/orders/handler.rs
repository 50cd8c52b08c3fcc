//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use shared::currency::Currency;
use shared::models::{Order, OrderStatus};

use crate::auth::CurrentUser;
use crate::checkout::CheckoutService;
use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub address_id: String,
    /// Display currency the buyer was browsing in; totals stay INR
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// POST /api/orders - place an order from the persisted cart
pub async fn place(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<PlaceOrderRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    let currency = Currency::parse_or_default(req.currency.as_deref().unwrap_or("INR"));
    let service = CheckoutService::new(state.get_db());
    let order = service
        .place_order(&user.user_id, &req.address_id, currency)
        .await?;
    Ok(ok_with_message(order, "Order placed successfully"))
}

/// GET /api/orders - the identity's order history, newest first
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    let repo = OrderRepository::new(state.get_db());
    let orders = repo.find_by_user(&user.user_id).await?;
    Ok(ok(orders))
}

/// GET /api/orders/{id} - order detail, scoped to the identity
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Order>>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .find_for_user(&id, &user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;
    Ok(ok(order))
}

/// PUT /api/orders/{id}/status - admin: advance the fulfilment state
/// machine (illegal transitions are rejected)
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    user.require_admin()?;

    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;

    if !order.order_status.can_transition_to(req.status) {
        return Err(AppError::business_rule(format!(
            "Cannot transition order from {:?} to {:?}",
            order.order_status, req.status
        )));
    }

    repo.update_status(&id, req.status).await?;
    let updated = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;
    Ok(ok_with_message(updated, "Order status updated"))
}
