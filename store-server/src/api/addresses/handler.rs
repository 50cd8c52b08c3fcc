//! Address Book API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use shared::models::{Address, User};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::utils::validation::{MAX_ADDRESS_LEN, MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct AddressCreate {
    pub full_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: String,
    pub is_default: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct AddressUpdate {
    pub id: String,
    pub full_name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub is_default: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct AddressDeleteQuery {
    pub id: String,
}

async fn load_user(state: &ServerState, user_id: &str) -> AppResult<User> {
    UserRepository::new(state.get_db())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))
}

fn validate_create(req: &AddressCreate) -> AppResult<()> {
    validate_required_text(&req.full_name, "full_name", MAX_NAME_LEN)?;
    validate_required_text(&req.street, "street", MAX_ADDRESS_LEN)?;
    validate_required_text(&req.city, "city", MAX_NAME_LEN)?;
    validate_required_text(&req.state, "state", MAX_NAME_LEN)?;
    validate_required_text(&req.zip_code, "zip_code", MAX_NAME_LEN)?;
    validate_required_text(&req.country, "country", MAX_NAME_LEN)?;
    validate_required_text(&req.phone, "phone", MAX_NAME_LEN)?;
    Ok(())
}

/// GET /api/account/addresses
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<Address>>>> {
    let record = load_user(&state, &user.user_id).await?;
    Ok(ok(record.addresses))
}

/// POST /api/account/addresses
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<AddressCreate>,
) -> AppResult<Json<AppResponse<Vec<Address>>>> {
    validate_create(&req)?;

    let mut record = load_user(&state, &user.user_id).await?;
    let is_default = req.is_default.unwrap_or(record.addresses.is_empty());
    if is_default {
        for address in &mut record.addresses {
            address.is_default = false;
        }
    }
    record.addresses.push(Address {
        id: uuid::Uuid::new_v4().simple().to_string(),
        full_name: req.full_name,
        street: req.street,
        city: req.city,
        state: req.state,
        zip_code: req.zip_code,
        country: req.country,
        phone: req.phone,
        is_default,
    });

    UserRepository::new(state.get_db())
        .update_addresses(&user.user_id, record.addresses.clone())
        .await?;
    Ok(ok_with_message(record.addresses, "Address added successfully"))
}

/// PUT /api/account/addresses
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<AddressUpdate>,
) -> AppResult<Json<AppResponse<Vec<Address>>>> {
    let mut record = load_user(&state, &user.user_id).await?;

    let make_default = req.is_default == Some(true);
    if make_default {
        for address in &mut record.addresses {
            address.is_default = false;
        }
    }

    let address = record
        .addresses
        .iter_mut()
        .find(|a| a.id == req.id)
        .ok_or_else(|| AppError::not_found("Address"))?;
    if let Some(v) = req.full_name {
        address.full_name = v;
    }
    if let Some(v) = req.street {
        address.street = v;
    }
    if let Some(v) = req.city {
        address.city = v;
    }
    if let Some(v) = req.state {
        address.state = v;
    }
    if let Some(v) = req.zip_code {
        address.zip_code = v;
    }
    if let Some(v) = req.country {
        address.country = v;
    }
    if let Some(v) = req.phone {
        address.phone = v;
    }
    if make_default {
        address.is_default = true;
    }

    UserRepository::new(state.get_db())
        .update_addresses(&user.user_id, record.addresses.clone())
        .await?;
    Ok(ok_with_message(record.addresses, "Address updated successfully"))
}

/// DELETE /api/account/addresses?id=... (silent no-op when absent)
pub async fn remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<AddressDeleteQuery>,
) -> AppResult<Json<AppResponse<Vec<Address>>>> {
    let mut record = load_user(&state, &user.user_id).await?;
    record.addresses.retain(|a| a.id != query.id);

    UserRepository::new(state.get_db())
        .update_addresses(&user.user_id, record.addresses.clone())
        .await?;
    Ok(ok_with_message(record.addresses, "Address deleted successfully"))
}
