//! Auth API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use shared::client::SyncState;
use shared::models::{Role, User, UserPublic};
use shared::util::now_millis;

use crate::auth::CurrentUser;
use crate::auth::password::{hash_password, verify_password};
use crate::carts::SyncService;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserPublic,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<AppResponse<AuthResponse>>> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    if !req.email.contains('@') {
        return Err(AppError::validation("email is not valid"));
    }
    if req.password.len() < MIN_PASSWORD_LEN || req.password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be {MIN_PASSWORD_LEN}-{MAX_PASSWORD_LEN} characters"
        )));
    }

    let repo = UserRepository::new(state.get_db());
    if repo.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::conflict("Email already registered"));
    }

    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let now = now_millis();
    let user = repo
        .create(User {
            id: None,
            name: req.name,
            email: req.email,
            password_hash: Some(password_hash),
            role: Role::User,
            addresses: Vec::new(),
            created_at: now,
            updated_at: now,
        })
        .await?;

    let user_id = user.id.clone().unwrap_or_default();
    let token = state
        .get_jwt_service()
        .generate_token(&user_id, user.role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    tracing::info!(%user_id, "user registered");
    Ok(ok_with_message(
        AuthResponse {
            token,
            user: user.into(),
        },
        "User registered successfully",
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<AuthResponse>>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_email(&req.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    // Accounts provisioned externally carry no password hash
    let hash = user
        .password_hash
        .as_deref()
        .ok_or_else(AppError::invalid_credentials)?;
    let valid = verify_password(&req.password, hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !valid {
        return Err(AppError::invalid_credentials());
    }

    let user_id = user.id.clone().unwrap_or_default();
    let token = state
        .get_jwt_service()
        .generate_token(&user_id, user.role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    Ok(ok(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<UserPublic>>> {
    let repo = UserRepository::new(state.get_db());
    let record = repo
        .find_by_id(&user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(ok(record.into()))
}

/// POST /api/auth/sync - merge the anonymous session into the
/// persisted cart/wishlist, once, at login
pub async fn sync(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(incoming): Json<SyncState>,
) -> AppResult<Json<AppResponse<SyncState>>> {
    let service = SyncService::new(state.get_db());
    let unified = service.sync(&user.user_id, incoming).await?;
    Ok(ok_with_message(unified, "Sync successful"))
}
