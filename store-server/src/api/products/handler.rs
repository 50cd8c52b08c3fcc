//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::variant::validate_variations;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{ProductQuery, ProductRepository};
use crate::utils::validation::{MAX_KEY_LEN, MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

const DEFAULT_PAGE_SIZE: u32 = 12;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub collection: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    /// Comma-separated id-set lookup; bypasses pagination
    pub ids: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub total_count: u64,
    pub has_more: bool,
}

/// GET /api/products - paginated catalog listing with filters
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<ProductListResponse>>> {
    let repo = ProductRepository::new(state.get_db());

    // Explicit id-set lookup (used by the wishlist page and similar)
    if let Some(ids) = &query.ids {
        let ids: Vec<String> = ids
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let products = repo.find_by_ids(&ids).await?;
        let total = products.len() as u64;
        return Ok(ok(ProductListResponse {
            products,
            total_count: total,
            has_more: false,
        }));
    }

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);
    let (products, total_count) = repo
        .find_page(&ProductQuery {
            category: query.category,
            collection: query.collection,
            featured: query.featured,
            search: query.search,
            page,
            limit,
        })
        .await?;

    let has_more = total_count > u64::from(page) * u64::from(limit);
    Ok(ok(ProductListResponse {
        products,
        total_count,
        has_more,
    }))
}

/// GET /api/products/{slug}
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<AppResponse<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {slug}")))?;
    Ok(ok(product))
}

/// POST /api/products - admin: create a product
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<AppResponse<Product>>> {
    user.require_admin()?;

    validate_required_text(&payload.slug, "slug", MAX_KEY_LEN)?;
    validate_required_text(&payload.name.en, "name.en", MAX_NAME_LEN)?;
    if payload.base_price_inr < 0 {
        return Err(AppError::validation("base_price_inr must not be negative"));
    }
    let options = payload.options.clone().unwrap_or_default();
    let variations = payload.variations.clone().unwrap_or_default();
    validate_variations(&options, &variations).map_err(AppError::validation)?;

    let repo = ProductRepository::new(state.get_db());
    let product = repo.create(payload).await?;
    Ok(ok_with_message(product, "Product created successfully"))
}

/// PUT /api/products/{slug} - admin: partial update
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(slug): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<AppResponse<Product>>> {
    user.require_admin()?;

    let repo = ProductRepository::new(state.get_db());
    let existing = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {slug}")))?;

    // Validate the option/variation shape that will result from the merge
    let options = payload.options.clone().unwrap_or(existing.options);
    let variations = payload.variations.clone().unwrap_or(existing.variations);
    validate_variations(&options, &variations).map_err(AppError::validation)?;
    if let Some(price) = payload.base_price_inr
        && price < 0
    {
        return Err(AppError::validation("base_price_inr must not be negative"));
    }

    let product = repo
        .update_by_slug(&slug, payload)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {slug}")))?;
    Ok(ok_with_message(product, "Product updated successfully"))
}

/// DELETE /api/products/{slug} - admin
pub async fn remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(slug): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    user.require_admin()?;

    let repo = ProductRepository::new(state.get_db());
    if !repo.delete_by_slug(&slug).await? {
        return Err(AppError::not_found(format!("Product {slug}")));
    }
    Ok(ok_with_message((), "Product deleted successfully"))
}
