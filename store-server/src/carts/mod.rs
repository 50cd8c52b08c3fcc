//! Cart Service
//!
//! The authoritative cart per identity: merge-adds, quantity updates,
//! idempotent removal, and materialized views that converge the
//! persisted document to its resolvable subset (dangling product
//! references are pruned on read, at most once per read cycle).
//!
//! Mutations are read-modify-write against a single document;
//! concurrent requests for the same identity race last-write-wins by
//! design — cart edits are low-frequency and low-stakes.

pub mod sync;
pub mod view;

pub use sync::SyncService;
pub use view::{CartRow, CartView};

use std::collections::HashMap;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::currency::Currency;
use shared::models::{Cart, Product};
use shared::types::Language;

use crate::db::repository::{CartRepository, ProductRepository};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct CartService {
    products: ProductRepository,
    carts: CartRepository,
}

impl CartService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            carts: CartRepository::new(db),
        }
    }

    /// Add quantity of `(product, variation)` to the identity's cart,
    /// creating the cart if absent. Duplicate keys merge into one line.
    ///
    /// Stock is not checked here — checkout re-resolves everything.
    pub async fn add_item(
        &self,
        user_id: &str,
        product_id: &str,
        variation_key: Option<&str>,
        quantity: u32,
        language: Language,
        currency: Currency,
    ) -> AppResult<CartView> {
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {product_id}")))?;

        // Resolve the line key against the product's variation schema.
        // A cart line that cannot be priced must never be created.
        let normalized_key = if product.has_variations() {
            let sku = variation_key.ok_or_else(|| {
                AppError::validation("variation_key is required for this product")
            })?;
            if product.variation_by_sku(sku).is_none() {
                return Err(AppError::business_rule(
                    "Selected combination is unavailable",
                ));
            }
            Some(sku)
        } else {
            // Base-product sentinel; a stray key from the client is dropped
            None
        };

        let mut cart = self
            .carts
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| Cart::new(user_id));
        cart.add_item(product_id, normalized_key, quantity);
        self.carts.upsert(&cart).await?;

        self.materialize(&cart, language, currency).await.map(|(v, _)| v)
    }

    /// Overwrite a line's quantity; 0 removes the line
    pub async fn set_quantity(
        &self,
        user_id: &str,
        product_id: &str,
        variation_key: Option<&str>,
        quantity: u32,
        language: Language,
        currency: Currency,
    ) -> AppResult<CartView> {
        let mut cart = self
            .carts
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Cart"))?;

        if !cart.set_item_quantity(product_id, variation_key, quantity) {
            return Err(AppError::not_found("Item not in cart"));
        }
        self.carts.upsert(&cart).await?;

        self.materialize(&cart, language, currency).await.map(|(v, _)| v)
    }

    /// Remove a line; removing an absent line (or from an absent cart)
    /// is a success no-op
    pub async fn remove_item(
        &self,
        user_id: &str,
        product_id: &str,
        variation_key: Option<&str>,
        language: Language,
        currency: Currency,
    ) -> AppResult<CartView> {
        let Some(mut cart) = self.carts.find_by_user(user_id).await? else {
            return Ok(CartView::empty(language, currency));
        };
        cart.remove_item(product_id, variation_key);
        self.carts.upsert(&cart).await?;

        self.materialize(&cart, language, currency).await.map(|(v, _)| v)
    }

    /// Materialized cart for display; prunes product-dangling lines
    /// from the persisted document (one write-back per read cycle)
    pub async fn view(
        &self,
        user_id: &str,
        language: Language,
        currency: Currency,
    ) -> AppResult<CartView> {
        let Some(mut cart) = self.carts.find_by_user(user_id).await? else {
            return Ok(CartView::empty(language, currency));
        };

        let products = self.product_map(&cart).await?;
        let (view, dangling) = view::materialize(&cart, &products, language, currency);
        if dangling {
            cart.items.retain(|l| products.contains_key(&l.product_id));
            self.carts.upsert(&cart).await?;
            tracing::info!(user_id, "pruned dangling cart lines");
        }
        Ok(view)
    }

    async fn product_map(&self, cart: &Cart) -> AppResult<HashMap<String, Product>> {
        let mut ids: Vec<String> = cart.items.iter().map(|l| l.product_id.clone()).collect();
        ids.sort();
        ids.dedup();
        let products = self.products.find_by_ids(&ids).await?;
        Ok(products
            .into_iter()
            .filter_map(|p| p.id.clone().map(|id| (id, p)))
            .collect())
    }

    async fn materialize(
        &self,
        cart: &Cart,
        language: Language,
        currency: Currency,
    ) -> AppResult<(CartView, bool)> {
        let products = self.product_map(cart).await?;
        Ok(view::materialize(cart, &products, language, currency))
    }
}
