//! Order Snapshot Builder
//!
//! Converts a validated cart into an immutable order. This is the only
//! place money figures are computed from trusted data: every line is
//! re-resolved against the database at placement time, and the frozen
//! names/prices never change afterwards, whatever happens to the
//! catalog.
//!
//! The pipeline is strictly sequential and fail-fast; no step retries,
//! and any failure before order creation leaves no partial effect. The
//! final cart-clear is the single documented exception: if it fails
//! after the order document exists, the order still stands and the
//! stale cart is tolerated.

use std::collections::HashMap;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use shared::currency::Currency;
use shared::models::{CartLineItem, Order, OrderItem, OrderStatus, PaymentStatus, Product};
use shared::models::order::ShippingAddress;
use shared::util::now_millis;

use crate::db::repository::{CartRepository, OrderRepository, ProductRepository, UserRepository};
use crate::utils::{AppError, AppResult};

/// Checkout-time precondition failures; all abort placement with no
/// partial effect
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("no valid items in cart")]
    NoValidItems,

    #[error("shipping address not found")]
    AddressNotFound,
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyCart => AppError::business_rule("Your cart is empty"),
            CheckoutError::NoValidItems => AppError::business_rule("No valid items in cart"),
            CheckoutError::AddressNotFound => AppError::not_found("Shipping address"),
        }
    }
}

/// Freeze cart lines into order items against current catalog data
///
/// A line is skipped when its product is gone, or when it carries a
/// variation key that no longer resolves to a SKU — either way the line
/// has no trustworthy price. Names freeze to the canonical (English)
/// value, never a localized or currency-converted string.
pub fn freeze_items(
    lines: &[CartLineItem],
    products: &HashMap<String, Product>,
) -> Vec<OrderItem> {
    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        let Some(product) = products.get(&line.product_id) else {
            continue;
        };
        let unit_price_inr = match line.variation_key.as_deref() {
            Some(sku) => match product.variation_by_sku(sku) {
                Some(variation) => variation.price_inr,
                None => continue,
            },
            None => product.base_price_inr,
        };
        items.push(OrderItem {
            product_id: line.product_id.clone(),
            variation_name: line.variation_key.clone(),
            name: product.name.canonical().to_string(),
            unit_price_inr,
            quantity: line.quantity,
        });
    }
    items
}

#[derive(Clone)]
pub struct CheckoutService {
    products: ProductRepository,
    carts: CartRepository,
    orders: OrderRepository,
    users: UserRepository,
}

impl CheckoutService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            carts: CartRepository::new(db.clone()),
            orders: OrderRepository::new(db.clone()),
            users: UserRepository::new(db),
        }
    }

    /// Place an order from the identity's persisted cart
    pub async fn place_order(
        &self,
        user_id: &str,
        address_id: &str,
        currency: Currency,
    ) -> AppResult<Order> {
        // 1. Load the persisted cart; an absent document counts as empty
        let cart = self.carts.find_by_user(user_id).await?;
        let lines = cart.map(|c| c.items).unwrap_or_default();
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart.into());
        }

        // 2-3. Re-resolve every line from the database, right now
        let mut ids: Vec<String> = lines.iter().map(|l| l.product_id.clone()).collect();
        ids.sort();
        ids.dedup();
        let products: HashMap<String, Product> = self
            .products
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .filter_map(|p| p.id.clone().map(|id| (id, p)))
            .collect();

        let items = freeze_items(&lines, &products);
        if items.is_empty() {
            return Err(CheckoutError::NoValidItems.into());
        }

        // 4. Authoritative total, never recomputed afterwards
        let total_amount_inr: i64 = items.iter().map(OrderItem::line_total_inr).sum();

        // 5. Resolve and freeze the shipping address
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        let address = user
            .address(address_id)
            .ok_or(CheckoutError::AddressNotFound)?;

        // 6. Create the order (pay-on-delivery: payment stays Pending)
        let now = now_millis();
        let order = Order {
            id: None,
            user_id: user_id.to_string(),
            items,
            shipping_address: ShippingAddress::from(address),
            total_amount_inr,
            currency_at_purchase: currency.code().to_string(),
            payment_status: PaymentStatus::Pending,
            order_status: OrderStatus::Processing,
            created_at: now,
            updated_at: now,
        };
        let created = self.orders.create(order).await?;

        // 7. Clear the cart. Not transactional with the order write: a
        // failure here leaves a stale cart but the order stands.
        if let Err(e) = self.carts.clear(user_id).await {
            tracing::warn!(user_id, error = %e, "order placed but cart clear failed");
        }

        tracing::info!(
            user_id,
            order_id = created.id.as_deref().unwrap_or(""),
            total_inr = created.total_amount_inr,
            "order placed"
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::LocalizedText;
    use shared::models::product::{ProductOption, Variation};

    fn product(id: &str, base: i64) -> Product {
        Product {
            id: Some(id.to_string()),
            slug: id.replace(':', "-"),
            name: LocalizedText::new(format!("{id} name"), "hi"),
            description: LocalizedText::default(),
            base_price_inr: base,
            images: Vec::new(),
            category: "Rings".to_string(),
            collection_name: "Heritage".to_string(),
            stock: 5,
            is_featured: false,
            options: Vec::new(),
            variations: Vec::new(),
            created_at: 0,
            updated_at: 0,
        }
    }

    fn line(product_id: &str, key: Option<&str>, quantity: u32) -> CartLineItem {
        CartLineItem {
            product_id: product_id.to_string(),
            variation_key: key.map(str::to_string),
            quantity,
        }
    }

    #[test]
    fn freezes_variation_price_and_canonical_name() {
        let mut ring = product("product:r1", 8000);
        ring.options = vec![ProductOption {
            name: "Purity".to_string(),
            values: vec!["18K".to_string()],
        }];
        ring.variations = vec![Variation {
            sku: "RNG-18K-8".to_string(),
            name: "18K Gold - Size 8".to_string(),
            price_inr: 9000,
            stock: 1,
            attributes: [("Purity".to_string(), "18K".to_string())].into(),
            images: Vec::new(),
        }];
        let products = [("product:r1".to_string(), ring)].into();

        let items = freeze_items(&[line("product:r1", Some("RNG-18K-8"), 2)], &products);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit_price_inr, 9000);
        assert_eq!(items[0].variation_name.as_deref(), Some("RNG-18K-8"));
        assert_eq!(items[0].name, "product:r1 name");
        assert_eq!(items[0].line_total_inr(), 18000);
    }

    #[test]
    fn skips_deleted_products_and_dangling_variations() {
        let plain = product("product:a", 1000);
        let products = [("product:a".to_string(), plain)].into();

        let items = freeze_items(
            &[
                line("product:a", None, 1),
                line("product:gone", None, 2),
                line("product:a", Some("NO-SUCH-SKU"), 1),
            ],
            &products,
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit_price_inr, 1000);
    }

    #[test]
    fn total_matches_frozen_items() {
        let a = product("product:a", 1000);
        let b = product("product:b", 2500);
        let products = [
            ("product:a".to_string(), a),
            ("product:b".to_string(), b),
        ]
        .into();

        let items = freeze_items(
            &[line("product:a", None, 3), line("product:b", None, 2)],
            &products,
        );
        let total: i64 = items.iter().map(OrderItem::line_total_inr).sum();
        assert_eq!(total, 3 * 1000 + 2 * 2500);
    }
}
