//! Cart materialization
//!
//! Joins cart lines against current catalog data to produce display
//! rows in the caller's language/currency. Pure with respect to the
//! database: the caller supplies the product map.

use std::collections::HashMap;

use serde::Serialize;

use shared::currency::{self, Currency};
use shared::models::{Cart, Product};
use shared::types::Language;

/// One display row of the cart
#[derive(Debug, Clone, Serialize)]
pub struct CartRow {
    pub product_id: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_key: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: u32,
    /// `false` when the referenced variation no longer resolves; such a
    /// row has no price and is excluded from the total
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price_inr: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_total_inr: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_unit_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_line_total: Option<String>,
}

/// Materialized cart in the requested language/currency
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartRow>,
    /// Sum over resolvable rows only — never includes items that fail
    /// to resolve
    pub total_inr: i64,
    pub display_total: String,
    pub currency: Currency,
    pub language: Language,
}

impl CartView {
    pub fn empty(language: Language, currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            total_inr: 0,
            display_total: currency::format_inr(0, currency),
            currency,
            language,
        }
    }
}

/// Build the display view of a cart
///
/// Lines whose product no longer exists are dropped from the view and
/// reported back through `dangling` so the caller can prune the
/// persisted document. Lines whose *variation* alone fails to resolve
/// degrade to unavailable rows — visible, unpriced, never pruned.
pub fn materialize(
    cart: &Cart,
    products: &HashMap<String, Product>,
    language: Language,
    currency: Currency,
) -> (CartView, bool) {
    let mut items = Vec::with_capacity(cart.items.len());
    let mut total_inr = 0i64;
    let mut dangling = false;

    for line in &cart.items {
        let Some(product) = products.get(&line.product_id) else {
            dangling = true;
            continue;
        };

        let (unit_price, image) = match line.variation_key.as_deref() {
            Some(sku) => match product.variation_by_sku(sku) {
                Some(variation) => (
                    Some(variation.price_inr),
                    variation
                        .images
                        .first()
                        .or_else(|| product.images.first())
                        .cloned(),
                ),
                // Admin may be mid-edit on the variation list; degrade
                // rather than destroy the line
                None => (None, product.images.first().cloned()),
            },
            None => (Some(product.base_price_inr), product.images.first().cloned()),
        };

        let line_total = unit_price.map(|p| p * i64::from(line.quantity));
        if let Some(lt) = line_total {
            total_inr += lt;
        }

        items.push(CartRow {
            product_id: line.product_id.clone(),
            slug: product.slug.clone(),
            variation_key: line.variation_key.clone(),
            name: product.name.get(language).to_string(),
            image,
            quantity: line.quantity,
            available: unit_price.is_some(),
            unit_price_inr: unit_price,
            line_total_inr: line_total,
            display_unit_price: unit_price.map(|p| currency::format_inr(p, currency)),
            display_line_total: line_total.map(|t| currency::format_inr(t, currency)),
        });
    }

    let view = CartView {
        items,
        total_inr,
        display_total: currency::format_inr(total_inr, currency),
        currency,
        language,
    };
    (view, dangling)
}
