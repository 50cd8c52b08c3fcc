//! Anonymous session cache
//!
//! Cart and wishlist state for a visitor who has not logged in. The
//! browser keeps this object in local storage; nothing is written to the
//! shared store until login, when [`LocalSession::take_sync_state`] is
//! posted to the sync endpoint and the server's unified state replaces
//! the local one. The server stays the sole source of truth for priced
//! totals — this cache holds references and quantities only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::product::Product;
use crate::variant::Selection;

/// Errors from local session operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The selected attribute combination resolves to no variation;
    /// the item cannot be added at any meaningful price
    #[error("selected combination is unavailable")]
    CombinationUnavailable,
    #[error("quantity must be at least 1")]
    InvalidQuantity,
}

/// One locally held cart line (also the sync wire format)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalCartItem {
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_key: Option<String>,
    pub quantity: u32,
}

/// Cart + wishlist snapshot exchanged with the sync endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SyncState {
    #[serde(default)]
    pub cart: Vec<LocalCartItem>,
    #[serde(default)]
    pub wishlist: Vec<String>,
}

/// Client-side cart/wishlist cache for an anonymous visitor
#[derive(Debug, Clone, Default)]
pub struct LocalSession {
    pub cart: Vec<LocalCartItem>,
    pub wishlist: Vec<String>,
}

impl LocalSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a selection against the product and add the result to the
    /// cart. An unresolvable combination is rejected before anything is
    /// stored — a line without a priceable variation must never exist.
    pub fn add_to_cart(
        &mut self,
        product: &Product,
        selection: &Selection,
        quantity: u32,
    ) -> Result<(), SessionError> {
        if quantity == 0 {
            return Err(SessionError::InvalidQuantity);
        }
        let product_id = product.id.clone().unwrap_or_default();
        let resolution = product.resolve(selection);
        if !resolution.is_available() {
            return Err(SessionError::CombinationUnavailable);
        }
        let variation_key = resolution.variation().map(|v| v.sku.clone());
        self.add_line(&product_id, variation_key.as_deref(), quantity);
        Ok(())
    }

    /// Raw merge-add, mirroring the cart aggregate semantics
    pub fn add_line(&mut self, product_id: &str, variation_key: Option<&str>, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.cart.iter_mut().find(|l| {
            l.product_id == product_id && l.variation_key.as_deref() == variation_key
        }) {
            Some(line) => line.quantity += quantity,
            None => self.cart.push(LocalCartItem {
                product_id: product_id.to_string(),
                variation_key: variation_key.map(str::to_string),
                quantity,
            }),
        }
    }

    /// Overwrite a line's quantity; 0 removes it
    pub fn set_quantity(&mut self, product_id: &str, variation_key: Option<&str>, quantity: u32) {
        if quantity == 0 {
            self.remove_line(product_id, variation_key);
            return;
        }
        if let Some(line) = self.cart.iter_mut().find(|l| {
            l.product_id == product_id && l.variation_key.as_deref() == variation_key
        }) {
            line.quantity = quantity;
        }
    }

    pub fn remove_line(&mut self, product_id: &str, variation_key: Option<&str>) {
        self.cart.retain(|l| {
            !(l.product_id == product_id && l.variation_key.as_deref() == variation_key)
        });
    }

    /// Toggle wishlist membership; returns `true` when added
    pub fn toggle_wishlist(&mut self, product_id: &str) -> bool {
        if self.wishlist.iter().any(|p| p == product_id) {
            self.wishlist.retain(|p| p != product_id);
            false
        } else {
            self.wishlist.push(product_id.to_string());
            true
        }
    }

    /// Drain the local state into a login-time sync payload
    pub fn take_sync_state(&mut self) -> SyncState {
        SyncState {
            cart: std::mem::take(&mut self.cart),
            wishlist: std::mem::take(&mut self.wishlist),
        }
    }

    /// Replace local state with the server's unified post-merge state
    pub fn apply_sync_state(&mut self, state: SyncState) {
        self.cart = state.cart;
        self.wishlist = state.wishlist;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::{LocalizedText, ProductOption, Variation};

    fn product_with_one_variation() -> Product {
        Product {
            id: Some("product:p1".to_string()),
            slug: "p1".to_string(),
            name: LocalizedText::new("Bangle", ""),
            description: LocalizedText::default(),
            base_price_inr: 30000,
            images: Vec::new(),
            category: "Bangles".to_string(),
            collection_name: "Festive".to_string(),
            stock: 0,
            is_featured: false,
            options: vec![ProductOption {
                name: "Purity".to_string(),
                values: vec!["22K".to_string(), "24K".to_string()],
            }],
            variations: vec![Variation {
                sku: "BNGL-22K".to_string(),
                name: "22K Gold".to_string(),
                price_inr: 32000,
                stock: 1,
                attributes: [("Purity".to_string(), "22K".to_string())].into(),
                images: Vec::new(),
            }],
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn unavailable_combination_is_rejected() {
        let product = product_with_one_variation();
        let mut session = LocalSession::new();
        let selection: Selection =
            [("Purity".to_string(), "24K".to_string())].into_iter().collect();
        assert_eq!(
            session.add_to_cart(&product, &selection, 1),
            Err(SessionError::CombinationUnavailable)
        );
        assert!(session.cart.is_empty());
    }

    #[test]
    fn resolvable_selection_stores_the_sku() {
        let product = product_with_one_variation();
        let mut session = LocalSession::new();
        let selection: Selection =
            [("Purity".to_string(), "22K".to_string())].into_iter().collect();
        session.add_to_cart(&product, &selection, 2).unwrap();
        assert_eq!(session.cart.len(), 1);
        assert_eq!(session.cart[0].variation_key.as_deref(), Some("BNGL-22K"));
        assert_eq!(session.cart[0].quantity, 2);
    }

    #[test]
    fn add_line_merges_duplicates() {
        let mut session = LocalSession::new();
        session.add_line("product:a", None, 1);
        session.add_line("product:a", None, 2);
        assert_eq!(session.cart.len(), 1);
        assert_eq!(session.cart[0].quantity, 3);
    }

    #[test]
    fn take_sync_state_drains_local_state() {
        let mut session = LocalSession::new();
        session.add_line("product:a", None, 1);
        session.toggle_wishlist("product:b");
        let state = session.take_sync_state();
        assert_eq!(state.cart.len(), 1);
        assert_eq!(state.wishlist, vec!["product:b".to_string()]);
        assert!(session.cart.is_empty());
        assert!(session.wishlist.is_empty());
    }

    #[test]
    fn apply_sync_state_adopts_server_view() {
        let mut session = LocalSession::new();
        session.add_line("product:stale", None, 9);
        session.apply_sync_state(SyncState {
            cart: vec![LocalCartItem {
                product_id: "product:a".to_string(),
                variation_key: None,
                quantity: 4,
            }],
            wishlist: vec!["product:b".to_string()],
        });
        assert_eq!(session.cart.len(), 1);
        assert_eq!(session.cart[0].quantity, 4);
        assert_eq!(session.wishlist, vec!["product:b".to_string()]);
    }
}
