//! Cart Aggregate
//!
//! One cart per identity. Line items are keyed by
//! `(product_id, variation_key)`; `variation_key = None` is the
//! base-product sentinel for products without variations. The aggregate
//! holds the merge/update/removal semantics; pricing and display are the
//! server's concern (lines store references, never prices).

use serde::{Deserialize, Serialize};

use crate::util::now_millis;

/// A single cart line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLineItem {
    pub product_id: String,
    /// SKU of the selected variation; `None` for base-product lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_key: Option<String>,
    pub quantity: u32,
}

impl CartLineItem {
    fn matches(&self, product_id: &str, variation_key: Option<&str>) -> bool {
        self.product_id == product_id && self.variation_key.as_deref() == variation_key
    }
}

/// Cart document, one per identity
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Cart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<CartLineItem>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl Cart {
    /// Empty cart for an identity (created lazily on first add)
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: None,
            user_id: user_id.into(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line(&self, product_id: &str, variation_key: Option<&str>) -> Option<&CartLineItem> {
        self.items
            .iter()
            .find(|l| l.matches(product_id, variation_key))
    }

    /// Add `quantity` of a line, merging into an existing line for the
    /// same `(product_id, variation_key)` pair rather than duplicating it.
    ///
    /// Quantities below 1 are ignored; stock is deliberately not checked
    /// here (enforced at checkout).
    pub fn add_item(&mut self, product_id: &str, variation_key: Option<&str>, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self
            .items
            .iter_mut()
            .find(|l| l.matches(product_id, variation_key))
        {
            Some(line) => line.quantity += quantity,
            None => self.items.push(CartLineItem {
                product_id: product_id.to_string(),
                variation_key: variation_key.map(str::to_string),
                quantity,
            }),
        }
        self.touch();
    }

    /// Overwrite a line's quantity; 0 removes the line.
    ///
    /// Returns `false` when no such line exists.
    pub fn set_item_quantity(
        &mut self,
        product_id: &str,
        variation_key: Option<&str>,
        quantity: u32,
    ) -> bool {
        let Some(idx) = self
            .items
            .iter()
            .position(|l| l.matches(product_id, variation_key))
        else {
            return false;
        };
        if quantity == 0 {
            self.items.remove(idx);
        } else {
            self.items[idx].quantity = quantity;
        }
        self.touch();
        true
    }

    /// Remove a line. Removing an absent line is a no-op success.
    pub fn remove_item(&mut self, product_id: &str, variation_key: Option<&str>) {
        let before = self.items.len();
        self.items
            .retain(|l| !l.matches(product_id, variation_key));
        if self.items.len() != before {
            self.touch();
        }
    }

    /// Empty the cart (the document itself is kept)
    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = now_millis();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_merges_duplicate_lines() {
        let mut cart = Cart::new("user:u1");
        cart.add_item("product:p1", Some("RNG-18K-8"), 2);
        cart.add_item("product:p1", Some("RNG-18K-8"), 3);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
    }

    #[test]
    fn variation_key_distinguishes_lines() {
        let mut cart = Cart::new("user:u1");
        cart.add_item("product:p1", Some("RNG-18K-8"), 1);
        cart.add_item("product:p1", Some("RNG-22K-10"), 1);
        cart.add_item("product:p1", None, 1);
        assert_eq!(cart.items.len(), 3);
    }

    #[test]
    fn set_quantity_overwrites_and_zero_removes() {
        let mut cart = Cart::new("user:u1");
        cart.add_item("product:p1", None, 4);
        assert!(cart.set_item_quantity("product:p1", None, 2));
        assert_eq!(cart.items[0].quantity, 2);
        assert!(cart.set_item_quantity("product:p1", None, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_on_absent_line_reports_missing() {
        let mut cart = Cart::new("user:u1");
        assert!(!cart.set_item_quantity("product:p1", None, 2));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut cart = Cart::new("user:u1");
        cart.add_item("product:p1", None, 1);
        cart.remove_item("product:p2", None);
        cart.remove_item("product:p1", Some("SKU-X"));
        assert_eq!(cart.items.len(), 1);
        cart.remove_item("product:p1", None);
        cart.remove_item("product:p1", None);
        assert!(cart.is_empty());
    }

    #[test]
    fn zero_quantity_add_is_ignored() {
        let mut cart = Cart::new("user:u1");
        cart.add_item("product:p1", None, 0);
        assert!(cart.is_empty());
    }
}
