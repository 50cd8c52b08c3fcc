//! Wishlist Model

use serde::{Deserialize, Serialize};

use crate::util::now_millis;

/// Wishlist document, one per identity; `products` is a set
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Wishlist {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl Wishlist {
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: None,
            user_id: user_id.into(),
            products: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.products.iter().any(|p| p == product_id)
    }

    /// Insert without duplicating; returns whether the set changed
    pub fn insert(&mut self, product_id: &str) -> bool {
        if self.contains(product_id) {
            return false;
        }
        self.products.push(product_id.to_string());
        self.updated_at = now_millis();
        true
    }

    /// Toggle membership; returns `true` when the product was added
    pub fn toggle(&mut self, product_id: &str) -> bool {
        if self.contains(product_id) {
            self.products.retain(|p| p != product_id);
            self.updated_at = now_millis();
            false
        } else {
            self.insert(product_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_a_set_union() {
        let mut wishlist = Wishlist::new("user:u1");
        assert!(wishlist.insert("product:a"));
        assert!(!wishlist.insert("product:a"));
        assert_eq!(wishlist.products.len(), 1);
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut wishlist = Wishlist::new("user:u1");
        assert!(wishlist.toggle("product:a"));
        assert!(wishlist.contains("product:a"));
        assert!(!wishlist.toggle("product:a"));
        assert!(!wishlist.contains("product:a"));
    }
}
