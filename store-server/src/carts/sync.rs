//! Login-time Sync/Reconciliation
//!
//! Runs exactly once when an anonymous session authenticates: merges
//! the locally held cart/wishlist into the identity's persisted
//! documents and prunes dangling product references so the persisted
//! state converges to the resolvable subset.
//!
//! Merge rules:
//! - an incoming line whose product no longer exists is silently
//!   skipped (stale catalog references are expected, not errors);
//! - cart quantities ADD onto any persisted quantity for the same
//!   `(product, variation)` key — they never replace it;
//! - the wishlist merge is a set union.
//!
//! Pruning removes only lines whose *product* is gone; a variation that
//! temporarily fails to resolve stays in the cart and degrades to
//! "unavailable" in the view.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::client::{LocalCartItem, SyncState};
use shared::models::{Cart, Wishlist};

use crate::db::repository::{CartRepository, ProductRepository, WishlistRepository};
use crate::utils::AppResult;

#[derive(Clone)]
pub struct SyncService {
    products: ProductRepository,
    carts: CartRepository,
    wishlists: WishlistRepository,
}

impl SyncService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            carts: CartRepository::new(db.clone()),
            wishlists: WishlistRepository::new(db),
        }
    }

    /// Merge an anonymous session's state into the identity's persisted
    /// cart/wishlist and return the unified state for the client cache
    pub async fn sync(&self, user_id: &str, incoming: SyncState) -> AppResult<SyncState> {
        let mut cart = self
            .carts
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| Cart::new(user_id));
        let mut wishlist = self
            .wishlists
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| Wishlist::new(user_id));

        // One id-set membership query covers the incoming refs and the
        // persisted lines we may need to prune
        let mut candidates: Vec<String> = incoming
            .cart
            .iter()
            .map(|i| i.product_id.clone())
            .chain(incoming.wishlist.iter().cloned())
            .chain(cart.items.iter().map(|l| l.product_id.clone()))
            .collect();
        candidates.sort();
        candidates.dedup();
        let existing = self.products.existing_ids(&candidates).await?;

        let mut skipped = 0usize;
        for item in &incoming.cart {
            if item.quantity == 0 {
                continue;
            }
            if !existing.contains(&item.product_id) {
                skipped += 1;
                continue;
            }
            cart.add_item(&item.product_id, item.variation_key.as_deref(), item.quantity);
        }

        // Destructive prune: persisted lines whose product vanished
        let before = cart.items.len();
        cart.items.retain(|l| existing.contains(&l.product_id));
        let pruned = before - cart.items.len();

        self.carts.upsert(&cart).await?;

        for product_id in &incoming.wishlist {
            if existing.contains(product_id) {
                wishlist.insert(product_id);
            } else {
                skipped += 1;
            }
        }
        self.wishlists.upsert(&wishlist).await?;

        if skipped > 0 || pruned > 0 {
            tracing::debug!(user_id, skipped, pruned, "sync dropped stale references");
        }

        Ok(SyncState {
            cart: cart
                .items
                .iter()
                .map(|l| LocalCartItem {
                    product_id: l.product_id.clone(),
                    variation_key: l.variation_key.clone(),
                    quantity: l.quantity,
                })
                .collect(),
            wishlist: wishlist.products.clone(),
        })
    }
}
