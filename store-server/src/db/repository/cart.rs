//! Cart Repository
//!
//! One cart document per identity, keyed deterministically:
//! `cart:<user key>`. The whole document is written back on every
//! mutation (read-modify-write, last-write-wins).

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::Cart;
use shared::util::now_millis;

use super::{BaseRepository, RepoResult, record_key};

const CART_FIELDS: &str = "<string>id AS id, user_id, items, created_at, updated_at";

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Option<Cart>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {CART_FIELDS} FROM type::thing('cart', $key)"
            ))
            .bind(("key", record_key(user_id).to_string()))
            .await?;
        let carts: Vec<Cart> = result.take(0)?;
        Ok(carts.into_iter().next())
    }

    /// Write the cart document, creating it when absent
    /// (explicit create-if-absent contract)
    pub async fn upsert(&self, cart: &Cart) -> RepoResult<()> {
        let key = record_key(&cart.user_id).to_string();
        let mut doc = cart.clone();
        doc.id = None;

        self.base
            .db()
            .query("UPSERT type::thing('cart', $key) CONTENT $data RETURN NONE")
            .bind(("key", key))
            .bind(("data", doc))
            .await?
            .check()?;
        Ok(())
    }

    /// Empty the cart document (kept, not deleted); a missing document
    /// is a no-op
    pub async fn clear(&self, user_id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE type::thing('cart', $key) \
                 SET items = [], updated_at = $now RETURN NONE",
            )
            .bind(("key", record_key(user_id).to_string()))
            .bind(("now", now_millis()))
            .await?
            .check()?;
        Ok(())
    }
}
