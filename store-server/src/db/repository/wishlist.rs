//! Wishlist Repository
//!
//! One wishlist document per identity, keyed `wishlist:<user key>`.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::Wishlist;

use super::{BaseRepository, RepoResult, record_key};

const WISHLIST_FIELDS: &str = "<string>id AS id, user_id, products, created_at, updated_at";

#[derive(Clone)]
pub struct WishlistRepository {
    base: BaseRepository,
}

impl WishlistRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Option<Wishlist>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {WISHLIST_FIELDS} FROM type::thing('wishlist', $key)"
            ))
            .bind(("key", record_key(user_id).to_string()))
            .await?;
        let wishlists: Vec<Wishlist> = result.take(0)?;
        Ok(wishlists.into_iter().next())
    }

    /// Write the wishlist document, creating it when absent
    pub async fn upsert(&self, wishlist: &Wishlist) -> RepoResult<()> {
        let key = record_key(&wishlist.user_id).to_string();
        let mut doc = wishlist.clone();
        doc.id = None;

        self.base
            .db()
            .query("UPSERT type::thing('wishlist', $key) CONTENT $data RETURN NONE")
            .bind(("key", key))
            .bind(("data", doc))
            .await?
            .check()?;
        Ok(())
    }
}
