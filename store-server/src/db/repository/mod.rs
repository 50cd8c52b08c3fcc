//! Repository Module
//!
//! CRUD access to the document store. Ids flow through the whole stack
//! in `"table:key"` string form; queries cast record ids to strings on
//! the way out (`<string>id AS id`) and build record pointers with
//! `type::thing(...)` on the way in.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;
pub mod wishlist;

// Re-exports
pub use cart::CartRepository;
pub use order::OrderRepository;
pub use product::{ProductQuery, ProductRepository};
pub use user::UserRepository;
pub use wishlist::WishlistRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => crate::utils::AppError::not_found(msg),
            RepoError::Duplicate(msg) => crate::utils::AppError::conflict(msg),
            RepoError::Database(msg) => crate::utils::AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Strip the `table:` prefix from a record id string
pub fn record_key(id: &str) -> &str {
    id.split_once(':').map_or(id, |(_, key)| key)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_key_strips_table_prefix() {
        assert_eq!(record_key("user:abc123"), "abc123");
        assert_eq!(record_key("abc123"), "abc123");
    }
}
