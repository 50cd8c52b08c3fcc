//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) plus startup schema definition.

pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at `db_path`
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns("swarna")
            .use_db("store")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_schema(&db).await?;

        tracing::info!("Database connection established ({})", db_path.display());

        Ok(Self { db })
    }

    /// Uniqueness constraints the storefront relies on
    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        db.query("DEFINE INDEX IF NOT EXISTS product_slug ON product FIELDS slug UNIQUE")
            .query("DEFINE INDEX IF NOT EXISTS user_email ON user FIELDS email UNIQUE")
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
        Ok(())
    }
}
