//! Product Repository
//!
//! Catalog lookups for the storefront (by slug, id and id-set) plus the
//! admin mutations. The cart/order core only ever reads through this
//! repository — it never mutates the catalog.

use std::collections::HashSet;

use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::util::now_millis;

use super::{BaseRepository, RepoError, RepoResult, record_key};

const PRODUCT_FIELDS: &str = "<string>id AS id, slug, name, description, base_price_inr, \
     images, category, collection_name, stock, is_featured, options, variations, \
     created_at, updated_at";

/// Catalog listing filters (all optional)
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub collection: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub page: u32,
    pub limit: u32,
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Fetch a single product by full record id (`product:<key>`)
    ///
    /// An unparseable id behaves like a missing product — stale cart
    /// references must degrade, not error.
    pub async fn find_by_id(&self, product_id: &str) -> RepoResult<Option<Product>> {
        let Ok(record_id) = product_id.parse::<RecordId>() else {
            return Ok(None);
        };
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {PRODUCT_FIELDS} FROM product WHERE id = $id"))
            .bind(("id", record_id))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Product>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {PRODUCT_FIELDS} FROM product WHERE slug = $slug"
            ))
            .bind(("slug", slug.to_string()))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Id-set lookup: all products whose id appears in `ids`, in one query
    pub async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Product>> {
        let record_ids: Vec<RecordId> = ids
            .iter()
            .filter_map(|id| id.parse::<RecordId>().ok())
            .collect();
        if record_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {PRODUCT_FIELDS} FROM product WHERE id IN $ids"
            ))
            .bind(("ids", record_ids))
            .await?;
        Ok(result.take(0)?)
    }

    /// Which of the given ids reference an existing product
    pub async fn existing_ids(&self, ids: &[String]) -> RepoResult<HashSet<String>> {
        #[derive(Debug, Deserialize)]
        struct IdRow {
            id: String,
        }

        let record_ids: Vec<RecordId> = ids
            .iter()
            .filter_map(|id| id.parse::<RecordId>().ok())
            .collect();
        if record_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let mut result = self
            .base
            .db()
            .query("SELECT <string>id AS id FROM product WHERE id IN $ids")
            .bind(("ids", record_ids))
            .await?;
        let rows: Vec<IdRow> = result.take(0)?;
        Ok(rows.into_iter().map(|r| r.id).collect())
    }

    /// Paginated catalog listing with optional filters; returns the page
    /// and the total match count
    pub async fn find_page(&self, query: &ProductQuery) -> RepoResult<(Vec<Product>, u64)> {
        let mut conditions: Vec<&str> = Vec::new();
        if query.category.is_some() {
            conditions.push("category = $category");
        }
        if query.collection.is_some() {
            conditions.push("collection_name = $collection");
        }
        if query.featured == Some(true) {
            conditions.push("is_featured = true");
        }
        if query.search.is_some() {
            conditions.push(
                "(string::contains(string::lowercase(name.en), $search) \
                 OR string::contains(string::lowercase(description.en), $search))",
            );
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let limit = query.limit.max(1);
        let start = query.page.saturating_sub(1) * limit;

        let page_sql = format!(
            "SELECT {PRODUCT_FIELDS} FROM product{where_clause} \
             ORDER BY created_at DESC LIMIT $limit START $start"
        );
        let count_sql = format!("SELECT count() AS total FROM product{where_clause} GROUP ALL");

        let mut q = self
            .base
            .db()
            .query(page_sql)
            .query(count_sql)
            .bind(("limit", i64::from(limit)))
            .bind(("start", i64::from(start)));
        if let Some(category) = &query.category {
            q = q.bind(("category", category.clone()));
        }
        if let Some(collection) = &query.collection {
            q = q.bind(("collection", collection.clone()));
        }
        if let Some(search) = &query.search {
            q = q.bind(("search", search.to_lowercase()));
        }

        let mut result = q.await?;
        let products: Vec<Product> = result.take(0)?;

        #[derive(Debug, Deserialize)]
        struct CountRow {
            total: u64,
        }
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map_or(0, |c| c.total);

        Ok((products, total))
    }

    /// Admin: create a product
    pub async fn create(&self, payload: ProductCreate) -> RepoResult<Product> {
        let key = uuid::Uuid::new_v4().simple().to_string();
        let now = now_millis();
        let product = Product {
            id: None,
            slug: payload.slug,
            name: payload.name,
            description: payload.description,
            base_price_inr: payload.base_price_inr,
            images: payload.images.unwrap_or_default(),
            category: payload.category,
            collection_name: payload.collection_name,
            stock: payload.stock.unwrap_or(0),
            is_featured: payload.is_featured.unwrap_or(false),
            options: payload.options.unwrap_or_default(),
            variations: payload.variations.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        self.base
            .db()
            .query("CREATE type::thing('product', $key) CONTENT $data RETURN NONE")
            .bind(("key", key.clone()))
            .bind(("data", product))
            .await?
            .check()
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("product_slug") {
                    RepoError::Duplicate("Product slug already exists".to_string())
                } else {
                    RepoError::Database(msg)
                }
            })?;

        self.find_by_id(&format!("product:{key}"))
            .await?
            .ok_or_else(|| RepoError::Database("Created product not readable".to_string()))
    }

    /// Admin: partial update by slug
    pub async fn update_by_slug(
        &self,
        slug: &str,
        update: ProductUpdate,
    ) -> RepoResult<Option<Product>> {
        let Some(existing) = self.find_by_slug(slug).await? else {
            return Ok(None);
        };
        let id = existing.id.unwrap_or_default();
        let key = record_key(&id).to_string();

        let mut data = serde_json::to_value(&update)
            .map_err(|e| RepoError::Database(format!("Unserializable update: {e}")))?;
        data["updated_at"] = serde_json::Value::from(now_millis());

        self.base
            .db()
            .query("UPDATE type::thing('product', $key) MERGE $data RETURN NONE")
            .bind(("key", key))
            .bind(("data", data))
            .await?
            .check()?;

        self.find_by_id(&id).await
    }

    /// Admin: delete by slug; returns whether anything was removed
    pub async fn delete_by_slug(&self, slug: &str) -> RepoResult<bool> {
        let Some(existing) = self.find_by_slug(slug).await? else {
            return Ok(false);
        };
        let id = existing.id.unwrap_or_default();
        let key = record_key(&id).to_string();

        self.base
            .db()
            .query("DELETE type::thing('product', $key)")
            .bind(("key", key))
            .await?
            .check()?;
        Ok(true)
    }
}
