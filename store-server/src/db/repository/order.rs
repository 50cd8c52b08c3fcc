//! Order Repository
//!
//! Orders are written once at placement and only their status field is
//! ever updated afterwards; the item snapshots stay immutable.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::{Order, OrderStatus};
use shared::util::now_millis;

use super::{BaseRepository, RepoError, RepoResult, record_key};

const ORDER_FIELDS: &str = "<string>id AS id, user_id, items, shipping_address, \
     total_amount_inr, currency_at_purchase, payment_status, order_status, \
     created_at, updated_at";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let key = uuid::Uuid::new_v4().simple().to_string();
        let mut doc = order;
        doc.id = None;

        self.base
            .db()
            .query("CREATE type::thing('order', $key) CONTENT $data RETURN NONE")
            .bind(("key", key.clone()))
            .bind(("data", doc))
            .await?
            .check()?;

        self.find_by_id(&format!("order:{key}"))
            .await?
            .ok_or_else(|| RepoError::Database("Created order not readable".to_string()))
    }

    pub async fn find_by_id(&self, order_id: &str) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_FIELDS} FROM type::thing('order', $key)"
            ))
            .bind(("key", record_key(order_id).to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Order detail scoped to its owner (lookup never leaks across users)
    pub async fn find_for_user(
        &self,
        order_id: &str,
        user_id: &str,
    ) -> RepoResult<Option<Order>> {
        Ok(self
            .find_by_id(order_id)
            .await?
            .filter(|o| o.user_id == user_id))
    }

    /// Order history for an identity, newest first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_FIELDS} FROM order WHERE user_id = $user_id \
                 ORDER BY created_at DESC"
            ))
            .bind(("user_id", user_id.to_string()))
            .await?;
        Ok(result.take(0)?)
    }

    pub async fn update_status(&self, order_id: &str, status: OrderStatus) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE type::thing('order', $key) \
                 SET order_status = $status, updated_at = $now RETURN NONE",
            )
            .bind(("key", record_key(order_id).to_string()))
            .bind(("status", status))
            .bind(("now", now_millis()))
            .await?
            .check()?;
        Ok(())
    }
}
