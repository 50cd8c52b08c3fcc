//! User Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::{Address, User};
use shared::util::now_millis;

use super::{BaseRepository, RepoError, RepoResult, record_key};

const USER_FIELDS: &str = "<string>id AS id, name, email, password_hash, role, addresses, \
     created_at, updated_at";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, user: User) -> RepoResult<User> {
        let key = uuid::Uuid::new_v4().simple().to_string();
        let mut doc = user;
        doc.id = None;

        self.base
            .db()
            .query("CREATE type::thing('user', $key) CONTENT $data RETURN NONE")
            .bind(("key", key.clone()))
            .bind(("data", doc))
            .await?
            .check()
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("user_email") {
                    RepoError::Duplicate("Email already registered".to_string())
                } else {
                    RepoError::Database(msg)
                }
            })?;

        self.find_by_id(&format!("user:{key}"))
            .await?
            .ok_or_else(|| RepoError::Database("Created user not readable".to_string()))
    }

    pub async fn find_by_id(&self, user_id: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {USER_FIELDS} FROM type::thing('user', $key)"
            ))
            .bind(("key", record_key(user_id).to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {USER_FIELDS} FROM user WHERE email = $email"
            ))
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Replace the embedded address book
    pub async fn update_addresses(
        &self,
        user_id: &str,
        addresses: Vec<Address>,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE type::thing('user', $key) \
                 SET addresses = $addresses, updated_at = $now RETURN NONE",
            )
            .bind(("key", record_key(user_id).to_string()))
            .bind(("addresses", addresses))
            .bind(("now", now_millis()))
            .await?
            .check()?;
        Ok(())
    }
}
