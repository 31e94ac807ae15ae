use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::user::{NewUser, User};

/// Persistence port for the user collection.
///
/// Listing methods return records newest first. Implementations must enforce
/// case-insensitive email uniqueness themselves and report a collision as
/// `Error::Conflict`; the service-level pre-check is only a fast path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<User>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    /// `email` is expected to be lower-cased already.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<User>>;
    async fn count(&self) -> Result<i64>;
    async fn list_all(&self) -> Result<Vec<User>>;
    /// Replaces every mutable field and refreshes `updated_at`. `None` when the
    /// record no longer exists.
    async fn replace(&self, id: Uuid, user: NewUser) -> Result<Option<User>>;
    /// Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

const USER_COLUMNS: &str = "id, first_name, last_name, email, mobile, gender, status, profile, location, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User> {
        let query = format!(
            r#"
            INSERT INTO users (first_name, last_name, email, mobile, gender, status, profile, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let created = sqlx::query_as::<_, User>(&query)
            .bind(user.first_name)
            .bind(user.last_name)
            .bind(user.email)
            .bind(user.mobile)
            .bind(user.gender)
            .bind(user.status)
            .bind(user.profile)
            .bind(user.location)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<User>> {
        let query = format!(
            "SELECT {} FROM users ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
            USER_COLUMNS
        );
        let items = sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        let query = format!(
            "SELECT {} FROM users ORDER BY created_at DESC, id DESC",
            USER_COLUMNS
        );
        let items = sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn replace(&self, id: Uuid, user: NewUser) -> Result<Option<User>> {
        let query = format!(
            r#"
            UPDATE users
            SET
                first_name = $2,
                last_name = $3,
                email = $4,
                mobile = $5,
                gender = $6,
                status = $7,
                profile = $8,
                location = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let updated = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(user.first_name)
            .bind(user.last_name)
            .bind(user.email)
            .bind(user.mobile)
            .bind(user.gender)
            .bind(user.status)
            .bind(user.profile)
            .bind(user.location)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() > 0)
    }
}
