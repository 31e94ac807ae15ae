use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::database::user_store::UserStore;
use crate::dto::user_dto::{UserListQuery, UserPayload};
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::validation::validate_user_payload;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

#[derive(Debug)]
pub struct UserPage {
    pub items: Vec<User>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Lenient positive-integer parsing for query parameters. The leading integer
/// is read (`"3.5"` is 3, `"2abc"` is 2); anything without one, or below 1,
/// falls back to `default`.
pub fn parse_positive(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(leading_integer)
        .filter(|v| *v >= 1)
        .unwrap_or(default)
}

fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let sign_len = usize::from(raw.starts_with(['+', '-']));
    let digits_len = raw[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    raw[..sign_len + digits_len].parse().ok()
}

pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 {
        0
    } else {
        (total - 1) / limit + 1
    }
}

/// Case-insensitive substring match over first name, last name, email and
/// "first last".
pub fn matches_search(user: &User, needle_lower: &str) -> bool {
    [
        user.first_name.to_lowercase(),
        user.last_name.to_lowercase(),
        user.email.to_lowercase(),
        user.full_name().to_lowercase(),
    ]
    .iter()
    .any(|field| field.contains(needle_lower))
}

/// Path ids that are not UUIDs cannot exist in the store.
pub fn parse_user_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| Error::user_not_found())
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: UserPayload) -> Result<User> {
        let new_user = validate_user_payload(payload)?;

        if self.store.find_by_email(&new_user.email).await?.is_some() {
            warn!(email = %new_user.email, "rejecting duplicate email on create");
            return Err(Error::duplicate_email());
        }

        let user = self.store.insert(new_user).await?;
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn list(&self, query: UserListQuery) -> Result<UserPage> {
        let page = parse_positive(query.page.as_deref(), DEFAULT_PAGE);
        let limit = parse_positive(query.limit.as_deref(), DEFAULT_LIMIT);
        let offset = (page - 1).saturating_mul(limit);

        let items = self.store.list_page(offset, limit).await?;
        let total = self.store.count().await?;

        Ok(UserPage {
            items,
            total,
            page,
            limit,
            total_pages: total_pages(total, limit),
        })
    }

    pub async fn get_by_id(&self, id: &str) -> Result<User> {
        let id = parse_user_id(id)?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(Error::user_not_found)
    }

    pub async fn update(&self, id: &str, payload: UserPayload) -> Result<User> {
        let current = self.get_by_id(id).await?;
        let new_user = validate_user_payload(payload)?;

        if new_user.email != current.email.to_lowercase() {
            if let Some(other) = self.store.find_by_email(&new_user.email).await? {
                if other.id != current.id {
                    warn!(user_id = %current.id, email = %new_user.email, "rejecting duplicate email on update");
                    return Err(Error::duplicate_email());
                }
            }
        }

        let user = self
            .store
            .replace(current.id, new_user)
            .await?
            .ok_or_else(Error::user_not_found)?;
        info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = parse_user_id(id)?;
        if !self.store.delete(id).await? {
            return Err(Error::user_not_found());
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Full scan of the collection. Fine for small directories; an indexed
    /// query must keep the exact same matching semantics.
    pub async fn search(&self, query: Option<&str>) -> Result<Vec<User>> {
        let needle = query.unwrap_or_default().trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let users = self.store.list_all().await?;
        Ok(users
            .into_iter()
            .filter(|user| matches_search(user, &needle))
            .collect())
    }

    pub async fn list_all(&self) -> Result<Vec<User>> {
        self.store.list_all().await
    }
}
