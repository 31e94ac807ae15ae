use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{Gender, User, UserStatus};
use crate::services::user_service::UserPage;

/// Body accepted by create and update. Every key is optional on the wire so a
/// missing field surfaces as a validation error instead of a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPayload {
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: String,
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: String,
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "lenient_string")]
    pub mobile: String,
    #[schema(example = "Male")]
    #[serde(deserialize_with = "lenient_opt_string")]
    pub gender: Option<String>,
    #[schema(example = "Active")]
    #[serde(deserialize_with = "lenient_opt_string")]
    pub status: Option<String>,
    /// Data URI of the profile image.
    #[serde(deserialize_with = "lenient_opt_string")]
    pub profile: Option<String>,
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
}

/// Scalar JSON values are read as their text form and `null` as absent, so
/// form clients sending numbers or nulls hit the validation rules instead of a
/// parse failure.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

impl UserPayload {
    pub fn normalized(self) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            mobile: self.mobile,
            gender: non_empty(self.gender),
            status: non_empty(self.status),
            profile: non_empty(self.profile),
            location: self.location.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub gender: Gender,
    pub status: UserStatus,
    pub profile: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub limit: i64,
}

/// Raw `page`/`limit` strings; parsing is lenient and happens in the service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UserListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UserSearchQuery {
    pub q: Option<String>,
}

/// Uniform JSON envelope for successful responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            pagination: None,
        }
    }

    pub fn paginated(data: T, pagination: PaginationMeta) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::data(data)
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            pagination: None,
        }
    }
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            mobile: value.mobile,
            gender: value.gender,
            status: value.status,
            profile: value.profile,
            location: value.location,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<UserPage> for ApiResponse<Vec<UserResponse>> {
    fn from(value: UserPage) -> Self {
        let pagination = PaginationMeta {
            current_page: value.page,
            total_pages: value.total_pages,
            total_count: value.total,
            limit: value.limit,
        };
        Self::paginated(value.items.into_iter().map(Into::into).collect(), pagination)
    }
}
