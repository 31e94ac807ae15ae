#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use uuid::Uuid;

use user_directory::{
    database::user_store::UserStore,
    error::{Error, Result},
    models::user::{NewUser, User},
    routes, AppState,
};

/// In-process store with the same ordering and uniqueness rules as the
/// Postgres adapter. Records are kept in insertion (creation) order.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn email_taken(users: &[User], email: &str, except: Option<Uuid>) -> bool {
        let email = email.to_lowercase();
        users
            .iter()
            .any(|u| Some(u.id) != except && u.email.to_lowercase() == email)
    }

    fn newest_first(&self) -> Vec<User> {
        let mut users = self.users.lock().unwrap().clone();
        users.reverse();
        users
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if Self::email_taken(&users, &user.email, None) {
            return Err(Error::duplicate_email());
        }
        let created_at = Utc::now();
        let stored = User {
            id: Uuid::new_v4(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            mobile: user.mobile,
            gender: user.gender,
            status: user.status,
            profile: user.profile,
            location: user.location,
            created_at,
            updated_at: created_at,
        };
        users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_lowercase();
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.to_lowercase() == email)
            .cloned())
    }

    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<User>> {
        Ok(self
            .newest_first()
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.len() as i64)
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        Ok(self.newest_first())
    }

    async fn replace(&self, id: Uuid, user: NewUser) -> Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        if Self::email_taken(&users, &user.email, Some(id)) {
            return Err(Error::duplicate_email());
        }
        let Some(existing) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        existing.first_name = user.first_name;
        existing.last_name = user.last_name;
        existing.email = user.email;
        existing.mobile = user.mobile;
        existing.gender = user.gender;
        existing.status = user.status;
        existing.profile = user.profile;
        existing.location = user.location;
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }
}

/// Store whose every call fails as if the database were unreachable.
pub struct UnavailableStore;

fn unavailable<T>() -> Result<T> {
    Err(Error::Database(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl UserStore for UnavailableStore {
    async fn insert(&self, _user: NewUser) -> Result<User> {
        unavailable()
    }
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>> {
        unavailable()
    }
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>> {
        unavailable()
    }
    async fn list_page(&self, _offset: i64, _limit: i64) -> Result<Vec<User>> {
        unavailable()
    }
    async fn count(&self) -> Result<i64> {
        unavailable()
    }
    async fn list_all(&self) -> Result<Vec<User>> {
        unavailable()
    }
    async fn replace(&self, _id: Uuid, _user: NewUser) -> Result<Option<User>> {
        unavailable()
    }
    async fn delete(&self, _id: Uuid) -> Result<bool> {
        unavailable()
    }
}

pub fn app_with_store(store: Arc<dyn UserStore>) -> Router {
    routes::api_router().with_state(AppState::with_store(store))
}

pub fn setup_app() -> (Router, Arc<MemoryUserStore>) {
    let store = Arc::new(MemoryUserStore::default());
    (app_with_store(store.clone()), store)
}

pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, HeaderMap, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let req = builder
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let (status, _, text) = send_raw(app, method, uri, body.map(|b| b.to_string())).await;
    (status, serde_json::from_str(&text).unwrap())
}

pub fn user_body(first: &str, last: &str, email: &str) -> JsonValue {
    serde_json::json!({
        "firstName": first,
        "lastName": last,
        "email": email,
        "mobile": "9876543210",
        "gender": "Male",
        "location": "Pune",
    })
}

/// Creates a user through the API and returns its id.
pub async fn create(app: &Router, body: JsonValue) -> String {
    let (status, json) = send(app, "POST", "/api/users", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"]["id"].as_str().unwrap().to_string()
}
