pub mod docs;
pub mod health;
pub mod users;

use axum::{routing::get, Router};

use crate::AppState;

/// Every JSON endpoint. Static frontend assets are mounted separately.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api", get(health::api_root))
        .route("/api/openapi.json", get(docs::openapi_json))
        .merge(users::router())
}
