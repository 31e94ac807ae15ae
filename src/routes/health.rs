use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::dto::user_dto::ApiResponse;

#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = json!({
        "status": "ok",
    });
    (StatusCode::OK, Json(body))
}

#[axum::debug_handler]
pub async fn api_root() -> impl IntoResponse {
    Json(ApiResponse::message("User Management API"))
}
