use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};

use crate::{
    dto::user_dto::{ApiResponse, UserListQuery, UserPayload, UserResponse, UserSearchQuery},
    error::{Error, Result},
    services::export_service::{ExportService, CSV_CONTENT_TYPE, CSV_FILENAME},
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/search", get(search_users))
        .route("/api/users/export", get(export_users))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

const INVALID_BODY_MESSAGE: &str = "Request body must be a JSON object";

fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        Error::BadRequest(INVALID_BODY_MESSAGE.to_string())
    })
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Missing or malformed field"),
        (status = 409, description = "Email already exists")
    )
)]
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    body: std::result::Result<Json<UserPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let payload = json_body(body)?;
    let user = state.user_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(UserResponse::from(user))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(
        ("page" = Option<String>, Query, description = "Page number, defaults to 1"),
        ("limit" = Option<String>, Query, description = "Items per page, defaults to 10")
    ),
    responses(
        (status = 200, description = "Page of users, newest first, with pagination metadata", body = [UserResponse])
    )
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse> {
    let page = state.user_service.list(query).await?;
    Ok(Json(ApiResponse::from(page)))
}

#[utoipa::path(
    get,
    path = "/api/users/search",
    tag = "users",
    params(
        ("q" = Option<String>, Query, description = "Substring of first name, last name, full name or email")
    ),
    responses(
        (status = 200, description = "Matching users, unpaginated", body = [UserResponse])
    )
)]
#[axum::debug_handler]
pub async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<UserSearchQuery>,
) -> Result<impl IntoResponse> {
    let users = state.user_service.search(query.q.as_deref()).await?;
    let items: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::data(items)))
}

#[utoipa::path(
    get,
    path = "/api/users/export",
    tag = "users",
    responses(
        (status = 200, description = "All users as CSV", content_type = "text/csv", body = String)
    )
)]
#[axum::debug_handler]
pub async fn export_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.user_service.list_all().await?;
    let csv = ExportService::generate_users_csv(&users);
    let disposition = format!("attachment; filename={}", CSV_FILENAME);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.get_by_id(&id).await?;
    Ok(Json(ApiResponse::data(UserResponse::from(user))))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Missing or malformed field"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already exists")
    )
)]
#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<UserPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let payload = json_body(body)?;
    let user = state.user_service.update(&id, payload).await?;
    Ok(Json(ApiResponse::data(UserResponse::from(user))))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.user_service.delete(&id).await?;
    Ok(Json(ApiResponse::message("User deleted successfully")))
}
