use axum::Json;
use utoipa::OpenApi;

use crate::dto::user_dto::{PaginationMeta, UserPayload, UserResponse};
use crate::models::user::{Gender, UserStatus};
use crate::routes::users;

#[derive(OpenApi)]
#[openapi(
    info(title = "User Directory API"),
    paths(
        users::create_user,
        users::list_users,
        users::search_users,
        users::export_users,
        users::get_user,
        users::update_user,
        users::delete_user
    ),
    components(schemas(UserPayload, UserResponse, PaginationMeta, Gender, UserStatus)),
    tags((name = "users", description = "User directory CRUD, search and CSV export"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
