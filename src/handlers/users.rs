use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};

use super::extract::{JsonBody, PathId, QueryParams};
use crate::errors::{response::ErrorDetail, AppResult};
use crate::models::{Pagination, User, UserCreate};
use crate::services::Claims;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("bearer" = [])),
    request_body = UserCreate,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid payload", body = ErrorDetail),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorDetail),
        (status = 409, description = "Email already registered", body = ErrorDetail)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    JsonBody(input): JsonBody<UserCreate>,
) -> AppResult<(StatusCode, Json<User>)> {
    input.validate()?;

    let user = state.users.create(input).map_err(|e| {
        tracing::warn!("User creation rejected: {}", e);
        e
    })?;

    tracing::info!("User {} created by {}", user.id, claims.sub);
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer" = [])),
    params(Pagination),
    responses(
        (status = 200, description = "Users in creation order", body = Vec<User>),
        (status = 400, description = "Invalid pagination", body = ErrorDetail),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorDetail)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    QueryParams(pagination): QueryParams<Pagination>,
) -> AppResult<Json<Vec<User>>> {
    let page = pagination.page()?;
    let users = state.users.list(&|_: &User| true, page);

    tracing::debug!("Listing {} user(s) from offset {}", users.len(), page.skip);
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer" = [])),
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorDetail),
        (status = 404, description = "User not found", body = ErrorDetail)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    PathId(user_id): PathId<u64>,
) -> AppResult<Json<User>> {
    tracing::debug!("Fetching user {}", user_id);
    Ok(Json(state.users.get(user_id)?))
}

// Requires a bearer header but does not verify it, see `require_bearer`.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer" = [])),
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Missing bearer header", body = ErrorDetail),
        (status = 404, description = "User not found", body = ErrorDetail)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    PathId(user_id): PathId<u64>,
) -> AppResult<StatusCode> {
    state.users.delete(user_id)?;

    tracing::info!("Deleted user {}", user_id);
    Ok(StatusCode::NO_CONTENT)
}
