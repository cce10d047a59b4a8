use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};

use super::extract::{JsonBody, PathId, QueryParams};
use crate::errors::{response::ErrorDetail, AppResult};
use crate::models::{Task, TaskChange, TaskCreate, TaskQuery};
use crate::services::Claims;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/tasks",
    tag = "Tasks",
    security(("bearer" = [])),
    request_body = TaskCreate,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Invalid payload", body = ErrorDetail),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorDetail)
    )
)]
pub async fn create_task(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    JsonBody(input): JsonBody<TaskCreate>,
) -> AppResult<(StatusCode, Json<Task>)> {
    input.validate()?;

    let task = state.tasks.create(input)?;

    tracing::info!("Task {} created by {}", task.id, claims.sub);
    Ok((StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    get,
    path = "/tasks",
    tag = "Tasks",
    security(("bearer" = [])),
    params(TaskQuery),
    responses(
        (status = 200, description = "Tasks in creation order, optionally filtered", body = Vec<Task>),
        (status = 400, description = "Invalid query", body = ErrorDetail),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorDetail)
    )
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<TaskQuery>,
) -> AppResult<Json<Vec<Task>>> {
    let page = query.page()?;
    let filter = |task: &Task| query.completed.map_or(true, |done| task.completed == done);
    let tasks = state.tasks.list(&filter, page);

    tracing::debug!(
        "Listing {} task(s) (completed filter: {:?})",
        tasks.len(),
        query.completed
    );
    Ok(Json(tasks))
}

#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = "Tasks",
    security(("bearer" = [])),
    params(("id" = u64, Path, description = "Task id")),
    responses(
        (status = 200, description = "The task", body = Task),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorDetail),
        (status = 404, description = "Task not found", body = ErrorDetail)
    )
)]
pub async fn get_task(
    State(state): State<AppState>,
    PathId(task_id): PathId<u64>,
) -> AppResult<Json<Task>> {
    tracing::debug!("Fetching task {}", task_id);
    Ok(Json(state.tasks.get(task_id)?))
}

#[utoipa::path(
    put,
    path = "/tasks/{id}",
    tag = "Tasks",
    security(("bearer" = [])),
    params(("id" = u64, Path, description = "Task id")),
    request_body = TaskCreate,
    responses(
        (status = 200, description = "Task replaced", body = Task),
        (status = 400, description = "Invalid payload", body = ErrorDetail),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorDetail),
        (status = 404, description = "Task not found", body = ErrorDetail)
    )
)]
pub async fn update_task(
    State(state): State<AppState>,
    PathId(task_id): PathId<u64>,
    JsonBody(input): JsonBody<TaskCreate>,
) -> AppResult<Json<Task>> {
    input.validate()?;

    let task = state.tasks.update(task_id, TaskChange::from(input))?;

    tracing::info!("Task {} updated", task_id);
    Ok(Json(task))
}

#[utoipa::path(
    patch,
    path = "/tasks/{id}/complete",
    tag = "Tasks",
    security(("bearer" = [])),
    params(("id" = u64, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task marked complete", body = Task),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorDetail),
        (status = 404, description = "Task not found", body = ErrorDetail)
    )
)]
pub async fn complete_task(
    State(state): State<AppState>,
    PathId(task_id): PathId<u64>,
) -> AppResult<Json<Task>> {
    let task = state.tasks.update(task_id, TaskChange::Complete)?;

    tracing::info!("Task {} marked complete", task_id);
    Ok(Json(task))
}

#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = "Tasks",
    security(("bearer" = [])),
    params(("id" = u64, Path, description = "Task id")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorDetail),
        (status = 404, description = "Task not found", body = ErrorDetail)
    )
)]
pub async fn delete_task(
    State(state): State<AppState>,
    PathId(task_id): PathId<u64>,
) -> AppResult<StatusCode> {
    state.tasks.delete(task_id)?;

    tracing::info!("Deleted task {}", task_id);
    Ok(StatusCode::NO_CONTENT)
}
