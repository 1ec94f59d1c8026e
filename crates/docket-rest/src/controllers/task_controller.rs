//! Task controller.

use crate::{
    extractors::{ApiJson, TaskIdPath},
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use docket_core::{ErrorResponse, Task};
use docket_service::{CreateTaskRequest, ListTasksQuery, TaskListResponse, UpdateTaskRequest};
use tracing::debug;

/// Creates the task router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/:id", get(get_task).put(update_task).delete(delete_task))
}

/// List tasks, optionally filtered by status and assignee.
#[utoipa::path(
    get,
    path = "/tasks",
    tag = "tasks",
    params(ListTasksQuery),
    responses(
        (status = 200, description = "One page of tasks", body = TaskListResponse),
        (status = 400, description = "Invalid status filter", body = ErrorResponse)
    )
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<TaskListResponse> {
    debug!("List tasks request: {:?}", query);

    let response = state.task_service.list_tasks(query).await?;
    ok(response)
}

/// Create a task.
#[utoipa::path(
    post,
    path = "/tasks",
    tag = "tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Blank title or unknown status", body = ErrorResponse)
    )
)]
pub async fn create_task(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), AppError> {
    debug!("Create task request: {}", request.title);

    let task = state.task_service.create_task(request).await?;
    Ok(created(task))
}

/// Get a task by ID.
#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task ID")),
    responses(
        (status = 200, description = "The task", body = Task),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "No such task", body = ErrorResponse)
    )
)]
pub async fn get_task(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
) -> ApiResult<Task> {
    debug!("Get task request: {}", id);

    let task = state.task_service.get_task(id).await?;
    ok(task)
}

/// Update the supplied fields of a task.
#[utoipa::path(
    put,
    path = "/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task ID")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, description = "Malformed ID, blank title or unknown status", body = ErrorResponse),
        (status = 404, description = "No such task", body = ErrorResponse)
    )
)]
pub async fn update_task(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
    ApiJson(request): ApiJson<UpdateTaskRequest>,
) -> ApiResult<Task> {
    debug!("Update task request: {}", id);

    let task = state.task_service.update_task(id, request).await?;
    ok(task)
}

/// Delete a task.
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task ID")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "No such task", body = ErrorResponse)
    )
)]
pub async fn delete_task(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
) -> Result<StatusCode, AppError> {
    debug!("Delete task request: {}", id);

    state.task_service.delete_task(id).await?;
    Ok(no_content())
}
