//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{ComponentHealth, HealthResponse, ReadinessResponse};
use docket_core::{ErrorResponse, FieldError, Task, TaskId, TaskStatus};
use docket_service::{CreateTaskRequest, ListTasksQuery, TaskListResponse, UpdateTaskRequest};
use utoipa::OpenApi;

/// OpenAPI documentation for the Docket API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Docket API",
        version = "1.0.0",
        description = "Task records with a consistent read cache"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        crate::controllers::task_controller::list_tasks,
        crate::controllers::task_controller::create_task,
        crate::controllers::task_controller::get_task,
        crate::controllers::task_controller::update_task,
        crate::controllers::task_controller::delete_task,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            TaskId,
            TaskStatus,
            Task,
            ErrorResponse,
            FieldError,
            CreateTaskRequest,
            UpdateTaskRequest,
            ListTasksQuery,
            TaskListResponse,
            HealthResponse,
            ReadinessResponse,
            ComponentHealth,
        )
    ),
    tags(
        (name = "tasks", description = "Task management endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
