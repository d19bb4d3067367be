use crate::task::dto::{TaskCreateRequest, TaskFetchResponse, TaskUpdateRequest};
use crate::task::{TaskServiceError, TaskState, TaskStatus};
use axum::{
    Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// JSON response for API errors
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine readable error kind
    pub error: String,
    /// Human readable description of the failure
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: String) -> Self {
        Self {
            error: error.to_string(),
            message,
        }
    }
}

impl IntoResponse for TaskServiceError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            TaskServiceError::InvalidInput(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("bad_request", message.clone()),
            ),
            TaskServiceError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("not_found", self.to_string()),
            ),
            TaskServiceError::Database(err) => {
                tracing::error!("Task operation failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "internal_error",
                        "An unexpected error occurred while processing your request.".to_string(),
                    ),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Error returned by the task handlers.
///
/// Wraps service failures and the extractor rejections for malformed paths, query
/// strings and bodies, so every failure reaches the client as an [`ErrorResponse`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] TaskServiceError),
    #[error(transparent)]
    Json(#[from] JsonRejection),
    #[error(transparent)]
    Query(#[from] QueryRejection),
    #[error(transparent)]
    Path(#[from] PathRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::Service(err) => return err.into_response(),
            ApiError::Json(rejection) => rejection.body_text(),
            ApiError::Query(rejection) => rejection.body_text(),
            ApiError::Path(rejection) => rejection.body_text(),
        };
        tracing::debug!("Rejected malformed request: {}", message);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("bad_request", message)),
        )
            .into_response()
    }
}

/// Query parameters for filtering tasks by status.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TasksQuery {
    /// Optional status to filter tasks by
    #[serde(default)]
    status: Option<TaskStatus>,
}

/// Handler for GET /api/v1/tasks - Returns tasks ordered by ID.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    params(
        ("status" = Option<TaskStatus>, Query, description = "Optional status (OPEN or CLOSED) to filter tasks by")
    ),
    responses(
        (status = 200, description = "Successfully retrieved tasks", body = Vec<TaskFetchResponse>),
        (status = 400, description = "Unknown status filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_tasks_handler(
    State(state): State<Arc<TaskState>>,
    query: Result<Query<TasksQuery>, QueryRejection>,
) -> Result<Json<Vec<TaskFetchResponse>>, ApiError> {
    let Query(query) = query?;
    let tasks = state.service.get_tasks(query.status).await?;
    Ok(Json(tasks))
}

/// Handler for GET /api/v1/tasks/{id} - Returns a single task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    params(("id" = i32, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Successfully retrieved task", body = TaskFetchResponse),
        (status = 400, description = "Malformed task identifier", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_task_handler(
    State(state): State<Arc<TaskState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<TaskFetchResponse>, ApiError> {
    let Path(id) = id?;
    let task = state.service.get_task_by_id(id).await?;
    Ok(Json(task))
}

/// Handler for POST /api/v1/tasks - Creates a task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = TaskCreateRequest,
    responses(
        (status = 201, description = "Task created", body = TaskFetchResponse),
        (status = 400, description = "Malformed body, invalid or duplicate description", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn create_task_handler(
    State(state): State<Arc<TaskState>>,
    request: Result<Json<TaskCreateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskFetchResponse>), ApiError> {
    let Json(request) = request?;
    let task = state.service.create_task(request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Handler for PATCH /api/v1/tasks/{id} - Updates the provided fields of a task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    patch,
    path = "/api/v1/tasks/{id}",
    params(("id" = i32, Path, description = "Task identifier")),
    request_body = TaskUpdateRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskFetchResponse),
        (status = 400, description = "Malformed body or duplicate description", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn update_task_handler(
    State(state): State<Arc<TaskState>>,
    id: Result<Path<i32>, PathRejection>,
    request: Result<Json<TaskUpdateRequest>, JsonRejection>,
) -> Result<Json<TaskFetchResponse>, ApiError> {
    let Path(id) = id?;
    let Json(request) = request?;
    let task = state.service.update_task(id, request).await?;
    Ok(Json(task))
}

/// Handler for DELETE /api/v1/tasks/{id} - Deletes a task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    params(("id" = i32, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task deleted", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed task identifier", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn delete_task_handler(
    State(state): State<Arc<TaskState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<String, ApiError> {
    let Path(id) = id?;
    Ok(state.service.delete_task(id).await?)
}

/// Creates and returns the tasks API router.
pub fn create_api_router(state: Arc<TaskState>) -> Router {
    Router::new()
        .route("/tasks", get(get_tasks_handler).post(create_task_handler))
        .route(
            "/tasks/{id}",
            get(get_task_handler)
                .patch(update_task_handler)
                .delete(delete_task_handler),
        )
        .with_state(state)
}
