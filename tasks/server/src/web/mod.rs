use axum::Router;
use axum::response::Json;
use migration::MigratorTrait;
use sea_orm::Database;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::Config;
use crate::task::api::v1::{self as tasks_api, ErrorResponse};
use crate::task::dto::{TaskCreateRequest, TaskFetchResponse, TaskUpdateRequest};
use crate::task::repository::SeaOrmTaskRepository;
use crate::task::timestamp::SystemTaskTimestamp;
use crate::task::{Priority, TaskService, TaskState, TaskStatus};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Task API",
        version = "1.0.0",
        description = "API for managing tasks"
    ),
    paths(
        tasks_api::get_tasks_handler,
        tasks_api::get_task_handler,
        tasks_api::create_task_handler,
        tasks_api::update_task_handler,
        tasks_api::delete_task_handler,
    ),
    components(schemas(
        TaskCreateRequest,
        TaskUpdateRequest,
        TaskFetchResponse,
        ErrorResponse,
        Priority,
        TaskStatus
    )),
    tags((name = "Tasks", description = "Task management endpoints"))
)]
pub struct ApiDoc;

/// Builds the full application router around the given task state.
pub fn create_app(task_state: Arc<TaskState>) -> Router {
    let api_routes = Router::new().nest("/api/v1", tasks_api::create_api_router(task_state));

    Router::new()
        .route("/health", axum::routing::get(health_check_handler))
        .route("/api-docs/openapi.json", axum::routing::get(openapi_handler))
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let limits = config.description_limits()?;
    let offset = config.utc_offset()?;

    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let db = Database::connect(&config.db_url).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let service = TaskService::new(
        Arc::new(SeaOrmTaskRepository::new(Arc::new(db))),
        Arc::new(SystemTaskTimestamp::new(offset)),
        limits,
    );
    let app = create_app(Arc::new(TaskState::new(service)));

    axum::serve(listener, app).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

#[tracing::instrument]
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_task_routes() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.info.title, "Task API");
        assert!(doc.paths.paths.contains_key("/api/v1/tasks"));
        assert!(doc.paths.paths.contains_key("/api/v1/tasks/{id}"));
    }
}
