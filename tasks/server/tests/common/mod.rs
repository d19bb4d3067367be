use chrono::{NaiveDate, NaiveDateTime};
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use tasks_server::task::repository::{SeaOrmTaskRepository, TaskRepository};
use tasks_server::task::timestamp::FixedTaskTimestamp;
use tasks_server::task::{DescriptionLimits, TaskService};

/// Opens a fresh in-memory SQLite database with all migrations applied.
///
/// The pool is pinned to a single connection: every SQLite in-memory connection
/// is its own database.
pub async fn setup_db() -> anyhow::Result<DatabaseConnection> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);
    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[allow(dead_code)]
pub fn fixed_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 12, 31)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[allow(dead_code)]
pub fn task_service(repository: Arc<dyn TaskRepository>) -> TaskService {
    TaskService::new(
        repository,
        Arc::new(FixedTaskTimestamp::new(fixed_date())),
        DescriptionLimits::DEFAULT,
    )
}

#[allow(dead_code)]
pub fn sea_orm_task_service(db: DatabaseConnection) -> TaskService {
    task_service(Arc::new(SeaOrmTaskRepository::new(Arc::new(db))))
}
