//! Persistence for tasks.
//!
//! The service depends only on the [`TaskRepository`] trait; [`SeaOrmTaskRepository`]
//! implements it on top of a SeaORM database connection.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use std::sync::Arc;

use super::{NewTask, Task};
use crate::entities::task;

/// Trait defining the storage operations the task service relies on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Loads every task, ordered by ascending ID.
    async fn find_all(&self) -> Result<Vec<Task>, DbErr>;

    /// Loads the tasks whose open flag equals `is_task_open`, ordered by ascending ID.
    async fn find_all_by_open(&self, is_task_open: bool) -> Result<Vec<Task>, DbErr>;

    /// Loads a single task, or `None` if no task has the given ID.
    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, DbErr>;

    async fn exists_by_id(&self, id: i32) -> Result<bool, DbErr>;

    async fn exists_by_description(&self, description: &str) -> Result<bool, DbErr>;

    /// Persists a new task and returns it with its assigned ID.
    async fn insert(&self, new_task: NewTask) -> Result<Task, DbErr>;

    /// Writes the mutable fields of an existing task. `created_on` is never written.
    async fn update(&self, task: Task) -> Result<Task, DbErr>;

    async fn delete_by_id(&self, id: i32) -> Result<(), DbErr>;
}

#[derive(Clone, Debug)]
pub struct SeaOrmTaskRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTaskRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for SeaOrmTaskRepository {
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Task>, DbErr> {
        let tasks = task::Entity::find()
            .order_by_asc(task::Column::Id)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all_by_open(&self, is_task_open: bool) -> Result<Vec<Task>, DbErr> {
        let tasks = task::Entity::find()
            .filter(task::Column::IsTaskOpen.eq(is_task_open))
            .order_by_asc(task::Column::Id)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, DbErr> {
        let task = task::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(Task::from);
        Ok(task)
    }

    #[tracing::instrument(skip(self))]
    async fn exists_by_id(&self, id: i32) -> Result<bool, DbErr> {
        let count = task::Entity::find_by_id(id)
            .count(self.db.as_ref())
            .await?;
        Ok(count > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn exists_by_description(&self, description: &str) -> Result<bool, DbErr> {
        let count = task::Entity::find()
            .filter(task::Column::Description.eq(description))
            .count(self.db.as_ref())
            .await?;
        Ok(count > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn insert(&self, new_task: NewTask) -> Result<Task, DbErr> {
        let active_model = task::ActiveModel {
            description: ActiveValue::Set(new_task.description),
            is_reminder_set: ActiveValue::Set(new_task.is_reminder_set),
            is_task_open: ActiveValue::Set(new_task.is_task_open),
            created_on: ActiveValue::Set(new_task.created_on),
            priority: ActiveValue::Set(new_task.priority),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db.as_ref()).await?;
        Ok(Task::from(created_model))
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, task: Task) -> Result<Task, DbErr> {
        let active_model = task::ActiveModel {
            id: ActiveValue::Unchanged(task.id),
            description: ActiveValue::Set(task.description),
            is_reminder_set: ActiveValue::Set(task.is_reminder_set),
            is_task_open: ActiveValue::Set(task.is_task_open),
            created_on: ActiveValue::NotSet,
            priority: ActiveValue::Set(task.priority),
        };
        let updated_model = active_model.update(self.db.as_ref()).await?;
        Ok(Task::from(updated_model))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: i32) -> Result<(), DbErr> {
        task::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }
}
