use chrono::NaiveDateTime;
use sea_orm::{DbErr, SqlErr};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::entities::task;

pub use crate::entities::sea_orm_active_enums::Priority;

pub mod api;
pub mod dto;
pub mod mapper;
pub mod repository;
pub mod timestamp;

use dto::{TaskCreateRequest, TaskFetchResponse, TaskUpdateRequest};
use repository::TaskRepository;
use timestamp::TaskTimestamp;

/// A task as stored, with its store-assigned ID.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Task {
    pub id: i32,
    pub description: String,
    pub is_reminder_set: bool,
    pub is_task_open: bool,
    pub created_on: NaiveDateTime,
    pub priority: Priority,
}

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            is_reminder_set: model.is_reminder_set,
            is_task_open: model.is_task_open,
            created_on: model.created_on,
            priority: model.priority,
        }
    }
}

/// A task that has not been persisted yet. The store assigns the ID on insert.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct NewTask {
    pub description: String,
    pub is_reminder_set: bool,
    pub is_task_open: bool,
    pub created_on: NaiveDateTime,
    pub priority: Priority,
}

/// Filter for listing tasks by their open/closed flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Open,
    Closed,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPEN" => Ok(Self::Open),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(format!("Unknown task status '{}'", s)),
        }
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive bounds on the character length of a task description.
///
/// Length is counted in Unicode scalar values, the unit a Postgres `varchar(n)`
/// limit uses, not in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionLimits {
    min: usize,
    max: usize,
}

impl DescriptionLimits {
    pub const MIN_DESCRIPTION_LENGTH: usize = 3;
    pub const MAX_DESCRIPTION_LENGTH: usize = 255;

    pub const DEFAULT: Self = Self {
        min: Self::MIN_DESCRIPTION_LENGTH,
        max: Self::MAX_DESCRIPTION_LENGTH,
    };

    /// Returns `None` when `min` is greater than `max`.
    pub fn new(min: usize, max: usize) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    fn check(&self, description: &str) -> Result<(), TaskServiceError> {
        let length = description.chars().count();
        if length < self.min || length > self.max {
            return Err(TaskServiceError::InvalidInput(format!(
                "Description must be between {} and {} characters in length",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

impl Default for DescriptionLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Error type for TaskService operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    /// The request was rejected by validation.
    #[error("{0}")]
    InvalidInput(String),
    /// No task exists with the given ID.
    #[error("Task with ID: {0} does not exist!")]
    NotFound(i32),
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl TaskServiceError {
    fn duplicate_description(description: &str) -> Self {
        Self::InvalidInput(format!(
            "A task with the description '{}' already exists",
            description
        ))
    }

    /// Translates a unique index violation on write into the duplicate description error.
    fn from_write(err: DbErr, description: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::duplicate_description(description),
            _ => Self::Database(err),
        }
    }
}

#[derive(Clone)]
pub struct TaskState {
    pub service: Arc<TaskService>,
}

impl TaskState {
    pub fn new(service: TaskService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
    timestamp: Arc<dyn TaskTimestamp>,
    limits: DescriptionLimits,
}

impl TaskService {
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        timestamp: Arc<dyn TaskTimestamp>,
        limits: DescriptionLimits,
    ) -> Self {
        Self {
            repository,
            timestamp,
            limits,
        }
    }

    /// Lists tasks ordered by ascending ID.
    ///
    /// # Arguments
    ///
    /// * `status` - `Open` or `Closed` to filter on the task's open flag, `None` for every task.
    #[tracing::instrument(skip(self))]
    pub async fn get_tasks(
        &self,
        status: Option<TaskStatus>,
    ) -> Result<Vec<TaskFetchResponse>, TaskServiceError> {
        let tasks = match status {
            Some(TaskStatus::Open) => self.repository.find_all_by_open(true).await?,
            Some(TaskStatus::Closed) => self.repository.find_all_by_open(false).await?,
            None => self.repository.find_all().await?,
        };
        Ok(tasks.iter().map(mapper::to_summary).collect())
    }

    /// Retrieves a task by its ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_task_by_id(&self, id: i32) -> Result<TaskFetchResponse, TaskServiceError> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;
        Ok(mapper::to_summary(&task))
    }

    /// Creates a new task.
    ///
    /// The description must fit the configured length bounds and must not match the
    /// description of any existing task.
    #[tracing::instrument(skip(self))]
    pub async fn create_task(
        &self,
        request: TaskCreateRequest,
    ) -> Result<TaskFetchResponse, TaskServiceError> {
        self.limits.check(&request.description)?;
        if self
            .repository
            .exists_by_description(&request.description)
            .await?
        {
            return Err(TaskServiceError::duplicate_description(
                &request.description,
            ));
        }

        let new_task = mapper::to_entity(&request, self.timestamp.as_ref());
        let saved_task = self
            .repository
            .insert(new_task)
            .await
            .map_err(|err| TaskServiceError::from_write(err, &request.description))?;
        tracing::info!("Created task {}", saved_task.id);
        Ok(mapper::to_summary(&saved_task))
    }

    /// Applies a partial update to an existing task.
    ///
    /// Only the fields present in `request` are changed. The description is not
    /// re-validated here; a duplicate is still rejected by the store's unique index.
    #[tracing::instrument(skip(self))]
    pub async fn update_task(
        &self,
        id: i32,
        request: TaskUpdateRequest,
    ) -> Result<TaskFetchResponse, TaskServiceError> {
        let mut existing_task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;

        mapper::apply_update(&mut existing_task, request);
        let description = existing_task.description.clone();
        let saved_task = self
            .repository
            .update(existing_task)
            .await
            .map_err(|err| TaskServiceError::from_write(err, &description))?;
        Ok(mapper::to_summary(&saved_task))
    }

    /// Deletes a task by its ID and returns a confirmation message.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: i32) -> Result<String, TaskServiceError> {
        if !self.repository.exists_by_id(id).await? {
            return Err(TaskServiceError::NotFound(id));
        }
        self.repository.delete_by_id(id).await?;
        tracing::info!("Deleted task {}", id);
        Ok(format!("Task with id: {} has been deleted.", id))
    }
}
