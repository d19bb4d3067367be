//! Request and response bodies exchanged with API clients.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Priority;

/// Body of a request to create a task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateRequest {
    /// Task description, unique across all tasks
    #[schema(min_length = 3, max_length = 255)]
    pub description: String,
    /// Whether a reminder is set for the task
    pub is_reminder_set: bool,
    /// Whether the task is still open
    pub is_task_open: bool,
    /// Task priority
    pub priority: Priority,
}

/// Body of a partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_reminder_set: Option<bool>,
    #[serde(default)]
    pub is_task_open: Option<bool>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

/// JSON representation of a Task for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskFetchResponse {
    /// Unique identifier for the task
    pub id: i32,
    pub description: String,
    pub is_reminder_set: bool,
    pub is_task_open: bool,
    /// Local date-time the task was created, without offset
    pub created_on: NaiveDateTime,
    pub priority: Priority,
}
