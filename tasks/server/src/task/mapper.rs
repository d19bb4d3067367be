use super::dto::{TaskCreateRequest, TaskFetchResponse, TaskUpdateRequest};
use super::timestamp::TaskTimestamp;
use super::{NewTask, Task};

pub fn to_summary(task: &Task) -> TaskFetchResponse {
    TaskFetchResponse {
        id: task.id,
        description: task.description.clone(),
        is_reminder_set: task.is_reminder_set,
        is_task_open: task.is_task_open,
        created_on: task.created_on,
        priority: task.priority,
    }
}

/// Builds an unsaved task stamped with the current time of `timestamp`.
pub fn to_entity(request: &TaskCreateRequest, timestamp: &dyn TaskTimestamp) -> NewTask {
    NewTask {
        description: request.description.clone(),
        is_reminder_set: request.is_reminder_set,
        is_task_open: request.is_task_open,
        created_on: timestamp.now(),
        priority: request.priority,
    }
}

/// Overwrites each field of `task` that is present in `request`.
pub fn apply_update(task: &mut Task, request: TaskUpdateRequest) {
    if let Some(description) = request.description {
        task.description = description;
    }
    if let Some(is_reminder_set) = request.is_reminder_set {
        task.is_reminder_set = is_reminder_set;
    }
    if let Some(is_task_open) = request.is_task_open {
        task.is_task_open = is_task_open;
    }
    if let Some(priority) = request.priority {
        task.priority = priority;
    }
}
