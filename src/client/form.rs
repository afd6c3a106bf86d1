use chrono::{DateTime, SecondsFormat, Utc};

use crate::core::errors::TaskboardError;
use crate::core::models::task::{Task, TaskStatus};
use crate::core::validation::{self, TaskDraft};

/// Editable task fields. Built empty for creation or prefilled from an
/// existing task for editing; the mode decides whether submission is a POST
/// or a PUT.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskForm {
    task_id: Option<String>,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// RFC 3339 text as typed, e.g. `2030-01-01T00:00:00Z`.
    pub deadline: String,
}

impl TaskForm {
    pub fn new() -> Self {
        TaskForm::default()
    }

    pub fn for_edit(task: &Task) -> Self {
        TaskForm {
            task_id: Some(task.id.clone()),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            deadline: task.deadline.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn is_edit(&self) -> bool {
        self.task_id.is_some()
    }

    /// Stops at the first failing field.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<TaskDraft, TaskboardError> {
        validation::validate_task(
            &self.title,
            &self.description,
            self.status,
            Some(&self.deadline),
            now,
            true,
        )
    }
}
