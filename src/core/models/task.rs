use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Binary task state, carried on the wire as `0` / `1`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }

    pub fn is_completed(self) -> bool {
        self == TaskStatus::Completed
    }
}

impl TryFrom<u8> for TaskStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TaskStatus::Pending),
            1 => Ok(TaskStatus::Completed),
            other => Err(format!("invalid task status {}, expected 0 or 1", other)),
        }
    }
}

impl From<TaskStatus> for u8 {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Pending => 0,
            TaskStatus::Completed => 1,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "Pending"),
            TaskStatus::Completed => write!(f, "Completed"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub group_id: String,
    pub title: String,
    pub description: String,
    #[schema(value_type = u8, example = 0)]
    pub status: TaskStatus,
    #[schema(value_type = String, example = "2030-01-01T00:00:00Z")]
    pub deadline: DateTime<Utc>,
    #[schema(value_type = String, example = "2030-01-01T00:00:00Z")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, example = "2030-01-01T00:00:00Z")]
    pub updated_at: DateTime<Utc>,
}

/// Pending/completed counts derived from a task list.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TaskSummary {
    pub pending: usize,
    pub completed: usize,
    pub total: usize,
    pub pending_percent: f64,
    pub completed_percent: f64,
}

impl TaskSummary {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let (mut pending, mut completed) = (0, 0);
        for task in tasks {
            match task.status {
                TaskStatus::Pending => pending += 1,
                TaskStatus::Completed => completed += 1,
            }
        }
        let total = pending + completed;
        let percent = |n: usize| {
            if total == 0 {
                0.0
            } else {
                n as f64 / total as f64 * 100.0
            }
        };
        TaskSummary {
            pending,
            completed,
            total,
            pending_percent: percent(pending),
            completed_percent: percent(completed),
        }
    }
}

/// Deadline ascending, creation time as tie-break.
pub fn sort_by_deadline(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.deadline
            .cmp(&b.deadline)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task(id: &str, status: TaskStatus, day: u32) -> Task {
        let at = Utc.with_ymd_and_hms(2030, 1, day, 0, 0, 0).unwrap();
        Task {
            id: id.to_string(),
            group_id: "g".to_string(),
            title: id.to_string(),
            description: "d".to_string(),
            status,
            deadline: at,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn status_uses_integer_wire_format() {
        assert_eq!(serde_json::to_string(&TaskStatus::Completed).unwrap(), "1");
        let status: TaskStatus = serde_json::from_str("0").unwrap();
        assert_eq!(status, TaskStatus::Pending);
        assert!(serde_json::from_str::<TaskStatus>("2").is_err());
    }

    #[test]
    fn summary_counts_each_status() {
        let tasks = vec![
            task("a", TaskStatus::Pending, 1),
            task("b", TaskStatus::Completed, 2),
            task("c", TaskStatus::Completed, 3),
            task("d", TaskStatus::Completed, 4),
        ];
        let summary = TaskSummary::from_tasks(&tasks);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.completed, 3);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.completed_percent, 75.0);
        assert_eq!(summary.pending_percent, 25.0);
    }

    #[test]
    fn empty_summary_has_zero_percentages() {
        let summary = TaskSummary::from_tasks(&Vec::<Task>::new());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.pending_percent, 0.0);
    }

    #[test]
    fn sorts_by_deadline() {
        let mut tasks = vec![
            task("late", TaskStatus::Pending, 9),
            task("early", TaskStatus::Pending, 2),
            task("mid", TaskStatus::Completed, 5),
        ];
        sort_by_deadline(&mut tasks);
        let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["early", "mid", "late"]);
    }
}
