use crate::core::models::task::{Task, TaskStatus, TaskSummary, sort_by_deadline};

/// Local copy of one group's task list, kept in deadline order.
///
/// Counts are computed from the list on every call so they cannot drift from
/// what is shown.
#[derive(Clone, Debug, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn from_tasks(mut tasks: Vec<Task>) -> Self {
        sort_by_deadline(&mut tasks);
        TaskBoard { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn pending_count(&self) -> usize {
        self.count(TaskStatus::Pending)
    }

    pub fn completed_count(&self) -> usize {
        self.count(TaskStatus::Completed)
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary::from_tasks(&self.tasks)
    }

    fn count(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }

    pub fn apply_created(&mut self, task: Task) {
        self.tasks.push(task);
        sort_by_deadline(&mut self.tasks);
    }

    /// Replaces the entry with the same id, inserting it if it is unknown.
    pub fn apply_updated(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
        sort_by_deadline(&mut self.tasks);
    }

    /// Removes the single entry with `task_id`. Returns whether one was found.
    pub fn apply_deleted(&mut self, task_id: &str) -> bool {
        match self.tasks.iter().position(|t| t.id == task_id) {
            Some(index) => {
                self.tasks.remove(index);
                true
            }
            None => false,
        }
    }
}
