use crate::core::errors::TaskboardError;
use crate::core::models::{
    group::{Group, Membership},
    task::Task,
    user::User,
};
use async_trait::async_trait;

/// Persistence for groups, tasks, users and memberships.
///
/// Deletes cascade: removing a group drops its tasks and memberships, removing
/// a user drops their memberships. `delete_*` return `false` when nothing matched.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn insert_user(&self, user: User) -> Result<User, TaskboardError>;
    async fn update_user(&self, user: User) -> Result<User, TaskboardError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, TaskboardError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, TaskboardError>;
    async fn list_users(&self) -> Result<Vec<User>, TaskboardError>;
    async fn delete_user(&self, user_id: &str) -> Result<bool, TaskboardError>;

    async fn insert_group(&self, group: Group) -> Result<Group, TaskboardError>;
    async fn update_group(&self, group: Group) -> Result<Group, TaskboardError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, TaskboardError>;
    async fn list_groups(&self) -> Result<Vec<Group>, TaskboardError>;
    async fn delete_group(&self, group_id: &str) -> Result<bool, TaskboardError>;

    async fn insert_task(&self, task: Task) -> Result<Task, TaskboardError>;
    async fn update_task(&self, task: Task) -> Result<Task, TaskboardError>;
    async fn get_task(&self, group_id: &str, task_id: &str) -> Result<Option<Task>, TaskboardError>;
    async fn list_tasks(&self, group_id: &str) -> Result<Vec<Task>, TaskboardError>;
    async fn list_all_tasks(&self) -> Result<Vec<Task>, TaskboardError>;
    async fn delete_task(&self, group_id: &str, task_id: &str) -> Result<bool, TaskboardError>;

    async fn add_membership(&self, membership: Membership) -> Result<Membership, TaskboardError>;
    async fn remove_membership(&self, group_id: &str, user_id: &str) -> Result<bool, TaskboardError>;
    async fn list_memberships(&self, group_id: &str) -> Result<Vec<Membership>, TaskboardError>;
}

pub mod in_memory;
