use crate::core::errors::TaskboardError;
use crate::core::models::{
    group::{Group, Membership},
    task::Task,
    user::User,
};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

// Lock order for multi-collection writes: groups, tasks, memberships, users.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    groups: Arc<RwLock<Vec<Group>>>,
    tasks: Arc<RwLock<HashMap<String, Task>>>,
    memberships: Arc<RwLock<Vec<Membership>>>,
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn insert_user(&self, user: User) -> Result<User, TaskboardError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(TaskboardError::EmailAlreadyRegistered(user.email));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: User) -> Result<User, TaskboardError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(TaskboardError::EmailAlreadyRegistered(user.email));
        }
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| TaskboardError::UserNotFound(user.id.clone()))?;
        *slot = user.clone();
        Ok(user)
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, TaskboardError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, TaskboardError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, TaskboardError> {
        Ok(self.users.read().await.clone())
    }

    async fn delete_user(&self, user_id: &str) -> Result<bool, TaskboardError> {
        let mut memberships = self.memberships.write().await;
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != user_id);
        if users.len() == before {
            return Ok(false);
        }
        memberships.retain(|m| m.user_id != user_id);
        Ok(true)
    }

    async fn insert_group(&self, group: Group) -> Result<Group, TaskboardError> {
        let mut groups = self.groups.write().await;
        if groups.iter().any(|g| g.id == group.id) {
            return Err(TaskboardError::StorageError(format!("Duplicate group id {}", group.id)));
        }
        groups.push(group.clone());
        Ok(group)
    }

    async fn update_group(&self, group: Group) -> Result<Group, TaskboardError> {
        let mut groups = self.groups.write().await;
        let slot = groups
            .iter_mut()
            .find(|g| g.id == group.id)
            .ok_or_else(|| TaskboardError::GroupNotFound(group.id.clone()))?;
        *slot = group.clone();
        Ok(group)
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, TaskboardError> {
        let groups = self.groups.read().await;
        Ok(groups.iter().find(|g| g.id == group_id).cloned())
    }

    async fn list_groups(&self) -> Result<Vec<Group>, TaskboardError> {
        Ok(self.groups.read().await.clone())
    }

    async fn delete_group(&self, group_id: &str) -> Result<bool, TaskboardError> {
        let mut groups = self.groups.write().await;
        let mut tasks = self.tasks.write().await;
        let mut memberships = self.memberships.write().await;
        let before = groups.len();
        groups.retain(|g| g.id != group_id);
        if groups.len() == before {
            return Ok(false);
        }
        tasks.retain(|_, t| t.group_id != group_id);
        memberships.retain(|m| m.group_id != group_id);
        Ok(true)
    }

    async fn insert_task(&self, task: Task) -> Result<Task, TaskboardError> {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&task.id) {
            return Err(TaskboardError::StorageError(format!("Duplicate task id {}", task.id)));
        }
        tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    async fn update_task(&self, task: Task) -> Result<Task, TaskboardError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&task.id) {
            Some(slot) if slot.group_id == task.group_id => {
                *slot = task.clone();
                Ok(task)
            }
            _ => Err(TaskboardError::TaskNotFound(task.id)),
        }
    }

    async fn get_task(&self, group_id: &str, task_id: &str) -> Result<Option<Task>, TaskboardError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(task_id).filter(|t| t.group_id == group_id).cloned())
    }

    async fn list_tasks(&self, group_id: &str) -> Result<Vec<Task>, TaskboardError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.values().filter(|t| t.group_id == group_id).cloned().collect())
    }

    async fn list_all_tasks(&self) -> Result<Vec<Task>, TaskboardError> {
        Ok(self.tasks.read().await.values().cloned().collect())
    }

    async fn delete_task(&self, group_id: &str, task_id: &str) -> Result<bool, TaskboardError> {
        let mut tasks = self.tasks.write().await;
        if tasks.get(task_id).is_some_and(|t| t.group_id == group_id) {
            tasks.remove(task_id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn add_membership(&self, membership: Membership) -> Result<Membership, TaskboardError> {
        let mut memberships = self.memberships.write().await;
        if memberships
            .iter()
            .any(|m| m.group_id == membership.group_id && m.user_id == membership.user_id)
        {
            return Err(TaskboardError::AlreadyGroupMember(membership.user_id));
        }
        memberships.push(membership.clone());
        Ok(membership)
    }

    async fn remove_membership(&self, group_id: &str, user_id: &str) -> Result<bool, TaskboardError> {
        let mut memberships = self.memberships.write().await;
        let before = memberships.len();
        memberships.retain(|m| !(m.group_id == group_id && m.user_id == user_id));
        Ok(memberships.len() != before)
    }

    async fn list_memberships(&self, group_id: &str) -> Result<Vec<Membership>, TaskboardError> {
        let memberships = self.memberships.read().await;
        Ok(memberships.iter().filter(|m| m.group_id == group_id).cloned().collect())
    }
}
