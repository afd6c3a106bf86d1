use crate::constants::constants::{
    DEADLINE_REMINDERS_SENT, GROUP_CREATED, GROUP_DELETED, GROUP_RENAMED, MEMBER_ADDED, MEMBER_REMOVED,
    TASK_CREATED, TASK_DELETED, TASK_UPDATED, USER_ADDED, USER_DELETED, USER_UPDATED,
};
use crate::core::errors::TaskboardError;
use crate::core::models::{
    audit::AppLog,
    group::{Group, GroupMember, Membership, Role},
    notification::Notification,
    task::{Task, TaskStatus, TaskSummary, sort_by_deadline},
    user::User,
};
use crate::core::validation::{self, TaskDraft};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::notify::Notifier;
use crate::infrastructure::storage::Storage;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde_json::json;
use std::collections::HashSet;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const DEFAULT_REMINDER_WINDOW_DAYS: i64 = 3;

/// A reminder already delivered for a task at a given deadline and day count.
type ReminderKey = (String, DateTime<Utc>, i64);

pub struct TaskboardService<L: LoggingService, S: Storage, N: Notifier> {
    storage: S,
    logging: L,
    notifier: N,
    reminder_window_days: i64,
    password_cost: u32,
    reminders_sent: RwLock<HashSet<ReminderKey>>,
}

impl<L: LoggingService, S: Storage, N: Notifier> TaskboardService<L, S, N> {
    pub fn new(storage: S, logging: L, notifier: N) -> Self {
        TaskboardService {
            storage,
            logging,
            notifier,
            reminder_window_days: DEFAULT_REMINDER_WINDOW_DAYS,
            password_cost: bcrypt::DEFAULT_COST,
            reminders_sent: RwLock::new(HashSet::new()),
        }
    }

    pub fn with_reminder_window_days(mut self, days: i64) -> Self {
        self.reminder_window_days = days.max(0);
        self
    }

    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    async fn require_group(&self, group_id: &str) -> Result<Group, TaskboardError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| TaskboardError::GroupNotFound(group_id.to_string()))
    }

    async fn require_user(&self, user_id: &str) -> Result<User, TaskboardError> {
        self.storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| TaskboardError::UserNotFound(user_id.to_string()))
    }

    async fn require_task(&self, group_id: &str, task_id: &str) -> Result<Task, TaskboardError> {
        self.storage
            .get_task(group_id, task_id)
            .await?
            .ok_or_else(|| TaskboardError::TaskNotFound(task_id.to_string()))
    }

    async fn audit(
        &self,
        group_id: Option<&str>,
        action: &str,
        details: serde_json::Value,
    ) -> Result<(), TaskboardError> {
        self.logging.log_action(action, group_id, details).await
    }

    async fn ensure_unique_title(&self, group_id: &str, title: &str, except_id: Option<&str>) -> Result<(), TaskboardError> {
        let clash = self
            .storage
            .list_tasks(group_id)
            .await?
            .into_iter()
            .any(|t| t.title == title && Some(t.id.as_str()) != except_id);
        if clash {
            warn!("Task '{}' already exists in group {}", title, group_id);
            return Err(TaskboardError::TaskAlreadyExists(title.to_string()));
        }
        Ok(())
    }

    fn hash_password(&self, password: &str) -> Result<String, TaskboardError> {
        bcrypt::hash(password, self.password_cost)
            .map_err(|e| TaskboardError::InternalServerError(format!("Password hashing error: {}", e)))
    }

    // GROUP DIRECTORY

    pub async fn list_groups(&self) -> Result<Vec<Group>, TaskboardError> {
        debug!("Listing groups");
        self.storage.list_groups().await
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Group, TaskboardError> {
        self.require_group(group_id).await
    }

    pub async fn create_group(&self, name: &str) -> Result<Group, TaskboardError> {
        let name = validation::validate_group_name(name)?;
        info!("Creating group '{}'", name);
        let group = Group {
            id: Uuid::new_v4().to_string(),
            name,
            created_at: Utc::now(),
        };
        let group = self.storage.insert_group(group).await?;

        self.audit(
            Some(&group.id),
            GROUP_CREATED,
            json!({ "group_id": group.id, "name": group.name }),
        )
        .await?;
        Ok(group)
    }

    pub async fn rename_group(&self, group_id: &str, name: &str) -> Result<Group, TaskboardError> {
        let name = validation::validate_group_name(name)?;
        let mut group = self.require_group(group_id).await?;
        info!("Renaming group {} from '{}' to '{}'", group_id, group.name, name);
        let old_name = std::mem::replace(&mut group.name, name);
        let group = self.storage.update_group(group).await?;

        self.audit(
            Some(group_id),
            GROUP_RENAMED,
            json!({ "group_id": group_id, "old_name": old_name, "name": group.name }),
        )
        .await?;
        Ok(group)
    }

    /// Deletes the group together with its tasks and memberships.
    pub async fn delete_group(&self, group_id: &str) -> Result<(), TaskboardError> {
        let group = self.require_group(group_id).await?;
        info!("Deleting group {} ('{}')", group_id, group.name);
        if !self.storage.delete_group(group_id).await? {
            return Err(TaskboardError::GroupNotFound(group_id.to_string()));
        }

        self.audit(
            Some(group_id),
            GROUP_DELETED,
            json!({ "group_id": group_id, "name": group.name }),
        )
        .await?;
        Ok(())
    }

    // TASK LIST

    /// Tasks of a group, deadline ascending.
    pub async fn list_tasks(&self, group_id: &str) -> Result<Vec<Task>, TaskboardError> {
        self.require_group(group_id).await?;
        let mut tasks = self.storage.list_tasks(group_id).await?;
        sort_by_deadline(&mut tasks);
        debug!("Listed {} tasks for group {}", tasks.len(), group_id);
        Ok(tasks)
    }

    pub async fn get_task(&self, group_id: &str, task_id: &str) -> Result<Task, TaskboardError> {
        self.require_group(group_id).await?;
        self.require_task(group_id, task_id).await
    }

    pub async fn create_task(
        &self,
        group_id: &str,
        title: &str,
        description: &str,
        status: TaskStatus,
        deadline: Option<&str>,
    ) -> Result<Task, TaskboardError> {
        let now = Utc::now();
        let draft = validation::validate_task(title, description, status, deadline, now, true)?;
        self.require_group(group_id).await?;
        self.ensure_unique_title(group_id, &draft.title, None).await?;

        let TaskDraft {
            title,
            description,
            status,
            deadline,
        } = draft;
        let task = Task {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            title,
            description,
            status,
            deadline,
            created_at: now,
            updated_at: now,
        };
        info!("Creating task '{}' in group {}", task.title, group_id);
        let task = self.storage.insert_task(task).await?;

        self.audit(
            Some(group_id),
            TASK_CREATED,
            json!({ "task_id": task.id, "title": task.title, "deadline": task.deadline.to_rfc3339() }),
        )
        .await?;
        Ok(task)
    }

    /// Full replacement of title, description, status and deadline.
    ///
    /// The past-deadline rule applies only when the deadline changes, so an
    /// overdue task can still be completed. Moving a task to `Completed`
    /// notifies every member of the group.
    pub async fn update_task(
        &self,
        group_id: &str,
        task_id: &str,
        title: &str,
        description: &str,
        status: TaskStatus,
        deadline: Option<&str>,
    ) -> Result<Task, TaskboardError> {
        let now = Utc::now();
        let draft = validation::validate_task(title, description, status, deadline, now, false)?;
        self.require_group(group_id).await?;
        let existing = self.require_task(group_id, task_id).await?;
        if draft.deadline != existing.deadline {
            validation::ensure_not_past(draft.deadline, now)?;
        }
        self.ensure_unique_title(group_id, &draft.title, Some(task_id)).await?;

        let completed_now = !existing.status.is_completed() && draft.status.is_completed();
        let updated = Task {
            title: draft.title,
            description: draft.description,
            status: draft.status,
            deadline: draft.deadline,
            updated_at: now,
            ..existing.clone()
        };
        info!("Updating task {} in group {}", task_id, group_id);
        let updated = self.storage.update_task(updated).await?;

        self.audit(
            Some(group_id),
            TASK_UPDATED,
            json!({
                "task_id": task_id,
                "title": updated.title,
                "old_status": u8::from(existing.status),
                "status": u8::from(updated.status),
            }),
        )
        .await?;

        if completed_now {
            let subject = format!("Task '{}' is completed!", updated.title);
            let body = format!(
                "The task '{}' in group {} has been marked as done.",
                updated.title, group_id
            );
            self.notify_members(group_id, &subject, &body).await?;
        }
        Ok(updated)
    }

    pub async fn delete_task(&self, group_id: &str, task_id: &str) -> Result<(), TaskboardError> {
        self.require_group(group_id).await?;
        let task = self.require_task(group_id, task_id).await?;
        info!("Deleting task {} from group {}", task_id, group_id);
        if !self.storage.delete_task(group_id, task_id).await? {
            return Err(TaskboardError::TaskNotFound(task_id.to_string()));
        }

        self.audit(
            Some(group_id),
            TASK_DELETED,
            json!({ "task_id": task_id, "title": task.title }),
        )
        .await?;
        Ok(())
    }

    pub async fn task_summary(&self, group_id: &str) -> Result<TaskSummary, TaskboardError> {
        let tasks = self.list_tasks(group_id).await?;
        Ok(TaskSummary::from_tasks(&tasks))
    }

    // USER DIRECTORY

    pub async fn list_users(&self) -> Result<Vec<User>, TaskboardError> {
        self.storage.list_users().await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, TaskboardError> {
        self.require_user(user_id).await
    }

    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> Result<User, TaskboardError> {
        let (name, email) = validation::validate_new_user(name, email, password)?;
        if self.storage.get_user_by_email(&email).await?.is_some() {
            warn!("Rejected duplicate email {}", email);
            return Err(TaskboardError::EmailAlreadyRegistered(email));
        }
        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password: self.hash_password(password)?,
            created_at: Utc::now(),
        };
        info!("Creating user {} <{}>", user.id, user.email);
        let user = self.storage.insert_user(user).await?;

        self.audit(
            None,
            USER_ADDED,
            json!({ "user_id": user.id, "name": user.name, "email": user.email }),
        )
        .await?;
        Ok(user)
    }

    /// Replaces name and email; the password changes only when one is given.
    pub async fn update_user(
        &self,
        user_id: &str,
        name: &str,
        email: &str,
        password: Option<&str>,
    ) -> Result<User, TaskboardError> {
        let (name, email) = validation::validate_user_profile(name, email)?;
        let mut user = self.require_user(user_id).await?;
        if let Some(other) = self.storage.get_user_by_email(&email).await? {
            if other.id != user.id {
                warn!("Rejected duplicate email {}", email);
                return Err(TaskboardError::EmailAlreadyRegistered(email));
            }
        }
        if let Some(password) = password {
            validation::validate_password(password)?;
            user.password = self.hash_password(password)?;
        }
        user.name = name;
        user.email = email;
        info!("Updating user {}", user_id);
        let user = self.storage.update_user(user).await?;

        self.audit(
            None,
            USER_UPDATED,
            json!({ "user_id": user.id, "name": user.name, "email": user.email }),
        )
        .await?;
        Ok(user)
    }

    /// Deletes the user and every membership they hold.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), TaskboardError> {
        let user = self.require_user(user_id).await?;
        info!("Deleting user {}", user_id);
        if !self.storage.delete_user(user_id).await? {
            return Err(TaskboardError::UserNotFound(user_id.to_string()));
        }

        self.audit(None, USER_DELETED, json!({ "user_id": user_id, "email": user.email }))
            .await?;
        Ok(())
    }

    // MEMBERSHIP

    /// Members in the order they joined.
    pub async fn list_members(&self, group_id: &str) -> Result<Vec<GroupMember>, TaskboardError> {
        self.require_group(group_id).await?;
        let memberships = self.storage.list_memberships(group_id).await?;
        let mut members = Vec::with_capacity(memberships.len());
        for membership in &memberships {
            match self.storage.get_user(&membership.user_id).await? {
                Some(user) => members.push(GroupMember::from_parts(&user, membership)),
                None => warn!(
                    "Membership in group {} references missing user {}",
                    group_id, membership.user_id
                ),
            }
        }
        Ok(members)
    }

    pub async fn assign_user(&self, group_id: &str, user_id: &str, role: Role) -> Result<GroupMember, TaskboardError> {
        self.require_group(group_id).await?;
        let user = self.require_user(user_id).await?;
        info!("Assigning user {} to group {} as {}", user_id, group_id, role);
        let membership = self
            .storage
            .add_membership(Membership {
                group_id: group_id.to_string(),
                user_id: user.id.clone(),
                role,
                joined_at: Utc::now(),
            })
            .await?;

        self.audit(
            Some(group_id),
            MEMBER_ADDED,
            json!({ "user_id": user.id, "email": user.email, "role": role.as_str() }),
        )
        .await?;
        Ok(GroupMember::from_parts(&user, &membership))
    }

    pub async fn remove_user(&self, group_id: &str, user_id: &str) -> Result<(), TaskboardError> {
        self.require_group(group_id).await?;
        self.require_user(user_id).await?;
        if !self.storage.remove_membership(group_id, user_id).await? {
            warn!("User {} is not in group {}", user_id, group_id);
            return Err(TaskboardError::NotGroupMember(user_id.to_string()));
        }
        info!("Removed user {} from group {}", user_id, group_id);

        self.audit(Some(group_id), MEMBER_REMOVED, json!({ "user_id": user_id }))
            .await?;
        Ok(())
    }

    // NOTIFICATIONS

    /// Sends one message per group member. Delivery failures are logged and
    /// do not fail the caller.
    async fn notify_members(
        &self,
        group_id: &str,
        subject: &str,
        body: &str,
    ) -> Result<Vec<Notification>, TaskboardError> {
        let notifications: Vec<Notification> = self
            .list_members(group_id)
            .await?
            .iter()
            .map(|member| Notification::new(&member.email, subject.to_string(), body.to_string()))
            .collect();

        let results = futures::future::join_all(
            notifications
                .iter()
                .map(|notification| self.notifier.send(notification.clone())),
        )
        .await;

        let mut delivered = Vec::with_capacity(notifications.len());
        for (notification, result) in notifications.into_iter().zip(results) {
            match result {
                Ok(()) => delivered.push(notification),
                Err(e) => warn!("Failed to notify {}: {}", notification.recipient, e),
            }
        }
        Ok(delivered)
    }

    /// Reminds group members of pending tasks due within the reminder window
    /// (whole calendar days, today included). Returns the messages delivered.
    ///
    /// Each task is reminded at most once per remaining day count, however
    /// often this runs. A group deleted mid-run is skipped.
    pub async fn check_deadlines(&self, now: DateTime<Utc>) -> Result<Vec<Notification>, TaskboardError> {
        let today = now.date_naive();
        let mut sent = Vec::new();
        let mut due = HashSet::new();
        for task in self.storage.list_all_tasks().await? {
            if task.status.is_completed() {
                continue;
            }
            let days_left = (task.deadline.date_naive() - today).num_days();
            if !(0..=self.reminder_window_days).contains(&days_left) {
                continue;
            }
            let key: ReminderKey = (task.id.clone(), task.deadline, days_left);
            due.insert(key.clone());
            if self.reminders_sent.read().await.contains(&key) {
                debug!("Reminder for task {} at {} day(s) already sent", task.id, days_left);
                continue;
            }
            let subject = format!(
                "Reminder: Deadline for '{}' is due in {} day(s)",
                task.title, days_left
            );
            let body = format!(
                "The task '{}' has a deadline on {}.\nYou have {} day(s) left to complete it.",
                task.title,
                task.deadline.format("%Y-%m-%d at %H:%M UTC"),
                days_left
            );
            let delivered = match self.notify_members(&task.group_id, &subject, &body).await {
                Ok(delivered) => delivered,
                Err(TaskboardError::GroupNotFound(group_id)) => {
                    warn!("Skipping reminder for task {}: group {} no longer exists", task.id, group_id);
                    continue;
                }
                Err(e) => return Err(e),
            };
            // undelivered reminders are retried on the next run
            if !delivered.is_empty() {
                self.reminders_sent.write().await.insert(key);
            }
            sent.extend(delivered);
        }
        self.reminders_sent.write().await.retain(|key| due.contains(key));

        if !sent.is_empty() {
            info!("Sent {} deadline reminders", sent.len());
            self.audit(None, DEADLINE_REMINDERS_SENT, json!({ "count": sent.len() }))
                .await?;
        }
        Ok(sent)
    }

    pub async fn get_notifications(&self) -> Result<Vec<Notification>, TaskboardError> {
        self.notifier.outbox().await
    }

    // AUDIT

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, TaskboardError> {
        self.logging.get_logs().await
    }

    pub async fn get_group_audits(&self, group_id: &str) -> Result<Vec<AppLog>, TaskboardError> {
        self.logging.get_group_logs(group_id).await
    }
}
