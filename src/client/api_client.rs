use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::api::models::{
    AssignUserRequest, CreateTaskRequest, CreateUserRequest, ErrorResponse, GroupRequest, RemoveUserRequest,
    UpdateTaskRequest, UpdateUserRequest,
};
use crate::client::{ClientError, TaskBoard, TaskForm};
use crate::constants::constants::API_KEY_HEADER;
use crate::core::models::{
    group::{Group, GroupMember, Role},
    task::{Task, TaskSummary},
    user::User,
};
use crate::core::validation::{self, TaskDraft};

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Prefix every path is appended to, including `/api`.
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://127.0.0.1:5000/api".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// One method per REST call. Inputs the server would reject on field rules
/// are checked first and never leave the process.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("taskboard-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(ApiClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key.as_str()),
            None => builder,
        }
    }

    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .map(|body| body.error)
            .filter(|error| !error.is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        warn!("Request failed with {}: {}", status, message);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
        let response = Self::check(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn execute(builder: RequestBuilder) -> Result<(), ClientError> {
        Self::check(builder.send().await?).await?;
        Ok(())
    }

    // GROUPS

    pub async fn list_groups(&self) -> Result<Vec<Group>, ClientError> {
        Self::fetch(self.request(Method::GET, "groups/")).await
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Group, ClientError> {
        Self::fetch(self.request(Method::GET, &format!("groups/{}/", group_id))).await
    }

    pub async fn create_group(&self, name: &str) -> Result<Group, ClientError> {
        let name = validation::validate_group_name(name)?;
        info!("Creating group '{}'", name);
        Self::fetch(self.request(Method::POST, "groups/").json(&GroupRequest { name })).await
    }

    pub async fn rename_group(&self, group_id: &str, name: &str) -> Result<Group, ClientError> {
        let name = validation::validate_group_name(name)?;
        Self::fetch(
            self.request(Method::PUT, &format!("groups/{}/", group_id))
                .json(&GroupRequest { name }),
        )
        .await
    }

    pub async fn delete_group(&self, group_id: &str) -> Result<(), ClientError> {
        Self::execute(self.request(Method::DELETE, &format!("groups/{}/", group_id))).await
    }

    // TASKS

    pub async fn list_tasks(&self, group_id: &str) -> Result<Vec<Task>, ClientError> {
        Self::fetch(self.request(Method::GET, &format!("groups/{}/tasks/", group_id))).await
    }

    /// Fetches the group's tasks into a fresh board.
    pub async fn load_board(&self, group_id: &str) -> Result<TaskBoard, ClientError> {
        Ok(TaskBoard::from_tasks(self.list_tasks(group_id).await?))
    }

    pub async fn get_task(&self, group_id: &str, task_id: &str) -> Result<Task, ClientError> {
        Self::fetch(self.request(Method::GET, &format!("groups/{}/tasks/{}/", group_id, task_id))).await
    }

    pub async fn create_task(&self, group_id: &str, draft: &TaskDraft) -> Result<Task, ClientError> {
        let body = CreateTaskRequest {
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: Some(draft.status),
            deadline: Some(draft.deadline.to_rfc3339()),
        };
        info!("Creating task '{}' in group {}", body.title, group_id);
        Self::fetch(
            self.request(Method::POST, &format!("groups/{}/tasks/", group_id))
                .json(&body),
        )
        .await
    }

    pub async fn update_task(&self, group_id: &str, task_id: &str, draft: &TaskDraft) -> Result<Task, ClientError> {
        let body = UpdateTaskRequest {
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status,
            deadline: Some(draft.deadline.to_rfc3339()),
        };
        info!("Updating task {} in group {}", task_id, group_id);
        Self::fetch(
            self.request(Method::PUT, &format!("groups/{}/tasks/{}/", group_id, task_id))
                .json(&body),
        )
        .await
    }

    /// Validates the form against the current time, then creates or updates
    /// depending on how the form was built.
    pub async fn submit_task_form(&self, group_id: &str, form: &TaskForm) -> Result<Task, ClientError> {
        let draft = form.validate(Utc::now())?;
        match form.task_id() {
            Some(task_id) => self.update_task(group_id, task_id, &draft).await,
            None => self.create_task(group_id, &draft).await,
        }
    }

    /// Flips Pending/Completed and leaves every other field as it is.
    pub async fn toggle_status(&self, task: &Task) -> Result<Task, ClientError> {
        let draft = TaskDraft {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.toggled(),
            deadline: task.deadline,
        };
        self.update_task(&task.group_id, &task.id, &draft).await
    }

    pub async fn delete_task(&self, group_id: &str, task_id: &str) -> Result<(), ClientError> {
        Self::execute(self.request(Method::DELETE, &format!("groups/{}/tasks/{}/", group_id, task_id))).await
    }

    pub async fn task_summary(&self, group_id: &str) -> Result<TaskSummary, ClientError> {
        Self::fetch(self.request(Method::GET, &format!("groups/{}/summary/", group_id))).await
    }

    // MEMBERS AND USERS

    pub async fn list_members(&self, group_id: &str) -> Result<Vec<GroupMember>, ClientError> {
        Self::fetch(self.request(Method::GET, &format!("groups/{}/members/", group_id))).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        Self::fetch(self.request(Method::GET, "users/")).await
    }

    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> Result<User, ClientError> {
        let (name, email) = validation::validate_new_user(name, email, password)?;
        let body = CreateUserRequest {
            name,
            email,
            password: password.to_string(),
        };
        Self::fetch(self.request(Method::POST, "users/").json(&body)).await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, ClientError> {
        Self::fetch(self.request(Method::GET, &format!("users/{}/", user_id))).await
    }

    /// Replaces name and email; the password changes only when given.
    pub async fn update_user(
        &self,
        user_id: &str,
        name: &str,
        email: &str,
        password: Option<&str>,
    ) -> Result<User, ClientError> {
        let (name, email) = validation::validate_user_profile(name, email)?;
        if let Some(password) = password {
            validation::validate_password(password)?;
        }
        let body = UpdateUserRequest {
            name,
            email,
            password: password.map(String::from),
        };
        Self::fetch(
            self.request(Method::PUT, &format!("users/{}/", user_id))
                .json(&body),
        )
        .await
    }

    /// Deleting a user also drops them from every group.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), ClientError> {
        info!("Deleting user {}", user_id);
        Self::execute(self.request(Method::DELETE, &format!("users/{}/", user_id))).await
    }

    pub async fn assign_user(&self, group_id: &str, user_id: &str, role: Role) -> Result<GroupMember, ClientError> {
        let body = AssignUserRequest {
            user_id: user_id.to_string(),
            role,
        };
        Self::fetch(
            self.request(Method::POST, &format!("groups/{}/user/", group_id))
                .json(&body),
        )
        .await
    }

    pub async fn remove_user(&self, group_id: &str, user_id: &str) -> Result<(), ClientError> {
        let body = RemoveUserRequest {
            user_id: user_id.to_string(),
        };
        Self::execute(
            self.request(Method::DELETE, &format!("groups/{}/user/", group_id))
                .json(&body),
        )
        .await
    }
}
