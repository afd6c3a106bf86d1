use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::TaskboardError;
use crate::core::models::{group::Role, task::TaskStatus};

// Request structs for JSON payloads. Text fields default to empty so that a
// missing field reaches validation and gets its field-specific message.

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct GroupRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to 0 (pending)
    #[serde(default)]
    #[schema(value_type = Option<u8>)]
    pub status: Option<TaskStatus>,
    /// RFC 3339 with offset, e.g. `2030-01-01T00:00:00Z`
    pub deadline: Option<String>,
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[schema(value_type = u8)]
    pub status: TaskStatus,
    pub deadline: Option<String>,
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Left unchanged when absent
    pub password: Option<String>,
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct AssignUserRequest {
    pub user_id: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct RemoveUserRequest {
    pub user_id: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for TaskboardError to implement IntoResponse
pub struct ApiError(pub TaskboardError);

impl From<TaskboardError> for ApiError {
    fn from(err: TaskboardError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TaskboardError::InvalidInput(..) | TaskboardError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            TaskboardError::Unauthorized => StatusCode::UNAUTHORIZED,
            TaskboardError::UserNotFound(_)
            | TaskboardError::GroupNotFound(_)
            | TaskboardError::TaskNotFound(_)
            | TaskboardError::NotGroupMember(_) => StatusCode::NOT_FOUND,
            TaskboardError::EmailAlreadyRegistered(_)
            | TaskboardError::TaskAlreadyExists(_)
            | TaskboardError::AlreadyGroupMember(_) => StatusCode::CONFLICT,
            TaskboardError::InternalServerError(_)
            | TaskboardError::StorageError(_)
            | TaskboardError::LoggingError(_)
            | TaskboardError::NotificationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let error = self.0.user_message();
        (status, Json(ErrorResponse { error })).into_response()
    }
}
