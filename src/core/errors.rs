use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Error, Debug, Serialize)]
pub enum TaskboardError {
    /// Email is already registered to another user
    #[error("Email {0} is already in use")]
    EmailAlreadyRegistered(String),

    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Group {0} not found")]
    GroupNotFound(String),

    #[error("Task {0} not found")]
    TaskNotFound(String),

    /// A task with the same title already exists in the group
    #[error("Task '{0}' already exists in this group")]
    TaskAlreadyExists(String),

    #[error("User {0} is already a group member")]
    AlreadyGroupMember(String),

    #[error("User {0} is not a group member")]
    NotGroupMember(String),

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Field validation failure; `FieldError::description` is the user-facing message
    #[error("Invalid input for field `{0}`: {desc}", desc = .1.description)]
    InvalidInput(String, FieldError),

    #[error("Missing or invalid API key")]
    Unauthorized,

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Notification error: {0}")]
    NotificationError(String),
}

impl TaskboardError {
    pub fn invalid(field: &str, title: &str, description: &str) -> Self {
        TaskboardError::InvalidInput(field.to_string(), FieldError::new(field, title, description))
    }

    /// The message shown to a person, without the field prefix.
    pub fn user_message(&self) -> String {
        match self {
            TaskboardError::InvalidInput(_, field_error) => field_error.description.clone(),
            other => other.to_string(),
        }
    }
}
