use thiserror::Error;

use crate::core::errors::TaskboardError;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Rejected before any request was sent.
    #[error("{}", .0.user_message())]
    Invalid(TaskboardError),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Invalid(err) => err.user_message(),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Http(err) if err.is_timeout() => "The server took too long to respond.".to_string(),
            ClientError::Http(_) => "Unable to reach the server.".to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TaskboardError> for ClientError {
    fn from(err: TaskboardError) -> Self {
        ClientError::Invalid(err)
    }
}
