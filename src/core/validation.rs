//! Field rules shared by the service and the client.
//!
//! Every check returns [`TaskboardError::InvalidInput`] carrying a
//! [`FieldError`](crate::core::errors::FieldError) whose description is the
//! message shown to the user. Checks run in a fixed order and stop at the
//! first failure.

use chrono::{DateTime, Utc};

use crate::core::errors::TaskboardError;
use crate::core::models::task::TaskStatus;

pub const MAX_NAME_LENGTH: usize = 64;
pub const MAX_TITLE_LENGTH: usize = 64;

/// Task fields after validation: trimmed text and a parsed deadline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub deadline: DateTime<Utc>,
}

fn required(field: &str, label: &str, value: &str, max_length: usize) -> Result<String, TaskboardError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskboardError::invalid(
            field,
            &format!("Missing {}", field),
            &format!("{} is required.", label),
        ));
    }
    if trimmed.chars().count() > max_length {
        return Err(TaskboardError::invalid(
            field,
            &format!("{} Too Long", label),
            &format!("{} cannot exceed {} characters.", label, max_length),
        ));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(TaskboardError::invalid(
            field,
            &format!("Invalid {}", field),
            &format!("{} contains invalid characters.", label),
        ));
    }
    Ok(trimmed.to_string())
}

pub fn validate_group_name(name: &str) -> Result<String, TaskboardError> {
    required("name", "Group name", name, MAX_NAME_LENGTH)
}

pub fn validate_email(email: &str) -> Result<String, TaskboardError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(TaskboardError::invalid("email", "Missing email", "User email is required."));
    }
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    };
    if !well_formed || email.len() < 5 {
        return Err(TaskboardError::InvalidEmail(email.to_string()));
    }
    Ok(email.to_string())
}

pub fn validate_password(password: &str) -> Result<(), TaskboardError> {
    if password.is_empty() {
        return Err(TaskboardError::invalid(
            "password",
            "Missing password",
            "User password is required.",
        ));
    }
    Ok(())
}

/// Name, email, password, in that order. Returns the trimmed name and email.
pub fn validate_new_user(name: &str, email: &str, password: &str) -> Result<(String, String), TaskboardError> {
    let name = required("name", "User name", name, MAX_NAME_LENGTH)?;
    let email = validate_email(email)?;
    validate_password(password)?;
    Ok((name, email))
}

pub fn validate_user_profile(name: &str, email: &str) -> Result<(String, String), TaskboardError> {
    let name = required("name", "User name", name, MAX_NAME_LENGTH)?;
    let email = validate_email(email)?;
    Ok((name, email))
}

/// Deadlines must carry an explicit offset; naive local timestamps are rejected.
pub fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, TaskboardError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|deadline| deadline.with_timezone(&Utc))
        .map_err(|_| {
            TaskboardError::invalid(
                "deadline",
                "Invalid deadline",
                "Task deadline must be an RFC 3339 timestamp with a timezone offset.",
            )
        })
}

pub fn ensure_not_past(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), TaskboardError> {
    if deadline < now {
        return Err(TaskboardError::invalid(
            "deadline",
            "Invalid deadline",
            "Task deadline cannot be in the past.",
        ));
    }
    Ok(())
}

/// Title, description, deadline present, deadline well-formed, and (when
/// `reject_past` is set) deadline not before `now`.
pub fn validate_task(
    title: &str,
    description: &str,
    status: TaskStatus,
    deadline: Option<&str>,
    now: DateTime<Utc>,
    reject_past: bool,
) -> Result<TaskDraft, TaskboardError> {
    let title = required("title", "Task title", title, MAX_TITLE_LENGTH)?;
    let description = required("description", "Task description", description, usize::MAX)?;
    let raw_deadline = match deadline.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            return Err(TaskboardError::invalid(
                "deadline",
                "Missing deadline",
                "Task deadline is required.",
            ));
        }
    };
    let deadline = parse_deadline(raw_deadline)?;
    if reject_past {
        ensure_not_past(deadline, now)?;
    }
    Ok(TaskDraft {
        title,
        description,
        status,
        deadline,
    })
}
