use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    #[schema(value_type = String, example = "2030-01-01T00:00:00Z")]
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(recipient: &str, subject: String, body: String) -> Self {
        Notification {
            id: Uuid::new_v4().to_string(),
            recipient: recipient.to_string(),
            subject,
            body,
            created_at: Utc::now(),
        }
    }
}
