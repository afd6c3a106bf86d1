use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// bcrypt hash; never leaves the server
    #[serde(skip_serializing, default)]
    #[schema(ignore)]
    pub password: String,
    #[schema(value_type = String, example = "2030-01-01T00:00:00Z")]
    pub created_at: DateTime<Utc>,
}
