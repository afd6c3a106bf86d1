use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::User;

/// Role a user holds inside one group.
///
/// The lowercase value is both the wire format and the display text.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Admin,
    Editor,
    Viewer,
    Owner,
    Guest,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Member,
        Role::Admin,
        Role::Editor,
        Role::Viewer,
        Role::Owner,
        Role::Guest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
            Role::Owner => "owner",
            Role::Guest => "guest",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown role '{}'", s))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[schema(value_type = String, example = "2030-01-01T00:00:00Z")]
    pub created_at: DateTime<Utc>,
}

/// Stored association between a user and a group.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Membership {
    pub group_id: String,
    pub user_id: String,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}

/// A member as listed for a group: the user's public fields plus the role.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct GroupMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl GroupMember {
    pub fn from_parts(user: &User, membership: &Membership) -> Self {
        GroupMember {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: membership.role,
        }
    }
}
