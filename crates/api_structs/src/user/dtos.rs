use agenda_domain::{User, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A `User` as seen by clients. The api token is never part of it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub username: String,
    pub email: String,
    pub created: DateTime<Utc>,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created: user.created,
        }
    }
}
