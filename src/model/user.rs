use chrono::{DateTime, Utc};

use super::Snowflake;

pub type Id = Snowflake;

/// Stored user record. The `password` field holds the argon2 PHC string,
/// never plaintext, and is skipped on serialization as a backstop.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// User fields safe to send to clients.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PublicUser {
    pub id: Id,
    pub name: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Registration request body. Fields default to empty so a missing field
/// fails validation instead of body deserialization.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
