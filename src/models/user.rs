use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
}

/// An account row together with its stored bcrypt hash, used only for login.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

impl From<UserCredentials> for User {
    fn from(credentials: UserCredentials) -> Self {
        User {
            id: credentials.id,
            username: credentials.username,
        }
    }
}
