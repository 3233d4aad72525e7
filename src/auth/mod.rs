pub mod extractors;
pub mod password;
pub mod service;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::User;

pub use extractors::Identity;
pub use password::{hash_password, verify_password, BCRYPT_COST};
pub use service::{AuthError, AuthService};
pub use token::{Claims, SessionError, SessionKeys};

lazy_static! {
    // Letters, digits, underscores, dots and hyphens.
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap();
}

/// Body of `POST /register`. New usernames and passwords must pass these rules.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 1, max = 64),
        regex(
            path = "USERNAME_REGEX",
            message = "Username may only contain letters, digits, underscores, dots or hyphens"
        )
    )]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Body of `POST /login`.
///
/// Not validated: accounts created before the registration rules existed must
/// still be able to sign in, and a malformed username simply fails the lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
