use log::{info, warn};
use std::sync::Arc;

use super::password::{hash_password, verify_password, BCRYPT_COST};
use super::token::SessionKeys;
use crate::models::User;
use crate::store::{StoreError, UserStore};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("username is already taken")]
    DuplicateUsername,
    #[error("no such user")]
    NotFound,
    #[error("password does not match")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("password worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AuthError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Duplicate => AuthError::DuplicateUsername,
            other => AuthError::Store(other),
        }
    }
}

/// Registers accounts and exchanges credentials for session tokens.
///
/// bcrypt runs on the blocking thread pool so it never stalls a request worker.
/// Sessions are stateless: nothing is persisted at login, and a token stays
/// valid until it expires.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    keys: SessionKeys,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, keys: SessionKeys) -> Self {
        Self {
            users,
            keys,
            hash_cost: BCRYPT_COST,
        }
    }

    /// Overrides the bcrypt work factor.
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let password = password.to_owned();
        let cost = self.hash_cost;
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;
        let user = self.users.insert_user(username, &password_hash).await?;
        info!("registered user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// Checks the credentials and returns a freshly signed session token.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = self
            .users
            .find_user(username)
            .await?
            .ok_or(AuthError::NotFound)?;

        let password = password.to_owned();
        let hash = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;
        if !matches {
            warn!("wrong password for user {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        Ok(self.keys.issue(user.id)?)
    }
}
