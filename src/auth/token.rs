use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// How long a session token stays valid after it is issued.
pub const SESSION_TTL_HOURS: i64 = 1;

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Id of the user the token was issued to.
    pub sub: i32,
    /// Issued-at, seconds since the epoch.
    pub iat: usize,
    /// Expiry, seconds since the epoch.
    pub exp: usize,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Token is required")]
    MissingToken,
    /// Bad signature, malformed token or expired claims.
    #[error("Invalid token")]
    InvalidToken,
}

/// Signing and verification keys derived once from the configured secret.
///
/// Shared by login (which issues tokens) and the request guard (which checks
/// them). Tokens are HS256 JWTs; verification checks the signature and `exp`
/// with no clock leeway, so a token is rejected the second it expires.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionKeys {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret)
    }

    pub fn issue(&self, user_id: i32) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issues a token as if it had been minted at `issued_at`.
    pub fn issue_at(
        &self,
        user_id: i32,
        issued_at: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let expires_at = issued_at + Duration::hours(SESSION_TTL_HOURS);
        let claims = Claims {
            sub: user_id,
            iat: issued_at.timestamp() as usize,
            exp: expires_at.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, SessionError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("rejected session token: {}", e);
                SessionError::InvalidToken
            })
    }
}
