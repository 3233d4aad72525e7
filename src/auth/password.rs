use bcrypt::{hash, verify, BcryptError};

/// bcrypt work factor used for stored passwords.
pub const BCRYPT_COST: u32 = 10;

pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

/// Constant-time comparison against a stored bcrypt hash.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, BcryptError> {
    verify(password, hashed_password)
}
