use async_trait::async_trait;
use chrono::Duration;
use thiserror::Error;

use crate::domain::{
    password::Password,
    token::IssuedToken,
    user::{PasswordHash, UserId},
};

#[derive(Debug, Error)]
pub enum PasswordHasherError {
    #[error("Failed to hash password: {0}")]
    Hashing(String),
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Salted, deliberately slow one-way password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError>;

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
    async fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError>;
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Signs and verifies time-limited bearer tokens whose subject is a user id.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, subject: &UserId, ttl: Duration) -> Result<IssuedToken, TokenError>;

    /// Fails with `InvalidToken` on a bad signature, a malformed payload or
    /// an expiry in the past.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}

#[derive(Debug, Error)]
#[error("Datastore unavailable: {0}")]
pub struct DatastoreError(pub String);

/// Liveness check for a backing datastore.
#[async_trait]
pub trait DatastoreProbe: Send + Sync {
    async fn ping(&self) -> Result<(), DatastoreError>;
}
