use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    email::Email,
    token::RefreshTokenRecord,
    user::{StoredUser, User, UserId},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user. Fails with `UserAlreadyExists` when the email is
    /// taken, including when a concurrent insert won the race.
    async fn add_user(&self, user: StoredUser) -> Result<User, UserStoreError>;
    async fn get_user_by_email(&self, email: &Email) -> Result<StoredUser, UserStoreError>;
    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserStoreError>;
}

// RefreshTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum RefreshTokenStoreError {
    #[error("Refresh token already exists")]
    DuplicateToken,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn add_refresh_token(
        &self,
        record: RefreshTokenRecord,
    ) -> Result<(), RefreshTokenStoreError>;

    /// Returns the record for `token` if it exists and expires after `now`.
    async fn find_valid_refresh_token(
        &self,
        token: &Secret<String>,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshTokenRecord>, RefreshTokenStoreError>;

    /// Removes the record for `token`. Returns `true` only for the caller
    /// whose call actually removed it.
    async fn delete_refresh_token(
        &self,
        token: &Secret<String>,
    ) -> Result<bool, RefreshTokenStoreError>;

    /// Consumes `consumed` and stores `replacement` in its place. Returns
    /// `false`, storing nothing, when `consumed` was already gone.
    ///
    /// Stores that can should override this so the delete and the insert
    /// commit together.
    async fn rotate_refresh_token(
        &self,
        consumed: &Secret<String>,
        replacement: RefreshTokenRecord,
    ) -> Result<bool, RefreshTokenStoreError> {
        if !self.delete_refresh_token(consumed).await? {
            return Ok(false);
        }
        self.add_refresh_token(replacement).await?;
        Ok(true)
    }
}
