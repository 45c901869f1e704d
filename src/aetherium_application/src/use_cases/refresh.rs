use aetherium_core::{
    IssuedToken, RefreshTokenRecord, RefreshTokenStore, RefreshTokenStoreError, TokenError,
    TokenIssuer, TokenLifetimes,
};
use chrono::Utc;
use secrecy::Secret;

/// Response from refresh use case
#[derive(Debug)]
pub struct RefreshResponse {
    pub access_token: IssuedToken,
    pub refresh_token: IssuedToken,
}

/// Error types specific to refresh use case
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// Covers unknown, expired and already consumed tokens alike.
    #[error("Invalid or expired refresh token")]
    InvalidOrExpiredToken,
    #[error("Refresh token store error: {0}")]
    RefreshTokenStoreError(#[from] RefreshTokenStoreError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

/// Refresh use case - rotates a refresh token into a new token pair
pub struct RefreshUseCase<R, T>
where
    R: RefreshTokenStore,
    T: TokenIssuer,
{
    refresh_token_store: R,
    token_issuer: T,
    lifetimes: TokenLifetimes,
}

impl<R, T> RefreshUseCase<R, T>
where
    R: RefreshTokenStore,
    T: TokenIssuer,
{
    pub fn new(refresh_token_store: R, token_issuer: T, lifetimes: TokenLifetimes) -> Self {
        Self {
            refresh_token_store,
            token_issuer,
            lifetimes,
        }
    }

    /// Execute the refresh use case
    ///
    /// A refresh token mints a new pair at most once: the old record is
    /// consumed and the new one stored in a single store call, and only the
    /// caller whose call removed the record proceeds. Concurrent callers get
    /// `InvalidOrExpiredToken`.
    #[tracing::instrument(name = "RefreshUseCase::execute", skip_all)]
    pub async fn execute(&self, token: Secret<String>) -> Result<RefreshResponse, RefreshError> {
        let record = self
            .refresh_token_store
            .find_valid_refresh_token(&token, Utc::now())
            .await?
            .ok_or(RefreshError::InvalidOrExpiredToken)?;

        let access_token = self
            .token_issuer
            .issue(&record.owner_id, self.lifetimes.access)?;
        let refresh_token = self
            .token_issuer
            .issue(&record.owner_id, self.lifetimes.refresh)?;

        let rotated = self
            .refresh_token_store
            .rotate_refresh_token(
                &token,
                RefreshTokenRecord::from_issued(&refresh_token, record.owner_id),
            )
            .await?;
        if !rotated {
            tracing::warn!(user_id = %record.owner_id, "Refresh token consumed concurrently");
            return Err(RefreshError::InvalidOrExpiredToken);
        }

        Ok(RefreshResponse {
            access_token,
            refresh_token,
        })
    }
}
