use aetherium_core::{
    Credentials, IssuedToken, PasswordHasher, PasswordHasherError, RefreshTokenRecord,
    RefreshTokenStore, RefreshTokenStoreError, TokenError, TokenIssuer, TokenLifetimes, User,
    UserStore, UserStoreError,
};

/// Response from login use case
#[derive(Debug)]
pub struct LoginResponse {
    pub user: User,
    pub access_token: IssuedToken,
    pub refresh_token: IssuedToken,
}

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Unknown email and wrong password are deliberately the same variant.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Refresh token store error: {0}")]
    RefreshTokenStoreError(#[from] RefreshTokenStoreError),
    #[error("Password hasher error: {0}")]
    PasswordHasherError(#[from] PasswordHasherError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl From<UserStoreError> for LoginError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => LoginError::InvalidCredentials,
            e => LoginError::UserStoreError(e),
        }
    }
}

/// Login use case - verifies credentials and opens a session
pub struct LoginUseCase<U, R, H, T>
where
    U: UserStore,
    R: RefreshTokenStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    user_store: U,
    refresh_token_store: R,
    hasher: H,
    token_issuer: T,
    lifetimes: TokenLifetimes,
}

impl<U, R, H, T> LoginUseCase<U, R, H, T>
where
    U: UserStore,
    R: RefreshTokenStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    pub fn new(
        user_store: U,
        refresh_token_store: R,
        hasher: H,
        token_issuer: T,
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            user_store,
            refresh_token_store,
            hasher,
            token_issuer,
            lifetimes,
        }
    }

    /// Execute the login use case
    ///
    /// # Returns
    /// The public user plus a fresh access token and a persisted refresh token
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(&self, credentials: Credentials) -> Result<LoginResponse, LoginError> {
        let stored = self
            .user_store
            .get_user_by_email(&credentials.email)
            .await?;

        let matches = self
            .hasher
            .verify(&credentials.password, &stored.password_hash)
            .await?;
        if !matches {
            return Err(LoginError::InvalidCredentials);
        }

        let user = stored.into_user();
        let access_token = self.token_issuer.issue(&user.id, self.lifetimes.access)?;
        let refresh_token = self.token_issuer.issue(&user.id, self.lifetimes.refresh)?;

        self.refresh_token_store
            .add_refresh_token(RefreshTokenRecord::from_issued(&refresh_token, user.id))
            .await?;

        tracing::debug!(user_id = %user.id, "Session opened");

        Ok(LoginResponse {
            user,
            access_token,
            refresh_token,
        })
    }
}
