use aetherium_core::{
    Credentials, PasswordHasher, PasswordHasherError, StoredUser, User, UserStore, UserStoreError,
};

/// Error types specific to the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Email is already registered")]
    EmailAlreadyRegistered,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Password hasher error: {0}")]
    PasswordHasherError(#[from] PasswordHasherError),
}

/// Register use case - creates a user account from validated credentials
pub struct RegisterUseCase<U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    user_store: U,
    hasher: H,
}

impl<U, H> RegisterUseCase<U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    pub fn new(user_store: U, hasher: H) -> Self {
        Self { user_store, hasher }
    }

    /// Execute the register use case
    ///
    /// The lookup before insert only spares a hash computation for the common
    /// duplicate case. Uniqueness itself is enforced by the store, whose
    /// `UserAlreadyExists` is mapped to the same error.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, credentials: Credentials) -> Result<User, RegisterError> {
        match self.user_store.get_user_by_email(&credentials.email).await {
            Ok(_) => return Err(RegisterError::EmailAlreadyRegistered),
            Err(UserStoreError::UserNotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let password_hash = self.hasher.hash(&credentials.password).await?;
        let user = StoredUser::new(credentials.email, password_hash);

        self.user_store.add_user(user).await.map_err(|e| match e {
            UserStoreError::UserAlreadyExists => RegisterError::EmailAlreadyRegistered,
            e => e.into(),
        })
    }
}
