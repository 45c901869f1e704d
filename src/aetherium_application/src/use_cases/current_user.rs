use aetherium_core::{User, UserId, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum CurrentUserError {
    #[error("User not found")]
    UserNotFound,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

impl From<UserStoreError> for CurrentUserError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => CurrentUserError::UserNotFound,
            e => CurrentUserError::UserStoreError(e),
        }
    }
}

/// Current user use case - resolves an authenticated subject to its user
pub struct CurrentUserUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> CurrentUserUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "CurrentUserUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<User, CurrentUserError> {
        Ok(self.user_store.get_user_by_id(&user_id).await?)
    }
}
