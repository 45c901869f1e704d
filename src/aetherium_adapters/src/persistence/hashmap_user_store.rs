use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use aetherium_core::{Email, StoredUser, User, UserId, UserStore, UserStoreError};

#[derive(Default)]
struct Users {
    by_email: HashMap<Email, StoredUser>,
    email_by_id: HashMap<UserId, Email>,
}

#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<Users>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    #[tracing::instrument(name = "Adding user to HashMap", skip_all)]
    async fn add_user(&self, user: StoredUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.by_email.contains_key(&user.user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users
            .email_by_id
            .insert(user.user.id, user.user.email.clone());
        users.by_email.insert(user.user.email.clone(), user.clone());
        Ok(user.into_user())
    }

    #[tracing::instrument(name = "Retrieving user by email from HashMap", skip_all)]
    async fn get_user_by_email(&self, email: &Email) -> Result<StoredUser, UserStoreError> {
        let users = self.users.read().await;
        users
            .by_email
            .get(email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    #[tracing::instrument(name = "Retrieving user by id from HashMap", skip(self))]
    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .email_by_id
            .get(id)
            .and_then(|email| users.by_email.get(email))
            .map(|stored| stored.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }
}
