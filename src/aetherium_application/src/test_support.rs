//! In-memory ports shared by the use-case tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use aetherium_core::{
    Email, IssuedToken, Password, PasswordHash, PasswordHasher, PasswordHasherError,
    RefreshTokenRecord, RefreshTokenStore, RefreshTokenStoreError, StoredUser, TokenError,
    TokenIssuer, User, UserId, UserStore, UserStoreError,
};
use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::{Barrier, RwLock};

#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<Email, StoredUser>>>,
}

impl MockUserStore {
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait::async_trait]
impl UserStore for MockUserStore {
    async fn add_user(&self, user: StoredUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(user.user.email.clone(), user.clone());
        Ok(user.into_user())
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<StoredUser, UserStoreError> {
        self.users
            .read()
            .await
            .get(email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|stored| &stored.user.id == id)
            .map(|stored| stored.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }
}

#[derive(Clone, Default)]
pub struct MockRefreshTokenStore {
    tokens: Arc<RwLock<HashMap<String, RefreshTokenRecord>>>,
}

impl MockRefreshTokenStore {
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait::async_trait]
impl RefreshTokenStore for MockRefreshTokenStore {
    async fn add_refresh_token(
        &self,
        record: RefreshTokenRecord,
    ) -> Result<(), RefreshTokenStoreError> {
        let key = record.token.expose_secret().clone();
        self.tokens.write().await.insert(key, record);
        Ok(())
    }

    async fn find_valid_refresh_token(
        &self,
        token: &Secret<String>,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshTokenRecord>, RefreshTokenStoreError> {
        Ok(self
            .tokens
            .read()
            .await
            .get(token.expose_secret())
            .filter(|record| !record.is_expired_at(now))
            .cloned())
    }

    async fn delete_refresh_token(
        &self,
        token: &Secret<String>,
    ) -> Result<bool, RefreshTokenStoreError> {
        Ok(self
            .tokens
            .write()
            .await
            .remove(token.expose_secret())
            .is_some())
    }
}

/// Holds every caller after its lookup until `callers` lookups have
/// completed, so all of them race on the same live record.
#[derive(Clone)]
pub struct ParkingRefreshTokenStore {
    inner: MockRefreshTokenStore,
    barrier: Arc<Barrier>,
}

impl ParkingRefreshTokenStore {
    pub fn new(inner: MockRefreshTokenStore, callers: usize) -> Self {
        Self {
            inner,
            barrier: Arc::new(Barrier::new(callers)),
        }
    }
}

#[async_trait::async_trait]
impl RefreshTokenStore for ParkingRefreshTokenStore {
    async fn add_refresh_token(
        &self,
        record: RefreshTokenRecord,
    ) -> Result<(), RefreshTokenStoreError> {
        self.inner.add_refresh_token(record).await
    }

    async fn find_valid_refresh_token(
        &self,
        token: &Secret<String>,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshTokenRecord>, RefreshTokenStoreError> {
        let found = self.inner.find_valid_refresh_token(token, now).await;
        self.barrier.wait().await;
        found
    }

    async fn delete_refresh_token(
        &self,
        token: &Secret<String>,
    ) -> Result<bool, RefreshTokenStoreError> {
        self.inner.delete_refresh_token(token).await
    }
}

/// Reversible "hash" so tests stay fast.
#[derive(Clone, Default)]
pub struct PlainTextHasher;

#[async_trait::async_trait]
impl PasswordHasher for PlainTextHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        Ok(PasswordHash::new(Secret::from(format!(
            "plain${}",
            password.as_ref().expose_secret()
        ))))
    }

    async fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let stored = hash
            .as_ref()
            .expose_secret()
            .strip_prefix("plain$")
            .ok_or_else(|| PasswordHasherError::MalformedHash("missing prefix".to_string()))?;
        Ok(stored == password.as_ref().expose_secret())
    }
}

/// Issues `<subject>.<serial>` tokens; verification only checks the shape.
#[derive(Clone, Default)]
pub struct CountingTokenIssuer {
    issued: Arc<AtomicUsize>,
}

impl TokenIssuer for CountingTokenIssuer {
    fn issue(&self, subject: &UserId, ttl: Duration) -> Result<IssuedToken, TokenError> {
        let serial = self.issued.fetch_add(1, Ordering::SeqCst);
        Ok(IssuedToken {
            token: Secret::from(format!("{subject}.{serial}")),
            expires_at: Utc::now() + ttl,
        })
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        token
            .split('.')
            .next()
            .and_then(|subject| subject.parse().ok())
            .ok_or(TokenError::InvalidToken)
    }
}

#[derive(Clone, Default)]
pub struct FailingTokenIssuer;

impl TokenIssuer for FailingTokenIssuer {
    fn issue(&self, _subject: &UserId, _ttl: Duration) -> Result<IssuedToken, TokenError> {
        Err(TokenError::Signing("key unavailable".to_string()))
    }

    fn verify(&self, _token: &str) -> Result<UserId, TokenError> {
        Err(TokenError::InvalidToken)
    }
}

pub fn email(raw: &str) -> Email {
    Email::parse(Secret::from(raw.to_string())).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::parse(Secret::from(raw.to_string())).unwrap()
}
