use std::collections::HashMap;
use std::sync::Arc;

use aetherium_core::{RefreshTokenRecord, RefreshTokenStore, RefreshTokenStoreError};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

#[derive(Default, Clone)]
pub struct HashMapRefreshTokenStore {
    tokens: Arc<RwLock<HashMap<String, RefreshTokenRecord>>>,
}

impl HashMapRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RefreshTokenStore for HashMapRefreshTokenStore {
    #[tracing::instrument(name = "Storing refresh token in HashMap", skip_all)]
    async fn add_refresh_token(
        &self,
        record: RefreshTokenRecord,
    ) -> Result<(), RefreshTokenStoreError> {
        let mut tokens = self.tokens.write().await;
        insert_token(&mut tokens, record)
    }

    #[tracing::instrument(name = "Looking up refresh token in HashMap", skip_all)]
    async fn find_valid_refresh_token(
        &self,
        token: &Secret<String>,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshTokenRecord>, RefreshTokenStoreError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .get(token.expose_secret())
            .filter(|record| !record.is_expired_at(now))
            .cloned())
    }

    #[tracing::instrument(name = "Deleting refresh token from HashMap", skip_all)]
    async fn delete_refresh_token(
        &self,
        token: &Secret<String>,
    ) -> Result<bool, RefreshTokenStoreError> {
        let mut tokens = self.tokens.write().await;
        Ok(tokens.remove(token.expose_secret()).is_some())
    }

    #[tracing::instrument(name = "Rotating refresh token in HashMap", skip_all)]
    async fn rotate_refresh_token(
        &self,
        consumed: &Secret<String>,
        replacement: RefreshTokenRecord,
    ) -> Result<bool, RefreshTokenStoreError> {
        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(replacement.token.expose_secret()) {
            return Err(RefreshTokenStoreError::DuplicateToken);
        }
        if tokens.remove(consumed.expose_secret()).is_none() {
            return Ok(false);
        }
        insert_token(&mut tokens, replacement)?;
        Ok(true)
    }
}

/// Inserts `record`, purging expired records first.
fn insert_token(
    tokens: &mut HashMap<String, RefreshTokenRecord>,
    record: RefreshTokenRecord,
) -> Result<(), RefreshTokenStoreError> {
    let now = Utc::now();
    tokens.retain(|_, existing| !existing.is_expired_at(now));

    let key = record.token.expose_secret().clone();
    if tokens.contains_key(&key) {
        return Err(RefreshTokenStoreError::DuplicateToken);
    }
    tokens.insert(key, record);
    Ok(())
}
