use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, Secret};

use super::user::UserId;

/// A freshly signed bearer token together with the expiry embedded in it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: Secret<String>,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    pub fn as_str(&self) -> &str {
        self.token.expose_secret()
    }
}

/// Persisted record of a refresh token that has not been consumed yet.
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub token: Secret<String>,
    pub owner_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    pub fn from_issued(issued: &IssuedToken, owner_id: UserId) -> Self {
        Self {
            token: issued.token.clone(),
            owner_id,
            expires_at: issued.expires_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// How long access and refresh tokens stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::days(2),
            refresh: Duration::days(7),
        }
    }
}
