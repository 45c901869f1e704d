use aetherium_core::{IssuedToken, TokenError, TokenIssuer, UserId};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
#[error("JWT secret must not be empty")]
pub struct EmptySecretError;

/// Claims carried by both access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    /// Unique per token so two tokens minted in the same second never collide.
    pub jti: String,
}

/// HS256 token issuer keyed by the shared server secret.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenIssuer {
    pub fn new(secret: &Secret<String>) -> Result<Self, EmptySecretError> {
        let secret = secret.expose_secret().as_bytes();
        if secret.is_empty() {
            return Err(EmptySecretError);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    fn claims_for(
        subject: &UserId,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Claims, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Signing("Duration out of range".to_string()))?;

        Ok(Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, subject: &UserId, ttl: Duration) -> Result<IssuedToken, TokenError> {
        let claims = Self::claims_for(subject, Utc::now(), ttl)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| TokenError::Signing("Expiry out of range".to_string()))?;

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            token: Secret::new(token),
            expires_at,
        })
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected token");
                TokenError::InvalidToken
            })?;

        claims.sub.parse().map_err(|_| TokenError::InvalidToken)
    }
}
