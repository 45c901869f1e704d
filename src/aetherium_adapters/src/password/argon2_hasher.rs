use aetherium_core::{Password, PasswordHash, PasswordHasher, PasswordHasherError};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        self, PasswordHash as EncodedHash, PasswordHasher as _, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

/// Argon2id hasher. Hashing runs on the blocking pool so request tasks are
/// never stalled by the key derivation.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            params: Params::new(15000, 2, 1, None).unwrap_or_default(),
        }
    }
}

impl Argon2Hasher {
    /// Custom cost parameters, mostly for cheap hashing in tests.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }
}

#[async_trait]
impl PasswordHasher for Argon2Hasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        let password = password.clone();
        let params = self.params.clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let salt = SaltString::generate(&mut OsRng);
                Self::argon2(params)
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|hash| PasswordHash::new(Secret::new(hash.to_string())))
                    .map_err(|e| PasswordHasherError::Hashing(e.to_string()))
            })
        })
        .await
        .map_err(|e| PasswordHasherError::Hashing(e.to_string()))?
    }

    #[tracing::instrument(name = "Verifying password hash", skip_all)]
    async fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let password = password.clone();
        let hash = hash.clone();
        let params = self.params.clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected = EncodedHash::new(hash.as_ref().expose_secret())
                    .map_err(|e| PasswordHasherError::MalformedHash(e.to_string()))?;

                match Self::argon2(params)
                    .verify_password(password.as_ref().expose_secret().as_bytes(), &expected)
                {
                    Ok(()) => Ok(true),
                    Err(password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(PasswordHasherError::MalformedHash(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| PasswordHasherError::Hashing(e.to_string()))?
    }
}
