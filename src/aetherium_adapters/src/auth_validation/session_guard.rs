use std::sync::Arc;

use aetherium_core::{TokenIssuer, UserId};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use super::SessionGuardError;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity attached to a request once its bearer token has been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

/// Verifies the `Authorization: Bearer <token>` header of protected routes.
pub struct SessionGuard<T> {
    issuer: Option<Arc<T>>,
}

impl<T> Clone for SessionGuard<T> {
    fn clone(&self) -> Self {
        Self {
            issuer: self.issuer.clone(),
        }
    }
}

impl<T: TokenIssuer> SessionGuard<T> {
    pub fn new(issuer: Arc<T>) -> Self {
        Self {
            issuer: Some(issuer),
        }
    }

    /// A guard without a verifier; every request reaching the verification
    /// step fails as a server error.
    pub fn unconfigured() -> Self {
        Self { issuer: None }
    }

    pub fn authenticate(
        &self,
        headers: &HeaderMap,
    ) -> Result<AuthenticatedUser, SessionGuardError> {
        let token = bearer_token(headers)?;

        let issuer = self
            .issuer
            .as_ref()
            .ok_or(SessionGuardError::MissingAuthenticator)?;

        issuer
            .verify(token)
            .map(AuthenticatedUser)
            .map_err(|e| {
                tracing::debug!(error = %e, "Bearer token rejected");
                SessionGuardError::InvalidToken
            })
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, SessionGuardError> {
    let rest = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or(SessionGuardError::MissingToken)?;

    rest.split(' ')
        .next()
        .filter(|token| !token.is_empty())
        .ok_or(SessionGuardError::MalformedToken)
}

/// Middleware for `axum::middleware::from_fn_with_state`. On success the
/// handler can extract `Extension<AuthenticatedUser>`.
pub async fn require_session<T: TokenIssuer + 'static>(
    State(guard): State<SessionGuard<T>>,
    mut request: Request,
    next: Next,
) -> Result<Response, SessionGuardError> {
    let user = guard.authenticate(request.headers())?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
