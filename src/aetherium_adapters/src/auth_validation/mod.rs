pub mod jwt_token_issuer;
pub mod refresh_cookie;
pub mod session_guard;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub use jwt_token_issuer::{Claims, EmptySecretError, JwtTokenIssuer};
pub use refresh_cookie::{RefreshCookieConfig, extract_refresh_token};
pub use session_guard::{AuthenticatedUser, SessionGuard, require_session};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionGuardError {
    #[error("Authorization header missing or not a bearer token")]
    MissingToken,
    #[error("Bearer token is empty")]
    MalformedToken,
    #[error("Token verification is not configured")]
    MissingAuthenticator,
    #[error("Invalid token")]
    InvalidToken,
}

impl IntoResponse for SessionGuardError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            SessionGuardError::MissingToken => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            SessionGuardError::MalformedToken => {
                (StatusCode::UNAUTHORIZED, "Authentication token required")
            }
            SessionGuardError::MissingAuthenticator => {
                tracing::error!("Session guard has no token issuer configured");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error")
            }
            SessionGuardError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
