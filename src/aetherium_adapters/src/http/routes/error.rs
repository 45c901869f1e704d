use aetherium_application::{CurrentUserError, LoginError, RefreshError, RegisterError};
use aetherium_core::ValidationIssue;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ValidationIssueBody>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssueBody {
    pub field: String,
    pub message: String,
}

impl From<ValidationIssue> for ValidationIssueBody {
    fn from(issue: ValidationIssue) -> Self {
        Self {
            field: issue.field,
            message: issue.message,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("Invalid input")]
    ValidationError(Vec<ValidationIssue>),

    #[error("Invalid request body")]
    InvalidBody(String),

    #[error("Email is already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Refresh token required")]
    MissingRefreshToken,

    #[error("Invalid or expired refresh token")]
    InvalidOrExpiredToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            AuthApiError::ValidationError(_) | AuthApiError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthApiError::EmailAlreadyRegistered => StatusCode::CONFLICT,
            AuthApiError::InvalidCredentials
            | AuthApiError::MissingRefreshToken
            | AuthApiError::InvalidOrExpiredToken => StatusCode::UNAUTHORIZED,
            AuthApiError::UserNotFound => StatusCode::NOT_FOUND,
            AuthApiError::UnexpectedError(e) => {
                tracing::error!(error = %e, "Request failed with an internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match self {
            AuthApiError::ValidationError(issues) => ErrorResponse {
                message: "Invalid input".to_string(),
                issues: issues.into_iter().map(ValidationIssueBody::from).collect(),
            },
            AuthApiError::InvalidBody(detail) => ErrorResponse {
                message: "Invalid request body".to_string(),
                issues: vec![ValidationIssueBody {
                    field: "body".to_string(),
                    message: detail,
                }],
            },
            AuthApiError::UnexpectedError(_) => ErrorResponse {
                message: "Internal server error".to_string(),
                issues: Vec::new(),
            },
            other => ErrorResponse {
                message: other.to_string(),
                issues: Vec::new(),
            },
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<Vec<ValidationIssue>> for AuthApiError {
    fn from(issues: Vec<ValidationIssue>) -> Self {
        AuthApiError::ValidationError(issues)
    }
}

impl From<JsonRejection> for AuthApiError {
    fn from(rejection: JsonRejection) -> Self {
        AuthApiError::InvalidBody(rejection.body_text())
    }
}

impl From<RegisterError> for AuthApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::EmailAlreadyRegistered => AuthApiError::EmailAlreadyRegistered,
            e => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<LoginError> for AuthApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => AuthApiError::InvalidCredentials,
            e => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<RefreshError> for AuthApiError {
    fn from(error: RefreshError) -> Self {
        match error {
            RefreshError::InvalidOrExpiredToken => AuthApiError::InvalidOrExpiredToken,
            e => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<CurrentUserError> for AuthApiError {
    fn from(error: CurrentUserError) -> Self {
        match error {
            CurrentUserError::UserNotFound => AuthApiError::UserNotFound,
            e => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}
