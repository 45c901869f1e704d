use aetherium_application::RegisterUseCase;
use aetherium_core::{Credentials, PasswordHasher, RefreshTokenStore, TokenIssuer, User, UserStore};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{error::AuthApiError, state::AuthState};

/// Body of `/auth/register` and `/auth/login`. Fields are optional so that a
/// missing field is reported as a validation issue rather than a parse error.
#[derive(Deserialize)]
pub struct AuthRequest {
    pub email: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
}

impl AuthRequest {
    pub fn into_credentials(self) -> Result<Credentials, AuthApiError> {
        Ok(Credentials::parse(self.email, self.password)?)
    }
}

/// Public view of a user as returned to clients.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            email: user.email.as_ref().expose_secret().clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserHttpResponse {
    pub user: UserResponse,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<U, R, H, T>(
    State(state): State<AuthState<U, R, H, T>>,
    request: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
    R: RefreshTokenStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
{
    let Json(request) = request?;
    let credentials = request.into_credentials()?;

    let use_case = RegisterUseCase::new(state.user_store, state.hasher);
    let user = use_case.execute(credentials).await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(UserHttpResponse { user: user.into() }),
    ))
}
