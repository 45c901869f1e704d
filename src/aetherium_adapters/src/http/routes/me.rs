use aetherium_application::CurrentUserUseCase;
use aetherium_core::{PasswordHasher, RefreshTokenStore, TokenIssuer, UserStore};
use axum::{Extension, Json, extract::State, response::IntoResponse};

use super::{
    error::AuthApiError,
    register::{UserHttpResponse, UserResponse},
    state::AuthState,
};
use crate::auth_validation::AuthenticatedUser;

/// Must sit behind `require_session`, which supplies the extension.
#[tracing::instrument(name = "Current user", skip_all)]
pub async fn me<U, R, H, T>(
    State(state): State<AuthState<U, R, H, T>>,
    Extension(AuthenticatedUser(user_id)): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
    R: RefreshTokenStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
{
    tracing::debug!(user_id = %user_id, "Resolving current user");

    let user = CurrentUserUseCase::new(state.user_store)
        .execute(user_id)
        .await?;

    Ok(Json(UserHttpResponse {
        user: UserResponse::from(user),
    }))
}
