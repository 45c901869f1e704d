use aetherium_application::LoginUseCase;
use aetherium_core::{PasswordHasher, RefreshTokenStore, TokenIssuer, UserStore};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use super::{
    error::AuthApiError,
    register::{AuthRequest, UserResponse},
    state::AuthState,
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginHttpResponse {
    pub user: UserResponse,
    pub access_token: String,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, R, H, T>(
    State(state): State<AuthState<U, R, H, T>>,
    jar: CookieJar,
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

    let use_case = LoginUseCase::new(
        state.user_store,
        state.refresh_token_store,
        state.hasher,
        state.token_issuer,
        state.lifetimes,
    );
    let response = use_case.execute(credentials).await?;

    let jar = jar.add(state.refresh_cookie.create_cookie(&response.refresh_token));

    Ok((
        jar,
        Json(LoginHttpResponse {
            user: response.user.into(),
            access_token: response.access_token.as_str().to_owned(),
        }),
    ))
}
