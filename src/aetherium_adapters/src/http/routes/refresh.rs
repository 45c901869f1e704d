use aetherium_application::RefreshUseCase;
use aetherium_core::{PasswordHasher, RefreshTokenStore, TokenIssuer, UserStore};
use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use super::{error::AuthApiError, state::AuthState};
use crate::auth_validation::extract_refresh_token;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshHttpResponse {
    pub access_token: String,
}

/// Rotates the refresh cookie: the presented token is consumed and the new
/// one replaces it in the same cookie.
#[tracing::instrument(name = "Refresh", skip_all)]
pub async fn refresh<U, R, H, T>(
    State(state): State<AuthState<U, R, H, T>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
    R: RefreshTokenStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
{
    let token = extract_refresh_token(&jar, &state.refresh_cookie.cookie_name)
        .ok_or(AuthApiError::MissingRefreshToken)?;

    let use_case = RefreshUseCase::new(
        state.refresh_token_store,
        state.token_issuer,
        state.lifetimes,
    );
    let response = use_case.execute(token).await?;

    let jar = jar.add(state.refresh_cookie.create_cookie(&response.refresh_token));

    Ok((
        jar,
        Json(RefreshHttpResponse {
            access_token: response.access_token.as_str().to_owned(),
        }),
    ))
}
