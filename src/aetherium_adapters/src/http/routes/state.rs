use aetherium_core::TokenLifetimes;

use crate::auth_validation::RefreshCookieConfig;

/// Collaborators shared by the auth routes. Every store and service is a
/// cheap handle, so a use case is built per request from clones.
#[derive(Clone)]
pub struct AuthState<U, R, H, T> {
    pub user_store: U,
    pub refresh_token_store: R,
    pub hasher: H,
    pub token_issuer: T,
    pub lifetimes: TokenLifetimes,
    pub refresh_cookie: RefreshCookieConfig,
}
