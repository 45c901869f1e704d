use aetherium_core::IssuedToken;
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use chrono::Duration;
use secrecy::Secret;

use crate::config::JwtSettings;

/// How the refresh token travels back to the browser.
#[derive(Debug, Clone)]
pub struct RefreshCookieConfig {
    pub cookie_name: String,
    pub secure: bool,
    pub max_age: Duration,
}

impl RefreshCookieConfig {
    /// Cookie lifetime follows the refresh token lifetime.
    pub fn from_settings(jwt: &JwtSettings) -> Self {
        Self {
            cookie_name: jwt.refresh_cookie_name.clone(),
            secure: jwt.secure_cookies,
            max_age: jwt.lifetimes().refresh,
        }
    }

    pub fn create_cookie(&self, token: &IssuedToken) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), token.as_str().to_owned()))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .max_age(time::Duration::seconds(self.max_age.num_seconds()))
            .build()
    }
}

pub fn extract_refresh_token(jar: &CookieJar, cookie_name: &str) -> Option<Secret<String>> {
    jar.get(cookie_name)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .map(|value| Secret::new(value.to_owned()))
}
