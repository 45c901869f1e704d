use ::config::{
    Config, ConfigError, Environment, File,
    builder::{ConfigBuilder, DefaultState},
};
use aetherium_core::TokenLifetimes;
use axum::http::HeaderValue;
use chrono::Duration;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::constants::{CONFIG_FILE, defaults, env};

#[derive(Debug, Clone, Deserialize)]
pub struct AuthServiceSetting {
    pub application: ApplicationSettings,
    pub postgres: PostgresSettings,
    pub mongo: MongoSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    /// Prefix every route is nested under, empty for none.
    pub base_path: String,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoSettings {
    pub uri: Secret<String>,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt: JwtSettings,
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub access_token_ttl_seconds: i64,
    pub refresh_token_ttl_seconds: i64,
    pub refresh_cookie_name: String,
    pub secure_cookies: bool,
}

impl JwtSettings {
    pub fn lifetimes(&self) -> TokenLifetimes {
        TokenLifetimes {
            access: Duration::seconds(self.access_token_ttl_seconds),
            refresh: Duration::seconds(self.refresh_token_ttl_seconds),
        }
    }
}

/// Origins allowed to make credentialed cross-origin requests.
/// Parsed from a comma-separated list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct AllowedOrigins(Vec<HeaderValue>);

impl AllowedOrigins {
    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.contains(origin)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for AllowedOrigins {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| format!("Invalid origin: {origin}"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl AuthServiceSetting {
    /// Loads settings from `.env`, the optional `config/base.json` file and
    /// the process environment.
    ///
    /// # Errors
    /// Fails when a required secret (`JWT_SECRET`, `DATABASE_URL`,
    /// `MONGO_URI`) is absent or empty, or when a value cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(env::SETTINGS_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::build(builder, |key| std::env::var(key).ok())
    }

    fn build(
        builder: ConfigBuilder<DefaultState>,
        env_var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let settings: Self = builder
            .set_default("application.host", defaults::HOST)?
            .set_default("application.port", defaults::PORT)?
            .set_default("application.base_path", "")?
            .set_default("postgres.url", "")?
            .set_default("postgres.max_connections", defaults::POSTGRES_MAX_CONNECTIONS)?
            .set_default("mongo.uri", "")?
            .set_default("mongo.database", defaults::MONGO_DATABASE)?
            .set_default("auth.jwt.secret", "")?
            .set_default(
                "auth.jwt.access_token_ttl_seconds",
                defaults::ACCESS_TOKEN_TTL_SECONDS,
            )?
            .set_default(
                "auth.jwt.refresh_token_ttl_seconds",
                defaults::REFRESH_TOKEN_TTL_SECONDS,
            )?
            .set_default("auth.jwt.refresh_cookie_name", defaults::REFRESH_COOKIE_NAME)?
            .set_default("auth.jwt.secure_cookies", true)?
            .set_default("auth.allowed_origins", "")?
            .set_override_option("auth.jwt.secret", env_var(env::JWT_SECRET_ENV_VAR))?
            .set_override_option("postgres.url", env_var(env::DATABASE_URL_ENV_VAR))?
            .set_override_option("mongo.uri", env_var(env::MONGO_URI_ENV_VAR))?
            .set_override_option("application.port", env_var(env::PORT_ENV_VAR))?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            (&self.auth.jwt.secret, env::JWT_SECRET_ENV_VAR),
            (&self.postgres.url, env::DATABASE_URL_ENV_VAR),
            (&self.mongo.uri, env::MONGO_URI_ENV_VAR),
        ];
        for (value, name) in required {
            if value.expose_secret().trim().is_empty() {
                return Err(ConfigError::Message(format!("{name} must be set")));
            }
        }

        let jwt = &self.auth.jwt;
        if jwt.access_token_ttl_seconds <= 0 || jwt.refresh_token_ttl_seconds <= 0 {
            return Err(ConfigError::Message(
                "Token lifetimes must be positive".to_string(),
            ));
        }

        let base_path = &self.application.base_path;
        if !base_path.is_empty() && (!base_path.starts_with('/') || base_path == "/") {
            return Err(ConfigError::Message(format!(
                "Base path must start with '/' and not be the root: {base_path}"
            )));
        }

        Ok(())
    }
}
