use std::sync::Arc;

use aetherium_adapters::{
    auth_validation::{JwtTokenIssuer, RefreshCookieConfig},
    config::AuthServiceSetting,
    http::routes::{AuthState, HealthState},
    password::Argon2Hasher,
    persistence::PostgresCredentialStore,
};
use aetherium_auth_service::{AuthService, connect_mongo, get_postgres_pool, init_tracing};
use color_eyre::eyre::{Result, WrapErr};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = AuthServiceSetting::load().wrap_err("Failed to load configuration")?;

    let pg_pool = get_postgres_pool(&settings.postgres)
        .await
        .wrap_err("Failed to connect to PostgreSQL")?;
    let credential_store = PostgresCredentialStore::new(pg_pool);
    credential_store
        .migrate()
        .await
        .wrap_err("Failed to run database migrations")?;

    let document_store = connect_mongo(&settings.mongo)
        .await
        .wrap_err("Failed to connect to MongoDB")?;

    let jwt = &settings.auth.jwt;
    let state = AuthState {
        user_store: credential_store.clone(),
        refresh_token_store: credential_store.clone(),
        hasher: Argon2Hasher::default(),
        token_issuer: JwtTokenIssuer::new(&jwt.secret)?,
        lifetimes: jwt.lifetimes(),
        refresh_cookie: RefreshCookieConfig::from_settings(jwt),
    };
    let health_state = HealthState {
        postgres: Arc::new(credential_store),
        mongo: Arc::new(document_store),
    };

    let allowed_origins = settings.auth.allowed_origins.clone();
    let allowed_origins = (!allowed_origins.is_empty()).then_some(allowed_origins);

    let listener = TcpListener::bind(settings.application.address()).await?;
    tracing::info!("Starting aetherium auth service...");

    AuthService::new(state, health_state)
        .with_base_path(&settings.application.base_path)
        .run_standalone(listener, allowed_origins)
        .await?;

    Ok(())
}
