use aetherium_adapters::{
    config::{MongoSettings, PostgresSettings},
    persistence::MongoDocumentStore,
};
use aetherium_core::{DatastoreError, DatastoreProbe};
use color_eyre::eyre::Result;
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn get_postgres_pool(settings: &PostgresSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(settings.url.expose_secret())
        .await
}

/// Connects and pings once, so an unreachable document store aborts startup.
pub async fn connect_mongo(settings: &MongoSettings) -> Result<MongoDocumentStore, DatastoreError> {
    let store = MongoDocumentStore::connect(&settings.uri, &settings.database).await?;
    store.ping().await?;
    tracing::info!(database = %settings.database, "Connected to MongoDB");
    Ok(store)
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
