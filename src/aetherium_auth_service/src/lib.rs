pub mod auth_service;
pub mod helpers;
mod tracing;

pub use auth_service::AuthService;
pub use helpers::{connect_mongo, get_postgres_pool, init_tracing};
