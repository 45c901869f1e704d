use std::sync::Arc;

use aetherium_core::DatastoreProbe;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct HealthState {
    pub postgres: Arc<dyn DatastoreProbe>,
    pub mongo: Arc<dyn DatastoreProbe>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgres: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mongo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

const OK: &str = "OK";
const ERROR: &str = "ERROR";

/// The relational store is required, so its failure fails the check. A
/// document store failure only degrades the report.
#[tracing::instrument(name = "Health check", skip_all)]
pub async fn health(State(state): State<HealthState>) -> impl IntoResponse {
    if let Err(e) = state.postgres.ping().await {
        tracing::error!(error = %e, "PostgreSQL health check failed");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthResponse {
                status: ERROR.to_string(),
                postgres: None,
                mongo: None,
                message: Some("Server error".to_string()),
            }),
        );
    }

    let mongo = match state.mongo.ping().await {
        Ok(()) => OK,
        Err(e) => {
            tracing::warn!(error = %e, "MongoDB health check failed");
            ERROR
        }
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: OK.to_string(),
            postgres: Some(OK.to_string()),
            mongo: Some(mongo.to_string()),
            message: None,
        }),
    )
}
