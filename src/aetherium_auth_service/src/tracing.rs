use std::time::Duration;

use axum::{body::Body, extract::Request, response::Response};
use tracing::{Level, Span};
use uuid::Uuid;

/// Span wrapping one request, tagged with a fresh request id so log lines
/// from concurrent requests can be told apart.
pub fn make_span_with_request_id(request: &Request<Body>) -> Span {
    let request_id = Uuid::new_v4();
    tracing::span!(
        Level::INFO,
        "[REQUEST]",
        method = tracing::field::display(request.method()),
        uri = tracing::field::display(request.uri()),
        version = tracing::field::debug(request.version()),
        request_id = tracing::field::display(request_id),
    )
}

pub fn on_request(_request: &Request<Body>, _span: &Span) {
    tracing::event!(Level::INFO, "[REQUEST START]");
}

pub fn on_response(response: &Response, latency: Duration, _span: &Span) {
    let status = response.status();
    let status_code = status.as_u16();

    if status.is_server_error() {
        tracing::event!(Level::ERROR, latency = ?latency, status = status_code, "[REQUEST END]");
    } else if status.is_client_error() {
        tracing::event!(Level::WARN, latency = ?latency, status = status_code, "[REQUEST END]");
    } else {
        tracing::event!(Level::INFO, latency = ?latency, status = status_code, "[REQUEST END]");
    }
}
