use std::sync::Arc;

use aetherium_adapters::{
    auth_validation::{SessionGuard, require_session},
    config::AllowedOrigins,
    http::routes::{AuthState, HealthState, health, login, me, refresh, register},
};
use aetherium_core::{PasswordHasher, RefreshTokenStore, TokenIssuer, UserStore};
use axum::{
    Router,
    http::{HeaderValue, Method, request},
    middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Authentication service exposing `/auth/*` and `/health`.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Create a new AuthService from its collaborators
    ///
    /// # Arguments
    /// * `state` - Stores, hasher, token issuer and cookie settings for the auth routes
    /// * `health` - Probes for the relational and document stores
    ///
    /// `/auth/me` is wrapped in the session guard, built from the same token
    /// issuer that signs the tokens.
    pub fn new<U, R, H, T>(state: AuthState<U, R, H, T>, health_state: HealthState) -> Self
    where
        U: UserStore + Clone + 'static,
        R: RefreshTokenStore + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        T: TokenIssuer + Clone + 'static,
    {
        let guard = SessionGuard::new(Arc::new(state.token_issuer.clone()));

        let auth_routes = Router::new()
            .route("/register", post(register::<U, R, H, T>))
            .route("/login", post(login::<U, R, H, T>))
            .route("/refresh", post(refresh::<U, R, H, T>))
            .route(
                "/me",
                get(me::<U, R, H, T>)
                    .route_layer(middleware::from_fn_with_state(guard, require_session::<T>)),
            )
            .with_state(state);

        let router = Router::new()
            .route("/health", get(health))
            .with_state(health_state)
            .nest("/auth", auth_routes);

        Self { router }
    }

    /// Mount every route under `base_path`. An empty path leaves the routes
    /// at the root.
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        if !base_path.is_empty() {
            self.router = Router::new().nest(base_path, self.router);
        }
        self
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AuthService into a router that can be served or mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                ])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the auth service as a standalone server until Ctrl-C
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
