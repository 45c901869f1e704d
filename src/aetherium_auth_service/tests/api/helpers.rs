use std::sync::Arc;

use aetherium_adapters::{
    auth_validation::{JwtTokenIssuer, RefreshCookieConfig},
    config::{defaults, test},
    http::routes::{AuthState, HealthState},
    password::Argon2Hasher,
    persistence::{HashMapRefreshTokenStore, HashMapUserStore},
};
use aetherium_auth_service::AuthService;
use aetherium_core::{DatastoreError, DatastoreProbe, TokenLifetimes};
use argon2::Params;
use fake::{Fake, faker::internet::en::SafeEmail};
use secrecy::Secret;
use serde_json::{Value, json};

pub const JWT_SECRET: &str = "api-test-secret";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub user_store: HashMapUserStore,
    pub refresh_token_store: HashMapRefreshTokenStore,
    pub token_issuer: JwtTokenIssuer,
}

pub struct StaticProbe(pub bool);

#[async_trait::async_trait]
impl DatastoreProbe for StaticProbe {
    async fn ping(&self) -> Result<(), DatastoreError> {
        if self.0 {
            Ok(())
        } else {
            Err(DatastoreError("connection refused".to_string()))
        }
    }
}

pub struct TestAppBuilder {
    postgres_up: bool,
    mongo_up: bool,
    base_path: String,
}

impl TestAppBuilder {
    pub fn postgres_up(mut self, up: bool) -> Self {
        self.postgres_up = up;
        self
    }

    pub fn mongo_up(mut self, up: bool) -> Self {
        self.mongo_up = up;
        self
    }

    pub fn base_path(mut self, base_path: &str) -> Self {
        self.base_path = base_path.to_string();
        self
    }

    pub async fn spawn(self) -> TestApp {
        let user_store = HashMapUserStore::new();
        let refresh_token_store = HashMapRefreshTokenStore::new();
        let token_issuer = JwtTokenIssuer::new(&Secret::new(JWT_SECRET.to_string()))
            .expect("Failed to create token issuer");
        let lifetimes = TokenLifetimes::default();

        let state = AuthState {
            user_store: user_store.clone(),
            refresh_token_store: refresh_token_store.clone(),
            hasher: Argon2Hasher::with_params(Params::new(1024, 1, 1, None).unwrap()),
            token_issuer: token_issuer.clone(),
            lifetimes,
            refresh_cookie: RefreshCookieConfig {
                cookie_name: defaults::REFRESH_COOKIE_NAME.to_string(),
                secure: false,
                max_age: lifetimes.refresh,
            },
        };
        let health_state = HealthState {
            postgres: Arc::new(StaticProbe(self.postgres_up)),
            mongo: Arc::new(StaticProbe(self.mongo_up)),
        };

        let router = AuthService::new(state, health_state)
            .with_base_path(&self.base_path)
            .as_nested_router(None);

        let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!(
            "http://{}{}",
            listener.local_addr().unwrap(),
            self.base_path
        );

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Failed to run test server");
        });

        TestApp {
            address,
            http_client: reqwest::Client::new(),
            user_store,
            refresh_token_store,
            token_issuer,
        }
    }
}

impl TestApp {
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder {
            postgres_up: true,
            mongo_up: true,
            base_path: String::new(),
        }
    }

    pub async fn new() -> Self {
        Self::builder().spawn().await
    }

    pub async fn post_register<Body: serde::Serialize>(&self, body: &Body) -> reqwest::Response {
        self.http_client
            .post(format!("{}/auth/register", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_login<Body: serde::Serialize>(&self, body: &Body) -> reqwest::Response {
        self.http_client
            .post(format!("{}/auth/login", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_refresh(&self, refresh_token: Option<&str>) -> reqwest::Response {
        let mut request = self
            .http_client
            .post(format!("{}/auth/refresh", &self.address));
        if let Some(token) = refresh_token {
            request = request.header(
                reqwest::header::COOKIE,
                format!("{}={token}", defaults::REFRESH_COOKIE_NAME),
            );
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn get_me(&self, authorization: Option<&str>) -> reqwest::Response {
        let mut request = self.http_client.get(format!("{}/auth/me", &self.address));
        if let Some(value) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, value);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn get_health(&self) -> reqwest::Response {
        self.http_client
            .get(format!("{}/health", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Registers and logs in a fresh user. Returns the email, the access
    /// token and the refresh token.
    pub async fn signed_in_user(&self) -> (String, String, String) {
        let body = credentials(&get_random_email(), "secret1");
        assert_eq!(self.post_register(&body).await.status().as_u16(), 201);

        let response = self.post_login(&body).await;
        assert_eq!(response.status().as_u16(), 200);
        let refresh_token = refresh_cookie_value(&response).expect("No refresh cookie set");
        let json: Value = response.json().await.unwrap();

        (
            body["email"].as_str().unwrap().to_string(),
            json["accessToken"].as_str().unwrap().to_string(),
            refresh_token,
        )
    }
}

pub fn get_random_email() -> String {
    SafeEmail().fake()
}

pub fn credentials(email: &str, password: &str) -> Value {
    json!({ "email": email, "password": password })
}

pub fn refresh_cookie_value(response: &reqwest::Response) -> Option<String> {
    response
        .cookies()
        .find(|cookie| cookie.name() == defaults::REFRESH_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}
