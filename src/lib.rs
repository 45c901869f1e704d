//! # Aetherium - Authentication Backend Library
//!
//! Facade crate that re-exports the public APIs of the aetherium components.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `UserId`, tokens
//! - **Ports**: `UserStore`, `RefreshTokenStore`, `PasswordHasher`, `TokenIssuer`, `DatastoreProbe`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `RefreshUseCase`, `CurrentUserUseCase`
//! - **Adapters**: `PostgresCredentialStore`, `Argon2Hasher`, `JwtTokenIssuer`, `SessionGuard`,
//!   and the in-memory stores
//! - **Service**: `AuthService` - router assembly and standalone server

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use aetherium_core::*;
}

pub use aetherium_core::{
    Credentials, Email, IssuedToken, Password, RefreshTokenRecord, TokenLifetimes, User, UserId,
    ValidationIssue,
};

// ============================================================================
// Ports
// ============================================================================

pub use aetherium_core::{
    DatastoreError, DatastoreProbe, PasswordHasher, PasswordHasherError, RefreshTokenStore,
    RefreshTokenStoreError, TokenError, TokenIssuer, UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use aetherium_application::*;
}

pub use aetherium_application::{
    CurrentUserUseCase, LoginUseCase, RefreshUseCase, RegisterUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use aetherium_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use aetherium_adapters::persistence::*;
    }

    /// Token issuing and the session guard
    pub mod auth {
        pub use aetherium_adapters::auth_validation::*;
    }

    /// Password hashing
    pub mod password {
        pub use aetherium_adapters::password::*;
    }

    /// Configuration
    pub mod config {
        pub use aetherium_adapters::config::*;
    }
}

pub use aetherium_adapters::{
    auth_validation::{JwtTokenIssuer, SessionGuard},
    password::Argon2Hasher,
    persistence::{
        HashMapRefreshTokenStore, HashMapUserStore, MongoDocumentStore, PostgresCredentialStore,
    },
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

pub use aetherium_auth_service::{AuthService, connect_mongo, get_postgres_pool, init_tracing};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the ports
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use axum;
