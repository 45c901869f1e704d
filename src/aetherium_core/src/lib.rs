pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    credentials::{Credentials, ValidationIssue},
    email::{Email, EmailError},
    password::{Password, PasswordError},
    token::{IssuedToken, RefreshTokenRecord, TokenLifetimes},
    user::{PasswordHash, StoredUser, User, UserId, UserIdError},
};

pub use ports::{
    repositories::{RefreshTokenStore, RefreshTokenStoreError, UserStore, UserStoreError},
    services::{
        DatastoreError, DatastoreProbe, PasswordHasher, PasswordHasherError, TokenError,
        TokenIssuer,
    },
};
