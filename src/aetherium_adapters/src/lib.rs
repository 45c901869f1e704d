pub mod auth_validation;
pub mod config;
pub mod http;
pub mod password;
pub mod persistence;
