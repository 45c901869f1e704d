use secrecy::Secret;
use serde::Serialize;

use super::{email::Email, password::Password};

/// One problem with one input field, reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl ToString) -> Self {
        Self {
            field: field.into(),
            message: message.to_string(),
        }
    }
}

/// Email/password pair accepted by registration and login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: Password,
}

impl Credentials {
    /// Validates both fields and reports every failing field, not only the first.
    pub fn parse(
        email: Option<Secret<String>>,
        password: Option<Secret<String>>,
    ) -> Result<Self, Vec<ValidationIssue>> {
        let mut issues = Vec::new();

        let email = match email {
            Some(raw) => Email::parse(raw)
                .map_err(|e| issues.push(ValidationIssue::new("email", e)))
                .ok(),
            None => {
                issues.push(ValidationIssue::new("email", "Email is required"));
                None
            }
        };

        let password = match password {
            Some(raw) => Password::parse(raw)
                .map_err(|e| issues.push(ValidationIssue::new("password", e)))
                .ok(),
            None => {
                issues.push(ValidationIssue::new("password", "Password is required"));
                None
            }
        };

        match (email, password) {
            (Some(email), Some(password)) => Ok(Self { email, password }),
            _ => Err(issues),
        }
    }
}
