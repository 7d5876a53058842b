//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Login failed. The message is shown next to the login form and is the
    /// remote `message` field when present, or a generic fallback.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Vendor registration call failed. Retryable without losing form data.
    #[error("Registration failed: {0}")]
    Registration(String),

    #[error("Token storage error: {0}")]
    TokenStore(String),

    /// Interactive prompt error (cancelled input, broken terminal).
    #[error("Input error: {0}")]
    Input(String),
}

impl DomainError {
    /// The bare message, without the variant prefix. Login errors are rendered
    /// inline near the form, so the prefix would just be noise there.
    pub fn message(&self) -> &str {
        match self {
            DomainError::Auth(m)
            | DomainError::Registration(m)
            | DomainError::TokenStore(m)
            | DomainError::Input(m) => m,
        }
    }
}
