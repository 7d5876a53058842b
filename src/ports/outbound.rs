//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{BusinessProfile, DomainError, Role};

/// Durable-storage key for the active role marker (next to the token keys).
pub const USER_ROLE_KEY: &str = "userRole";

/// Remote authentication service. One endpoint per role.
#[async_trait::async_trait]
pub trait AuthGateway: Send + Sync {
    /// POST credentials to the role's login endpoint.
    ///
    /// - `Ok(Some(token))`: HTTP success with a token in the body.
    /// - `Ok(None)`: HTTP success but no token field — the caller treats this
    ///   as a no-op, not an error.
    /// - `Err(Auth(msg))`: non-success response; `msg` is the remote `message`
    ///   field when present, otherwise "Invalid credentials".
    async fn login(
        &self,
        role: Role,
        username: &str,
        password: &str,
    ) -> Result<Option<String>, DomainError>;
}

/// Remote vendor-registration service. Multipart submission.
#[async_trait::async_trait]
pub trait RegistrationGateway: Send + Sync {
    /// Encode the profile as a multipart payload (optional image part, list
    /// fields JSON-stringified, scalars as text) and POST it with the bearer
    /// token attached.
    async fn register(&self, profile: &BusinessProfile, token: &str) -> Result<(), DomainError>;
}

/// Token storage port. Plain string key-value; keys are `agentToken`,
/// `employeeToken` and [`USER_ROLE_KEY`]. Last-writer-wins.
#[async_trait::async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Remove a key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), DomainError>;
}
