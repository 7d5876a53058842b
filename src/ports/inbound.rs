//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the interactive shell drives the wizard through this.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the wizard to completion (successful submission or user exit).
    async fn run(&self) -> Result<(), DomainError>;
}
