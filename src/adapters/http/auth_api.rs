//! Auth API adapter. Implements AuthGateway against the partner login endpoints.

use crate::domain::{DomainError, Role};
use crate::ports::AuthGateway;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fallback when a failure body carries no structured message.
const GENERIC_LOGIN_FAILURE: &str = "Invalid credentials";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Success body. `token` may be absent; the caller decides what that means.
#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

/// Failure body. `message` is optional; anything unparseable falls back to
/// the generic message.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct AuthApi {
    client: Client,
    api_base: String,
}

impl AuthApi {
    pub fn new(client: Client, api_base: String) -> Self {
        Self { client, api_base }
    }

    fn login_url(&self, role: Role) -> String {
        format!("{}/api/users/{}/login", self.api_base, role.path_segment())
    }
}

#[async_trait::async_trait]
impl AuthGateway for AuthApi {
    async fn login(
        &self,
        role: Role,
        username: &str,
        password: &str,
    ) -> Result<Option<String>, DomainError> {
        let url = self.login_url(role);
        debug!(%role, %url, "sending login request");

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| DomainError::Auth(format!("Login request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| GENERIC_LOGIN_FAILURE.to_string());
            warn!(%role, %status, "login rejected");
            return Err(DomainError::Auth(message));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Auth(format!("Malformed login response: {e}")))?;

        Ok(body.token)
    }
}
