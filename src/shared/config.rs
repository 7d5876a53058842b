//! Application configuration. API base URL, token store path, timings.

use serde::Deserialize;

/// Production partner API. Overridable via VENDOR_ONBOARD_API_BASE.
pub const DEFAULT_API_BASE: &str = "https://api.dishpatch.app";

/// Delay between a successful submission and the shell's exit, in ms.
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 2000;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Base URL of the partner API. Read from VENDOR_ONBOARD_API_BASE.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Path of the JSON token store. Read from VENDOR_ONBOARD_TOKEN_STORE.
    #[serde(default)]
    pub token_store: Option<String>,

    /// Post-success redirect delay in ms. Read from VENDOR_ONBOARD_REDIRECT_DELAY_MS.
    #[serde(default)]
    pub redirect_delay_ms: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("VENDOR_ONBOARD"));
        if let Ok(path) = std::env::var("VENDOR_ONBOARD_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let cfg: Self = c.build()?.try_deserialize()?;
        Ok(cfg)
    }

    /// Returns the API base URL, without a trailing slash. Defaults to the
    /// production endpoint.
    pub fn api_base_or_default(&self) -> String {
        let base = self
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        base.trim_end_matches('/').to_string()
    }

    /// Returns the token store path. Defaults to ./data/tokens.json.
    pub fn token_store_or_default(&self) -> String {
        self.token_store
            .clone()
            .unwrap_or_else(|| "./data/tokens.json".to_string())
    }

    /// Returns the redirect delay. Defaults to 2000 ms.
    pub fn redirect_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(
            self.redirect_delay_ms.unwrap_or(DEFAULT_REDIRECT_DELAY_MS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_base_default_has_no_trailing_slash() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_base_or_default(), DEFAULT_API_BASE);

        let cfg = AppConfig {
            api_base: Some("http://localhost:3000/".into()),
            ..Default::default()
        };
        assert_eq!(cfg.api_base_or_default(), "http://localhost:3000");
    }

    #[test]
    fn redirect_delay_defaults_to_two_seconds() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.redirect_delay(), std::time::Duration::from_millis(2000));
    }
}
