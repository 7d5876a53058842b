//! Wiring & DI. Entry point: bootstrap adapters, inject into the wizard, run UI.
//! No business logic here; login and submission are delegated to WizardService.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vendor_onboard::adapters::http::{AuthApi, RegistrationApi};
use vendor_onboard::adapters::persistence::TokenJson;
use vendor_onboard::adapters::ui::tui::WizardTui;
use vendor_onboard::ports::{AuthGateway, InputPort, RegistrationGateway, TokenStore};
use vendor_onboard::shared::config::AppConfig;
use vendor_onboard::usecases::WizardService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    vendor_onboard::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_default();
    let api_base = cfg.api_base_or_default();
    info!(%api_base, "partner API base");

    let http = reqwest::Client::new();

    // --- Outbound adapters ---
    let auth: Arc<dyn AuthGateway> = Arc::new(AuthApi::new(http.clone(), api_base.clone()));
    let registration: Arc<dyn RegistrationGateway> =
        Arc::new(RegistrationApi::new(http, api_base));

    let token_store = TokenJson::new(cfg.token_store_or_default());
    token_store
        .load()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let tokens: Arc<dyn TokenStore> = Arc::new(token_store);

    // --- Wizard service + interactive shell ---
    let wizard = WizardService::new(auth, registration, tokens, cfg.redirect_delay());
    let input_port: Arc<dyn InputPort> = Arc::new(WizardTui::new(wizard));

    input_port.run().await.map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
