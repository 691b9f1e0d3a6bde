//! Negotiator terminal assistant
//!
//! Main application entry point

use anyhow::Context;
use tracing::{debug, info};

use Negotiator::{
    config::Settings,
    handlers::run_terminal,
    services::BackendClient,
    state::ChatController,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;

    if std::env::args().skip(1).any(|arg| arg == "--print-config") {
        print!("{}", toml::to_string_pretty(&settings)?);
        return Ok(());
    }

    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;
    if !dotenv_loaded {
        debug!("No .env file found, using configuration file and environment only");
    }

    info!("Starting {}...", Negotiator::info());

    let backend = BackendClient::new(&settings.backend)?;
    info!(api_url = %backend.base_url(), timeout = ?settings.backend.timeout(), "Negotiation backend configured");

    let controller = ChatController::new(backend, settings.conversation.clone());
    run_terminal(controller).await?;

    info!("Negotiator has been shut down.");

    Ok(())
}
