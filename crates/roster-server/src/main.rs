//! # Roster Server
//!
//! Main entry point for the Roster HTTP service.

use roster_config::{ConfigLoader, ObservabilityConfig};
use roster_core::RosterResult;
use roster_server::{logging::init_logging, startup, AppBuilder};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> RosterResult<()> {
    let config_loader = match ConfigLoader::from_default_location() {
        Ok(loader) => loader,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            return Err(e);
        }
    };
    let config = config_loader.get().await;

    init_logging(&config.observability);
    startup::print_banner();

    info!("Starting Roster Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    startup::print_startup_info(&config.server);

    AppBuilder::new().with_config(config).run().await
}
