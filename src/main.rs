//! pep-admin service
//!
//! Reads configuration from a TOML file (`PEP_ADMIN_CONFIG`, or
//! `~/.config/pep-admin/config.toml`) and serves the REST API until
//! SIGINT/SIGTERM.

use tracing::{error, info};

use pep_admin::server::{init_tracing, ServerHandle, ServerOptions};
use pep_admin::{default_config_path, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("PEP_ADMIN_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());

    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg);
            error!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    let handle = ServerHandle::start(ServerOptions {
        config,
        ..ServerOptions::default()
    })
    .await?;
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");
    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}
