//! Sellaporter binary.
//!
//! Loads the site configuration, initialises structured logging, and serves
//! the page API until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `SELLAPORTER_CONFIG` (default
//!    `sellaporter.yaml`), falling back to defaults if the file is missing
//! 2. Initialize structured logging (tracing), honouring `RUST_LOG` before
//!    the configured level
//! 3. Build shared state with a wall clock
//! 4. Serve the page API

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sellaporter_core::config::{LoggingConfig, SiteConfig};
use sellaporter_server::{start_server, AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "sellaporter.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let path = config_path();
    let loaded = load_config(&path)?;
    let config = loaded.config;

    // 2. Initialize structured logging.
    init_logging(&config.logging);

    info!("sellaporter starting");
    if loaded.from_file {
        info!(
            path = %path.display(),
            site = config.site.name,
            utc_offset = config.site.utc_offset,
            pages = config.pages.len(),
            "Configuration loaded"
        );
    } else {
        info!(path = %path.display(), "Config file not found, using defaults");
    }

    // 3. Build shared state.
    let server_config = ServerConfig::from(&config.server);
    let state = Arc::new(AppState::new(config));

    // 4. Serve.
    start_server(&server_config, state)
        .await
        .map_err(AppError::from)?;

    info!("sellaporter stopped");
    Ok(())
}

/// A loaded configuration and whether it came from disk.
struct LoadedConfig {
    config: SiteConfig,
    from_file: bool,
}

fn config_path() -> PathBuf {
    std::env::var_os("SELLAPORTER_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load the site configuration, or defaults if the file does not exist.
fn load_config(path: &Path) -> Result<LoadedConfig, AppError> {
    if path.exists() {
        let config = SiteConfig::from_file(path)?;
        Ok(LoadedConfig {
            config,
            from_file: true,
        })
    } else {
        let mut config = SiteConfig::default();
        config.server.apply_env_overrides();
        Ok(LoadedConfig {
            config,
            from_file: false,
        })
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
