//! Van Climb landing page binary.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `vanclimb-config.yaml` (or `$VANCLIMB_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the application state (venue clock, page templates)
//! 4. Serve HTTP until `Ctrl-C`

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use vanclimb_core::config::{ConfigError, LoggingConfig, SiteConfig};
use vanclimb_site::{AppState, start_server};

/// Config file read when `VANCLIMB_CONFIG` is not set.
const DEFAULT_CONFIG_PATH: &str = "vanclimb-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the templates fail to
/// load, or the server cannot bind.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, from_file) = load_config()?;
    init_logging(&config.logging);

    info!(
        from_file,
        host = config.server.host,
        port = config.server.port,
        tick_interval_ms = config.crowd.tick_interval_ms,
        settle_delay_ms = config.navigation.settle_delay_ms,
        "vanclimb-site starting"
    );

    let state = Arc::new(AppState::new(config.clone())?);
    start_server(&config.server, state).await?;
    Ok(())
}

/// Load configuration, falling back to defaults when the file is absent.
///
/// Returns the config and whether it came from a file.
fn load_config() -> Result<(SiteConfig, bool), ConfigError> {
    let path = std::env::var("VANCLIMB_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
    let config_path = Path::new(&path);
    if config_path.exists() {
        Ok((SiteConfig::from_file(config_path)?, true))
    } else {
        let mut config = SiteConfig::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok((config, false))
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
