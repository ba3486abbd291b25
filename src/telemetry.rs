//! # Logging Bootstrap
//!
//! Installs the process-wide logger. Plain text goes through `env_logger`;
//! JSON output goes through a `tracing-subscriber` formatter, which also
//! picks up records emitted through the `log` facade. Both honor `RUST_LOG`.

use crate::config::{KitchenConfig, LogFormat};
use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// Install the logger selected by `config.log_format`
///
/// Fails if a logger has already been installed for this process.
pub fn init_logging(config: &KitchenConfig) -> anyhow::Result<()> {
    match config.log_format {
        LogFormat::Text => {
            env_logger::try_init().map_err(|e| anyhow!("Failed to install text logger: {e}"))
        }
        LogFormat::Json => {
            let env_filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow!("Failed to install JSON logger: {e}"))
        }
    }
}
