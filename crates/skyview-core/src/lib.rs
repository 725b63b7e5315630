pub mod config;
pub mod error;

pub use config::{AdvisoryConfig, AiProvider, Config, Settings};
pub use error::{AdvisoryError, AppError, ConfigError};
pub use skyview_weather::{SnapshotError, UnitError, UnitPreferences, ValidationResult};

use anyhow::Result;

/// Initialize logging for the application.
///
/// Logs go to stderr so stdout stays free for rendered output.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!("Skyview core initialized");
    Ok(())
}
