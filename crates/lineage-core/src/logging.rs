//! Tracing subscriber setup.
//!
//! The library itself only emits `tracing` events. Applications embedding it
//! call [`init`] once at startup; a `RUST_LOG` filter takes precedence over the
//! configured level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{Error, Result};

/// Builds the level filter for `config`, preferring `RUST_LOG` when set.
///
/// # Errors
///
/// Returns `Error::Config` if the configured level is not a valid directive.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| Error::Config(e.to_string()))
}

/// Installs a global fmt subscriber.
///
/// # Errors
///
/// Returns `Error::Config` if the level is invalid or a global subscriber is
/// already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Text => registry.with(fmt::layer()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };
    result.map_err(|e| Error::Config(format!("failed to install tracing subscriber: {e}")))
}
