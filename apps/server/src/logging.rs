//! Logging initialization for the server binary
//!
//! Sets up `tracing` with an environment-aware filter. The configured
//! default filter applies unless `RUST_LOG` is set, and output is either
//! JSON lines or the human-readable format depending on configuration.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter = build_env_filter(config)?;

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;
    } else {
        registry
            .with(fmt::layer())
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;
    }

    Ok(())
}

fn build_env_filter(config: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    // RUST_LOG wins over the configured default.
    if std::env::var(EnvFilter::DEFAULT_ENV).is_ok() {
        return Ok(EnvFilter::try_from_default_env()?);
    }

    EnvFilter::try_new(&config.filter)
        .map_err(|e| anyhow::anyhow!("invalid logging.filter '{}': {e}", config.filter))
}
