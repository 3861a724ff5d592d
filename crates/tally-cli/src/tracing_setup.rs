//! Logging setup
//!
//! Logs go to stderr so stdout carries only calculation output. `RUST_LOG`
//! takes precedence over the configured filter.

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Install the global subscriber. Fails if one is already installed.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("tally=info"));

    let json_layer = config
        .json
        .then(|| fmt::layer().json().with_target(false).with_writer(std::io::stderr));
    let text_layer =
        (!config.json).then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

    tracing_subscriber::registry().with(filter).with(json_layer).with(text_layer).try_init()?;

    info!(json = config.json, "logging initialized");
    Ok(())
}
