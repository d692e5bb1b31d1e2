use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Build the filter: `RUST_LOG` when set, the configured level otherwise.
///
/// # Errors
/// Returns an error if the configured level is not a valid directive.
pub fn filter(cfg: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(&cfg.level)
            .with_context(|| format!("invalid log level '{}'", cfg.level))
    })
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for command output.
///
/// # Errors
/// Returns an error if the level is invalid or a subscriber is already set.
pub fn init(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let filter = filter(cfg)?;
    let registry = tracing_subscriber::registry().with(filter);
    let installed = if cfg.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    installed.context("failed to install tracing subscriber")
}
