//! Subscriber setup

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Filter directive for this run: the `--log-level` flag wins over the
/// configured level.
pub fn directive<'a>(cli_level: Option<&'a str>, config_level: &'a str) -> &'a str {
    cli_level.unwrap_or(config_level)
}

/// Build the filter, letting `RUST_LOG` override `level` when set.
pub fn env_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(level)?),
    }
}

/// Install the global stderr subscriber.
pub fn init(level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))
}

#[cfg(test)]
#[path = "logging/logging_tests.rs"]
mod logging_tests;
