//! Tracing subscriber setup

use anyhow::{anyhow, Result};
use fint_shared::config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Build the level filter, preferring `RUST_LOG` when it is set
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(&config.level)?),
    }
}

/// Install the global subscriber
///
/// Logs go to stderr so they do not interleave with the screen on stdout.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .with_writer(std::io::stderr)
        .with_ansi(config.colored)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}
