use anyhow::{anyhow, Result};
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Output shape for log events written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Single-line human-readable events.
    Compact,
    /// One JSON object per event, for log shippers.
    Json,
}

/// Build the event filter: `RUST_LOG` wins, then `--log-level`.
fn env_filter(log_level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(log_level).map_err(|e| anyhow!("Invalid log level '{log_level}': {e}"))
}

/// Install the global subscriber. Stdout stays reserved for command output.
pub fn init(log_level: &str, format: LogFormat) -> Result<()> {
    let filter = env_filter(log_level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| anyhow!("Failed to install log subscriber: {e}"))
}
