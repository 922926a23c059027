use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::error::ShellError;

const LOG_ENV: &str = "BURROW_LOG";

/// Sends all tracing output to the log file so it never mixes with command
/// output. `BURROW_LOG` takes an `EnvFilter` directive and overrides the
/// default level.
pub fn init(config: &Config) -> Result<(), ShellError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_file())?;

    let default_level = if config.debug() { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| ShellError::Logging(e.to_string()))
}
