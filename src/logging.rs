//! Logging setup. The terminal belongs to the UI, so events go to
//! `checkers.log` in the platform data directory.

use crate::config::{data_dir, CheckersConfig};
use crate::error::{CheckersError, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured filter
pub const LOG_ENV: &str = "CHECKERS_LOG";

const LOG_FILE: &str = "checkers.log";

/// Pick the filter directive: environment first, then config, then "info".
pub fn resolve_filter(env_value: Option<String>, config_filter: &str) -> String {
    env_value
        .filter(|value| !value.trim().is_empty())
        .or_else(|| Some(config_filter.trim().to_string()).filter(|value| !value.is_empty()))
        .unwrap_or_else(|| "info".to_string())
}

pub fn build_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|e| CheckersError::Config {
        message: format!("invalid log filter '{}': {}", directive, e),
    })
}

/// Install the global subscriber. Returns the log file path.
pub fn init(config: &CheckersConfig) -> Result<PathBuf> {
    let path = data_dir()?.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let directive = resolve_filter(std::env::var(LOG_ENV).ok(), &config.log_filter);
    let filter = build_filter(&directive)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| CheckersError::Config {
            message: format!("logging already initialized: {}", e),
        })?;

    Ok(path)
}
