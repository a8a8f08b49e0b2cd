//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so interactive sessions only log when a log
//! file is given. One-shot commands log to stderr.

use super::CliError;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
const LOG_ENV: &str = "CAPQUIZ_LOG";

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Send log events to `path`, truncating it.
///
/// # Errors
///
/// Returns an error if the file cannot be created or a subscriber is
/// already installed.
pub(crate) fn to_file(path: &Path) -> Result<(), CliError> {
    let file = File::create(path)
        .map_err(|e| CliError::new(format!("Failed to create {}: {e}", path.display())))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter("info"))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| CliError::new(format!("Failed to start logging: {e}")))
}

/// Send warnings and errors (or whatever `CAPQUIZ_LOG` asks for) to stderr.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
pub(crate) fn to_stderr() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter("warn"))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CliError::new(format!("Failed to start logging: {e}")))
}
