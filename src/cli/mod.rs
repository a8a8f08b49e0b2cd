//! CLI command implementations for capquiz.

pub(crate) mod cities;
pub(crate) mod distance;
pub(crate) mod logging;
pub(crate) mod play;

mod output;

use capquiz::{QuizConfig, QuizError};
use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Output format for the non-interactive commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<QuizError> for CliError {
    fn from(e: QuizError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

/// Build the effective config: defaults, then the config file, then flags.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the result is invalid.
pub(crate) fn resolve_config(
    path: Option<&Path>,
    budget: Option<u32>,
    threshold: Option<u32>,
) -> Result<QuizConfig, CliError> {
    let mut config = match path {
        Some(path) => QuizConfig::load(path)?,
        None => QuizConfig::default(),
    };
    if let Some(budget) = budget {
        config.initial_budget_km = budget;
    }
    if let Some(threshold) = threshold {
        config.correct_threshold_km = threshold;
    }
    config.validate()?;
    Ok(config)
}
