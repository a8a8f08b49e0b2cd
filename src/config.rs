//! Game configuration.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, QuizResult};

/// Tunable rules for a quiz session.
///
/// Every field has a default, so a config file only needs the values it
/// overrides:
///
/// ```json
/// { "initial_budget_km": 3000 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuizConfig {
    /// Distance budget at the start of a game (default: 1500).
    pub initial_budget_km: u32,
    /// Guesses strictly closer than this count as correct (default: 50).
    pub correct_threshold_km: u32,
    /// How long the result message stays up (default: 1500).
    pub feedback_duration_ms: u64,
    /// Extra time for the message to fade before the round clears (default: 200).
    pub transition_ms: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            initial_budget_km: 1500,
            correct_threshold_km: 50,
            feedback_duration_ms: 1500,
            transition_ms: 200,
        }
    }
}

impl QuizConfig {
    /// Load a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or fails
    /// [`QuizConfig::validate`].
    pub fn load(path: &Path) -> QuizResult<Self> {
        let json = fs::read_to_string(path).map_err(|source| QuizError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that make the game unplayable.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::InvalidConfig`] for a zero budget or threshold.
    pub fn validate(&self) -> QuizResult<()> {
        if self.initial_budget_km == 0 {
            return Err(QuizError::InvalidConfig("initial_budget_km must be positive"));
        }
        if self.correct_threshold_km == 0 {
            return Err(QuizError::InvalidConfig("correct_threshold_km must be positive"));
        }
        Ok(())
    }

    /// Time from placing a pin until the round clears.
    #[must_use]
    pub const fn feedback_window(&self) -> Duration {
        Duration::from_millis(self.feedback_duration_ms.saturating_add(self.transition_ms))
    }
}
