//! Per-round results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::is_correct_guess;

/// Classification of a placed pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Within the threshold; the budget is untouched.
    Correct,
    /// At or beyond the threshold; the distance is charged to the budget.
    Missed,
}

/// The message shown after a pin is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    /// Whether the guess counted.
    pub outcome: Outcome,
    /// Rounded distance between guess and target.
    pub distance_km: u32,
}

impl Outcome {
    /// Score a rounded distance against the correct-guess threshold.
    #[must_use]
    pub const fn classify(distance_km: u32, threshold_km: u32) -> Self {
        if is_correct_guess(distance_km, threshold_km) {
            Self::Correct
        } else {
            Self::Missed
        }
    }
}

impl Feedback {
    /// True for a correct guess.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Correct
    }

    /// Kilometres charged to the budget by this round.
    #[must_use]
    pub const fn penalty_km(&self) -> u32 {
        match self.outcome {
            Outcome::Correct => 0,
            Outcome::Missed => self.distance_km,
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::Correct => write!(f, "Correct"),
            Outcome::Missed => write!(f, "You missed by {} kilometers", self.distance_km),
        }
    }
}
