//! Session reporting.

use serde::{Deserialize, Serialize};

use crate::game::Outcome;
use crate::geo::GeoPoint;

/// One placed pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Name of the target city.
    pub city: String,
    /// Where the player put the pin, `None` if it was placed with nothing
    /// selected.
    pub guess: Option<GeoPoint>,
    /// Where the city actually is.
    pub target: GeoPoint,
    /// Rounded distance between the two.
    pub distance_km: u32,
    /// Classification against the threshold.
    pub outcome: Outcome,
    /// Budget remaining after this round was charged.
    pub budget_after_km: u32,
}

/// A snapshot of a session, suitable for saving as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Cities in the dataset.
    pub cities_total: usize,
    /// Pins placed so far.
    pub cities_completed: usize,
    /// Pins classified correct.
    pub correct: usize,
    /// Budget at the start.
    pub initial_budget_km: u32,
    /// Budget left now.
    pub budget_left_km: u32,
    /// Whether the game reached game over.
    pub finished: bool,
    /// Every placed pin in order.
    pub rounds: Vec<RoundRecord>,
}

impl SessionSummary {
    /// Share of placed pins that were correct, 0.0 when nothing was placed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy(&self) -> f64 {
        if self.cities_completed == 0 {
            return 0.0;
        }
        self.correct as f64 / self.cities_completed as f64
    }

    /// Total kilometres lost to misses.
    #[must_use]
    pub fn km_spent(&self) -> u32 {
        self.initial_budget_km.saturating_sub(self.budget_left_km)
    }

    /// The round with the largest miss, if any pin was placed.
    #[must_use]
    pub fn worst_round(&self) -> Option<&RoundRecord> {
        self.rounds.iter().max_by_key(|r| r.distance_km)
    }
}
