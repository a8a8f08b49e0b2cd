//! Game layer for capquiz.
//!
//! Implements the quiz rules on top of the geometry and datasets:
//! - Turn order over a fixed city list
//! - Distance budget consumed by inaccurate guesses
//! - Timed feedback window between rounds
//! - Session summaries for reporting

mod invariants;
mod round;
mod state;
mod summary;

pub use invariants::{check_invariants, InvariantViolation};
pub use round::{Feedback, Outcome};
pub use state::GameState;
pub use summary::{RoundRecord, SessionSummary};
