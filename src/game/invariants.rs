//! Game invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger for a state driven only through the public
//! `GameState` operations. The fuzz target and property tests call
//! [`check_invariants`] after every action.

use crate::game::{GameState, Outcome};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

fn violation(violations: &mut Vec<InvariantViolation>, message: String) {
    violations.push(InvariantViolation { message });
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let initial = state.config().initial_budget_km;
    let budget = state.distance_budget_km();
    let completed = state.cities_completed();
    let history = state.history();

    if budget > initial {
        violation(
            &mut violations,
            format!("Budget {budget} exceeds initial budget {initial}"),
        );
    }

    if completed > state.cities().len() {
        violation(
            &mut violations,
            format!(
                "Completed {completed} cities out of only {}",
                state.cities().len()
            ),
        );
    }

    if history.len() != completed {
        violation(
            &mut violations,
            format!(
                "History has {} rounds but {completed} cities completed",
                history.len()
            ),
        );
    }

    // Budget must equal the initial value minus every miss, floored at zero.
    let spent: u64 = history
        .iter()
        .filter(|r| r.outcome == Outcome::Missed)
        .map(|r| u64::from(r.distance_km))
        .sum();
    let expected = u64::from(initial).saturating_sub(spent);
    if u64::from(budget) != expected {
        violation(
            &mut violations,
            format!("Budget {budget} but misses total {spent} from {initial}"),
        );
    }

    if let Some(last) = history.last()
        && last.budget_after_km != budget
    {
        violation(
            &mut violations,
            format!(
                "Last round left {} km but budget is {budget}",
                last.budget_after_km
            ),
        );
    }

    // While a round is on display the current index still points at it.
    let expected_index = if state.is_round_pending() {
        completed.saturating_sub(1)
    } else {
        completed
    };
    if state.current_city_index() != expected_index {
        violation(
            &mut violations,
            format!(
                "Current city index {} but expected {expected_index}",
                state.current_city_index()
            ),
        );
    }

    if state.city_marker().is_some() != state.is_round_pending() {
        violation(
            &mut violations,
            "Target marker shown outside a feedback window".to_string(),
        );
    }

    if state.is_showing_feedback() && !state.is_round_pending() {
        violation(
            &mut violations,
            "Feedback visible with no pending round".to_string(),
        );
    }

    let finished = completed >= state.cities().len() || budget == 0;
    if state.is_game_over() != finished {
        violation(
            &mut violations,
            format!(
                "Game over flag {} but finished condition is {finished}",
                state.is_game_over()
            ),
        );
    }

    if !state.is_playing() && (completed > 0 || state.user_marker().is_some()) {
        violation(
            &mut violations,
            "Progress recorded before the game started".to_string(),
        );
    }

    violations
}
