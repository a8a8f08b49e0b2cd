#![no_main]

use std::time::{Duration, Instant};

use arbitrary::Arbitrary;
use capquiz::game::check_invariants;
use capquiz::{CityList, CityTarget, GameState, GeoPoint, QuizConfig};
use libfuzzer_sys::fuzz_target;

/// One player or timer action.
#[derive(Arbitrary, Debug)]
enum Action {
    Start,
    Restart,
    /// Latitude and longitude, possibly out of range or non-finite.
    Select(f64, f64),
    Place,
    Dismiss,
    /// Advance the clock by this many milliseconds, then tick.
    Wait(u16),
}

/// Structured input for session fuzzing.
#[derive(Arbitrary, Debug)]
struct SessionInput {
    /// City coordinates (capped to keep runs short).
    cities: Vec<(i8, i16)>,
    /// Starting budget.
    budget: u16,
    /// Correct-guess threshold.
    threshold: u16,
    /// Action sequence.
    actions: Vec<Action>,
}

fuzz_target!(|input: SessionInput| {
    let cities: Vec<CityTarget> = input
        .cities
        .iter()
        .take(50)
        .enumerate()
        .map(|(i, &(lat, lng))| {
            CityTarget::new(
                format!("City {i}"),
                f64::from(lat).clamp(-90.0, 90.0),
                f64::from(lng).clamp(-180.0, 180.0),
            )
        })
        .collect();
    let Ok(cities) = CityList::new(cities) else {
        return;
    };
    let config = QuizConfig {
        initial_budget_km: u32::from(input.budget),
        correct_threshold_km: u32::from(input.threshold),
        ..QuizConfig::default()
    };
    let Ok(mut game) = GameState::new(cities, config) else {
        return;
    };

    let mut now = Instant::now();
    for action in input.actions.iter().take(500) {
        match *action {
            Action::Start => game.start(),
            Action::Restart => game.restart(),
            Action::Select(lat, lng) => {
                let _ = game.select(GeoPoint::new(lat, lng));
            }
            Action::Place => {
                let _ = game.place(now);
            }
            Action::Dismiss => game.dismiss_feedback(),
            Action::Wait(ms) => {
                now += Duration::from_millis(u64::from(ms));
                game.tick(now);
            }
        }

        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "{violations:?} after {action:?}");
    }
});
