//! Whole-session integration tests over the bundled dataset.
//!
//! These drive a `GameState` the way the TUI does: select, place, wait for
//! the feedback window, repeat until game over.
//!
//! Run with: cargo test --release session_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::io::Write;
use std::time::{Duration, Instant};

use capquiz::game::check_invariants;
use capquiz::{CityList, GameState, GeoPoint, Outcome, QuizConfig, QuizError, SessionSummary};

fn bundled_game() -> GameState {
    GameState::new(CityList::bundled().unwrap(), QuizConfig::default()).unwrap()
}

#[test]
fn test_perfect_game_visits_every_city() {
    let mut game = bundled_game();
    game.start();
    let mut now = Instant::now();
    let mut visited = Vec::new();

    while !game.is_game_over() {
        let city = game.current_city().unwrap().clone();
        visited.push(city.name.clone());
        game.select(city.location()).unwrap();
        game.place(now).unwrap();
        now += game.config().feedback_window();
        assert!(game.tick(now));
        assert!(check_invariants(&game).is_empty());
    }

    let total = game.cities().len();
    assert_eq!(visited.len(), total);
    assert_eq!(game.cities_completed(), total);
    assert_eq!(game.distance_budget_km(), 1500);
    assert!(game.current_city().is_none());

    let summary = game.summary();
    assert!(summary.finished);
    assert_eq!(summary.correct, total);
    assert!((summary.accuracy() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_always_guessing_null_island_runs_out_of_budget() {
    let mut game = bundled_game();
    game.start();
    let now = Instant::now();

    let mut rounds = 0;
    while !game.is_game_over() {
        game.select(GeoPoint::new(0.0, 0.0)).unwrap();
        game.place(now).unwrap();
        game.tick(now + Duration::from_secs(2));
        rounds += 1;
    }

    // Every capital is far from 0°N 0°E, so a handful of misses drains 1500 km.
    assert!(rounds < 5, "took {rounds} rounds");
    assert_eq!(game.distance_budget_km(), 0);
    assert!(game.cities_completed() < game.cities().len());
    assert!(
        game.history()
            .iter()
            .all(|r| r.outcome == Outcome::Missed)
    );
}

#[test]
fn test_near_misses_around_threshold() {
    let mut game = bundled_game();
    game.start();
    let now = Instant::now();

    // Berlin is first. ~0.4° of latitude is ~44 km: correct.
    let berlin = game.current_city().unwrap().location();
    game.select(GeoPoint::new(berlin.latitude + 0.4, berlin.longitude)).unwrap();
    let feedback = game.place(now).unwrap();
    assert_eq!(feedback.outcome, Outcome::Correct);
    assert!(feedback.distance_km < 50);
    game.tick(now + Duration::from_secs(2));

    // ~0.5° is ~56 km: a miss, charged in full.
    let tokyo = game.current_city().unwrap().location();
    game.select(GeoPoint::new(tokyo.latitude + 0.5, tokyo.longitude)).unwrap();
    let feedback = game.place(now).unwrap();
    assert_eq!(feedback.outcome, Outcome::Missed);
    assert!(feedback.distance_km >= 50);
    assert_eq!(game.distance_budget_km(), 1500 - feedback.distance_km);
    assert_eq!(feedback.to_string(), format!("You missed by {} kilometers", feedback.distance_km));
}

#[test]
fn test_place_with_no_marker_falls_back_to_zero_km() {
    let mut game = bundled_game();
    game.start();
    let now = Instant::now();

    let feedback = game.place(now).unwrap();
    assert_eq!(feedback.distance_km, 0);
    assert_eq!(feedback.outcome, Outcome::Correct);
    assert_eq!(game.cities_completed(), 1);
    assert_eq!(game.distance_budget_km(), 1500);
    assert!(check_invariants(&game).is_empty());

    let record = &game.history()[0];
    assert_eq!(record.city, "Berlin");
    assert!(record.guess.is_none());

    assert!(game.tick(now + Duration::from_secs(2)));
    assert_eq!(game.current_city_index(), 1);
}

#[test]
fn test_round_cannot_be_placed_twice() {
    let mut game = bundled_game();
    game.start();
    let now = Instant::now();
    game.select(GeoPoint::new(52.5, 13.4)).unwrap();
    game.place(now).unwrap();
    assert!(matches!(game.place(now), Err(QuizError::RoundPending)));
    assert_eq!(game.cities_completed(), 1);
}

#[test]
fn test_custom_dataset_and_config_files() {
    let mut cities = tempfile::NamedTempFile::new().unwrap();
    write!(
        cities,
        r#"{{"capitalCities": [
            {{"capitalCity": "Reykjavík", "lat": 64.1466, "long": -21.9426}},
            {{"capitalCity": "Nuuk", "lat": 64.1814, "long": -51.6941}}
        ]}}"#
    )
    .unwrap();
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(config, r#"{{"initial_budget_km": 100, "feedback_duration_ms": 0, "transition_ms": 0}}"#).unwrap();

    let cities = CityList::load(cities.path()).unwrap();
    let config = QuizConfig::load(config.path()).unwrap();
    let mut game = GameState::new(cities, config).unwrap();
    game.start();

    let now = Instant::now();
    // Guess Reykjavík for Reykjavík, then Reykjavík for Nuuk (~1400 km).
    game.select(GeoPoint::new(64.1466, -21.9426)).unwrap();
    game.place(now).unwrap();
    // A zero-length window clears on the very next tick.
    assert!(game.tick(now));
    game.select(GeoPoint::new(64.1466, -21.9426)).unwrap();
    game.place(now).unwrap();

    assert!(game.is_game_over());
    assert_eq!(game.distance_budget_km(), 0);
    assert_eq!(game.cities_completed(), 2);
}

#[test]
fn test_summary_json_round_trip() {
    let mut game = bundled_game();
    game.start();
    let now = Instant::now();
    game.select(GeoPoint::new(48.0, 11.0)).unwrap();
    game.place(now).unwrap();

    let json = serde_json::to_string(&game.summary()).unwrap();
    let summary: SessionSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(summary.rounds.len(), 1);
    assert_eq!(summary.rounds[0].city, "Berlin");
    assert!(json.contains("\"outcome\":\"missed\""));
}
