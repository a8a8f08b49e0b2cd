//! Game state management.
//!
//! A session walks the city list in order. Each round the player selects a
//! location and places a pin; the pin is scored, both markers stay on the
//! map for the feedback window, and the next `tick` past the deadline clears
//! them and moves on to the next city.
//!
//! Time is passed in explicitly so the feedback timer is deterministic.

use std::time::Instant;

use crate::cities::{CityList, CityTarget};
use crate::config::QuizConfig;
use crate::error::{QuizError, QuizResult};
use crate::game::{Feedback, Outcome, RoundRecord, SessionSummary};
use crate::geo::{rounded_distance_km, GeoPoint};

/// Complete quiz state.
#[derive(Debug, Clone)]
pub struct GameState {
    cities: CityList,
    config: QuizConfig,
    distance_budget_km: u32,
    cities_completed: usize,
    current_city_index: usize,
    is_playing: bool,
    is_game_over: bool,
    user_marker: Option<GeoPoint>,
    city_marker: Option<GeoPoint>,
    feedback: Option<Feedback>,
    /// Set while a placed round is on display.
    round_deadline: Option<Instant>,
    history: Vec<RoundRecord>,
}

impl GameState {
    /// Create a new game, not yet started.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(cities: CityList, config: QuizConfig) -> QuizResult<Self> {
        config.validate()?;
        Ok(Self {
            distance_budget_km: config.initial_budget_km,
            cities,
            config,
            cities_completed: 0,
            current_city_index: 0,
            is_playing: false,
            is_game_over: false,
            user_marker: None,
            city_marker: None,
            feedback: None,
            round_deadline: None,
            history: Vec::new(),
        })
    }

    /// Begin play. Has no effect on a running game.
    pub fn start(&mut self) {
        if !self.is_playing {
            tracing::info!(cities = self.cities.len(), budget_km = self.distance_budget_km, "game started");
        }
        self.is_playing = true;
    }

    /// Reset budget, progress, markers and feedback to their initial values
    /// and start playing.
    pub fn restart(&mut self) {
        self.distance_budget_km = self.config.initial_budget_km;
        self.cities_completed = 0;
        self.current_city_index = 0;
        self.is_game_over = false;
        self.user_marker = None;
        self.city_marker = None;
        self.feedback = None;
        self.round_deadline = None;
        self.history.clear();
        tracing::info!("game restarted");
        self.is_playing = false;
        self.start();
    }

    /// Record the player's guess for the current city.
    ///
    /// A later call replaces the earlier guess.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not accepting input or the point is
    /// not a valid coordinate.
    pub fn select(&mut self, point: GeoPoint) -> QuizResult<()> {
        self.ensure_accepting_input()?;
        if !point.is_valid() {
            return Err(QuizError::InvalidCoordinate {
                latitude: point.latitude,
                longitude: point.longitude,
            });
        }
        tracing::debug!(%point, "guess selected");
        self.user_marker = Some(point);
        Ok(())
    }

    /// Confirm the current guess and score it.
    ///
    /// Reveals the target, charges a miss to the budget, advances the
    /// completed count and opens the feedback window starting at `now`.
    /// Placing with nothing selected scores as 0 km.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not accepting input.
    pub fn place(&mut self, now: Instant) -> QuizResult<Feedback> {
        self.ensure_accepting_input()?;
        let guess = self.user_marker;
        let (city_name, target) = {
            let city = self
                .cities
                .get(self.current_city_index)
                .ok_or(QuizError::GameOver)?;
            (city.name.clone(), city.location())
        };

        let distance_km = rounded_distance_km(guess, Some(target));
        let outcome = Outcome::classify(distance_km, self.config.correct_threshold_km);
        let feedback = Feedback {
            outcome,
            distance_km,
        };

        self.distance_budget_km = self.distance_budget_km.saturating_sub(feedback.penalty_km());
        self.cities_completed += 1;
        self.city_marker = Some(target);
        self.feedback = Some(feedback);
        self.round_deadline = Some(now + self.config.feedback_window());

        tracing::debug!(
            city = %city_name,
            distance_km,
            ?outcome,
            budget_km = self.distance_budget_km,
            "pin placed"
        );

        self.history.push(RoundRecord {
            city: city_name,
            guess,
            target,
            distance_km,
            outcome,
            budget_after_km: self.distance_budget_km,
        });

        if self.has_finished() {
            self.is_game_over = true;
            tracing::info!(
                cities_completed = self.cities_completed,
                budget_km = self.distance_budget_km,
                "game over"
            );
        }

        Ok(feedback)
    }

    /// Hide the feedback message early. Markers stay until the round clears.
    pub fn dismiss_feedback(&mut self) {
        self.feedback = None;
    }

    /// Advance the feedback timer.
    ///
    /// Returns true if the pending round cleared: both markers are removed,
    /// feedback is hidden and the next city becomes current.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.round_deadline {
            Some(deadline) if now >= deadline => {
                self.round_deadline = None;
                self.user_marker = None;
                self.city_marker = None;
                self.feedback = None;
                self.current_city_index = self.cities_completed;
                tracing::debug!(index = self.current_city_index, "round cleared");
                true
            }
            _ => false,
        }
    }

    fn ensure_accepting_input(&self) -> QuizResult<()> {
        if !self.is_playing {
            Err(QuizError::NotPlaying)
        } else if self.is_game_over {
            Err(QuizError::GameOver)
        } else if self.round_deadline.is_some() {
            Err(QuizError::RoundPending)
        } else {
            Ok(())
        }
    }

    fn has_finished(&self) -> bool {
        self.cities_completed >= self.cities.len() || self.distance_budget_km == 0
    }

    /// The city the player is asked to find, or `None` once the list is
    /// exhausted.
    #[must_use]
    pub fn current_city(&self) -> Option<&CityTarget> {
        self.cities.get(self.current_city_index)
    }

    /// Remaining distance budget in kilometres.
    #[must_use]
    pub const fn distance_budget_km(&self) -> u32 {
        self.distance_budget_km
    }

    /// Pins placed since the last (re)start.
    #[must_use]
    pub const fn cities_completed(&self) -> usize {
        self.cities_completed
    }

    /// Index of the current target in the city list.
    #[must_use]
    pub const fn current_city_index(&self) -> usize {
        self.current_city_index
    }

    /// Whether the game has been started.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether the budget or the city list ran out.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// Whether a feedback message is visible.
    #[must_use]
    pub const fn is_showing_feedback(&self) -> bool {
        self.feedback.is_some()
    }

    /// Whether a placed round is still on display.
    #[must_use]
    pub const fn is_round_pending(&self) -> bool {
        self.round_deadline.is_some()
    }

    /// The visible feedback message, if any.
    #[must_use]
    pub const fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    /// The player's current guess marker.
    #[must_use]
    pub const fn user_marker(&self) -> Option<GeoPoint> {
        self.user_marker
    }

    /// The revealed target marker, present only during the feedback window.
    #[must_use]
    pub const fn city_marker(&self) -> Option<GeoPoint> {
        self.city_marker
    }

    /// The city dataset.
    #[must_use]
    pub const fn cities(&self) -> &CityList {
        &self.cities
    }

    /// The rules in effect.
    #[must_use]
    pub const fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Every placed pin since the last (re)start.
    #[must_use]
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// Snapshot of the session for reporting.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            cities_total: self.cities.len(),
            cities_completed: self.cities_completed,
            correct: self
                .history
                .iter()
                .filter(|r| r.outcome == Outcome::Correct)
                .count(),
            initial_budget_km: self.config.initial_budget_km,
            budget_left_km: self.distance_budget_km,
            finished: self.is_game_over,
            rounds: self.history.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn cities() -> CityList {
        CityList::new(vec![
            CityTarget::new("Paris", 48.8566, 2.3522),
            CityTarget::new("Madrid", 40.4168, -3.7038),
            CityTarget::new("Rome", 41.9028, 12.4964),
        ])
        .unwrap()
    }

    fn new_game() -> GameState {
        GameState::new(cities(), QuizConfig::default()).unwrap()
    }

    fn playing() -> GameState {
        let mut game = new_game();
        game.start();
        game
    }

    /// Select, place and let the round clear.
    fn play_round(game: &mut GameState, guess: GeoPoint, now: Instant) -> Feedback {
        game.select(guess).unwrap();
        let feedback = game.place(now).unwrap();
        assert!(game.tick(now + game.config().feedback_window()));
        feedback
    }

    #[test]
    fn test_initial_state() {
        let game = new_game();
        assert_eq!(game.distance_budget_km(), 1500);
        assert_eq!(game.cities_completed(), 0);
        assert_eq!(game.current_city_index(), 0);
        assert!(!game.is_playing());
        assert!(!game.is_game_over());
        assert!(!game.is_showing_feedback());
        assert_eq!(game.current_city().unwrap().name, "Paris");
    }

    #[test]
    fn test_input_rejected_before_start() {
        let mut game = new_game();
        assert!(matches!(
            game.select(GeoPoint::new(48.0, 2.0)),
            Err(QuizError::NotPlaying)
        ));
        assert!(matches!(game.place(Instant::now()), Err(QuizError::NotPlaying)));
    }

    #[test]
    fn test_place_without_guess_scores_zero() {
        let mut game = playing();
        let t0 = Instant::now();
        let feedback = game.place(t0).unwrap();

        assert_eq!(feedback.distance_km, 0);
        assert_eq!(feedback.outcome, Outcome::Correct);
        assert_eq!(game.cities_completed(), 1);
        assert_eq!(game.distance_budget_km(), 1500);
        assert!(game.user_marker().is_none());
        assert!(game.city_marker().is_some());
        assert_eq!(game.history()[0].guess, None);

        assert!(game.tick(t0 + Duration::from_secs(2)));
        assert_eq!(game.current_city().unwrap().name, "Madrid");
    }

    #[test]
    fn test_select_rejects_invalid_point() {
        let mut game = playing();
        assert!(game.select(GeoPoint::new(f64::NAN, 0.0)).is_err());
        assert!(game.user_marker().is_none());
    }

    #[test]
    fn test_correct_guess_keeps_budget() {
        let mut game = playing();
        game.select(GeoPoint::new(48.86, 2.35)).unwrap();
        let feedback = game.place(Instant::now()).unwrap();

        assert_eq!(feedback.outcome, Outcome::Correct);
        assert_eq!(game.distance_budget_km(), 1500);
        assert_eq!(game.cities_completed(), 1);
        assert!(game.is_showing_feedback());
        assert!(game.city_marker().is_some());
        assert!(game.user_marker().is_some());
        // Still on Paris until the round clears.
        assert_eq!(game.current_city_index(), 0);
    }

    #[test]
    fn test_miss_charges_distance() {
        let mut game = playing();
        // London, ~344 km from Paris
        game.select(GeoPoint::new(51.5074, -0.1278)).unwrap();
        let feedback = game.place(Instant::now()).unwrap();

        assert_eq!(feedback.outcome, Outcome::Missed);
        assert_eq!(game.distance_budget_km(), 1500 - feedback.distance_km);
        assert!((340..350).contains(&feedback.distance_km));
    }

    #[test]
    fn test_feedback_window_timing() {
        let mut game = playing();
        let t0 = Instant::now();
        game.select(GeoPoint::new(48.86, 2.35)).unwrap();
        game.place(t0).unwrap();

        assert!(!game.tick(t0 + Duration::from_millis(1699)));
        assert!(game.is_round_pending());
        assert!(matches!(
            game.select(GeoPoint::new(0.0, 0.0)),
            Err(QuizError::RoundPending)
        ));
        assert!(matches!(game.place(t0), Err(QuizError::RoundPending)));

        assert!(game.tick(t0 + Duration::from_millis(1700)));
        assert!(game.user_marker().is_none());
        assert!(game.city_marker().is_none());
        assert!(!game.is_showing_feedback());
        assert_eq!(game.current_city().unwrap().name, "Madrid");

        // Nothing left to clear.
        assert!(!game.tick(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn test_dismiss_keeps_markers_until_deadline() {
        let mut game = playing();
        let t0 = Instant::now();
        game.select(GeoPoint::new(48.86, 2.35)).unwrap();
        game.place(t0).unwrap();
        game.dismiss_feedback();

        assert!(!game.is_showing_feedback());
        assert!(game.city_marker().is_some());
        assert!(game.is_round_pending());
        assert!(game.tick(t0 + Duration::from_secs(2)));
    }

    #[test]
    fn test_game_over_when_cities_exhausted() {
        let mut game = playing();
        let t0 = Instant::now();
        for city in ["Paris", "Madrid"] {
            let target = game.current_city().unwrap().location();
            assert_eq!(game.current_city().unwrap().name, city);
            play_round(&mut game, target, t0);
            assert!(!game.is_game_over());
        }
        let target = game.current_city().unwrap().location();
        game.select(target).unwrap();
        game.place(t0).unwrap();
        assert!(game.is_game_over());
        assert_eq!(game.cities_completed(), 3);
        assert!(matches!(
            game.select(GeoPoint::new(0.0, 0.0)),
            Err(QuizError::GameOver)
        ));

        // The last round still clears its markers.
        assert!(game.tick(t0 + Duration::from_secs(2)));
        assert!(game.current_city().is_none());
        assert!(game.city_marker().is_none());
    }

    #[test]
    fn test_game_over_when_budget_exhausted() {
        let mut game = playing();
        // Sydney is ~17,000 km from Paris
        let feedback = play_round(&mut game, GeoPoint::new(-33.87, 151.21), Instant::now());
        assert!(feedback.distance_km > 1500);
        assert_eq!(game.distance_budget_km(), 0);
        assert!(game.is_game_over());
        assert_eq!(game.cities_completed(), 1);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = playing();
        let t0 = Instant::now();
        play_round(&mut game, GeoPoint::new(51.5, -0.12), t0);
        game.select(GeoPoint::new(0.0, 0.0)).unwrap();
        game.place(t0).unwrap();

        game.restart();
        assert_eq!(game.distance_budget_km(), 1500);
        assert_eq!(game.cities_completed(), 0);
        assert_eq!(game.current_city_index(), 0);
        assert!(game.is_playing());
        assert!(!game.is_game_over());
        assert!(!game.is_showing_feedback());
        assert!(!game.is_round_pending());
        assert!(game.user_marker().is_none());
        assert!(game.city_marker().is_none());
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_summary() {
        let mut game = playing();
        let t0 = Instant::now();
        play_round(&mut game, GeoPoint::new(48.86, 2.35), t0);
        play_round(&mut game, GeoPoint::new(48.86, 2.35), t0);

        let summary = game.summary();
        assert_eq!(summary.cities_total, 3);
        assert_eq!(summary.cities_completed, 2);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.rounds[1].city, "Madrid");
        assert_eq!(summary.rounds[1].outcome, Outcome::Missed);
        assert_eq!(summary.budget_left_km, summary.rounds[1].budget_after_km);
        assert!(!summary.finished);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = QuizConfig {
            correct_threshold_km: 0,
            ..QuizConfig::default()
        };
        assert!(GameState::new(cities(), config).is_err());
    }
}
