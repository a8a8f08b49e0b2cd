// Allow unwrap and float literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! capquiz: a capital-city geography quiz.
//!
//! The player is shown a world map and the name of a capital, places a pin
//! where they think it is, and loses the great-circle miss distance from a
//! shared kilometre budget. The game ends when the budget or the city list
//! runs out.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     CLI / TUI (ratatui, clap)       │
//! ├─────────────────────────────────────┤
//! │   Game state  │  Viewport           │
//! ├─────────────────────────────────────┤
//! │   Cities  │  Geo  │  Config         │
//! └─────────────────────────────────────┘
//! ```

pub mod cities;
pub mod config;
pub mod error;
pub mod game;
pub mod geo;
pub mod view;

pub use cities::{CityList, CityTarget};
pub use config::QuizConfig;
pub use error::{QuizError, QuizResult};
pub use game::{Feedback, GameState, Outcome, RoundRecord, SessionSummary};
pub use geo::{haversine_km, is_correct_guess, rounded_distance_km, GeoPoint};
pub use view::Viewport;
