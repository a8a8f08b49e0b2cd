//! Error types for the quiz engine.

use std::path::PathBuf;

/// Errors raised by the quiz library.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    /// A latitude/longitude pair outside the valid range or not finite.
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Offending latitude in degrees.
        latitude: f64,
        /// Offending longitude in degrees.
        longitude: f64,
    },
    /// A `lat,lng` string could not be parsed.
    #[error("cannot parse coordinate {input:?}: expected \"LAT,LNG\"")]
    CoordinateSyntax {
        /// The rejected input.
        input: String,
    },
    /// A city dataset with no entries.
    #[error("city dataset is empty")]
    EmptyDataset,
    /// A city entry with a blank name.
    #[error("city #{index} has a blank name")]
    BlankCityName {
        /// Position of the entry in the dataset.
        index: usize,
    },
    /// A city entry with out-of-range coordinates.
    #[error("city {name:?} has invalid coordinates ({latitude}, {longitude})")]
    InvalidCityCoordinate {
        /// City name.
        name: String,
        /// Offending latitude.
        latitude: f64,
        /// Offending longitude.
        longitude: f64,
    },
    /// Malformed JSON in a dataset or config file.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A file could not be read or written.
    #[error("{}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A config value that makes the game unplayable.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// An action that needs a running game was attempted before `start`.
    #[error("the game has not started")]
    NotPlaying,
    /// An action attempted after the game ended.
    #[error("the game is over")]
    GameOver,
    /// An action attempted while the previous round's feedback is showing.
    #[error("waiting for the current round to clear")]
    RoundPending,
}

/// Result alias for quiz operations.
pub type QuizResult<T> = Result<T, QuizError>;
