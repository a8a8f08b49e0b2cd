//! Capital city datasets.
//!
//! The JSON layout is
//! `{"capitalCities": [{"capitalCity": "...", "lat": 0.0, "long": 0.0}]}`
//! with an optional `"country"` per entry. Order in the file is turn order.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, QuizResult};
use crate::geo::GeoPoint;

/// The dataset compiled into the binary.
const BUNDLED_JSON: &str = include_str!("../data/capital_cities.json");

/// A city the player has to locate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityTarget {
    /// Display name of the capital.
    #[serde(rename = "capitalCity")]
    pub name: String,
    /// Country the capital belongs to, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Latitude in decimal degrees.
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees.
    #[serde(rename = "long")]
    pub longitude: f64,
}

impl CityTarget {
    /// Create a city target.
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            country: None,
            latitude,
            longitude,
        }
    }

    /// Location of the city.
    #[must_use]
    pub const fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct DatasetFile {
    #[serde(rename = "capitalCities")]
    capital_cities: Vec<CityTarget>,
}

/// An ordered, validated, immutable list of city targets.
#[derive(Debug, Clone, PartialEq)]
pub struct CityList {
    cities: Vec<CityTarget>,
}

impl CityList {
    /// Build a list, validating every entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, a name is blank, or a
    /// coordinate is out of range.
    pub fn new(cities: Vec<CityTarget>) -> QuizResult<Self> {
        if cities.is_empty() {
            return Err(QuizError::EmptyDataset);
        }
        for (index, city) in cities.iter().enumerate() {
            if city.name.trim().is_empty() {
                return Err(QuizError::BlankCityName { index });
            }
            if !city.location().is_valid() {
                return Err(QuizError::InvalidCityCoordinate {
                    name: city.name.clone(),
                    latitude: city.latitude,
                    longitude: city.longitude,
                });
            }
        }
        Ok(Self { cities })
    }

    /// The dataset shipped with the game.
    ///
    /// # Errors
    ///
    /// Only fails if the compiled-in file is corrupt, which the test suite
    /// rules out.
    pub fn bundled() -> QuizResult<Self> {
        Self::from_json(BUNDLED_JSON)
    }

    /// Parse a dataset from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON or an invalid entry.
    pub fn from_json(json: &str) -> QuizResult<Self> {
        let file: DatasetFile = serde_json::from_str(json)?;
        Self::new(file.capital_cities)
    }

    /// Load a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> QuizResult<Self> {
        let json = fs::read_to_string(path).map_err(|source| QuizError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), cities = list.len(), "loaded city dataset");
        Ok(list)
    }

    /// Serialize back to the dataset JSON layout.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> QuizResult<String> {
        let file = DatasetFile {
            capital_cities: self.cities.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// City at turn `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CityTarget> {
        self.cities.get(index)
    }

    /// Number of cities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always false: an empty list cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Iterate in turn order.
    pub fn iter(&self) -> std::slice::Iter<'_, CityTarget> {
        self.cities.iter()
    }
}

impl<'a> IntoIterator for &'a CityList {
    type Item = &'a CityTarget;
    type IntoIter = std::slice::Iter<'a, CityTarget>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
