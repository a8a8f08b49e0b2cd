//! Great-circle geometry on a spherical Earth.
//!
//! Distances use the haversine formula with the mean Earth radius, which is
//! the same model web mapping libraries use for `distanceTo`. Accuracy is
//! well within a kilometre for the scale the quiz scores at.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, QuizResult};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude, -90 (south) to 90 (north).
    pub latitude: f64,
    /// Longitude, -180 (west) to 180 (east).
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point without range checks.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a point, rejecting non-finite or out-of-range coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::InvalidCoordinate`] if latitude is outside
    /// `[-90, 90]` or longitude outside `[-180, 180]`.
    pub fn try_new(latitude: f64, longitude: f64) -> QuizResult<Self> {
        let point = Self::new(latitude, longitude);
        if point.is_valid() {
            Ok(point)
        } else {
            Err(QuizError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// Whether both coordinates are finite and in range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude < 0.0 { 'S' } else { 'N' };
        let ew = if self.longitude < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{:.2}°{ns} {:.2}°{ew}",
            self.latitude.abs(),
            self.longitude.abs()
        )
    }
}

impl FromStr for GeoPoint {
    type Err = QuizError;

    /// Parse `"LAT,LNG"` in decimal degrees.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax = || QuizError::CoordinateSyntax {
            input: s.to_string(),
        };
        let (lat, lng) = s.split_once(',').ok_or_else(syntax)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| syntax())?;
        let longitude: f64 = lng.trim().parse().map_err(|_| syntax())?;
        Self::try_new(latitude, longitude)
    }
}

/// Haversine great-circle distance between two points in kilometres.
///
/// Non-finite inputs propagate as NaN; use [`try_distance_km`] when the
/// inputs are untrusted.
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Distance in kilometres, failing on non-finite coordinates.
///
/// # Errors
///
/// Returns [`QuizError::InvalidCoordinate`] naming the first bad point.
pub fn try_distance_km(a: GeoPoint, b: GeoPoint) -> QuizResult<f64> {
    for p in [a, b] {
        if !p.latitude.is_finite() || !p.longitude.is_finite() {
            return Err(QuizError::InvalidCoordinate {
                latitude: p.latitude,
                longitude: p.longitude,
            });
        }
    }
    Ok(haversine_km(a, b))
}

/// Distance rounded to the nearest kilometre.
///
/// A missing point or a failed computation yields 0 rather than an error.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rounded_distance_km(a: Option<GeoPoint>, b: Option<GeoPoint>) -> u32 {
    let (Some(a), Some(b)) = (a, b) else {
        tracing::debug!("distance requested with a missing point, using 0 km");
        return 0;
    };
    match try_distance_km(a, b) {
        // Bounded by half the Earth's circumference, well inside u32.
        Ok(km) => km.round() as u32,
        Err(e) => {
            tracing::debug!(error = %e, "distance computation failed, using 0 km");
            0
        }
    }
}

/// A guess is correct when it lands strictly closer than `threshold_km`.
#[must_use]
pub const fn is_correct_guess(distance_km: u32, threshold_km: u32) -> bool {
    distance_km < threshold_km
}
