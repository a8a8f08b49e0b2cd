//! Map viewport on an equirectangular projection.
//!
//! The terminal map is a plain longitude/latitude grid. A viewport is a
//! center point plus a zoom level; each zoom level halves the visible span.
//! All conversions between terminal cells and coordinates live here so the
//! TUI only deals with layout.

use crate::geo::GeoPoint;

/// Deepest zoom level (1/16 of the world span).
pub const MAX_ZOOM: u8 = 4;

/// Number of cursor steps across the visible span.
const STEPS_PER_SPAN: f64 = 48.0;

/// The visible part of the world map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    center: GeoPoint,
    zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(GeoPoint::new(0.0, 0.0), 0)
    }
}

impl Viewport {
    /// Create a viewport; the zoom is capped at [`MAX_ZOOM`] and the center
    /// is pulled in so the view never leaves the world.
    #[must_use]
    pub fn new(center: GeoPoint, zoom: u8) -> Self {
        let mut view = Self {
            center,
            zoom: zoom.min(MAX_ZOOM),
        };
        view.clamp_center();
        view
    }

    /// Current zoom level, 0 is the whole world.
    #[must_use]
    pub const fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Center of the view.
    #[must_use]
    pub const fn center(&self) -> GeoPoint {
        self.center
    }

    /// Visible (latitude, longitude) span in degrees.
    #[must_use]
    pub fn span(&self) -> (f64, f64) {
        let scale = f64::from(1u32 << self.zoom);
        (180.0 / scale, 360.0 / scale)
    }

    /// Longitude bounds, suitable for a canvas x axis.
    #[must_use]
    pub fn x_bounds(&self) -> [f64; 2] {
        let half = self.span().1 / 2.0;
        [self.center.longitude - half, self.center.longitude + half]
    }

    /// Latitude bounds, suitable for a canvas y axis.
    #[must_use]
    pub fn y_bounds(&self) -> [f64; 2] {
        let half = self.span().0 / 2.0;
        [self.center.latitude - half, self.center.latitude + half]
    }

    /// Whether `point` is inside the view.
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        let [west, east] = self.x_bounds();
        let [south, north] = self.y_bounds();
        (west..=east).contains(&point.longitude) && (south..=north).contains(&point.latitude)
    }

    /// Zoom in one level. Returns false at the limit.
    pub fn zoom_in(&mut self) -> bool {
        if self.zoom >= MAX_ZOOM {
            return false;
        }
        self.zoom += 1;
        self.clamp_center();
        true
    }

    /// Zoom out one level. Returns false at the whole-world view.
    pub fn zoom_out(&mut self) -> bool {
        if self.zoom == 0 {
            return false;
        }
        self.zoom -= 1;
        self.clamp_center();
        true
    }

    /// Move the center to `point`, as far as the world edge allows.
    pub fn center_on(&mut self, point: GeoPoint) {
        self.center = point;
        self.clamp_center();
    }

    /// Re-center on `point` if it has left the view.
    pub fn follow(&mut self, point: GeoPoint) {
        if !self.contains(point) {
            self.center_on(point);
        }
    }

    /// Move `point` by whole cursor steps, scaled to the zoom level and
    /// clamped to the world.
    #[must_use]
    pub fn nudge(&self, point: GeoPoint, rows: i32, cols: i32) -> GeoPoint {
        let (lat_span, lng_span) = self.span();
        let latitude = point.latitude - f64::from(rows) * lat_span / STEPS_PER_SPAN;
        let longitude = point.longitude + f64::from(cols) * lng_span / STEPS_PER_SPAN;
        GeoPoint::new(latitude.clamp(-90.0, 90.0), longitude.clamp(-180.0, 180.0))
    }

    /// Convert a terminal cell inside a `width` x `height` map area into the
    /// coordinate at the cell's center. Offsets are relative to the area's
    /// top-left corner.
    #[must_use]
    pub fn cell_to_geo(&self, col: u16, row: u16, width: u16, height: u16) -> Option<GeoPoint> {
        if col >= width || row >= height {
            return None;
        }
        let (lat_span, lng_span) = self.span();
        let [west, _] = self.x_bounds();
        let [_, north] = self.y_bounds();
        let fx = (f64::from(col) + 0.5) / f64::from(width);
        let fy = (f64::from(row) + 0.5) / f64::from(height);
        Some(GeoPoint::new(north - fy * lat_span, west + fx * lng_span))
    }

    fn clamp_center(&mut self) {
        let (lat_span, lng_span) = self.span();
        let max_lat = 90.0 - lat_span / 2.0;
        let max_lng = 180.0 - lng_span / 2.0;
        self.center = GeoPoint::new(
            self.center.latitude.clamp(-max_lat, max_lat),
            self.center.longitude.clamp(-max_lng, max_lng),
        );
    }
}
