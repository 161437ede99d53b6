//! Geographic primitives shared by the resolver, the store finder and the
//! map projection.
//!
//! Coordinates are always stored `(longitude, latitude)`, matching the
//! ordering the map surface expects. Constructors validate ranges so every
//! [`Coordinates`] value in the system is placeable on a map.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Zoom tier used when a nearest point of sale is known.
pub const CLOSE_ZOOM: f64 = 13.0;

/// Zoom tier for a city-wide view (initial state, empty result sets).
pub const CITY_ZOOM: f64 = 11.0;

/// Map center shown before any location has been resolved (Joinville, SC).
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    longitude: -48.847,
    latitude: -26.304,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A validated `(longitude, latitude)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    longitude: f64,
    latitude: f64,
}

impl Coordinates {
    /// Builds a coordinate pair, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] naming the offending axis.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Same as [`Coordinates::new`] with the device-API argument order.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] naming the offending axis.
    pub fn from_lat_lon(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        Self::new(longitude, latitude)
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Fallback display string: `"{lat:.4}, {lon:.4}"`.
    #[must_use]
    pub fn display_fallback(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A confirmed location. Replaced wholesale on every new resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub coordinates: Option<Coordinates>,
    pub display_address: Option<String>,
}

impl UserLocation {
    #[must_use]
    pub fn new(coordinates: Coordinates, display_address: Option<String>) -> Self {
        Self {
            coordinates: Some(coordinates),
            display_address,
        }
    }

    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.coordinates.is_some()
    }
}

/// Map center and zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: f64,
}

impl Viewport {
    #[must_use]
    pub fn close(center: Coordinates) -> Self {
        Self {
            center,
            zoom: CLOSE_ZOOM,
        }
    }

    #[must_use]
    pub fn city(center: Coordinates) -> Self {
        Self {
            center,
            zoom: CITY_ZOOM,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::city(DEFAULT_CENTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_bounds() {
        assert!(Coordinates::new(-180.0, -90.0).is_ok());
        assert!(Coordinates::new(180.0, 90.0).is_ok());
    }

    #[test]
    fn new_rejects_out_of_range_latitude() {
        assert_eq!(
            Coordinates::new(-46.63, -91.0),
            Err(CoordinateError::LatitudeOutOfRange(-91.0))
        );
    }

    #[test]
    fn new_rejects_out_of_range_longitude() {
        assert_eq!(
            Coordinates::new(181.0, 0.0),
            Err(CoordinateError::LongitudeOutOfRange(181.0))
        );
    }

    #[test]
    fn new_rejects_nan() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn from_lat_lon_swaps_argument_order() {
        let c = Coordinates::from_lat_lon(-23.55, -46.63).unwrap();
        assert!((c.longitude() - -46.63).abs() < f64::EPSILON);
        assert!((c.latitude() - -23.55).abs() < f64::EPSILON);
    }

    #[test]
    fn display_fallback_pads_to_four_decimals() {
        let c = Coordinates::from_lat_lon(-26.3, -48.8).unwrap();
        assert_eq!(c.display_fallback(), "-26.3000, -48.8000");
    }

    #[test]
    fn default_viewport_is_city_zoom_on_default_center() {
        let v = Viewport::default();
        assert_eq!(v.center, DEFAULT_CENTER);
        assert!((v.zoom - CITY_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn default_user_location_is_unconfirmed() {
        assert!(!UserLocation::default().is_confirmed());
    }
}
