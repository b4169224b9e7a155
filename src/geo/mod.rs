//! # Geo Module
//!
//! Geographic primitives: coordinates, great-circle distance, and the
//! screen/world map projection.

pub mod projection;

pub use projection::*;

use crate::config::EARTH_RADIUS_KM;
use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees.
///
/// Latitude is positive north, longitude positive east.
///
/// # Examples
///
/// ```
/// use globetrot::Coordinate;
///
/// let paris = Coordinate::new(48.8566, 2.3522);
/// assert!(paris.is_valid());
/// assert_eq!(paris.haversine_km(paris), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, [-90, 90]
    pub lat: f64,
    /// Longitude in degrees, [-180, 180]
    pub lon: f64,
}

impl Coordinate {
    /// Creates a new coordinate with the given latitude and longitude.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns true when the coordinate lies within the valid ranges.
    pub fn is_valid(self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    /// Great-circle distance to another coordinate in kilometers.
    ///
    /// Haversine formula on a spherical Earth. Always non-negative and
    /// symmetric; zero for identical points.
    ///
    /// # Examples
    ///
    /// ```
    /// use globetrot::Coordinate;
    ///
    /// let london = Coordinate::new(51.5074, -0.1278);
    /// let paris = Coordinate::new(48.8566, 2.3522);
    /// let km = london.haversine_km(paris);
    /// assert!((km - 344.0).abs() < 2.0);
    /// ```
    pub fn haversine_km(self, other: Coordinate) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let a = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().min(1.0).asin();
        EARTH_RADIUS_KM * c
    }
}
