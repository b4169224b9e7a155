//! # Geocoding Module
//!
//! Name → coordinate resolution and the reverse, behind the [`Geocoder`]
//! trait. The game core only ever sees the trait, so tests run against fakes
//! and never touch the network.

pub mod nominatim;

pub use nominatim::*;

use crate::geo::Coordinate;
use crate::GlobetrotResult;
use serde::{Deserialize, Serialize};

/// A resolved place: coordinate plus the service's display name, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// The resolved geographic coordinate
    pub coordinate: Coordinate,
    /// Human-readable name returned by the geocoding service
    pub display_name: Option<String>,
}

impl Location {
    /// Creates a new location.
    pub fn new(coordinate: Coordinate, display_name: Option<String>) -> Self {
        Self {
            coordinate,
            display_name,
        }
    }
}

/// Resolves place names to coordinates and coordinates back to names.
///
/// Both operations may fail: `geocode` failure is fatal during game setup,
/// while `reverse` failure must be degraded by the caller to the
/// [`crate::config::REVERSE_PLACEHOLDER`] label and never affects scoring.
pub trait Geocoder {
    /// Resolves a place name to a location.
    ///
    /// Returns [`crate::GlobetrotError::Geocode`] when the service yields no
    /// result for the name.
    fn geocode(&self, name: &str) -> GlobetrotResult<Location>;

    /// Resolves a coordinate back to a place name.
    fn reverse(&self, coordinate: Coordinate) -> GlobetrotResult<String>;
}
