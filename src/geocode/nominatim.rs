//! # Nominatim Client
//!
//! [`Geocoder`] implementation over the public Nominatim HTTP API. Response
//! parsing is split into pure functions so it can be tested with canned JSON.

use crate::geo::Coordinate;
use crate::geocode::{Geocoder, Location};
use crate::{GlobetrotError, GlobetrotResult};
use std::time::Duration;

/// Default Nominatim endpoint.
pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Request timeout for geocoding calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Geocoder backed by the Nominatim service.
pub struct NominatimGeocoder {
    agent: ureq::Agent,
    base_url: String,
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl NominatimGeocoder {
    /// Creates a client against the public Nominatim endpoint.
    pub fn new() -> Self {
        Self::with_base_url(NOMINATIM_URL)
    }

    /// Creates a client against a custom endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        // Nominatim's usage policy requires an identifying user agent
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("globetrot/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: base_url.into(),
        }
    }

    fn get_json(&self, path: &str, query: &[(&str, &str)]) -> GlobetrotResult<serde_json::Value> {
        let url = format!("{}/{}", self.base_url, path);
        let mut request = self.agent.get(&url);
        for (key, value) in query {
            request = request.query(key, value);
        }
        let response = request
            .call()
            .map_err(|e| GlobetrotError::Http(e.to_string()))?;
        Ok(response.into_json()?)
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, name: &str) -> GlobetrotResult<Location> {
        log::debug!("geocoding {name:?}");
        let body = self.get_json(
            "search",
            &[("q", name), ("format", "json"), ("limit", "1")],
        )?;
        parse_search_response(&body, name)
    }

    fn reverse(&self, coordinate: Coordinate) -> GlobetrotResult<String> {
        let lat = coordinate.lat.to_string();
        let lon = coordinate.lon.to_string();
        let body = self.get_json(
            "reverse",
            &[("lat", &lat), ("lon", &lon), ("format", "json")],
        )?;
        parse_reverse_response(&body)
    }
}

/// Parses a Nominatim `/search` response into a [`Location`].
///
/// Returns [`GlobetrotError::Geocode`] naming the city when the result array
/// is empty or coordinates are malformed.
pub fn parse_search_response(body: &serde_json::Value, city: &str) -> GlobetrotResult<Location> {
    let not_found = || GlobetrotError::Geocode {
        city: city.to_string(),
    };
    let first = body.as_array().and_then(|a| a.first()).ok_or_else(not_found)?;
    // Nominatim returns lat/lon as strings
    let lat = first["lat"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(not_found)?;
    let lon = first["lon"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(not_found)?;
    let display_name = first["display_name"].as_str().map(str::to_string);
    Ok(Location::new(Coordinate::new(lat, lon), display_name))
}

/// Parses a Nominatim `/reverse` response into a place name.
pub fn parse_reverse_response(body: &serde_json::Value) -> GlobetrotResult<String> {
    body["display_name"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| GlobetrotError::Http("reverse response had no display_name".to_string()))
}
