//! # Map Projection
//!
//! Equirectangular (Plate Carrée) projection between window pixels and
//! geographic coordinates. The map keeps a 2:1 aspect ratio and is
//! letterboxed inside the window; clicks outside the projected map are
//! rejected rather than clamped.

use crate::geo::Coordinate;

/// Equirectangular projection fitted to a window.
///
/// # Examples
///
/// ```
/// use globetrot::{Coordinate, MapProjection};
///
/// let proj = MapProjection::fit(800.0, 400.0);
/// let (x, y) = proj.to_screen(Coordinate::new(0.0, 0.0));
/// assert_eq!((x, y), (400.0, 200.0));
/// assert!(proj.to_geographic(x, y).is_some());
/// assert!(proj.to_geographic(-10.0, 200.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    /// Left edge of the map rectangle in pixels
    pub origin_x: f32,
    /// Top edge of the map rectangle in pixels
    pub origin_y: f32,
    /// Width of the map rectangle in pixels
    pub width: f32,
    /// Height of the map rectangle in pixels
    pub height: f32,
}

impl MapProjection {
    /// Fits the largest centered 2:1 map rectangle inside the given window.
    pub fn fit(screen_width: f32, screen_height: f32) -> Self {
        let (width, height) = if screen_width >= screen_height * 2.0 {
            (screen_height * 2.0, screen_height)
        } else {
            (screen_width, screen_width / 2.0)
        };
        Self {
            origin_x: (screen_width - width) / 2.0,
            origin_y: (screen_height - height) / 2.0,
            width,
            height,
        }
    }

    /// Projects a geographic coordinate to window pixels.
    pub fn to_screen(&self, coordinate: Coordinate) -> (f32, f32) {
        let x = self.origin_x + ((coordinate.lon + 180.0) / 360.0) as f32 * self.width;
        let y = self.origin_y + ((90.0 - coordinate.lat) / 180.0) as f32 * self.height;
        (x, y)
    }

    /// Converts a window pixel back to a geographic coordinate.
    ///
    /// Returns `None` when the pixel falls outside the projected map, so
    /// stray clicks in the letterbox never reach the game core.
    pub fn to_geographic(&self, x: f32, y: f32) -> Option<Coordinate> {
        if x < self.origin_x
            || y < self.origin_y
            || x > self.origin_x + self.width
            || y > self.origin_y + self.height
        {
            return None;
        }
        let lon = ((x - self.origin_x) / self.width) as f64 * 360.0 - 180.0;
        let lat = 90.0 - ((y - self.origin_y) / self.height) as f64 * 180.0;
        Some(Coordinate::new(lat, lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_wide_window() {
        let proj = MapProjection::fit(1000.0, 400.0);
        assert_eq!(proj.width, 800.0);
        assert_eq!(proj.height, 400.0);
        assert_eq!(proj.origin_x, 100.0);
        assert_eq!(proj.origin_y, 0.0);
    }

    #[test]
    fn test_fit_tall_window() {
        let proj = MapProjection::fit(600.0, 600.0);
        assert_eq!(proj.width, 600.0);
        assert_eq!(proj.height, 300.0);
        assert_eq!(proj.origin_y, 150.0);
    }

    #[test]
    fn test_corners() {
        let proj = MapProjection::fit(720.0, 360.0);
        assert_eq!(proj.to_screen(Coordinate::new(90.0, -180.0)), (0.0, 0.0));
        assert_eq!(
            proj.to_screen(Coordinate::new(-90.0, 180.0)),
            (720.0, 360.0)
        );
    }

    #[test]
    fn test_click_outside_map_is_rejected() {
        let proj = MapProjection::fit(1000.0, 400.0);
        // Letterbox strip left of the map
        assert!(proj.to_geographic(50.0, 200.0).is_none());
        assert!(proj.to_geographic(500.0, 200.0).is_some());
    }

    #[test]
    fn test_round_trip_center() {
        let proj = MapProjection::fit(720.0, 360.0);
        let coord = Coordinate::new(48.8566, 2.3522);
        let (x, y) = proj.to_screen(coord);
        let back = proj.to_geographic(x, y).unwrap();
        assert!((back.lat - coord.lat).abs() < 0.5);
        assert!((back.lon - coord.lon).abs() < 0.5);
    }
}
