//! # World Geometry Overlay
//!
//! Natural Earth 110m land polygons and country borders, fetched over HTTPS
//! and cached under the user cache directory. Land polygons are rasterized
//! once at load into per-row longitude spans so each frame draws a few
//! hundred horizontal rectangles instead of filling arbitrary polygons.

use crate::{GlobetrotError, GlobetrotResult};
use std::path::PathBuf;

const LAND_FILE: &str = "ne_110m_land.geojson";
const LAND_URL: &str = "https://raw.githubusercontent.com/nvkelso/natural-earth-vector/master/geojson/ne_110m_land.geojson";
const BORDERS_FILE: &str = "ne_110m_admin_0_boundary_lines_land.geojson";
const BORDERS_URL: &str = "https://raw.githubusercontent.com/nvkelso/natural-earth-vector/master/geojson/ne_110m_admin_0_boundary_lines_land.geojson";

/// Scanline rows used when rasterizing land (0.5 degrees per row).
const RASTER_ROWS: usize = 360;

/// A polyline of (lat, lon) points.
pub type Polyline = Vec<(f64, f64)>;

/// Land polygons rasterized into per-row longitude spans.
///
/// Row 0 is the northernmost; each row holds sorted `(lon_start, lon_end)`
/// intervals covered by land at that latitude.
#[derive(Debug, Clone, PartialEq)]
pub struct LandRaster {
    /// Number of scanline rows covering latitude 90 down to -90
    pub rows: usize,
    /// Land longitude intervals per row
    pub spans: Vec<Vec<(f64, f64)>>,
}

/// World geometry for the map display.
#[derive(Debug, Clone)]
pub struct GeoOverlay {
    /// Country border polylines
    pub borders: Vec<Polyline>,
    /// Rasterized land fill
    pub land: LandRaster,
}

/// Downloads both Natural Earth layers (or reads them from cache) and builds
/// the overlay. Any failure here is reported to the caller, who degrades to
/// a graticule-only map rather than aborting the game.
pub fn load_overlay() -> GlobetrotResult<GeoOverlay> {
    let land_json = fetch_or_cache(LAND_FILE, LAND_URL)?;
    let borders_json = fetch_or_cache(BORDERS_FILE, BORDERS_URL)?;
    let rings = parse_geojson_rings(&land_json)?;
    let borders = parse_geojson_polylines(&borders_json)?;
    Ok(GeoOverlay {
        borders,
        land: rasterize_land(&rings, RASTER_ROWS),
    })
}

fn cache_dir() -> PathBuf {
    let base = std::env::var_os("HOME")
        .map(|h| PathBuf::from(h).join(".cache"))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("globetrot").join("geodata")
}

fn fetch_or_cache(filename: &str, url: &str) -> GlobetrotResult<String> {
    let dir = cache_dir();
    let _ = std::fs::create_dir_all(&dir);
    let path = dir.join(filename);
    if path.exists() {
        return Ok(std::fs::read_to_string(&path)?);
    }
    log::info!("fetching {filename} from Natural Earth");
    let data = ureq::get(url)
        .call()
        .map_err(|e| GlobetrotError::Http(e.to_string()))?
        .into_string()?;
    let _ = std::fs::write(&path, &data);
    Ok(data)
}

/// Extracts LineString/MultiLineString features as (lat, lon) polylines.
pub fn parse_geojson_polylines(json: &str) -> GlobetrotResult<Vec<Polyline>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let features = value["features"]
        .as_array()
        .ok_or_else(|| GlobetrotError::Http("geojson has no features".to_string()))?;
    let mut polylines = Vec::new();
    for feature in features {
        let geometry = &feature["geometry"];
        match geometry["type"].as_str() {
            Some("LineString") => {
                if let Some(line) = coord_line(&geometry["coordinates"]) {
                    polylines.push(line);
                }
            }
            Some("MultiLineString") => {
                if let Some(lines) = geometry["coordinates"].as_array() {
                    polylines.extend(lines.iter().filter_map(coord_line));
                }
            }
            _ => {}
        }
    }
    Ok(polylines)
}

/// Extracts Polygon/MultiPolygon rings as (lat, lon) polylines.
///
/// Outer boundaries and holes are all returned; the even-odd scanline in
/// [`rasterize_land`] handles holes naturally.
pub fn parse_geojson_rings(json: &str) -> GlobetrotResult<Vec<Polyline>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let features = value["features"]
        .as_array()
        .ok_or_else(|| GlobetrotError::Http("geojson has no features".to_string()))?;
    let mut rings = Vec::new();
    for feature in features {
        let geometry = &feature["geometry"];
        match geometry["type"].as_str() {
            Some("Polygon") => {
                if let Some(polygon) = geometry["coordinates"].as_array() {
                    rings.extend(polygon.iter().filter_map(coord_line));
                }
            }
            Some("MultiPolygon") => {
                if let Some(polygons) = geometry["coordinates"].as_array() {
                    for polygon in polygons.iter().filter_map(|p| p.as_array()) {
                        rings.extend(polygon.iter().filter_map(coord_line));
                    }
                }
            }
            _ => {}
        }
    }
    Ok(rings)
}

fn coord_line(value: &serde_json::Value) -> Option<Polyline> {
    let points = value.as_array()?;
    let coords: Polyline = points
        .iter()
        .filter_map(|p| {
            let pair = p.as_array()?;
            Some((pair.get(1)?.as_f64()?, pair.first()?.as_f64()?))
        })
        .collect();
    if coords.is_empty() {
        None
    } else {
        Some(coords)
    }
}

/// Rasterizes polygon rings into per-row land spans via even-odd scanlines.
pub fn rasterize_land(rings: &[Polyline], rows: usize) -> LandRaster {
    let mut spans = Vec::with_capacity(rows);
    for row in 0..rows {
        let lat = 90.0 - (row as f64 + 0.5) * 180.0 / rows as f64;
        let mut crossings: Vec<f64> = Vec::new();
        for ring in rings {
            for window in ring.windows(2).chain(std::iter::once(
                &[ring[ring.len() - 1], ring[0]][..],
            )) {
                let (lat_a, lon_a) = window[0];
                let (lat_b, lon_b) = window[1];
                // Half-open test so shared vertices count once
                if (lat_a > lat) != (lat_b > lat) {
                    let t = (lat - lat_a) / (lat_b - lat_a);
                    crossings.push(lon_a + t * (lon_b - lon_a));
                }
            }
        }
        crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let row_spans = crossings
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();
        spans.push(row_spans);
    }
    LandRaster { rows, spans }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_polylines() {
        let json = r#"{"features": [
            {"geometry": {"type": "LineString", "coordinates": [[10.0, 50.0], [11.0, 51.0]]}},
            {"geometry": {"type": "MultiLineString", "coordinates": [[[0.0, 0.0], [1.0, 1.0]]]}}
        ]}"#;
        let lines = parse_geojson_polylines(json).unwrap();
        assert_eq!(lines.len(), 2);
        // GeoJSON order is [lon, lat]; we store (lat, lon)
        assert_eq!(lines[0][0], (50.0, 10.0));
    }

    #[test]
    fn test_parse_rings_from_multipolygon() {
        let json = r#"{"features": [
            {"geometry": {"type": "MultiPolygon", "coordinates":
                [[[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]]]]}}
        ]}"#;
        let rings = parse_geojson_rings(json).unwrap();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 5);
    }

    #[test]
    fn test_rasterize_square() {
        // Square from lat 0..10, lon 20..40
        let ring: Polyline = vec![(0.0, 20.0), (0.0, 40.0), (10.0, 40.0), (10.0, 20.0), (0.0, 20.0)];
        let raster = rasterize_land(&[ring], 180);
        // Row at lat ~5.5 (row index for lat in (0, 10))
        let row = ((90.0 - 5.0) / 1.0) as usize;
        let spans = &raster.spans[row];
        assert_eq!(spans.len(), 1);
        assert!((spans[0].0 - 20.0).abs() < 1e-9);
        assert!((spans[0].1 - 40.0).abs() < 1e-9);
        // A row in the southern hemisphere has no land
        assert!(raster.spans[170].is_empty());
    }

    #[test]
    fn test_rasterize_ring_with_hole() {
        let outer: Polyline = vec![(0.0, 0.0), (0.0, 30.0), (30.0, 30.0), (30.0, 0.0), (0.0, 0.0)];
        let hole: Polyline = vec![(10.0, 10.0), (10.0, 20.0), (20.0, 20.0), (20.0, 10.0), (10.0, 10.0)];
        let raster = rasterize_land(&[outer, hole], 180);
        // Scanline through the hole at lat ~15 gets two spans
        let row = ((90.0 - 15.0) / 1.0) as usize;
        assert_eq!(raster.spans[row].len(), 2);
    }
}
