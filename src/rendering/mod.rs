//! # Rendering Module
//!
//! World-map display using macroquad: per-level base layers, guess markers,
//! round summaries, and the final score chart. World geometry comes from
//! Natural Earth GeoJSON, fetched once and cached on disk.

pub mod display;
pub mod overlay;

pub use display::*;
pub use overlay::*;
