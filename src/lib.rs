//! # Globetrot
//!
//! An interactive geography quiz played on a world map. A target city name is
//! shown, each player in turn clicks where they think it is, and the
//! great-circle distance between the click and the true location is scored
//! (golf-style: lower is better).
//!
//! ## Architecture Overview
//!
//! - **Game State**: the round/turn state machine that sequences rounds,
//!   levels, and players, and accumulates per-player scores
//! - **Geocoding**: name → coordinate resolution (and the reverse) against
//!   the Nominatim service, behind a trait so the core stays offline-testable
//! - **Geo**: coordinates, great-circle distance, and the map projection
//! - **Rendering System**: world-map display using macroquad, with Natural
//!   Earth land and border geometry
//! - **Input**: pointer and keyboard polling for the frame loop

pub mod game;
pub mod geo;
pub mod geocode;
pub mod input;
pub mod rendering;

// Explicit re-exports for commonly used types
pub use game::{
    // From player
    Player,
    PlayerRegistry,
    // From setup
    load_city_list,
    prepare_game,
    sample_cities,
    GameConfig,
    // From state
    AdvanceOutcome,
    ClickOutcome,
    GameManager,
    GamePhase,
    GuessOutcome,
    ResolvedCity,
    RoundStart,
};

pub use geo::{Coordinate, MapProjection};
pub use geocode::{Geocoder, Location, NominatimGeocoder};
pub use input::{InputHandler, PlayerInput};
pub use rendering::{load_overlay, GeoOverlay, MapDisplay};

/// Core error type for the Globetrot game.
#[derive(thiserror::Error, Debug)]
pub enum GlobetrotError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Invalid rounds/levels/players/city-list combination
    #[error("Configuration error: {0}")]
    Config(String),

    /// A city name could not be resolved to coordinates
    #[error("Could not geocode city: {city}")]
    Geocode {
        /// The offending city name
        city: String,
    },

    /// HTTP transport failure talking to an external service
    #[error("HTTP error: {0}")]
    Http(String),

    /// An operation was attempted in the wrong game phase
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Globetrot codebase.
pub type GlobetrotResult<T> = Result<T, GlobetrotError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Maximum number of difficulty levels per game
    pub const MAX_LEVELS: usize = 3;

    /// Default rounds per level
    pub const DEFAULT_ROUNDS: usize = 3;

    /// Default number of levels
    pub const DEFAULT_LEVELS: usize = 3;

    /// Default city list file
    pub const DEFAULT_CITY_FILE: &str = "Capitals.txt";

    /// Mean Earth radius in kilometers, used for great-circle distances
    pub const EARTH_RADIUS_KM: f64 = 6371.0088;

    /// Label shown when reverse geocoding a clicked point fails
    pub const REVERSE_PLACEHOLDER: &str = "Timeout";
}
