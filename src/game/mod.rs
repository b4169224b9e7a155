//! # Game Module
//!
//! The round/turn state machine and its supporting types: the player
//! registry, game setup, and the resolved city sequence a game is played
//! over.

pub mod player;
pub mod setup;
pub mod state;

pub use player::*;
pub use setup::*;
pub use state::*;

use crate::geocode::Location;
use serde::{Deserialize, Serialize};

/// A city drawn for this game, resolved once at setup.
///
/// Immutable after resolution; the ordered sequence of resolved cities is
/// fixed at game start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCity {
    /// The name as it appeared in the city list
    pub name: String,
    /// The geocoded location
    pub location: Location,
}

impl ResolvedCity {
    /// Creates a resolved city.
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}
