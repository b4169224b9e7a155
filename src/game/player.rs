//! # Player Registry
//!
//! Players in fixed join order, each with a display color and parallel
//! guess/score histories.

use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};

/// An RGB display color.
pub type Rgb = (u8, u8, u8);

/// Categorical palette used to color players by join position.
///
/// Players beyond the palette size wrap around and repeat colors.
pub const PLAYER_PALETTE: [Rgb; 8] = [
    (31, 119, 180),  // blue
    (255, 127, 14),  // orange
    (44, 160, 44),   // green
    (214, 39, 40),   // red
    (148, 103, 189), // purple
    (140, 86, 75),   // brown
    (227, 119, 194), // pink
    (23, 190, 207),  // cyan
];

/// A single player: identity, color, and per-round history.
///
/// Guesses and scores are parallel sequences with exactly one entry per
/// round the player has completed. They only ever grow together through
/// [`Player::record`], so `guesses().len() == scores().len()` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Display name (duplicates across players are allowed)
    pub name: String,
    /// Display color for markers and the final summary
    pub color: Rgb,
    guesses: Vec<Coordinate>,
    scores: Vec<f64>,
}

impl Player {
    /// Creates a player with no history.
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
            guesses: Vec::new(),
            scores: Vec::new(),
        }
    }

    /// Records one completed round: the guess and its distance in km.
    ///
    /// This is the only mutation point for the histories, so the parallel
    /// growth invariant cannot be broken from outside.
    pub fn record(&mut self, guess: Coordinate, distance_km: f64) {
        self.guesses.push(guess);
        self.scores.push(distance_km);
    }

    /// The player's guesses, one per completed round, in round order.
    pub fn guesses(&self) -> &[Coordinate] {
        &self.guesses
    }

    /// The player's per-round distances in km, parallel to `guesses`.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Number of rounds this player has completed.
    pub fn rounds_completed(&self) -> usize {
        self.scores.len()
    }

    /// Cumulative score: the sum of per-round distances (lower is better).
    pub fn total_score(&self) -> f64 {
        self.scores.iter().sum()
    }
}

/// Ordered collection of players for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

impl PlayerRegistry {
    /// Builds a registry from names in join order, assigning palette colors
    /// by position (cycling when names outnumber the palette).
    ///
    /// Duplicate names are kept as distinct players.
    ///
    /// # Examples
    ///
    /// ```
    /// use globetrot::PlayerRegistry;
    ///
    /// let registry = PlayerRegistry::from_names(&["Alice".into(), "Bob".into()]);
    /// assert_eq!(registry.len(), 2);
    /// assert_ne!(registry.get(0).unwrap().color, registry.get(1).unwrap().color);
    /// ```
    pub fn from_names(names: &[String]) -> Self {
        let players = names
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(name.clone(), PLAYER_PALETTE[i % PLAYER_PALETTE.len()]))
            .collect();
        Self { players }
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// True when the registry holds no players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player at the raw turn index.
    ///
    /// No modulo is applied: an out-of-range index means the round is
    /// complete, which the state machine relies on.
    pub fn get(&self, turn: usize) -> Option<&Player> {
        self.players.get(turn)
    }

    /// Mutable access to the player at the raw turn index.
    pub fn get_mut(&mut self, turn: usize) -> Option<&mut Player> {
        self.players.get_mut(turn)
    }

    /// Player whose turn it is, wrapping the index for read access.
    ///
    /// # Panics
    ///
    /// Panics when the registry is empty.
    pub fn current(&self, turn: usize) -> &Player {
        &self.players[turn % self.players.len()]
    }

    /// Iterates players in join order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }
}
