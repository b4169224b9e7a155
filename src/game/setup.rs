//! # Game Setup
//!
//! Bootstrap: validates the configuration, loads and samples the city list,
//! resolves every target through the geocoder, and constructs the state
//! machine. All fatal errors happen here, before any window work.

use crate::config::MAX_LEVELS;
use crate::game::{GameManager, PlayerRegistry, ResolvedCity};
use crate::geocode::Geocoder;
use crate::{GlobetrotError, GlobetrotResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fs;
use std::path::Path;

/// The (rounds, levels, players) tuple a game is configured with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Rounds per level
    pub rounds: usize,
    /// Number of difficulty levels, 1..=MAX_LEVELS
    pub levels: usize,
    /// Player names in turn order
    pub player_names: Vec<String>,
    /// Optional seed for reproducible city sampling
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Validates the configuration without touching any external service.
    pub fn validate(&self) -> GlobetrotResult<()> {
        if self.player_names.is_empty() {
            return Err(GlobetrotError::Config(
                "at least one player is required".to_string(),
            ));
        }
        if self.rounds == 0 {
            return Err(GlobetrotError::Config("rounds must be at least 1".to_string()));
        }
        if self.levels == 0 || self.levels > MAX_LEVELS {
            return Err(GlobetrotError::Config(format!(
                "levels must be between 1 and {MAX_LEVELS}, got {}",
                self.levels
            )));
        }
        Ok(())
    }

    /// Number of cities the game needs: one target per round.
    pub fn total_cities(&self) -> usize {
        self.rounds * self.levels
    }
}

/// Loads a city list: one place name per line, blank lines ignored.
pub fn load_city_list(path: &Path) -> GlobetrotResult<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Draws `count` distinct cities from the list, without replacement.
pub fn sample_cities(
    cities: &[String],
    count: usize,
    seed: Option<u64>,
) -> GlobetrotResult<Vec<String>> {
    if cities.len() < count {
        return Err(GlobetrotError::Config(format!(
            "city list has {} entries but the game needs {count}",
            cities.len()
        )));
    }
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(cities
        .choose_multiple(&mut rng, count)
        .cloned()
        .collect())
}

/// Resolves each city name to a location, sequentially.
///
/// The first name the geocoder cannot resolve aborts the whole setup.
pub fn resolve_cities(
    names: &[String],
    geocoder: &dyn Geocoder,
) -> GlobetrotResult<Vec<ResolvedCity>> {
    names
        .iter()
        .map(|name| {
            let location = geocoder.geocode(name)?;
            log::debug!(
                "{name} -> ({:.4}, {:.4})",
                location.coordinate.lat,
                location.coordinate.lon
            );
            Ok(ResolvedCity::new(name.clone(), location))
        })
        .collect()
}

/// Runs the whole bootstrap and hands back a [`GameManager`] in `Setup`
/// phase, ready for its first `advance`.
pub fn prepare_game(
    config: &GameConfig,
    city_file: &Path,
    geocoder: Box<dyn Geocoder>,
) -> GlobetrotResult<GameManager> {
    config.validate()?;
    let city_list = load_city_list(city_file)?;
    let drawn = sample_cities(&city_list, config.total_cities(), config.seed)?;
    let resolved = resolve_cities(&drawn, geocoder.as_ref())?;
    let registry = PlayerRegistry::from_names(&config.player_names);
    GameManager::new(resolved, registry, config.rounds, geocoder)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rounds: usize, levels: usize, players: &[&str]) -> GameConfig {
        GameConfig {
            rounds,
            levels,
            player_names: players.iter().map(|s| s.to_string()).collect(),
            seed: Some(7),
        }
    }

    #[test]
    fn test_validate_rejects_levels_above_max() {
        assert!(config(3, 4, &["Alice"]).validate().is_err());
        assert!(config(3, 3, &["Alice"]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_levels_and_no_players() {
        assert!(config(3, 0, &["Alice"]).validate().is_err());
        assert!(config(3, 1, &[]).validate().is_err());
    }

    #[test]
    fn test_sample_without_replacement_is_distinct() {
        let cities: Vec<String> = (0..20).map(|i| format!("city{i}")).collect();
        let drawn = sample_cities(&cities, 9, Some(42)).unwrap();
        assert_eq!(drawn.len(), 9);
        let mut unique = drawn.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 9);
    }

    #[test]
    fn test_sample_is_reproducible_with_seed() {
        let cities: Vec<String> = (0..20).map(|i| format!("city{i}")).collect();
        let a = sample_cities(&cities, 5, Some(11)).unwrap();
        let b = sample_cities(&cities, 5, Some(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_rejects_short_list() {
        let cities = vec!["Paris".to_string(), "Tokyo".to_string()];
        assert!(matches!(
            sample_cities(&cities, 3, Some(1)),
            Err(GlobetrotError::Config(_))
        ));
    }
}
