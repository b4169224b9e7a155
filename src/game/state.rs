//! # Round/Turn State Machine
//!
//! Central game state management. [`GameManager`] owns the resolved city
//! sequence, the player registry, and the current phase; it consumes clicks
//! from the render surface, scores them against the target city, and advances
//! rounds and levels until the game is over.

use crate::config::{MAX_LEVELS, REVERSE_PLACEHOLDER};
use crate::game::{PlayerRegistry, ResolvedCity};
use crate::geo::Coordinate;
use crate::geocode::Geocoder;
use crate::{GlobetrotError, GlobetrotResult};

/// The current phase of the game.
///
/// Created in `Setup`; only [`GameManager::submit_guess`] and
/// [`GameManager::advance`] mutate it; `GameOver` is permanent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Constructed but no round started yet; the first `advance` starts round 0
    Setup,
    /// Waiting for the player at `turn` to click their guess for `round`
    AwaitingGuess {
        /// Current round index
        round: usize,
        /// Raw turn index into the registry (no modulo)
        turn: usize,
    },
    /// Every player has guessed for `round`; a click advances
    RoundComplete {
        /// The completed round index
        round: usize,
    },
    /// All rounds exhausted; only the final summary remains
    GameOver,
}

/// The scored result of one guess.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessOutcome {
    /// Index of the player who guessed, in registry order
    pub player: usize,
    /// The guessed coordinate
    pub guess: Coordinate,
    /// Great-circle distance from the guess to the target, in km
    pub distance_km: f64,
    /// Reverse-geocoded label of the clicked point, or the
    /// [`REVERSE_PLACEHOLDER`] when the lookup failed
    pub place: String,
}

/// Everything the display needs to start drawing a new round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundStart {
    /// The round index that just began
    pub round: usize,
    /// The difficulty level the round is played at
    pub level: usize,
    /// Name of the target city, for the round title
    pub city_name: String,
}

/// Result of an [`GameManager::advance`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// A new round started
    NextRound(RoundStart),
    /// No rounds remain; the game is over
    Finished,
}

/// What a pointer click meant in the current phase.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The click was a guess and was scored
    Guess(GuessOutcome),
    /// The click dismissed a round summary and started the next round
    RoundStarted(RoundStart),
    /// The click dismissed the last round summary; the game is over
    Finished,
    /// The click arrived in a phase that accepts no input
    Ignored,
}

/// The round/turn state machine.
///
/// Exclusively owns the game phase and the player registry; holds the city
/// sequence produced by setup and the reverse geocoder used to label guesses.
pub struct GameManager {
    cities: Vec<ResolvedCity>,
    registry: PlayerRegistry,
    rounds_per_level: usize,
    phase: GamePhase,
    /// Outcomes for the round currently on screen, cleared on advance
    round_outcomes: Vec<GuessOutcome>,
    geocoder: Box<dyn Geocoder>,
}

impl GameManager {
    /// Creates a manager in the `Setup` phase.
    ///
    /// `cities` must hold one target per round (`rounds_per_level * levels`
    /// entries); the derived level of the last round must stay below
    /// [`MAX_LEVELS`].
    pub fn new(
        cities: Vec<ResolvedCity>,
        registry: PlayerRegistry,
        rounds_per_level: usize,
        geocoder: Box<dyn Geocoder>,
    ) -> GlobetrotResult<Self> {
        if registry.is_empty() {
            return Err(GlobetrotError::Config("at least one player is required".to_string()));
        }
        if cities.is_empty() {
            return Err(GlobetrotError::Config("no cities to play".to_string()));
        }
        if rounds_per_level == 0 {
            return Err(GlobetrotError::Config("rounds must be at least 1".to_string()));
        }
        let last_level = (cities.len() - 1) / rounds_per_level;
        if last_level >= MAX_LEVELS {
            return Err(GlobetrotError::Config(format!(
                "{} cities at {} rounds per level needs {} levels (max {})",
                cities.len(),
                rounds_per_level,
                last_level + 1,
                MAX_LEVELS
            )));
        }
        Ok(Self {
            cities,
            registry,
            rounds_per_level,
            phase: GamePhase::Setup,
            round_outcomes: Vec::new(),
            geocoder,
        })
    }

    /// The current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// True once all rounds are exhausted.
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// The player registry.
    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    /// Total number of rounds in this game.
    pub fn total_rounds(&self) -> usize {
        self.cities.len()
    }

    /// Difficulty level for a round index: `round / rounds_per_level`.
    pub fn level_for_round(&self, round: usize) -> usize {
        round / self.rounds_per_level
    }

    /// The round currently on screen, if any.
    pub fn current_round(&self) -> Option<usize> {
        match self.phase {
            GamePhase::AwaitingGuess { round, .. } | GamePhase::RoundComplete { round } => {
                Some(round)
            }
            GamePhase::Setup | GamePhase::GameOver => None,
        }
    }

    /// Target city of the round currently on screen.
    pub fn target_city(&self) -> Option<&ResolvedCity> {
        self.current_round().map(|r| &self.cities[r])
    }

    /// Scored guesses for the round currently on screen, in turn order.
    pub fn round_outcomes(&self) -> &[GuessOutcome] {
        &self.round_outcomes
    }

    /// Dispatches a pointer click according to the current phase.
    ///
    /// In `AwaitingGuess` the click is a guess; in `RoundComplete` it
    /// dismisses the round summary and advances; in `Setup` and `GameOver`
    /// it is ignored. This is the only entry point the frame loop needs.
    pub fn handle_click(&mut self, coordinate: Coordinate) -> GlobetrotResult<ClickOutcome> {
        match self.phase {
            GamePhase::AwaitingGuess { .. } => Ok(ClickOutcome::Guess(self.submit_guess(coordinate)?)),
            GamePhase::RoundComplete { .. } => match self.advance()? {
                AdvanceOutcome::NextRound(start) => Ok(ClickOutcome::RoundStarted(start)),
                AdvanceOutcome::Finished => Ok(ClickOutcome::Finished),
            },
            GamePhase::Setup | GamePhase::GameOver => Ok(ClickOutcome::Ignored),
        }
    }

    /// Scores the current player's guess for the current round.
    ///
    /// Valid only in `AwaitingGuess`. Appends the guess and its distance to
    /// the current player, reverse-geocodes the click for the round summary
    /// (degrading failure to [`REVERSE_PLACEHOLDER`]), and strictly
    /// increments the turn; when the turn reaches the player count the round
    /// is complete.
    pub fn submit_guess(&mut self, guess: Coordinate) -> GlobetrotResult<GuessOutcome> {
        let (round, turn) = match self.phase {
            GamePhase::AwaitingGuess { round, turn } => (round, turn),
            other => {
                return Err(GlobetrotError::InvalidState(format!(
                    "guess submitted in {other:?}"
                )))
            }
        };

        let target = self.cities[round].location.coordinate;
        let distance_km = guess.haversine_km(target);

        let place = self
            .geocoder
            .reverse(guess)
            .unwrap_or_else(|_| REVERSE_PLACEHOLDER.to_string());

        let player = self
            .registry
            .get_mut(turn)
            .ok_or_else(|| GlobetrotError::InvalidState(format!("no player at turn {turn}")))?;
        player.record(guess, distance_km);
        log::info!(
            "round {round}: {} guessed {:.0} km from {}",
            player.name,
            distance_km,
            self.cities[round].name
        );

        let outcome = GuessOutcome {
            player: turn,
            guess,
            distance_km,
            place,
        };
        self.round_outcomes.push(outcome.clone());

        self.phase = if turn + 1 < self.registry.len() {
            GamePhase::AwaitingGuess {
                round,
                turn: turn + 1,
            }
        } else {
            GamePhase::RoundComplete { round }
        };
        Ok(outcome)
    }

    /// Starts the next round, or finishes the game when none remain.
    ///
    /// Valid in `Setup` (drives the very first round) and `RoundComplete`.
    /// Calling it while guesses are still outstanding is rejected.
    pub fn advance(&mut self) -> GlobetrotResult<AdvanceOutcome> {
        let next_round = match self.phase {
            GamePhase::Setup => 0,
            GamePhase::RoundComplete { round } => round + 1,
            other => {
                return Err(GlobetrotError::InvalidState(format!(
                    "advance requested in {other:?}"
                )))
            }
        };

        self.round_outcomes.clear();

        if next_round < self.total_rounds() {
            let level = self.level_for_round(next_round);
            self.phase = GamePhase::AwaitingGuess {
                round: next_round,
                turn: 0,
            };
            log::info!(
                "round {next_round} (level {level}): target is {}",
                self.cities[next_round].name
            );
            Ok(AdvanceOutcome::NextRound(RoundStart {
                round: next_round,
                level,
                city_name: self.cities[next_round].name.clone(),
            }))
        } else {
            self.phase = GamePhase::GameOver;
            log::info!("all {} rounds played, game over", self.total_rounds());
            Ok(AdvanceOutcome::Finished)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::Location;

    /// Reverse geocoder that can be scripted to fail.
    struct FakeGeocoder {
        reverse_fails: bool,
    }

    impl Geocoder for FakeGeocoder {
        fn geocode(&self, name: &str) -> GlobetrotResult<Location> {
            Err(GlobetrotError::Geocode {
                city: name.to_string(),
            })
        }

        fn reverse(&self, coordinate: Coordinate) -> GlobetrotResult<String> {
            if self.reverse_fails {
                Err(GlobetrotError::Http("timed out".to_string()))
            } else {
                Ok(format!("near ({:.1}, {:.1})", coordinate.lat, coordinate.lon))
            }
        }
    }

    fn city(name: &str, lat: f64, lon: f64) -> ResolvedCity {
        ResolvedCity::new(name, Location::new(Coordinate::new(lat, lon), None))
    }

    fn manager(cities: Vec<ResolvedCity>, players: &[&str], rounds: usize) -> GameManager {
        manager_with(cities, players, rounds, false)
    }

    fn manager_with(
        cities: Vec<ResolvedCity>,
        players: &[&str],
        rounds: usize,
        reverse_fails: bool,
    ) -> GameManager {
        let names: Vec<String> = players.iter().map(|s| s.to_string()).collect();
        GameManager::new(
            cities,
            PlayerRegistry::from_names(&names),
            rounds,
            Box::new(FakeGeocoder { reverse_fails }),
        )
        .unwrap()
    }

    #[test]
    fn test_starts_in_setup_and_first_advance_opens_round_zero() {
        let mut game = manager(vec![city("Paris", 48.9, 2.4)], &["Alice"], 1);
        assert_eq!(game.phase(), GamePhase::Setup);
        let outcome = game.advance().unwrap();
        assert_eq!(
            outcome,
            AdvanceOutcome::NextRound(RoundStart {
                round: 0,
                level: 0,
                city_name: "Paris".to_string(),
            })
        );
        assert_eq!(game.phase(), GamePhase::AwaitingGuess { round: 0, turn: 0 });
    }

    #[test]
    fn test_guess_scores_haversine_against_target() {
        let mut game = manager(vec![city("Paris", 48.8566, 2.3522)], &["Alice"], 1);
        game.advance().unwrap();
        let guess = Coordinate::new(51.5074, -0.1278);
        let outcome = game.submit_guess(guess).unwrap();
        let expected = guess.haversine_km(Coordinate::new(48.8566, 2.3522));
        assert_eq!(outcome.distance_km, expected);
        assert!(outcome.distance_km >= 0.0);
        assert_eq!(game.registry().get(0).unwrap().scores(), &[expected]);
    }

    #[test]
    fn test_turn_strictly_increments_until_round_complete() {
        let cities = vec![city("Paris", 48.9, 2.4)];
        let mut game = manager(cities, &["Alice", "Bob", "Carol"], 1);
        game.advance().unwrap();
        game.submit_guess(Coordinate::new(0.0, 0.0)).unwrap();
        assert_eq!(game.phase(), GamePhase::AwaitingGuess { round: 0, turn: 1 });
        game.submit_guess(Coordinate::new(1.0, 1.0)).unwrap();
        assert_eq!(game.phase(), GamePhase::AwaitingGuess { round: 0, turn: 2 });
        game.submit_guess(Coordinate::new(2.0, 2.0)).unwrap();
        assert_eq!(game.phase(), GamePhase::RoundComplete { round: 0 });
    }

    #[test]
    fn test_guess_rejected_outside_awaiting_phase() {
        let mut game = manager(vec![city("Paris", 48.9, 2.4)], &["Alice"], 1);
        // Setup phase
        assert!(game.submit_guess(Coordinate::new(0.0, 0.0)).is_err());
        game.advance().unwrap();
        game.submit_guess(Coordinate::new(0.0, 0.0)).unwrap();
        // RoundComplete phase
        assert!(game.submit_guess(Coordinate::new(0.0, 0.0)).is_err());
    }

    #[test]
    fn test_advance_rejected_while_guesses_remain() {
        let mut game = manager(vec![city("Paris", 48.9, 2.4)], &["Alice", "Bob"], 1);
        game.advance().unwrap();
        game.submit_guess(Coordinate::new(0.0, 0.0)).unwrap();
        // Bob has not guessed yet
        assert!(game.advance().is_err());
    }

    #[test]
    fn test_level_mapping_is_round_div_rounds_per_level() {
        let cities = vec![
            city("a", 0.0, 0.0),
            city("b", 0.0, 1.0),
            city("c", 0.0, 2.0),
            city("d", 0.0, 3.0),
        ];
        let game = manager(cities, &["Alice"], 2);
        assert_eq!(game.level_for_round(0), 0);
        assert_eq!(game.level_for_round(1), 0);
        assert_eq!(game.level_for_round(2), 1);
        assert_eq!(game.level_for_round(3), 1);
    }

    #[test]
    fn test_too_many_levels_rejected_at_construction() {
        let cities: Vec<ResolvedCity> =
            (0..4).map(|i| city(&format!("c{i}"), 0.0, i as f64)).collect();
        let names = vec!["Alice".to_string()];
        let result = GameManager::new(
            cities,
            PlayerRegistry::from_names(&names),
            1, // 4 cities at 1 round per level would need 4 levels
            Box::new(FakeGeocoder { reverse_fails: false }),
        );
        assert!(matches!(result, Err(GlobetrotError::Config(_))));
    }

    #[test]
    fn test_click_in_round_complete_advances_instead_of_guessing() {
        let cities = vec![city("Paris", 48.9, 2.4), city("Tokyo", 35.7, 139.7)];
        let mut game = manager(cities, &["Alice"], 2);
        game.advance().unwrap();
        let first = game.handle_click(Coordinate::new(10.0, 10.0)).unwrap();
        assert!(matches!(first, ClickOutcome::Guess(_)));
        let second = game.handle_click(Coordinate::new(20.0, 20.0)).unwrap();
        match second {
            ClickOutcome::RoundStarted(start) => {
                assert_eq!(start.round, 1);
                assert_eq!(start.city_name, "Tokyo");
            }
            other => panic!("expected RoundStarted, got {other:?}"),
        }
        // The new round accepted no guess from that dismissal click
        assert_eq!(game.registry().get(0).unwrap().rounds_completed(), 1);
    }

    #[test]
    fn test_game_over_ignores_clicks_permanently() {
        let mut game = manager(vec![city("Paris", 48.9, 2.4)], &["Alice"], 1);
        game.advance().unwrap();
        game.handle_click(Coordinate::new(0.0, 0.0)).unwrap();
        assert_eq!(
            game.handle_click(Coordinate::new(0.0, 0.0)).unwrap(),
            ClickOutcome::Finished
        );
        assert!(game.is_over());
        assert_eq!(
            game.handle_click(Coordinate::new(5.0, 5.0)).unwrap(),
            ClickOutcome::Ignored
        );
        assert_eq!(game.registry().get(0).unwrap().rounds_completed(), 1);
    }

    #[test]
    fn test_reverse_failure_degrades_to_placeholder() {
        let mut game = manager_with(vec![city("Paris", 48.9, 2.4)], &["Alice"], 1, true);
        game.advance().unwrap();
        let outcome = game.submit_guess(Coordinate::new(40.0, -3.7)).unwrap();
        assert_eq!(outcome.place, REVERSE_PLACEHOLDER);
        // Score recorded normally despite the failure
        assert_eq!(game.registry().get(0).unwrap().scores().len(), 1);
    }

    #[test]
    fn test_round_outcomes_reset_on_advance() {
        let cities = vec![city("Paris", 48.9, 2.4), city("Tokyo", 35.7, 139.7)];
        let mut game = manager(cities, &["Alice"], 2);
        game.advance().unwrap();
        game.submit_guess(Coordinate::new(0.0, 0.0)).unwrap();
        assert_eq!(game.round_outcomes().len(), 1);
        game.advance().unwrap();
        assert!(game.round_outcomes().is_empty());
    }
}
