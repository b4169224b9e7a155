//! # Globetrot Main Entry Point
//!
//! Parses the command line, geocodes the drawn cities, and runs the
//! macroquad frame loop that feeds clicks into the game state machine.

use clap::Parser;
use globetrot::{
    load_overlay, prepare_game, ClickOutcome, GameConfig, GameManager, GlobetrotResult,
    InputHandler, MapDisplay, NominatimGeocoder, PlayerInput,
};
use log::{info, warn};
use macroquad::prelude::*;
use std::path::PathBuf;

/// Command line arguments for Globetrot.
#[derive(Parser, Debug)]
#[command(name = "globetrot")]
#[command(about = "An interactive geography quiz played on a world map")]
#[command(version)]
struct Args {
    /// Player names, in turn order
    #[arg(required = true)]
    players: Vec<String>,

    /// City list file, one place name per line
    #[arg(long, default_value = globetrot::config::DEFAULT_CITY_FILE)]
    cities: PathBuf,

    /// Rounds per level
    #[arg(long, default_value_t = globetrot::config::DEFAULT_ROUNDS)]
    rounds: usize,

    /// Number of difficulty levels (max 3)
    #[arg(long, default_value_t = globetrot::config::DEFAULT_LEVELS)]
    levels: usize,

    /// Seed for reproducible city sampling
    #[arg(long)]
    seed: Option<u64>,
}

#[macroquad::main("Globetrot")]
async fn main() -> GlobetrotResult<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting Globetrot v{}", globetrot::VERSION);

    let config = GameConfig {
        rounds: args.rounds,
        levels: args.levels,
        player_names: args.players,
        seed: args.seed,
    };

    // Fatal setup errors (bad config, unreadable city list, geocoding
    // failures) surface here, before any map is shown.
    let geocoder = Box::new(NominatimGeocoder::new());
    let mut game = prepare_game(&config, &args.cities, geocoder)?;

    let overlay = match load_overlay() {
        Ok(overlay) => Some(overlay),
        Err(e) => {
            warn!("world geometry unavailable, falling back to graticule: {e}");
            None
        }
    };
    let mut display = MapDisplay::new(overlay);
    let input = InputHandler::new();

    // Drive the very first round
    game.advance()?;

    loop {
        display.update();

        match input.poll() {
            Some(PlayerInput::Quit) => {
                info!("player quit");
                break;
            }
            Some(PlayerInput::Click { x, y }) => {
                // Clicks in the letterbox never reach the game core
                if let Some(coordinate) = display.projection().to_geographic(x, y) {
                    if let ClickOutcome::Finished = game.handle_click(coordinate)? {
                        dump_final_scores(&game);
                    }
                }
            }
            None => {}
        }

        display.render(&game);
        next_frame().await;
    }

    Ok(())
}

/// Console score dump shown once at game end.
fn dump_final_scores(game: &GameManager) {
    println!("Final scores (lower is better):");
    for player in game.registry().iter() {
        let rounds: Vec<String> = player.scores().iter().map(|s| format!("{s:.0}")).collect();
        println!(
            "  {}: {:.0} km  [{}]",
            player.name,
            player.total_score(),
            rounds.join(", ")
        );
    }
}
