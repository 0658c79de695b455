//! Game binary for the Sleuth simulation.
//!
//! Loads configuration, seats the automated players, deals, and plays a
//! game to a winner, universal false accusation, or the round cap.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `sleuth-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Seed the random draw
//! 4. Seat the roster and set up the game
//! 5. Run the game loop, narrating to tracing and the optional event log
//! 6. Log the result

mod error;
mod setup;

use std::path::Path;

use sleuth_core::config::{DEFAULT_CONFIG_FILE, LogFormat, LoggingConfig, SleuthConfig};
use sleuth_core::{Game, log_game_end, run_game};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, setup, or the game run fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        game_name = %config.game.name,
        players = config.players.len(),
        max_rounds = config.game.max_rounds,
        "sleuth-engine starting"
    );

    if let Err(err) = play(&config) {
        error!(error = %err, "sleuth-engine failed");
        return Err(err.into());
    }
    Ok(())
}

/// Steps 3 to 6: seed, seat, run, report.
fn play(config: &SleuthConfig) -> Result<(), EngineError> {
    // 3. Seed the draw.
    let draw = setup::seeded_draw(config.game.seed);

    // 4. Seat players and set up.
    let players = setup::seat_players(&config.players);
    let mut game = Game::new(players, Box::new(draw))?;

    // 5. Run.
    let mut sink = setup::event_sinks(config.output.event_log.as_deref())?;
    let result = run_game(&mut game, config.game.max_rounds, &mut sink)?;

    // 6. Log the result.
    log_game_end(&result);
    info!(case_file = %game.case_file(), "Case file revealed");
    Ok(())
}

/// Load and validate `sleuth-config.yaml` from the working directory.
fn load_config() -> Result<SleuthConfig, EngineError> {
    let config = SleuthConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?;
    config.validate()?;
    Ok(config)
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));
    match logging.format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}
