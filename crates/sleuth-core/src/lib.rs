//! Turn engine, event stream, runner, and configuration for the Sleuth
//! simulation.
//!
//! This crate seats the players, drives their turns, narrates what
//! happens, and decides when the game is over.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `sleuth-config.yaml` into
//!   strongly-typed structs.
//! - [`error`] -- [`GameError`]
//! - [`events`] -- [`GameEvent`] stream and the [`EventSink`] family.
//! - [`game`] -- [`Game`]: setup, legal options, and action execution.
//! - [`runner`] -- [`run_game`]: rounds until a win, universal false
//!   accusation, or the round cap.

pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod runner;

pub use config::SleuthConfig;
pub use error::GameError;
pub use events::{
    CompositeSink, EventRecord, EventSink, GameEvent, JsonLinesSink, NoOpSink, RecordingSink,
    SinkError, TracingSink,
};
pub use game::Game;
pub use runner::{GameEndReason, GameResult, RunnerError, log_game_end, run_game};
