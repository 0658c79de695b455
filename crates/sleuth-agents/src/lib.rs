//! Deduction ledger, automated players, and card deck for the Sleuth
//! simulation.
//!
//! # Modules
//!
//! - [`deck`] -- [`CardDeck`]: case-file selection and round-robin dealing
//! - [`error`] -- [`AgentError`]
//! - [`notebook`] -- [`DetectiveNotebook`]: evidence, inference, and the
//!   choices that follow from them
//! - [`player`] -- [`Player`]: hand, ledger, turn flags, and action policy

pub mod deck;
pub mod error;
pub mod notebook;
pub mod player;

pub use deck::CardDeck;
pub use error::AgentError;
pub use notebook::{DetectiveNotebook, NotebookEntry, PreferenceMode};
pub use player::{Player, TurnFlags};
