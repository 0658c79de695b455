//! Shared type definitions for the Sleuth deduction game simulation.
//!
//! Every other crate in the workspace builds on the vocabulary defined
//! here.
//!
//! # Modules
//!
//! - [`ids`] -- Identifier newtypes for agents, games, and locations
//! - [`enums`] -- Suspects, weapons, rooms, tokens, and turn options
//! - [`cards`] -- Cards and the `(person, weapon, room)` solution triple
//! - [`error`] -- The shared error taxonomy

pub mod cards;
pub mod enums;
pub mod error;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use cards::{Card, SolutionCardSet};
pub use enums::{CardKind, Person, Room, Token, TurnOption, Weapon};
pub use error::{ErrorKind, TypesError};
pub use ids::{AgentId, GameId, LocationId};
