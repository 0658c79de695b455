//! Location graph and shortest-path oracle for the Sleuth simulation.
//!
//! This crate owns the fixed mansion topology, token placement with
//! per-location occupancy rules, the precomputed distance chart, and the
//! injected uniform-draw service used for every random selection.
//!
//! # Modules
//!
//! - [`board`] -- [`Board`]: location arena, token index, move options
//! - [`distance`] -- [`DistanceChart`]: `(origin, room) -> (hops, next)`
//! - [`draw`] -- [`RandomDraw`] trait, seeded and midpoint draws,
//!   [`choose_uniformly`]
//! - [`error`] -- [`BoardError`]
//! - [`layout`] -- The fixed rooms, hallways, passages, and homes
//! - [`location`] -- [`LocationState`] nodes and their occupancy rules

pub mod board;
pub mod distance;
pub mod draw;
pub mod error;
pub mod layout;
pub mod location;

pub use board::Board;
pub use distance::{DistanceChart, REENTRY_HOPS, Step};
pub use draw::{MidpointDraw, RandomDraw, SeededDraw, choose_uniformly};
pub use error::BoardError;
pub use location::{LocationKind, LocationState};
