//! Error taxonomy shared by every Sleuth crate.
//!
//! Each crate defines its own `thiserror` enum, and every variant maps onto
//! one [`ErrorKind`] through a `kind()` method so the top-level driver can
//! report failures uniformly.

use serde::{Deserialize, Serialize};

use crate::enums::CardKind;

/// Coarse classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required reference or non-empty collection was absent.
    InsufficientData,
    /// A type tag or structural invariant did not hold.
    InconsistentData,
    /// A token placement violated a location's occupancy rule.
    Capacity,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::InsufficientData => "insufficient data",
            Self::InconsistentData => "inconsistent data",
            Self::Capacity => "capacity",
        })
    }
}

/// Errors raised while building or converting shared types.
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    /// A card of one category was used where another was required.
    #[error("expected a {expected} card, found a {found} card")]
    CardKindMismatch {
        /// The category the operation required.
        expected: CardKind,
        /// The category of the card supplied.
        found: CardKind,
    },
}

impl TypesError {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::CardKindMismatch { .. } => ErrorKind::InconsistentData,
        }
    }
}
