//! Error types for the sleuth-agents crate.
//!
//! All operations that can fail return typed errors rather than panicking.
//! Board and type errors raised while an agent consults the board are
//! wrapped so callers see a single [`AgentError`].

use sleuth_board::BoardError;
use sleuth_types::{Card, CardKind, ErrorKind, Person, TypesError};

/// Errors that can occur during ledger, player, or deck operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A card had to be chosen from an empty candidate set.
    #[error("no candidate cards to choose from")]
    NoCandidates,

    /// An accusation was requested before all three components were known.
    #[error("notebook is not ready for an accusation")]
    NotReadyForAccusation,

    /// The notebook has no entry for the card.
    #[error("no notebook entry for {0}")]
    EntryNotFound(Card),

    /// A card was reported shown by a player who does not own it.
    #[error("{card} is owned by {owner}, not {claimed}")]
    CardNotOwned {
        /// The card in question.
        card: Card,
        /// Its recorded owner.
        owner: Person,
        /// The player who claimed to show it.
        claimed: Person,
    },

    /// Every identifier of a category is already accounted for.
    #[error("every {0} card is already accounted for")]
    CategoryExhausted(CardKind),

    /// A card expected in the undealt deck was not there.
    #[error("{0} is not in the undealt deck")]
    CardNotInDeck(Card),

    /// Cards were dealt to zero seats.
    #[error("cannot deal cards to zero players")]
    NoSeats,

    /// A board lookup failed.
    #[error("board error: {source}")]
    Board {
        /// The underlying board error.
        #[from]
        source: BoardError,
    },

    /// A card conversion failed.
    #[error("type error: {source}")]
    Types {
        /// The underlying type error.
        #[from]
        source: TypesError,
    },
}

impl AgentError {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoCandidates
            | Self::NotReadyForAccusation
            | Self::EntryNotFound(_)
            | Self::CategoryExhausted(_)
            | Self::CardNotInDeck(_)
            | Self::NoSeats => ErrorKind::InsufficientData,
            Self::CardNotOwned { .. } => ErrorKind::InconsistentData,
            Self::Board { source } => source.kind(),
            Self::Types { source } => source.kind(),
        }
    }
}
