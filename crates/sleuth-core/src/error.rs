//! Error types for the turn engine.

use sleuth_agents::AgentError;
use sleuth_board::BoardError;
use sleuth_types::{Card, ErrorKind, Person, TurnOption, TypesError};

/// Errors that can occur while setting up or playing a game.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A game was constructed with an empty roster.
    #[error("a game needs at least one player")]
    NoPlayers,

    /// Two players were given the same character.
    #[error("character {0} is assigned to more than one player")]
    DuplicateCharacter(Person),

    /// A seat index past the end of the roster.
    #[error("seat {seat} is out of range for {seats} players")]
    SeatOutOfRange {
        /// The requested seat.
        seat: usize,
        /// Number of seats.
        seats: usize,
    },

    /// An action was requested that is not currently legal for the seat.
    #[error("{option} is not a legal option for seat {seat}")]
    IllegalAction {
        /// The acting seat.
        seat: usize,
        /// The rejected option.
        option: TurnOption,
    },

    /// A suggestion was attempted outside a room.
    #[error("seat {seat} is not in a room")]
    NotInRoom {
        /// The acting seat.
        seat: usize,
    },

    /// A scripted hand contains a case-file card.
    #[error("{0} is in the case file and in a player's hand")]
    CaseFileCardDealt(Card),

    /// A card appears in more than one scripted hand.
    #[error("{0} is dealt to more than one player")]
    CardDealtTwice(Card),

    /// A board operation failed.
    #[error("board error: {source}")]
    Board {
        /// The underlying board error.
        #[from]
        source: BoardError,
    },

    /// A player or deck operation failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// A card conversion failed.
    #[error("type error: {source}")]
    Types {
        /// The underlying type error.
        #[from]
        source: TypesError,
    },
}

impl GameError {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoPlayers | Self::SeatOutOfRange { .. } => ErrorKind::InsufficientData,
            Self::DuplicateCharacter(_)
            | Self::IllegalAction { .. }
            | Self::NotInRoom { .. }
            | Self::CaseFileCardDealt(_)
            | Self::CardDealtTwice(_) => ErrorKind::InconsistentData,
            Self::Board { source } => source.kind(),
            Self::Agent { source } => source.kind(),
            Self::Types { source } => source.kind(),
        }
    }
}
