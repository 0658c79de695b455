//! Error types for the `sleuth-board` crate.
//!
//! All fallible operations in this crate return [`BoardError`].

use sleuth_types::{ErrorKind, LocationId, Room, Token};

/// Errors that can occur during board operations.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// A location handle does not refer to any node in the arena.
    #[error("location not found: {0}")]
    LocationNotFound(LocationId),

    /// A room has no node in the arena.
    #[error("room not on board: {0}")]
    RoomNotFound(Room),

    /// A token has not been placed anywhere yet.
    #[error("token not placed on board: {0}")]
    TokenNotPlaced(Token),

    /// The destination cannot accept another occupant.
    #[error("{location} cannot accept {token}")]
    AtCapacity {
        /// The full destination.
        location: LocationId,
        /// The token that was refused.
        token: Token,
    },

    /// The token already occupies the destination.
    #[error("{token} is already at {location}")]
    AlreadyAtDestination {
        /// The token being placed.
        token: Token,
        /// Its current location.
        location: LocationId,
    },

    /// A hallway was declared with the same room at both ends.
    #[error("hallway connects {0} to itself")]
    SelfConnectedHallway(Room),

    /// A room has fewer adjacent hallways than the layout requires.
    #[error("room {room} has only {count} hallways")]
    TooFewHallways {
        /// The under-connected room.
        room: Room,
        /// Number of adjacent hallways found.
        count: usize,
    },

    /// The distance chart has no entry for a pair it must cover.
    #[error("no distance entry from {origin} to {destination}")]
    MissingDistance {
        /// Origin location.
        origin: LocationId,
        /// Destination room.
        destination: Room,
    },

    /// A uniform choice was requested over an empty set.
    #[error("cannot choose from an empty set")]
    EmptyChoice,

    /// Token and occupant bookkeeping disagree.
    #[error("{token} is recorded at {location} but occupancy disagrees")]
    OccupancyMismatch {
        /// The token in question.
        token: Token,
        /// The location involved.
        location: LocationId,
    },

    /// A hallway or home holds more tokens than it allows.
    #[error("{location} holds {occupants} tokens beyond its capacity")]
    OverCapacity {
        /// The overfull location.
        location: LocationId,
        /// Number of occupants found.
        occupants: usize,
    },

    /// Arithmetic overflow during distance computation.
    #[error("arithmetic overflow in distance calculation")]
    ArithmeticOverflow,
}

impl BoardError {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::LocationNotFound(_)
            | Self::RoomNotFound(_)
            | Self::TokenNotPlaced(_)
            | Self::EmptyChoice => ErrorKind::InsufficientData,
            Self::AtCapacity { .. } | Self::OverCapacity { .. } => ErrorKind::Capacity,
            Self::AlreadyAtDestination { .. }
            | Self::SelfConnectedHallway(_)
            | Self::TooFewHallways { .. }
            | Self::MissingDistance { .. }
            | Self::OccupancyMismatch { .. }
            | Self::ArithmeticOverflow => ErrorKind::InconsistentData,
        }
    }
}

#[cfg(test)]
mod tests {
    use sleuth_types::Person;

    use super::*;

    #[test]
    fn errors_fall_into_the_shared_taxonomy() {
        let token = Token::Person(Person::MrGreen);
        let location = LocationId::new(9);
        assert_eq!(
            BoardError::TokenNotPlaced(token).kind(),
            ErrorKind::InsufficientData
        );
        assert_eq!(
            BoardError::AtCapacity { location, token }.kind(),
            ErrorKind::Capacity
        );
        assert_eq!(
            BoardError::AlreadyAtDestination { token, location }.kind(),
            ErrorKind::InconsistentData
        );
        assert_eq!(
            BoardError::SelfConnectedHallway(Room::Hall).kind(),
            ErrorKind::InconsistentData
        );
    }
}
