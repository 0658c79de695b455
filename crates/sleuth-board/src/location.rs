//! Location nodes with occupant tracking.
//!
//! A [`LocationState`] is one node of the movement graph. The three node
//! variants share one struct and differ only in their [`LocationKind`],
//! which carries the variant's adjacency and decides its occupancy rule:
//!
//! - **Room** -- unbounded occupancy, 2-4 hallways, optional secret passage
//! - **Hallway** -- exactly one occupant, connects two distinct rooms
//! - **Home** -- a suspect's starting space; never accepts an occupant
//!   after the initial laydown
//!
//! Cross-references between nodes are [`LocationId`] handles into the
//! board's arena; only the board owns nodes.

use std::collections::BTreeSet;

use sleuth_types::{Card, LocationId, Person, Room, Token};

use crate::error::BoardError;

/// Variant-specific data of a location node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationKind {
    /// One of the nine rooms.
    Room {
        /// Which room this is.
        room: Room,
        /// Adjacent hallways, in ascending handle order.
        hallways: Vec<LocationId>,
        /// The room at the far end of this room's secret passage, if any.
        secret_passage: Option<LocationId>,
    },
    /// A single-occupant corridor between two rooms.
    Hallway {
        /// The two rooms this hallway connects.
        ends: (LocationId, LocationId),
    },
    /// A suspect's starting space.
    Home {
        /// The suspect who starts here.
        owner: Person,
        /// The single hallway reachable from here.
        hallway: LocationId,
    },
}

/// Mutable runtime state for a location in the movement graph.
#[derive(Debug, Clone)]
pub struct LocationState {
    /// Arena handle of this node.
    pub id: LocationId,
    /// Human-readable name.
    pub name: String,
    /// Variant and adjacency.
    pub kind: LocationKind,
    /// Tokens currently present.
    pub occupants: BTreeSet<Token>,
}

impl LocationState {
    /// Create an empty location node.
    pub const fn new(id: LocationId, name: String, kind: LocationKind) -> Self {
        Self {
            id,
            name,
            kind,
            occupants: BTreeSet::new(),
        }
    }

    /// Whether any token is present.
    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    /// Whether one more token may be placed here during play.
    pub fn can_accept_another_occupant(&self) -> bool {
        match self.kind {
            LocationKind::Room { .. } => true,
            LocationKind::Hallway { .. } => !self.is_occupied(),
            LocationKind::Home { .. } => false,
        }
    }

    /// Maximum number of tokens this node may ever hold, if bounded.
    pub const fn capacity(&self) -> Option<usize> {
        match self.kind {
            LocationKind::Room { .. } => None,
            LocationKind::Hallway { .. } | LocationKind::Home { .. } => Some(1),
        }
    }

    /// Add a token, respecting the occupancy rule.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::AtCapacity`] if the node cannot accept it.
    pub fn add_occupant(&mut self, token: Token) -> Result<(), BoardError> {
        if !self.can_accept_another_occupant() {
            return Err(BoardError::AtCapacity {
                location: self.id,
                token,
            });
        }
        self.occupants.insert(token);
        Ok(())
    }

    /// Remove a token. Returns whether it was present.
    pub fn remove_occupant(&mut self, token: Token) -> bool {
        self.occupants.remove(&token)
    }

    /// Whether a specific token is here.
    pub fn contains(&self, token: Token) -> bool {
        self.occupants.contains(&token)
    }

    /// The room identity, if this node is a room.
    pub const fn room(&self) -> Option<Room> {
        match self.kind {
            LocationKind::Room { room, .. } => Some(room),
            LocationKind::Hallway { .. } | LocationKind::Home { .. } => None,
        }
    }

    /// The room-identity card, if this node is a room.
    pub const fn room_card(&self) -> Option<Card> {
        match self.room() {
            Some(room) => Some(Card::Room(room)),
            None => None,
        }
    }

    /// Whether this node is a room.
    pub const fn is_room(&self) -> bool {
        matches!(self.kind, LocationKind::Room { .. })
    }

    /// Nodes reachable in one step, ignoring occupancy.
    ///
    /// Homes are never a neighbour of anything: a suspect can leave home but
    /// never return.
    pub fn neighbors(&self) -> Vec<LocationId> {
        match &self.kind {
            LocationKind::Room {
                hallways,
                secret_passage,
                ..
            } => hallways.iter().copied().chain(*secret_passage).collect(),
            LocationKind::Hallway { ends } => vec![ends.0, ends.1],
            LocationKind::Home { hallway, .. } => vec![*hallway],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sleuth_types::Weapon;

    use super::*;

    fn hallway() -> LocationState {
        LocationState::new(
            LocationId::new(9),
            "hallway".to_string(),
            LocationKind::Hallway {
                ends: (LocationId::new(0), LocationId::new(1)),
            },
        )
    }

    #[test]
    fn room_accepts_any_number_of_tokens() {
        let mut room = LocationState::new(
            LocationId::new(0),
            "study".to_string(),
            LocationKind::Room {
                room: Room::Study,
                hallways: vec![LocationId::new(9), LocationId::new(11)],
                secret_passage: Some(LocationId::new(8)),
            },
        );
        room.add_occupant(Token::Person(Person::MrGreen)).unwrap();
        room.add_occupant(Token::Weapon(Weapon::Rope)).unwrap();
        room.add_occupant(Token::Person(Person::MrsWhite)).unwrap();
        assert_eq!(room.occupants.len(), 3);
        assert!(room.can_accept_another_occupant());
        assert_eq!(room.room_card(), Some(Card::Room(Room::Study)));
        assert_eq!(room.neighbors().len(), 3);
    }

    #[test]
    fn hallway_holds_one_token() {
        let mut hall = hallway();
        hall.add_occupant(Token::Person(Person::MrGreen)).unwrap();
        let err = hall
            .add_occupant(Token::Person(Person::MrsPeacock))
            .unwrap_err();
        assert!(matches!(err, BoardError::AtCapacity { .. }));
        assert!(hall.room_card().is_none());
    }

    #[test]
    fn home_never_accepts() {
        let home = LocationState::new(
            LocationId::new(21),
            "home".to_string(),
            LocationKind::Home {
                owner: Person::MissScarlet,
                hallway: LocationId::new(10),
            },
        );
        assert!(!home.is_occupied());
        assert!(!home.can_accept_another_occupant());
        assert_eq!(home.neighbors(), vec![LocationId::new(10)]);
    }

    #[test]
    fn removing_absent_token_is_a_no_op() {
        let mut hall = hallway();
        assert!(!hall.remove_occupant(Token::Weapon(Weapon::Knife)));
        assert!(!hall.is_occupied());
    }
}
