//! Cards and solution triples.
//!
//! A [`Card`] is a tagged union over the three categories, so equality
//! compares the category first and the identifier second. A
//! [`SolutionCardSet`] is the `(person, weapon, room)` triple used for the
//! case file, suggestions, and accusations.

use serde::{Deserialize, Serialize};

use crate::enums::{CardKind, Person, Room, Weapon};
use crate::error::TypesError;

/// One of the 21 cards in the deck.
///
/// Ordering is category first (persons, then weapons, then rooms), then
/// enumeration order within the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Card {
    /// A suspect card.
    Person(Person),
    /// A weapon card.
    Weapon(Weapon),
    /// A room card.
    Room(Room),
}

impl Card {
    /// Number of cards in a full deck.
    pub const DECK_SIZE: usize = 21;

    /// The category this card belongs to.
    pub const fn kind(self) -> CardKind {
        match self {
            Self::Person(_) => CardKind::Person,
            Self::Weapon(_) => CardKind::Weapon,
            Self::Room(_) => CardKind::Room,
        }
    }

    /// Human-readable name of the card.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Person(p) => p.display_name(),
            Self::Weapon(w) => w.display_name(),
            Self::Room(r) => r.display_name(),
        }
    }

    /// Every card of one category, in enumeration order.
    pub fn of_kind(kind: CardKind) -> Vec<Self> {
        match kind {
            CardKind::Person => Person::ALL.iter().copied().map(Self::Person).collect(),
            CardKind::Weapon => Weapon::ALL.iter().copied().map(Self::Weapon).collect(),
            CardKind::Room => Room::ALL.iter().copied().map(Self::Room).collect(),
        }
    }

    /// The full deck in card order.
    pub fn full_deck() -> Vec<Self> {
        CardKind::ALL
            .iter()
            .flat_map(|kind| Self::of_kind(*kind))
            .collect()
    }
}

impl core::fmt::Display for Card {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl From<Person> for Card {
    fn from(p: Person) -> Self {
        Self::Person(p)
    }
}

impl From<Weapon> for Card {
    fn from(w: Weapon) -> Self {
        Self::Weapon(w)
    }
}

impl From<Room> for Card {
    fn from(r: Room) -> Self {
        Self::Room(r)
    }
}

impl TryFrom<Card> for Person {
    type Error = TypesError;

    fn try_from(card: Card) -> Result<Self, Self::Error> {
        match card {
            Card::Person(p) => Ok(p),
            other => Err(TypesError::CardKindMismatch {
                expected: CardKind::Person,
                found: other.kind(),
            }),
        }
    }
}

impl TryFrom<Card> for Weapon {
    type Error = TypesError;

    fn try_from(card: Card) -> Result<Self, Self::Error> {
        match card {
            Card::Weapon(w) => Ok(w),
            other => Err(TypesError::CardKindMismatch {
                expected: CardKind::Weapon,
                found: other.kind(),
            }),
        }
    }
}

impl TryFrom<Card> for Room {
    type Error = TypesError;

    fn try_from(card: Card) -> Result<Self, Self::Error> {
        match card {
            Card::Room(r) => Ok(r),
            other => Err(TypesError::CardKindMismatch {
                expected: CardKind::Room,
                found: other.kind(),
            }),
        }
    }
}

/// An ordered `(person, weapon, room)` triple.
///
/// Used for the hidden case file as well as for suggestions and
/// accusations. Two sets are equal iff all three components match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SolutionCardSet {
    /// The suspect.
    pub person: Person,
    /// The weapon.
    pub weapon: Weapon,
    /// The room.
    pub room: Room,
}

impl SolutionCardSet {
    /// Build a triple from its components.
    pub const fn new(person: Person, weapon: Weapon, room: Room) -> Self {
        Self {
            person,
            weapon,
            room,
        }
    }

    /// Build a triple from three cards, checking each card's category.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::CardKindMismatch`] if a card is in the wrong slot.
    pub fn try_from_cards(person: Card, weapon: Card, room: Card) -> Result<Self, TypesError> {
        Ok(Self {
            person: Person::try_from(person)?,
            weapon: Weapon::try_from(weapon)?,
            room: Room::try_from(room)?,
        })
    }

    /// Whether a single card is one of the three components.
    pub fn matches(&self, card: Card) -> bool {
        match card {
            Card::Person(p) => p == self.person,
            Card::Weapon(w) => w == self.weapon,
            Card::Room(r) => r == self.room,
        }
    }

    /// The three components as cards, in category order.
    pub const fn cards(&self) -> [Card; 3] {
        [
            Card::Person(self.person),
            Card::Weapon(self.weapon),
            Card::Room(self.room),
        ]
    }
}

impl core::fmt::Display for SolutionCardSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} with the {} in the {}",
            self.person, self.weapon, self.room
        )
    }
}
