//! Enumeration types for the game vocabulary.
//!
//! - [`Person`], [`Weapon`], [`Room`] -- the 6/6/9 solution identifiers
//! - [`CardKind`] -- the three card categories and their sizes
//! - [`Token`] -- a movable piece on the board (suspect or weapon)
//! - [`TurnOption`] -- actions available to a player during a turn
//!
//! Variant declaration order is the enumeration order used whenever the
//! game needs "the first unknown identifier" of a category.

use serde::{Deserialize, Serialize};

/// A suspect character. Each suspect is both a card and a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Person {
    /// Miss Scarlet.
    MissScarlet,
    /// Colonel Mustard.
    ColonelMustard,
    /// Mrs. White.
    MrsWhite,
    /// Mr. Green.
    MrGreen,
    /// Mrs. Peacock.
    MrsPeacock,
    /// Professor Plum.
    ProfessorPlum,
}

impl Person {
    /// Every suspect in enumeration order.
    pub const ALL: [Self; 6] = [
        Self::MissScarlet,
        Self::ColonelMustard,
        Self::MrsWhite,
        Self::MrGreen,
        Self::MrsPeacock,
        Self::ProfessorPlum,
    ];

    /// Human-readable name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::MissScarlet => "Miss Scarlet",
            Self::ColonelMustard => "Colonel Mustard",
            Self::MrsWhite => "Mrs. White",
            Self::MrGreen => "Mr. Green",
            Self::MrsPeacock => "Mrs. Peacock",
            Self::ProfessorPlum => "Professor Plum",
        }
    }
}

/// A candidate murder weapon. Each weapon is both a card and a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weapon {
    /// The lead pipe.
    LeadPipe,
    /// The knife.
    Knife,
    /// The rope.
    Rope,
    /// The candlestick.
    Candlestick,
    /// The revolver.
    Revolver,
    /// The wrench.
    Wrench,
}

impl Weapon {
    /// Every weapon in enumeration order.
    pub const ALL: [Self; 6] = [
        Self::LeadPipe,
        Self::Knife,
        Self::Rope,
        Self::Candlestick,
        Self::Revolver,
        Self::Wrench,
    ];

    /// Human-readable name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::LeadPipe => "lead pipe",
            Self::Knife => "knife",
            Self::Rope => "rope",
            Self::Candlestick => "candlestick",
            Self::Revolver => "revolver",
            Self::Wrench => "wrench",
        }
    }
}

/// One of the nine rooms of the mansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Room {
    /// The study (north-west corner).
    Study,
    /// The hall.
    Hall,
    /// The lounge (north-east corner).
    Lounge,
    /// The library.
    Library,
    /// The billiard room (centre).
    BilliardRoom,
    /// The dining room.
    DiningRoom,
    /// The conservatory (south-west corner).
    Conservatory,
    /// The ballroom.
    Ballroom,
    /// The kitchen (south-east corner).
    Kitchen,
}

impl Room {
    /// Every room in enumeration order.
    pub const ALL: [Self; 9] = [
        Self::Study,
        Self::Hall,
        Self::Lounge,
        Self::Library,
        Self::BilliardRoom,
        Self::DiningRoom,
        Self::Conservatory,
        Self::Ballroom,
        Self::Kitchen,
    ];

    /// Human-readable name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Study => "study",
            Self::Hall => "hall",
            Self::Lounge => "lounge",
            Self::Library => "library",
            Self::BilliardRoom => "billiard room",
            Self::DiningRoom => "dining room",
            Self::Conservatory => "conservatory",
            Self::Ballroom => "ballroom",
            Self::Kitchen => "kitchen",
        }
    }

    /// Position of this room in [`Room::ALL`].
    pub const fn ordinal(self) -> u16 {
        self as u16
    }
}

/// The three card categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// Suspect cards.
    Person,
    /// Weapon cards.
    Weapon,
    /// Room cards.
    Room,
}

impl CardKind {
    /// Every category.
    pub const ALL: [Self; 3] = [Self::Person, Self::Weapon, Self::Room];

    /// Number of cards in this category.
    pub const fn size(self) -> usize {
        match self {
            Self::Person => Person::ALL.len(),
            Self::Weapon => Weapon::ALL.len(),
            Self::Room => Room::ALL.len(),
        }
    }
}

/// A movable piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Token {
    /// A suspect's token.
    Person(Person),
    /// A weapon's token.
    Weapon(Weapon),
}

impl Token {
    /// Human-readable name of the piece.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Person(p) => p.display_name(),
            Self::Weapon(w) => w.display_name(),
        }
    }
}

/// An action a player may choose during its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOption {
    /// End the turn without further action.
    DoNothing,
    /// Move one step along the board.
    Move,
    /// Suggest a suspect and weapon in the current room.
    MakeSuggestion,
    /// Accuse a full solution triple.
    MakeAccusation,
}

macro_rules! display_via_name {
    ($($ty:ty),+) => {
        $(
            impl core::fmt::Display for $ty {
                fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    f.write_str(self.display_name())
                }
            }
        )+
    };
}

display_via_name!(Person, Weapon, Room, Token);

impl core::fmt::Display for CardKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Person => "person",
            Self::Weapon => "weapon",
            Self::Room => "room",
        })
    }
}

impl core::fmt::Display for TurnOption {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::DoNothing => "do nothing else this turn",
            Self::Move => "move",
            Self::MakeSuggestion => "make a suggestion",
            Self::MakeAccusation => "make an accusation",
        })
    }
}
