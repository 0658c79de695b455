//! Type-safe identifier wrappers.
//!
//! Agents and games carry UUID v7 (time-ordered) identifiers so event logs
//! from several runs can be merged and sorted. Locations are addressed by a
//! small integer handle into the board's location arena instead: the board
//! topology is fixed, and every cross-reference between locations is a
//! non-owning [`LocationId`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an automated player.
    AgentId
}

define_id! {
    /// Unique identifier for one simulated game.
    GameId
}

/// Handle of a location node in the board's location arena.
///
/// Handles are assigned once when the board is built and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocationId(pub u16);

impl LocationId {
    /// Wrap a raw arena index.
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Return the arena index as a `usize` for slice access.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl core::fmt::Display for LocationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "loc-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_ids_are_unique() {
        let first = AgentId::new();
        let second = AgentId::new();
        assert_ne!(first, second);
        assert_eq!(first.into_inner().get_version_num(), 7);
    }

    #[test]
    fn game_id_round_trips_through_uuid() {
        let id = GameId::new();
        let raw: Uuid = id.into();
        assert_eq!(GameId::from(raw), id);
        assert_eq!(id.into_inner(), raw);
    }

    #[test]
    fn location_id_display_and_index() {
        let id = LocationId::new(14);
        assert_eq!(id.index(), 14);
        assert_eq!(id.to_string(), "loc-14");
    }
}
