//! The fixed mansion layout: 9 rooms, 12 hallways, 2 secret passages,
//! and 6 home spaces.
//!
//! Arena handles are assigned in a fixed order: rooms first (in
//! [`Room::ALL`] order), then hallways (in [`HALLWAYS`] order), then homes
//! (in [`HOMES`] order).
//!
//! ```text
//!   Study ---- Hall ---- Lounge
//!     |         |          |
//!   Library - Billiard - Dining
//!     |         |          |
//!   Conserv - Ballroom - Kitchen
//! ```
//!
//! Secret passages join the opposite corners: Study/Kitchen and
//! Lounge/Conservatory.

use std::collections::BTreeMap;

use sleuth_types::{LocationId, Person, Room};

use crate::error::BoardError;
use crate::location::{LocationKind, LocationState};

/// Every hallway, as the pair of rooms it connects.
pub const HALLWAYS: [(Room, Room); 12] = [
    (Room::Study, Room::Hall),
    (Room::Hall, Room::Lounge),
    (Room::Study, Room::Library),
    (Room::Hall, Room::BilliardRoom),
    (Room::Lounge, Room::DiningRoom),
    (Room::Library, Room::BilliardRoom),
    (Room::BilliardRoom, Room::DiningRoom),
    (Room::Library, Room::Conservatory),
    (Room::BilliardRoom, Room::Ballroom),
    (Room::DiningRoom, Room::Kitchen),
    (Room::Conservatory, Room::Ballroom),
    (Room::Ballroom, Room::Kitchen),
];

/// The two secret passages. Each is wired in both directions.
pub const SECRET_PASSAGES: [(Room, Room); 2] = [
    (Room::Study, Room::Kitchen),
    (Room::Lounge, Room::Conservatory),
];

/// Each suspect's home space and the hallway it opens onto.
pub const HOMES: [(Person, (Room, Room)); 6] = [
    (Person::MissScarlet, (Room::Hall, Room::Lounge)),
    (Person::ProfessorPlum, (Room::Study, Room::Library)),
    (Person::ColonelMustard, (Room::Lounge, Room::DiningRoom)),
    (Person::MrsPeacock, (Room::Library, Room::Conservatory)),
    (Person::MrGreen, (Room::Conservatory, Room::Ballroom)),
    (Person::MrsWhite, (Room::Ballroom, Room::Kitchen)),
];

/// Total number of location nodes on the board.
pub const LOCATION_COUNT: usize = 27;

/// Minimum number of hallways adjacent to any room.
pub const MIN_ROOM_HALLWAYS: usize = 2;

/// Handle offset of the first hallway.
const HALLWAY_BASE: u16 = 9;

/// Handle offset of the first home.
const HOME_BASE: u16 = 21;

/// Arena handle of a room.
pub const fn room_handle(room: Room) -> LocationId {
    LocationId::new(room.ordinal())
}

/// Compute `base + index` as a handle.
fn offset_handle(base: u16, index: usize) -> Result<LocationId, BoardError> {
    u16::try_from(index)
        .ok()
        .and_then(|i| base.checked_add(i))
        .map(LocationId::new)
        .ok_or(BoardError::ArithmeticOverflow)
}

/// Find the hallway connecting two rooms, in either orientation.
fn hallway_between(a: Room, b: Room) -> Result<LocationId, BoardError> {
    let index = HALLWAYS
        .iter()
        .position(|&(x, y)| (x, y) == (a, b) || (x, y) == (b, a))
        .ok_or(BoardError::RoomNotFound(b))?;
    offset_handle(HALLWAY_BASE, index)
}

/// Build every location node of the mansion, indexed by handle.
///
/// # Errors
///
/// Returns [`BoardError::SelfConnectedHallway`] or
/// [`BoardError::TooFewHallways`] if the layout tables violate the graph
/// invariants.
pub fn build_locations() -> Result<Vec<LocationState>, BoardError> {
    let mut room_hallways: BTreeMap<Room, Vec<LocationId>> = BTreeMap::new();
    let mut hallways = Vec::with_capacity(HALLWAYS.len());

    for (i, &(a, b)) in HALLWAYS.iter().enumerate() {
        if a == b {
            return Err(BoardError::SelfConnectedHallway(a));
        }
        let id = offset_handle(HALLWAY_BASE, i)?;
        room_hallways.entry(a).or_default().push(id);
        room_hallways.entry(b).or_default().push(id);
        hallways.push(LocationState::new(
            id,
            format!("hallway between {a} and {b}"),
            LocationKind::Hallway {
                ends: (room_handle(a), room_handle(b)),
            },
        ));
    }

    let mut secret: BTreeMap<Room, LocationId> = BTreeMap::new();
    for &(a, b) in &SECRET_PASSAGES {
        secret.insert(a, room_handle(b));
        secret.insert(b, room_handle(a));
    }

    let mut locations = Vec::with_capacity(LOCATION_COUNT);
    for room in Room::ALL {
        let mut adjacent = room_hallways.remove(&room).unwrap_or_default();
        if adjacent.len() < MIN_ROOM_HALLWAYS {
            return Err(BoardError::TooFewHallways {
                room,
                count: adjacent.len(),
            });
        }
        adjacent.sort_unstable();
        locations.push(LocationState::new(
            room_handle(room),
            room.display_name().to_string(),
            LocationKind::Room {
                room,
                hallways: adjacent,
                secret_passage: secret.get(&room).copied(),
            },
        ));
    }

    locations.extend(hallways);

    for (i, &(owner, (a, b))) in HOMES.iter().enumerate() {
        locations.push(LocationState::new(
            offset_handle(HOME_BASE, i)?,
            format!("{owner}'s home"),
            LocationKind::Home {
                owner,
                hallway: hallway_between(a, b)?,
            },
        ));
    }

    Ok(locations)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn arena_has_27_nodes_in_handle_order() {
        let locations = build_locations().unwrap();
        assert_eq!(locations.len(), LOCATION_COUNT);
        for (i, loc) in locations.iter().enumerate() {
            assert_eq!(loc.id.index(), i);
        }
        assert_eq!(locations.iter().filter(|l| l.is_room()).count(), 9);
    }

    #[test]
    fn every_room_has_two_to_four_hallways() {
        for loc in build_locations().unwrap() {
            if let LocationKind::Room { hallways, .. } = &loc.kind {
                assert!((2..=4).contains(&hallways.len()), "{}", loc.name);
            }
        }
    }

    #[test]
    fn hallways_join_distinct_rooms() {
        let locations = build_locations().unwrap();
        for loc in &locations {
            if let LocationKind::Hallway { ends } = loc.kind {
                assert_ne!(ends.0, ends.1);
                assert!(locations[ends.0.index()].is_room());
                assert!(locations[ends.1.index()].is_room());
            }
        }
    }

    #[test]
    fn secret_passages_are_wired_both_ways() {
        let locations = build_locations().unwrap();
        let study = &locations[room_handle(Room::Study).index()];
        let kitchen = &locations[room_handle(Room::Kitchen).index()];
        assert!(matches!(
            study.kind,
            LocationKind::Room { secret_passage: Some(id), .. } if id == kitchen.id
        ));
        assert!(matches!(
            kitchen.kind,
            LocationKind::Room { secret_passage: Some(id), .. } if id == study.id
        ));
        let hall = &locations[room_handle(Room::Hall).index()];
        assert!(matches!(
            hall.kind,
            LocationKind::Room {
                secret_passage: None,
                ..
            }
        ));
    }

    #[test]
    fn each_suspect_has_one_home_on_a_distinct_hallway() {
        let locations = build_locations().unwrap();
        let mut owners = BTreeSet::new();
        let mut hallways = BTreeSet::new();
        for loc in &locations {
            if let LocationKind::Home { owner, hallway } = loc.kind {
                owners.insert(owner);
                hallways.insert(hallway);
                assert!(matches!(
                    locations[hallway.index()].kind,
                    LocationKind::Hallway { .. }
                ));
            }
        }
        assert_eq!(owners.len(), 6);
        assert_eq!(hallways.len(), 6);
    }
}
