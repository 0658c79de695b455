//! The [`Board`]: location arena, token index, and distance chart.
//!
//! The board owns every [`LocationState`] and is the only place token
//! positions change. Token moves are atomic: a token is removed from its
//! source and added to its destination in one call, so no token is ever
//! between locations.

use std::collections::BTreeMap;

use sleuth_types::{LocationId, Person, Room, Token, Weapon};
use tracing::{debug, info};

use crate::distance::{DistanceChart, Step};
use crate::draw::{RandomDraw, choose_uniformly};
use crate::error::BoardError;
use crate::layout::{build_locations, room_handle};
use crate::location::{LocationKind, LocationState};

/// The game board.
#[derive(Debug, Clone)]
pub struct Board {
    /// Location arena indexed by [`LocationId`].
    locations: Vec<LocationState>,
    /// Handle of each suspect's home space.
    homes: BTreeMap<Person, LocationId>,
    /// Where each placed token currently is.
    token_locations: BTreeMap<Token, LocationId>,
    /// Shortest-route oracle, fixed after construction.
    chart: DistanceChart,
}

impl Board {
    /// Build the fixed mansion and lay every suspect token on its home.
    ///
    /// Weapons start off the board; see [`Board::distribute_weapons`].
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] if the layout tables are inconsistent.
    pub fn new() -> Result<Self, BoardError> {
        let mut locations = build_locations()?;
        let chart = DistanceChart::build(&locations)?;

        let mut homes = BTreeMap::new();
        let mut token_locations = BTreeMap::new();
        for loc in &mut locations {
            if let LocationKind::Home { owner, .. } = loc.kind {
                // Initial laydown bypasses the home's occupancy rule.
                loc.occupants.insert(Token::Person(owner));
                homes.insert(owner, loc.id);
                token_locations.insert(Token::Person(owner), loc.id);
            }
        }

        info!(
            locations = locations.len(),
            chart_entries = chart.len(),
            "Board constructed"
        );

        Ok(Self {
            locations,
            homes,
            token_locations,
            chart,
        })
    }

    // ----- Lookup -----

    /// Borrow a location node.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::LocationNotFound`] for an unknown handle.
    pub fn location(&self, id: LocationId) -> Result<&LocationState, BoardError> {
        self.locations
            .get(id.index())
            .ok_or(BoardError::LocationNotFound(id))
    }

    fn location_mut(&mut self, id: LocationId) -> Result<&mut LocationState, BoardError> {
        self.locations
            .get_mut(id.index())
            .ok_or(BoardError::LocationNotFound(id))
    }

    /// All location nodes, indexed by handle.
    pub fn locations(&self) -> &[LocationState] {
        &self.locations
    }

    /// Handle of a room.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::RoomNotFound`] if the arena lacks the room.
    pub fn room_location(&self, room: Room) -> Result<LocationId, BoardError> {
        let id = room_handle(room);
        match self.location(id)?.room() {
            Some(found) if found == room => Ok(id),
            _ => Err(BoardError::RoomNotFound(room)),
        }
    }

    /// Handle of a suspect's home space.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TokenNotPlaced`] if the suspect has no home.
    pub fn home_location(&self, person: Person) -> Result<LocationId, BoardError> {
        self.homes
            .get(&person)
            .copied()
            .ok_or(BoardError::TokenNotPlaced(Token::Person(person)))
    }

    /// Current location of a token.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TokenNotPlaced`] if the token is off the board.
    pub fn location_of(&self, token: Token) -> Result<LocationId, BoardError> {
        self.token_locations
            .get(&token)
            .copied()
            .ok_or(BoardError::TokenNotPlaced(token))
    }

    /// The room a token is in, or `None` if it is in a hallway or home.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TokenNotPlaced`] if the token is off the board.
    pub fn room_of(&self, token: Token) -> Result<Option<Room>, BoardError> {
        let id = self.location_of(token)?;
        Ok(self.location(id)?.room())
    }

    /// The distance chart.
    pub const fn chart(&self) -> &DistanceChart {
        &self.chart
    }

    // ----- Token placement -----

    /// Move a token to `destination` in one atomic transfer.
    ///
    /// Tokens not yet on the board are placed directly.
    ///
    /// # Errors
    ///
    /// - [`BoardError::AlreadyAtDestination`] if the token is already there
    /// - [`BoardError::AtCapacity`] if the destination refuses the token
    /// - [`BoardError::LocationNotFound`] for an unknown handle
    pub fn place_token(&mut self, token: Token, destination: LocationId) -> Result<(), BoardError> {
        let source = self.token_locations.get(&token).copied();
        if source == Some(destination) {
            return Err(BoardError::AlreadyAtDestination {
                token,
                location: destination,
            });
        }

        self.location_mut(destination)?.add_occupant(token)?;
        if let Some(from) = source {
            self.location_mut(from)?.remove_occupant(token);
        }
        self.token_locations.insert(token, destination);

        debug!(
            token = %token,
            from = ?source,
            to = %destination,
            "Token placed"
        );
        Ok(())
    }

    /// Remove a token from a location's occupant set.
    ///
    /// Removing a token that is not present is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::LocationNotFound`] for an unknown handle.
    pub fn vacate(&mut self, location: LocationId, token: Token) -> Result<(), BoardError> {
        let removed = self.location_mut(location)?.remove_occupant(token);
        if removed && self.token_locations.get(&token) == Some(&location) {
            self.token_locations.remove(&token);
        }
        Ok(())
    }

    /// Pull a token into a room, as a suggestion does.
    ///
    /// Returns `false` without error if the token was already there.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] if the room is unknown.
    pub fn relocate_to_room(&mut self, token: Token, room: Room) -> Result<bool, BoardError> {
        let destination = self.room_location(room)?;
        if self.token_locations.get(&token) == Some(&destination) {
            return Ok(false);
        }
        self.place_token(token, destination)?;
        Ok(true)
    }

    /// Put each weapon in a distinct, uniformly chosen room.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] if a draw or placement fails.
    pub fn distribute_weapons(&mut self, draw: &mut dyn RandomDraw) -> Result<(), BoardError> {
        let mut free_rooms: Vec<Room> = Room::ALL.to_vec();
        for weapon in Weapon::ALL {
            let room = choose_uniformly(draw, &free_rooms)?;
            free_rooms.retain(|r| *r != room);
            self.relocate_to_room(Token::Weapon(weapon), room)?;
            info!(weapon = %weapon, room = %room, "Weapon placed");
        }
        Ok(())
    }

    // ----- Movement -----

    /// Locations reachable in one step from `origin`, given current
    /// occupancy.
    ///
    /// - Room: unoccupied adjacent hallways, plus the secret-passage room
    ///   (never blocked)
    /// - Hallway: both connected rooms
    /// - Home: its single hallway, unless occupied
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::LocationNotFound`] for an unknown handle.
    pub fn move_options(&self, origin: LocationId) -> Result<Vec<LocationId>, BoardError> {
        let options = match &self.location(origin)?.kind {
            LocationKind::Room {
                hallways,
                secret_passage,
                ..
            } => {
                let mut open = Vec::with_capacity(hallways.len().saturating_add(1));
                for hallway in hallways {
                    if !self.location(*hallway)?.is_occupied() {
                        open.push(*hallway);
                    }
                }
                open.extend(*secret_passage);
                open
            }
            LocationKind::Hallway { ends } => vec![ends.0, ends.1],
            LocationKind::Home { hallway, .. } => {
                if self.location(*hallway)?.is_occupied() {
                    Vec::new()
                } else {
                    vec![*hallway]
                }
            }
        };
        Ok(options)
    }

    /// Shortest-route entry from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::MissingDistance`] if the chart lacks the pair.
    pub fn shortest_step(&self, origin: LocationId, destination: Room) -> Result<Step, BoardError> {
        self.chart.step(origin, destination)
    }

    // ----- Invariant checks -----

    /// Check round-trip consistency between token positions and occupant
    /// sets, and the capacity of hallways and homes.
    ///
    /// # Errors
    ///
    /// - [`BoardError::OccupancyMismatch`] if the two views disagree, or a
    ///   home holds anyone but its owner
    /// - [`BoardError::OverCapacity`] if a hallway or home is overfull
    pub fn verify_occupancy(&self) -> Result<(), BoardError> {
        for (&token, &id) in &self.token_locations {
            if !self.location(id)?.contains(token) {
                return Err(BoardError::OccupancyMismatch {
                    token,
                    location: id,
                });
            }
        }

        for loc in &self.locations {
            for &token in &loc.occupants {
                if self.token_locations.get(&token) != Some(&loc.id) {
                    return Err(BoardError::OccupancyMismatch {
                        token,
                        location: loc.id,
                    });
                }
            }
            if loc.capacity().is_some_and(|cap| loc.occupants.len() > cap) {
                return Err(BoardError::OverCapacity {
                    location: loc.id,
                    occupants: loc.occupants.len(),
                });
            }
            if let LocationKind::Home { owner, .. } = loc.kind {
                let stranger = loc
                    .occupants
                    .iter()
                    .find(|t| **t != Token::Person(owner))
                    .copied();
                if let Some(token) = stranger {
                    return Err(BoardError::OccupancyMismatch {
                        token,
                        location: loc.id,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use sleuth_types::ErrorKind;

    use super::*;
    use crate::draw::{MidpointDraw, SeededDraw};

    const GREEN: Token = Token::Person(Person::MrGreen);
    const PEACOCK: Token = Token::Person(Person::MrsPeacock);

    fn hallway_between(board: &Board, a: Room, b: Room) -> LocationId {
        let a = board.room_location(a).unwrap();
        let b = board.room_location(b).unwrap();
        board
            .locations()
            .iter()
            .find(|l| {
                matches!(l.kind, LocationKind::Hallway { ends } if ends == (a, b) || ends == (b, a))
            })
            .unwrap()
            .id
    }

    #[test]
    fn suspects_start_at_home() {
        let board = Board::new().unwrap();
        for person in Person::ALL {
            let home = board.home_location(person).unwrap();
            assert_eq!(board.location_of(Token::Person(person)).unwrap(), home);
            assert_eq!(board.move_options(home).unwrap().len(), 1);
        }
        board.verify_occupancy().unwrap();
    }

    #[test]
    fn home_never_reaccepts_its_owner() {
        let mut board = Board::new().unwrap();
        let home = board.home_location(Person::MrGreen).unwrap();
        let exit = board.move_options(home).unwrap()[0];
        board.place_token(GREEN, exit).unwrap();
        let err = board.place_token(GREEN, home).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Capacity);
        assert_eq!(board.location_of(GREEN).unwrap(), exit);
        board.verify_occupancy().unwrap();
    }

    #[test]
    fn hallway_capacity_is_one() {
        let mut board = Board::new().unwrap();
        let hallway = hallway_between(&board, Room::BilliardRoom, Room::Ballroom);
        board.place_token(GREEN, hallway).unwrap();
        let err = board.place_token(PEACOCK, hallway).unwrap_err();
        assert!(matches!(err, BoardError::AtCapacity { .. }));
        // The refused token stays where it was.
        assert_eq!(
            board.location_of(PEACOCK).unwrap(),
            board.home_location(Person::MrsPeacock).unwrap()
        );
    }

    #[test]
    fn placing_onto_current_location_is_an_error() {
        let mut board = Board::new().unwrap();
        let study = board.room_location(Room::Study).unwrap();
        board.place_token(GREEN, study).unwrap();
        let err = board.place_token(GREEN, study).unwrap_err();
        assert!(matches!(err, BoardError::AlreadyAtDestination { .. }));
        assert_eq!(err.kind(), ErrorKind::InconsistentData);
    }

    #[test]
    fn room_options_skip_occupied_hallways_but_not_secret_passage() {
        let mut board = Board::new().unwrap();
        let study = board.room_location(Room::Study).unwrap();
        let kitchen = board.room_location(Room::Kitchen).unwrap();
        let to_hall = hallway_between(&board, Room::Study, Room::Hall);
        let to_library = hallway_between(&board, Room::Study, Room::Library);

        let options = board.move_options(study).unwrap();
        assert_eq!(options, vec![to_hall, to_library, kitchen]);

        board.place_token(GREEN, to_hall).unwrap();
        board.place_token(PEACOCK, to_library).unwrap();
        assert_eq!(board.move_options(study).unwrap(), vec![kitchen]);
    }

    #[test]
    fn home_exit_blocked_by_occupied_hallway() {
        let mut board = Board::new().unwrap();
        let home = board.home_location(Person::MrsPeacock).unwrap();
        let exit = hallway_between(&board, Room::Library, Room::Conservatory);
        board.place_token(GREEN, exit).unwrap();
        assert!(board.move_options(home).unwrap().is_empty());
    }

    #[test]
    fn hallway_options_are_both_rooms_regardless_of_occupancy() {
        let mut board = Board::new().unwrap();
        let hallway = hallway_between(&board, Room::Hall, Room::Lounge);
        let hall = board.room_location(Room::Hall).unwrap();
        let lounge = board.room_location(Room::Lounge).unwrap();
        board.place_token(GREEN, hall).unwrap();
        board.place_token(PEACOCK, lounge).unwrap();
        let options = board.move_options(hallway).unwrap();
        assert_eq!(options, vec![hall, lounge]);
    }

    #[test]
    fn relocate_reports_whether_token_moved() {
        let mut board = Board::new().unwrap();
        assert!(board.relocate_to_room(GREEN, Room::Hall).unwrap());
        assert!(!board.relocate_to_room(GREEN, Room::Hall).unwrap());
        assert_eq!(board.room_of(GREEN).unwrap(), Some(Room::Hall));
    }

    #[test]
    fn vacate_absent_token_is_a_no_op() {
        let mut board = Board::new().unwrap();
        let hall = board.room_location(Room::Hall).unwrap();
        board.vacate(hall, GREEN).unwrap();
        assert!(board.location_of(GREEN).is_ok());
        board.verify_occupancy().unwrap();
    }

    #[test]
    fn weapons_land_in_distinct_rooms() {
        for mut board in [Board::new().unwrap(), Board::new().unwrap()] {
            board.distribute_weapons(&mut MidpointDraw).unwrap();
            let mut rooms: Vec<Room> = Weapon::ALL
                .iter()
                .map(|w| board.room_of(Token::Weapon(*w)).unwrap().unwrap())
                .collect();
            rooms.sort_unstable();
            rooms.dedup();
            assert_eq!(rooms.len(), Weapon::ALL.len());
            board.verify_occupancy().unwrap();
        }
    }

    #[test]
    fn random_walk_preserves_occupancy_invariants() {
        let mut board = Board::new().unwrap();
        let mut draw = SeededDraw::new(11);
        board.distribute_weapons(&mut draw).unwrap();

        for _ in 0..500 {
            for person in Person::ALL {
                let token = Token::Person(person);
                let here = board.location_of(token).unwrap();
                let options: Vec<LocationId> = board
                    .move_options(here)
                    .unwrap()
                    .into_iter()
                    .filter(|id| board.location(*id).unwrap().can_accept_another_occupant())
                    .collect();
                if options.is_empty() {
                    continue;
                }
                let next = choose_uniformly(&mut draw, &options).unwrap();
                board.place_token(token, next).unwrap();
            }
            board.verify_occupancy().unwrap();
        }
    }
}
