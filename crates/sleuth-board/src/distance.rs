//! Precomputed shortest-path oracle.
//!
//! The [`DistanceChart`] maps `(origin location, destination room)` to a
//! [`Step`]: the hop count of a shortest route and the adjacent location a
//! mover should step to next. Every room-hallway traversal and every
//! secret-passage traversal costs one hop. Occupancy is ignored; the chart
//! is a property of the topology alone and never changes after the board
//! is built.
//!
//! Standing in the destination room and needing to leave and re-enter is
//! recorded as a 2-hop entry whose next hop is the lowest-handle
//! neighbour.
//!
//! When several neighbours lie on a shortest route, the one with the
//! lowest [`LocationId`] is chosen so agent behaviour is reproducible.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};
use sleuth_types::{LocationId, Room};

use crate::error::BoardError;
use crate::layout::room_handle;
use crate::location::LocationState;

/// Hop count assigned to leaving a room and walking straight back in.
pub const REENTRY_HOPS: u32 = 2;

/// One chart entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Length of a shortest route, in hops.
    pub hops: u32,
    /// Adjacent location on some shortest route.
    pub next: LocationId,
}

/// Shortest-route table for every origin and every destination room.
#[derive(Debug, Clone, Default)]
pub struct DistanceChart {
    entries: BTreeMap<(LocationId, Room), Step>,
}

impl DistanceChart {
    /// Build the chart by breadth-first search over the location arena.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::MissingDistance`] if some room is unreachable
    /// from some origin, which would mean the layout is disconnected.
    pub fn build(locations: &[LocationState]) -> Result<Self, BoardError> {
        let mut reach: BTreeMap<LocationId, BTreeMap<LocationId, u32>> = BTreeMap::new();
        for loc in locations {
            reach.insert(loc.id, breadth_first(locations, loc.id)?);
        }

        let mut entries = BTreeMap::new();
        for loc in locations {
            let mut neighbors = loc.neighbors();
            neighbors.sort_unstable();

            for room in Room::ALL {
                let target = room_handle(room);
                let missing = BoardError::MissingDistance {
                    origin: loc.id,
                    destination: room,
                };

                let step = if loc.id == target {
                    let next = neighbors.first().copied().ok_or(missing)?;
                    Step {
                        hops: REENTRY_HOPS,
                        next,
                    }
                } else {
                    let hops = reach
                        .get(&loc.id)
                        .and_then(|d| d.get(&target))
                        .copied()
                        .ok_or(missing)?;
                    let before = hops
                        .checked_sub(1)
                        .ok_or(BoardError::ArithmeticOverflow)?;
                    let next = neighbors
                        .iter()
                        .copied()
                        .find(|n| {
                            reach.get(n).and_then(|d| d.get(&target)).copied() == Some(before)
                        })
                        .ok_or(BoardError::MissingDistance {
                            origin: loc.id,
                            destination: room,
                        })?;
                    Step { hops, next }
                };
                entries.insert((loc.id, room), step);
            }
        }

        Ok(Self { entries })
    }

    /// Look up the entry for an origin and destination room.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::MissingDistance`] if the pair is absent.
    pub fn step(&self, origin: LocationId, destination: Room) -> Result<Step, BoardError> {
        self.entries
            .get(&(origin, destination))
            .copied()
            .ok_or(BoardError::MissingDistance {
                origin,
                destination,
            })
    }

    /// Number of entries in the chart.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the chart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Hop distance from `origin` to every reachable location.
fn breadth_first(
    locations: &[LocationState],
    origin: LocationId,
) -> Result<BTreeMap<LocationId, u32>, BoardError> {
    let mut dist = BTreeMap::new();
    let mut queue = VecDeque::new();
    dist.insert(origin, 0_u32);
    queue.push_back(origin);

    while let Some(current) = queue.pop_front() {
        let here = dist.get(&current).copied().unwrap_or_default();
        let node = locations
            .get(current.index())
            .ok_or(BoardError::LocationNotFound(current))?;
        for next in node.neighbors() {
            if dist.contains_key(&next) {
                continue;
            }
            let hops = here.checked_add(1).ok_or(BoardError::ArithmeticOverflow)?;
            dist.insert(next, hops);
            queue.push_back(next);
        }
    }

    Ok(dist)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::layout::{LOCATION_COUNT, build_locations};
    use crate::location::LocationKind;

    fn chart() -> (Vec<LocationState>, DistanceChart) {
        let locations = build_locations().unwrap();
        let chart = DistanceChart::build(&locations).unwrap();
        (locations, chart)
    }

    fn hops(chart: &DistanceChart, from: Room, to: Room) -> u32 {
        chart.step(room_handle(from), to).unwrap().hops
    }

    #[test]
    fn chart_covers_every_origin_and_room() {
        let (_, chart) = chart();
        assert_eq!(chart.len(), LOCATION_COUNT * Room::ALL.len());
        assert!(!chart.is_empty());
    }

    /// Hops between every pair of rooms, rows and columns in
    /// [`Room::ALL`] order. The diagonal is the leave-and-return cost.
    const ROOM_HOPS: [[u32; 9]; 9] = [
        // Stu Hal Lou Lib Bil Din Con Bal Kit
        [2, 2, 4, 2, 4, 3, 4, 3, 1], // Study
        [2, 2, 2, 4, 2, 4, 3, 4, 3], // Hall
        [4, 2, 2, 3, 4, 2, 1, 3, 4], // Lounge
        [2, 4, 3, 2, 2, 4, 2, 4, 3], // Library
        [4, 2, 4, 2, 2, 2, 4, 2, 4], // Billiard Room
        [3, 4, 2, 4, 2, 2, 3, 4, 2], // Dining Room
        [4, 3, 1, 2, 4, 3, 2, 2, 4], // Conservatory
        [3, 4, 3, 4, 2, 4, 2, 2, 2], // Ballroom
        [1, 3, 4, 3, 4, 2, 4, 2, 2], // Kitchen
    ];

    #[test]
    fn room_to_room_distances_match_board_diagram() {
        let (_, chart) = chart();
        for (from, row) in Room::ALL.into_iter().zip(ROOM_HOPS) {
            for (to, expected) in Room::ALL.into_iter().zip(row) {
                assert_eq!(hops(&chart, from, to), expected, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn room_to_itself_costs_reentry() {
        let (locations, chart) = chart();
        for room in Room::ALL {
            let step = chart.step(room_handle(room), room).unwrap();
            assert_eq!(step.hops, REENTRY_HOPS);
            assert!(locations[room_handle(room).index()]
                .neighbors()
                .contains(&step.next));
        }
    }

    #[test]
    fn secret_passages_never_lengthen_routes() {
        let (locations, chart) = chart();
        // Same layout with the passages removed.
        let mut plain = locations;
        for loc in &mut plain {
            if let LocationKind::Room { secret_passage, .. } = &mut loc.kind {
                *secret_passage = None;
            }
        }
        let without = DistanceChart::build(&plain).unwrap();

        for from in Room::ALL {
            for to in Room::ALL {
                let with = hops(&chart, from, to);
                let walk = hops(&without, from, to);
                assert!(with <= walk, "{from} -> {to}");
            }
        }
        assert!(hops(&chart, Room::Study, Room::Kitchen) < hops(&without, Room::Study, Room::Kitchen));
        assert!(
            hops(&chart, Room::Lounge, Room::Conservatory)
                < hops(&without, Room::Lounge, Room::Conservatory)
        );
    }

    #[test]
    fn next_hop_is_adjacent_and_one_closer() {
        let (locations, chart) = chart();
        for loc in &locations {
            for room in Room::ALL {
                let step = chart.step(loc.id, room).unwrap();
                assert!(loc.neighbors().contains(&step.next));
                if step.next != room_handle(room) && loc.id != room_handle(room) {
                    let after = chart.step(step.next, room).unwrap();
                    assert_eq!(after.hops + 1, step.hops);
                }
            }
        }
    }

    #[test]
    fn ties_break_to_lowest_handle() {
        let (locations, chart) = chart();
        // Hall to Library: via Study (hallway 9) or via Billiard Room
        // (hallway 12). Both are four hops.
        let hall = room_handle(Room::Hall);
        let step = chart.step(hall, Room::Library).unwrap();
        assert_eq!(step.hops, 4);
        let mut neighbors = locations[hall.index()].neighbors();
        neighbors.sort_unstable();
        assert_eq!(Some(&step.next), neighbors.first());
    }

    #[test]
    fn home_origins_route_through_their_hallway() {
        let (locations, chart) = chart();
        for loc in &locations {
            if let LocationKind::Home { hallway, .. } = loc.kind {
                for room in Room::ALL {
                    let step = chart.step(loc.id, room).unwrap();
                    assert_eq!(step.next, hallway);
                }
            }
        }
    }
}
