//! Fixed hotel layout: rooms, floors, and corridor positions.
//!
//! Floors 1–9 carry 10 rooms each; floor 10 carries 7. Positions are 0-based
//! from the end of the corridor nearest the stairs and lift, and room numbers
//! are derived from floor and position (`floor * 100 + position + 1`).

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub const FLOOR_COUNT: u32 = 10;
pub const ROOMS_PER_FLOOR: u32 = 10;
pub const TOP_FLOOR_ROOMS: u32 = 7;
pub const TOTAL_ROOMS: usize = 97;

/// Booking status of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Free,
    Booked,
    /// Reserved state; never produced by the booking controls but always
    /// treated as unavailable.
    Blocked,
}

/// A single guest room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: u32,
    pub floor: u32,
    /// 0-based index from the stairs/lift end of the corridor.
    pub position: u32,
    pub status: RoomStatus,
}

impl Room {
    /// A free room at the given floor and position.
    pub fn new(floor: u32, position: u32) -> Self {
        Self {
            id: room_id(floor, position),
            floor,
            position,
            status: RoomStatus::Free,
        }
    }

    pub fn is_free(&self) -> bool {
        self.status == RoomStatus::Free
    }
}

/// Room number for a floor/position pair.
pub fn room_id(floor: u32, position: u32) -> u32 {
    floor * 100 + position + 1
}

/// Number of rooms on a floor (0 for floors outside the building).
pub fn rooms_on_floor(floor: u32) -> u32 {
    match floor {
        1..=9 => ROOMS_PER_FLOOR,
        10 => TOP_FLOOR_ROOMS,
        _ => 0,
    }
}

/// Build the full layout, every room free.
///
/// Rooms come out floor by floor, positions ascending, and each call returns
/// a fresh owned set.
pub fn build_rooms() -> Vec<Room> {
    let mut rooms = Vec::with_capacity(TOTAL_ROOMS);
    for floor in 1..=FLOOR_COUNT {
        for position in 0..rooms_on_floor(floor) {
            rooms.push(Room::new(floor, position));
        }
    }
    rooms
}

/// A layout invariant violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Total room count differs from the fixed layout.
    WrongRoomCount { expected: usize, found: usize },
    /// Two rooms share a number.
    DuplicateId(u32),
    /// Room sits on a floor the building does not have.
    FloorOutOfRange { id: u32, floor: u32 },
    /// Room number does not match its floor and position.
    IdMismatch { id: u32, floor: u32, position: u32 },
    /// Positions on a floor are not `0..n` without gaps or repeats.
    NonContiguousPositions { floor: u32 },
}

/// Check a room collection against the fixed layout, returning all errors found.
pub fn validate_layout(rooms: &[Room]) -> Vec<LayoutError> {
    let mut errors = Vec::new();

    if rooms.len() != TOTAL_ROOMS {
        errors.push(LayoutError::WrongRoomCount {
            expected: TOTAL_ROOMS,
            found: rooms.len(),
        });
    }

    let mut seen = HashSet::new();
    let mut by_floor: HashMap<u32, Vec<u32>> = HashMap::new();
    for r in rooms {
        if !seen.insert(r.id) {
            errors.push(LayoutError::DuplicateId(r.id));
        }
        if !(1..=FLOOR_COUNT).contains(&r.floor) {
            errors.push(LayoutError::FloorOutOfRange {
                id: r.id,
                floor: r.floor,
            });
            continue;
        }
        if r.id != room_id(r.floor, r.position) {
            errors.push(LayoutError::IdMismatch {
                id: r.id,
                floor: r.floor,
                position: r.position,
            });
        }
        by_floor.entry(r.floor).or_default().push(r.position);
    }

    let mut floors: Vec<_> = by_floor.into_iter().collect();
    floors.sort_by_key(|(floor, _)| *floor);
    for (floor, mut positions) in floors {
        positions.sort_unstable();
        let contiguous = positions
            .iter()
            .enumerate()
            .all(|(i, &p)| p == i as u32);
        if !contiguous {
            errors.push(LayoutError::NonContiguousPositions { floor });
        }
    }

    errors
}
