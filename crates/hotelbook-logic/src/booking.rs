//! Hotel state snapshots and the booking controls.
//!
//! `HotelState` owns the room collection. Every control takes a snapshot and
//! returns a new one, so a failed booking simply leaves the caller holding
//! the old state.
//!
//! Booking is allocate-then-apply on a single snapshot. Callers sharing one
//! state between several actors must serialize [`book`] calls themselves.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::allocator::{allocate_with, AllocationError, BookingResult};
use crate::config::AllocatorConfig;
use crate::layout::{build_rooms, Room, RoomStatus};

/// The hotel's rooms at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelState {
    rooms: Vec<Room>,
}

/// Room counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySummary {
    pub free: usize,
    pub booked: usize,
    pub blocked: usize,
}

impl OccupancySummary {
    fn add(&mut self, status: RoomStatus) {
        match status {
            RoomStatus::Free => self.free += 1,
            RoomStatus::Booked => self.booked += 1,
            RoomStatus::Blocked => self.blocked += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.free + self.booked + self.blocked
    }
}

/// Room counts by status for one floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorOccupancy {
    pub floor: u32,
    pub counts: OccupancySummary,
}

impl Default for HotelState {
    fn default() -> Self {
        Self::new()
    }
}

impl HotelState {
    /// Fresh hotel, every room free.
    pub fn new() -> Self {
        Self {
            rooms: build_rooms(),
        }
    }

    /// Wrap an arbitrary room collection. Order is kept as given.
    pub fn from_rooms(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: u32) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn free_count(&self) -> usize {
        self.rooms.iter().filter(|r| r.is_free()).count()
    }

    pub fn summary(&self) -> OccupancySummary {
        let mut summary = OccupancySummary::default();
        for r in &self.rooms {
            summary.add(r.status);
        }
        summary
    }

    /// Per-floor counts, floors ascending.
    pub fn floor_occupancy(&self) -> Vec<FloorOccupancy> {
        let mut floors: Vec<FloorOccupancy> = Vec::new();
        for r in &self.rooms {
            let idx = match floors.binary_search_by_key(&r.floor, |f| f.floor) {
                Ok(idx) => idx,
                Err(idx) => {
                    floors.insert(
                        idx,
                        FloorOccupancy {
                            floor: r.floor,
                            counts: OccupancySummary::default(),
                        },
                    );
                    idx
                }
            };
            floors[idx].counts.add(r.status);
        }
        floors
    }
}

/// Book `count` rooms with the default allocator configuration.
pub fn book(
    state: &HotelState,
    count: usize,
) -> Result<(HotelState, BookingResult), AllocationError> {
    book_with(state, count, &AllocatorConfig::default())
}

/// Book `count` rooms under `config`.
///
/// On success the returned snapshot has exactly the allocated rooms marked
/// booked; every other room is unchanged.
pub fn book_with(
    state: &HotelState,
    count: usize,
    config: &AllocatorConfig,
) -> Result<(HotelState, BookingResult), AllocationError> {
    let result = match allocate_with(&state.rooms, count, config) {
        Ok(result) => result,
        Err(e) => {
            log::warn!("Booking of {} rooms rejected: {}", count, e);
            return Err(e);
        }
    };

    let mut next = state.clone();
    for room in next.rooms.iter_mut() {
        if result.rooms.iter().any(|chosen| chosen.id == room.id) {
            room.status = RoomStatus::Booked;
        }
    }

    log::info!(
        "Booked rooms {:?} (travel time {}, {:?})",
        result.room_ids(),
        result.total_travel_time,
        result.placement
    );
    Ok((next, result))
}

/// Randomize occupancy: each non-blocked room is booked with probability
/// `occupancy_rate` (clamped to `0.0..=1.0`), otherwise freed.
pub fn randomize(state: &HotelState, occupancy_rate: f64, rng: &mut impl Rng) -> HotelState {
    let rate = if occupancy_rate.is_nan() {
        0.0
    } else {
        occupancy_rate.clamp(0.0, 1.0)
    };

    let mut next = state.clone();
    for room in next.rooms.iter_mut() {
        if room.status == RoomStatus::Blocked {
            continue;
        }
        room.status = if rng.gen_bool(rate) {
            RoomStatus::Booked
        } else {
            RoomStatus::Free
        };
    }

    let summary = next.summary();
    log::info!(
        "Randomized occupancy at {:.2}: {} booked, {} free",
        rate,
        summary.booked,
        summary.free
    );
    next
}

/// Rebuild the hotel with every room free.
pub fn reset() -> HotelState {
    log::info!("Hotel reset");
    HotelState::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::Placement;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_state_all_free() {
        let state = HotelState::new();
        assert_eq!(state.free_count(), 97);
        assert_eq!(
            state.summary(),
            OccupancySummary {
                free: 97,
                booked: 0,
                blocked: 0
            }
        );
    }

    #[test]
    fn test_book_marks_exactly_result() {
        let state = HotelState::new();
        let (next, result) = book(&state, 3).unwrap();
        assert_eq!(result.room_ids(), vec![101, 102, 103]);
        for r in next.rooms() {
            let expected = if result.room_ids().contains(&r.id) {
                RoomStatus::Booked
            } else {
                RoomStatus::Free
            };
            assert_eq!(r.status, expected, "room {}", r.id);
        }
        // Original snapshot untouched.
        assert_eq!(state.free_count(), 97);
    }

    #[test]
    fn test_successive_bookings() {
        let state = HotelState::new();
        let (state, first) = book(&state, 5).unwrap();
        let (state, second) = book(&state, 5).unwrap();
        assert_eq!(first.room_ids(), vec![101, 102, 103, 104, 105]);
        assert_eq!(second.room_ids(), vec![106, 107, 108, 109, 110]);
        let (_, third) = book(&state, 2).unwrap();
        assert_eq!(third.placement, Placement::SingleFloor { floor: 2 });
    }

    #[test]
    fn test_failed_booking_reports_reason() {
        let state = HotelState::new();
        let err = book(&state, 0).unwrap_err();
        assert_eq!(err.code(), "invalid_count");

        let mut rooms = build_rooms();
        for r in rooms.iter_mut().skip(1) {
            r.status = RoomStatus::Booked;
        }
        let state = HotelState::from_rooms(rooms);
        let err = book(&state, 2).unwrap_err();
        assert_eq!(err.code(), "insufficient_free_rooms");
        assert_eq!(state.free_count(), 1);
    }

    #[test]
    fn test_randomize_is_seeded() {
        let state = HotelState::new();
        let a = randomize(&state, 0.3, &mut StdRng::seed_from_u64(7));
        let b = randomize(&state, 0.3, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_eq!(a.rooms().len(), 97);
    }

    #[test]
    fn test_randomize_extremes() {
        let state = HotelState::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(randomize(&state, 1.0, &mut rng).summary().booked, 97);
        assert_eq!(randomize(&state, 0.0, &mut rng).free_count(), 97);
        // Out-of-range rates are clamped.
        assert_eq!(randomize(&state, 4.2, &mut rng).summary().booked, 97);
        assert_eq!(randomize(&state, f64::NAN, &mut rng).free_count(), 97);
    }

    #[test]
    fn test_randomize_keeps_blocked() {
        let mut rooms = build_rooms();
        rooms[0].status = RoomStatus::Blocked;
        let state = HotelState::from_rooms(rooms);
        let next = randomize(&state, 1.0, &mut StdRng::seed_from_u64(3));
        assert_eq!(next.room(101).map(|r| r.status), Some(RoomStatus::Blocked));
        assert_eq!(next.summary().booked, 96);
    }

    #[test]
    fn test_reset() {
        let (state, _) = book(&HotelState::new(), 4).unwrap();
        assert_eq!(state.free_count(), 93);
        assert_eq!(reset(), HotelState::new());
    }

    #[test]
    fn test_floor_occupancy() {
        let (state, _) = book(&HotelState::new(), 4).unwrap();
        let floors = state.floor_occupancy();
        assert_eq!(floors.len(), 10);
        assert_eq!(floors[0].floor, 1);
        assert_eq!(floors[0].counts.booked, 4);
        assert_eq!(floors[0].counts.free, 6);
        assert_eq!(floors[9].floor, 10);
        assert_eq!(floors[9].counts.total(), 7);
    }

    #[test]
    fn test_room_lookup() {
        let state = HotelState::new();
        assert_eq!(state.room(1007).map(|r| r.position), Some(6));
        assert!(state.room(1008).is_none());
    }

    #[test]
    fn test_state_serializes() {
        let json = serde_json::to_string(&HotelState::new()).unwrap();
        assert!(json.contains("\"status\":\"free\""));
        let back: HotelState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, HotelState::new());
    }
}
