//! Integration tests for the full booking pipeline.
//!
//! Exercises: build layout → randomize occupancy → allocate → book → reset
//!
//! All tests are pure logic with no UI and no storage.

use hotelbook_logic::allocator::{allocate, try_allocate, Placement};
use hotelbook_logic::booking::{book, randomize, reset, HotelState};
use hotelbook_logic::config::DEFAULT_OCCUPANCY_RATE;
use hotelbook_logic::layout::{build_rooms, validate_layout, Room, RoomStatus};
use hotelbook_logic::travel::set_travel_time;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ────────────────────────────────────────────────────────────

fn randomized(seed: u64, rate: f64) -> HotelState {
    randomize(&HotelState::new(), rate, &mut StdRng::seed_from_u64(seed))
}

fn floors_with_at_least(state: &HotelState, count: usize) -> bool {
    state
        .floor_occupancy()
        .iter()
        .any(|f| f.counts.free >= count)
}

// ── Allocation properties over random occupancy ────────────────────────

#[test]
fn result_has_requested_distinct_free_rooms() {
    for seed in 0..40 {
        let state = randomized(seed, 0.6);
        for count in 1..=5 {
            let Some(result) = allocate(state.rooms(), count) else {
                assert!(state.free_count() < count, "seed {} count {}", seed, count);
                continue;
            };
            assert_eq!(result.rooms.len(), count);
            let mut ids = result.room_ids();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), count);
            for r in &result.rooms {
                assert_eq!(state.room(r.id).map(|s| s.status), Some(RoomStatus::Free));
            }
            assert_eq!(result.total_travel_time, set_travel_time(&result.rooms));
        }
    }
}

#[test]
fn single_floor_whenever_a_floor_fits() {
    for seed in 0..40 {
        let state = randomized(seed, 0.8);
        for count in 2..=5 {
            let Some(result) = allocate(state.rooms(), count) else {
                continue;
            };
            if floors_with_at_least(&state, count) {
                let floor = result.rooms[0].floor;
                assert!(result.rooms.iter().all(|r| r.floor == floor));
                assert_eq!(result.placement, Placement::SingleFloor { floor });
            } else {
                assert_eq!(result.placement, Placement::CrossFloor);
            }
        }
    }
}

#[test]
fn allocation_is_deterministic() {
    for seed in 0..10 {
        let state = randomized(seed, DEFAULT_OCCUPANCY_RATE);
        for count in 1..=5 {
            assert_eq!(allocate(state.rooms(), count), allocate(state.rooms(), count));
        }
    }
}

#[test]
fn exactly_one_short_is_insufficient() {
    let mut rooms = build_rooms();
    let keep_free = [202, 707, 1003];
    for r in rooms.iter_mut() {
        if !keep_free.contains(&r.id) {
            r.status = RoomStatus::Booked;
        }
    }
    let err = try_allocate(&rooms, 4).unwrap_err();
    assert_eq!(err.code(), "insufficient_free_rooms");
    assert!(try_allocate(&rooms, 3).is_ok());
}

#[test]
fn invalid_count_regardless_of_availability() {
    for rate in [0.0, 0.5, 1.0] {
        let state = randomized(11, rate);
        assert_eq!(try_allocate(state.rooms(), 0).unwrap_err().code(), "invalid_count");
        assert_eq!(try_allocate(state.rooms(), 6).unwrap_err().code(), "invalid_count");
    }
}

// ── Booking lifecycle ──────────────────────────────────────────────────

#[test]
fn book_until_full_then_reset() {
    let mut state = HotelState::new();
    let mut booked = 0;
    loop {
        match book(&state, 5) {
            Ok((next, result)) => {
                booked += result.rooms.len();
                assert_eq!(next.free_count(), 97 - booked);
                state = next;
            }
            Err(e) => {
                assert_eq!(e.code(), "insufficient_free_rooms");
                break;
            }
        }
    }
    assert_eq!(booked, 95);
    assert_eq!(state.free_count(), 2);

    let (state, last) = book(&state, 2).unwrap();
    assert_eq!(last.room_ids(), vec![1006, 1007]);
    assert_eq!(state.free_count(), 0);

    let state = reset();
    assert_eq!(state.free_count(), 97);
    assert!(validate_layout(state.rooms()).is_empty());
}

#[test]
fn failed_booking_leaves_state_unchanged() {
    let state = randomized(5, 0.95);
    let before = state.clone();
    let err = book(&state, 6).unwrap_err();
    assert_eq!(err.code(), "invalid_count");
    assert_eq!(state, before);
}

#[test]
fn booking_only_touches_allocated_rooms() {
    let state = randomized(21, 0.5);
    let (next, result) = book(&state, 3).unwrap();
    let chosen = result.room_ids();
    for (old, new) in state.rooms().iter().zip(next.rooms()) {
        assert_eq!(old.id, new.id);
        if chosen.contains(&old.id) {
            assert_eq!(old.status, RoomStatus::Free);
            assert_eq!(new.status, RoomStatus::Booked);
        } else {
            assert_eq!(old.status, new.status);
        }
    }
}

#[test]
fn randomize_keeps_layout_valid() {
    for seed in 0..5 {
        let state = randomized(seed, DEFAULT_OCCUPANCY_RATE);
        assert!(validate_layout(state.rooms()).is_empty());
        let ids: Vec<u32> = state.rooms().iter().map(|r| r.id).collect();
        let fresh: Vec<u32> = build_rooms().iter().map(|r: &Room| r.id).collect();
        assert_eq!(ids, fresh);
    }
}
