//! Room allocation: pick the room set with the lowest travel time.
//!
//! The search runs in two phases and returns the first that succeeds:
//!
//! 1. **Single floor.** Free rooms are grouped by floor (floors in the order
//!    they are first met in the input). On every floor with enough free
//!    rooms, a window of `count` rooms slides over the rooms sorted by
//!    position. The cheapest window over all floors wins.
//! 2. **Cross floor.** Only when no floor can hold the booking. The free
//!    rooms are sorted by floor then position, cut down to the candidate
//!    pool, and every `count`-combination of the pool is scored.
//!
//! Ties go to whichever candidate was scored first, so the result is fully
//! determined by the input order. The allocator never mutates rooms;
//! applying a result is up to the caller (see [`crate::booking`]).
//!
//! ```
//! use hotelbook_logic::allocator::allocate;
//! use hotelbook_logic::layout::build_rooms;
//!
//! let result = allocate(&build_rooms(), 3).unwrap();
//! assert_eq!(result.room_ids(), vec![101, 102, 103]);
//! assert_eq!(result.total_travel_time, 1);
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::AllocatorConfig;
use crate::layout::Room;
use crate::travel::TravelWeights;

/// Which phase produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Phase 1: every room is on `floor`.
    SingleFloor { floor: u32 },
    /// Phase 2: rooms drawn from the cross-floor candidate pool.
    CrossFloor,
}

/// Rooms chosen for one booking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResult {
    /// Chosen rooms, in the order the search visited them.
    pub rooms: Vec<Room>,
    /// Cost of the closest pair in `rooms`; 0 for a single room.
    pub total_travel_time: u32,
    /// Phase that produced the rooms.
    pub placement: Placement,
}

impl BookingResult {
    pub fn room_ids(&self) -> Vec<u32> {
        self.rooms.iter().map(|r| r.id).collect()
    }
}

/// Why a booking request could not be satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// Requested count is outside `1..=max`.
    InvalidCount { requested: usize, max: usize },
    /// Fewer free rooms than requested.
    InsufficientFreeRooms { requested: usize, available: usize },
    /// The bounded cross-floor pool holds no valid combination.
    NoFeasibleAllocation { requested: usize, pool: usize },
}

impl AllocationError {
    /// Stable machine-readable identifier.
    pub fn code(&self) -> &'static str {
        match self {
            AllocationError::InvalidCount { .. } => "invalid_count",
            AllocationError::InsufficientFreeRooms { .. } => "insufficient_free_rooms",
            AllocationError::NoFeasibleAllocation { .. } => "no_feasible_allocation",
        }
    }
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationError::InvalidCount { requested, max } => write!(
                f,
                "Invalid room count {}: a booking takes between 1 and {} rooms",
                requested, max
            ),
            AllocationError::InsufficientFreeRooms {
                requested,
                available,
            } => write!(
                f,
                "Not enough free rooms: requested {}, only {} available",
                requested, available
            ),
            AllocationError::NoFeasibleAllocation { requested, pool } => write!(
                f,
                "No feasible allocation of {} rooms among {} candidate rooms",
                requested, pool
            ),
        }
    }
}

impl std::error::Error for AllocationError {}

/// Allocate `count` rooms with the default configuration.
///
/// Returns `None` for an invalid count, too few free rooms, or no feasible
/// combination. Use [`try_allocate`] to learn which.
pub fn allocate(rooms: &[Room], count: usize) -> Option<BookingResult> {
    try_allocate(rooms, count).ok()
}

/// Allocate `count` rooms with the default configuration, reporting failures.
pub fn try_allocate(rooms: &[Room], count: usize) -> Result<BookingResult, AllocationError> {
    allocate_with(rooms, count, &AllocatorConfig::default())
}

/// Allocate `count` rooms under `config`.
///
/// `config` is taken as given; run [`crate::config::validate_config`] on
/// externally loaded configs first.
pub fn allocate_with(
    rooms: &[Room],
    count: usize,
    config: &AllocatorConfig,
) -> Result<BookingResult, AllocationError> {
    if count == 0 || count > config.max_rooms_per_booking {
        return Err(AllocationError::InvalidCount {
            requested: count,
            max: config.max_rooms_per_booking,
        });
    }

    let free: Vec<Room> = rooms.iter().filter(|r| r.is_free()).copied().collect();
    if free.len() < count {
        return Err(AllocationError::InsufficientFreeRooms {
            requested: count,
            available: free.len(),
        });
    }

    if let Some(result) = best_single_floor(&free, count, &config.weights) {
        log::debug!(
            "Single-floor placement of {} rooms: {:?} (travel {})",
            count,
            result.room_ids(),
            result.total_travel_time
        );
        return Ok(result);
    }

    best_cross_floor(&free, count, config).ok_or(AllocationError::NoFeasibleAllocation {
        requested: count,
        pool: free.len().min(config.candidate_pool_size),
    })
}

/// Phase 1: cheapest position-sorted window on any single floor.
fn best_single_floor(free: &[Room], count: usize, weights: &TravelWeights) -> Option<BookingResult> {
    let mut floor_slot: HashMap<u32, usize> = HashMap::new();
    let mut floors: Vec<(u32, Vec<Room>)> = Vec::new();
    for room in free {
        let slot = *floor_slot.entry(room.floor).or_insert_with(|| {
            floors.push((room.floor, Vec::new()));
            floors.len() - 1
        });
        floors[slot].1.push(*room);
    }
    for (_, rooms) in floors.iter_mut() {
        rooms.sort_by_key(|r| r.position);
    }

    let mut best: Option<(u32, u32, &[Room])> = None;
    for (floor, rooms) in &floors {
        if rooms.len() < count {
            continue;
        }
        for window in rooms.windows(count) {
            let cost = weights.set_cost(window);
            if best.map_or(true, |(best_cost, _, _)| cost < best_cost) {
                best = Some((cost, *floor, window));
            }
        }
    }

    best.map(|(cost, floor, window)| BookingResult {
        rooms: window.to_vec(),
        total_travel_time: cost,
        placement: Placement::SingleFloor { floor },
    })
}

/// Phase 2: exhaustive combinations over the truncated candidate pool.
fn best_cross_floor(free: &[Room], count: usize, config: &AllocatorConfig) -> Option<BookingResult> {
    let mut pool = free.to_vec();
    pool.sort_by_key(|r| (r.floor, r.position));
    pool.truncate(config.candidate_pool_size);
    if pool.is_empty() || pool.len() < count {
        return None;
    }

    let mut search = CombinationSearch {
        pool: &pool,
        count,
        weights: config.weights,
        chosen: Vec::with_capacity(count),
        best: None,
        evaluated: 0,
    };
    search.extend_from(0);

    log::debug!(
        "Cross-floor search over {} candidates scored {} combinations",
        pool.len(),
        search.evaluated
    );

    search.best.map(|(cost, rooms)| BookingResult {
        rooms,
        total_travel_time: cost,
        placement: Placement::CrossFloor,
    })
}

/// Depth-first enumeration of `count`-combinations in increasing index order.
struct CombinationSearch<'a> {
    pool: &'a [Room],
    count: usize,
    weights: TravelWeights,
    chosen: Vec<Room>,
    best: Option<(u32, Vec<Room>)>,
    evaluated: usize,
}

impl CombinationSearch<'_> {
    fn extend_from(&mut self, start: usize) {
        if self.chosen.len() == self.count {
            self.evaluated += 1;
            let cost = self.weights.set_cost(&self.chosen);
            if self
                .best
                .as_ref()
                .map_or(true, |(best_cost, _)| cost < *best_cost)
            {
                self.best = Some((cost, self.chosen.clone()));
            }
            return;
        }

        // Stop once too few rooms remain to complete the combination.
        let needed = self.count - self.chosen.len();
        for i in start..=(self.pool.len() - needed) {
            self.chosen.push(self.pool[i]);
            self.extend_from(i + 1);
            self.chosen.pop();
        }
    }
}
