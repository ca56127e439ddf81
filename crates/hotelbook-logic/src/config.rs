//! Allocator configuration: booking size limit, search pool, travel weights.
//!
//! The defaults are business policy: at most 5 rooms per booking, and the
//! cross-floor search only looks at the first 20 free rooms in
//! floor/position order, so it never examines more than C(20, 5) = 15504
//! combinations.

use serde::{Deserialize, Serialize};

use crate::layout::{FLOOR_COUNT, ROOMS_PER_FLOOR};
use crate::travel::TravelWeights;

pub const MAX_ROOMS_PER_BOOKING: usize = 5;
pub const CANDIDATE_POOL_SIZE: usize = 20;
/// Share of rooms booked by the randomize control.
pub const DEFAULT_OCCUPANCY_RATE: f64 = 0.3;

/// Settings for a single allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Largest room count a single booking may request.
    pub max_rooms_per_booking: usize,
    /// Free rooms considered by the cross-floor search.
    pub candidate_pool_size: usize,
    pub weights: TravelWeights,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            max_rooms_per_booking: MAX_ROOMS_PER_BOOKING,
            candidate_pool_size: CANDIDATE_POOL_SIZE,
            weights: TravelWeights::default(),
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No booking size would be accepted.
    MaxRoomsZero,
    /// Pool cannot hold the largest allowed booking.
    CandidatePoolTooSmall { pool: usize, max_rooms: usize },
    /// A zero weight makes distinct rooms indistinguishable.
    ZeroWeight,
    /// The costliest move in the building would not fit in a `u32`.
    WeightTooLarge { vertical: u32, horizontal: u32 },
}

/// Largest pairwise cost the layout allows under `weights`.
fn max_travel_cost(weights: &TravelWeights) -> u64 {
    let floor_span = u64::from(FLOOR_COUNT - 1);
    let position_span = u64::from(ROOMS_PER_FLOOR - 1);
    floor_span * u64::from(weights.vertical) + position_span * u64::from(weights.horizontal)
}

/// Validate an allocator configuration, returning all errors found.
///
/// The allocator does not call this itself; configs loaded from outside
/// should be checked here before use. Weights that fail the size check
/// still allocate, but costs saturate and stop ranking candidates.
pub fn validate_config(config: &AllocatorConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.max_rooms_per_booking == 0 {
        errors.push(ConfigError::MaxRoomsZero);
    }
    if config.candidate_pool_size < config.max_rooms_per_booking {
        errors.push(ConfigError::CandidatePoolTooSmall {
            pool: config.candidate_pool_size,
            max_rooms: config.max_rooms_per_booking,
        });
    }
    if config.weights.vertical == 0 || config.weights.horizontal == 0 {
        errors.push(ConfigError::ZeroWeight);
    }
    if max_travel_cost(&config.weights) > u64::from(u32::MAX) {
        errors.push(ConfigError::WeightTooLarge {
            vertical: config.weights.vertical,
            horizontal: config.weights.horizontal,
        });
    }

    errors
}
