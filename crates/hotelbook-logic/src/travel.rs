//! Travel-time metric between rooms.
//!
//! Moving one floor costs [`VERTICAL_UNIT`]; moving one position along the
//! corridor costs [`HORIZONTAL_UNIT`]. The cost of a room set is the
//! *minimum* pairwise cost over all unordered pairs, i.e. how close the
//! nearest two rooms of the group are. It is not a walking-tour length.

use serde::{Deserialize, Serialize};

use crate::layout::Room;

pub const VERTICAL_UNIT: u32 = 2;
pub const HORIZONTAL_UNIT: u32 = 1;

/// Per-step costs used by the metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelWeights {
    pub vertical: u32,
    pub horizontal: u32,
}

impl Default for TravelWeights {
    fn default() -> Self {
        Self {
            vertical: VERTICAL_UNIT,
            horizontal: HORIZONTAL_UNIT,
        }
    }
}

impl TravelWeights {
    /// Cost of moving between two rooms. Saturates at `u32::MAX`.
    pub fn between(&self, a: &Room, b: &Room) -> u32 {
        let vertical = a.floor.abs_diff(b.floor).saturating_mul(self.vertical);
        let horizontal = a.position.abs_diff(b.position).saturating_mul(self.horizontal);
        vertical.saturating_add(horizontal)
    }

    /// Minimum pairwise cost over every unordered pair; 0 below two rooms.
    pub fn set_cost(&self, rooms: &[Room]) -> u32 {
        let mut best: Option<u32> = None;
        for i in 0..rooms.len() {
            for j in (i + 1)..rooms.len() {
                let t = self.between(&rooms[i], &rooms[j]);
                best = Some(best.map_or(t, |b| b.min(t)));
            }
        }
        best.unwrap_or(0)
    }
}

/// Travel time between two rooms under the default weights.
pub fn pairwise_travel_time(a: &Room, b: &Room) -> u32 {
    TravelWeights::default().between(a, b)
}

/// Travel time of a room set under the default weights.
pub fn set_travel_time(rooms: &[Room]) -> u32 {
    TravelWeights::default().set_cost(rooms)
}
