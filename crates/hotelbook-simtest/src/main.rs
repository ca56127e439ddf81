//! HotelBook Headless Validation Harness
//!
//! Validates the layout, travel metric, and allocator without any UI.
//! Runs entirely in-process with no storage, networking, or rendering.
//!
//! Usage:
//!   cargo run -p hotelbook-simtest
//!   cargo run -p hotelbook-simtest -- --verbose
//!   cargo run -p hotelbook-simtest -- --seed 7
//!
//! Library `log` records are not shown here; no logger backend is installed.

use hotelbook_logic::allocator::{self, Placement};
use hotelbook_logic::booking::{self, HotelState};
use hotelbook_logic::config::{self, AllocatorConfig, DEFAULT_OCCUPANCY_RATE};
use hotelbook_logic::layout::{self, Room, RoomStatus, TOTAL_ROOMS};
use hotelbook_logic::travel;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

// ── Scenario table (shared with the logic crate's expectations) ─────────
const SCENARIOS_JSON: &str = include_str!("../../../data/booking_scenarios.json");

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    description: String,
    /// Rooms left free; every other room is booked. Absent means all free.
    #[serde(default)]
    free_rooms: Option<Vec<u32>>,
    count: usize,
    #[serde(default)]
    expect_rooms: Option<Vec<u32>>,
    #[serde(default)]
    expect_travel_time: Option<u32>,
    #[serde(default)]
    expect_error: Option<String>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let seed = match parse_seed(&args) {
        Ok(seed) => seed,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(2);
        }
    };
    println!("=== HotelBook Validation Harness (seed {}) ===\n", seed);

    let mut results = Vec::new();

    // 1. Layout
    results.extend(validate_layout(verbose));

    // 2. Travel metric
    results.extend(validate_travel_metric(verbose));

    // 3. Allocator configuration
    results.extend(validate_allocator_config(verbose));

    // 4. Scenario table
    results.extend(validate_scenarios(verbose));

    // 5. Randomized occupancy sweep
    results.extend(validate_random_sweep(seed, verbose));

    // 6. Booking lifecycle
    results.extend(validate_booking_lifecycle(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Seed from `--seed <u64>`, 42 when the flag is absent.
fn parse_seed(args: &[String]) -> Result<u64, String> {
    let Some(i) = args.iter().position(|a| a == "--seed") else {
        return Ok(42);
    };
    let value = args
        .get(i + 1)
        .ok_or_else(|| "--seed needs a value".to_string())?;
    value
        .parse::<u64>()
        .map_err(|e| format!("invalid --seed '{}': {}", value, e))
}

/// Full layout with every room booked except `free_ids`.
fn hotel_with_free(free_ids: &[u32]) -> Vec<Room> {
    let mut rooms = layout::build_rooms();
    for r in rooms.iter_mut() {
        if !free_ids.contains(&r.id) {
            r.status = RoomStatus::Booked;
        }
    }
    rooms
}

/// One line per floor, top floor first: `.` free, `B` booked, `#` blocked.
fn print_floor_map(state: &HotelState) {
    for floor in (1..=layout::FLOOR_COUNT).rev() {
        let mut row: Vec<&Room> = state.rooms().iter().filter(|r| r.floor == floor).collect();
        row.sort_by_key(|r| r.position);
        let cells: String = row
            .iter()
            .map(|r| match r.status {
                RoomStatus::Free => '.',
                RoomStatus::Booked => 'B',
                RoomStatus::Blocked => '#',
            })
            .collect();
        println!("    F{:>2} | {}", floor, cells);
    }
}

// ── 1. Layout ───────────────────────────────────────────────────────────

fn validate_layout(verbose: bool) -> Vec<TestResult> {
    println!("--- Layout ---");
    let mut results = Vec::new();

    let rooms = layout::build_rooms();
    results.push(TestResult {
        name: "layout_room_count".into(),
        passed: rooms.len() == TOTAL_ROOMS,
        detail: format!("{} rooms built", rooms.len()),
    });

    let errors = layout::validate_layout(&rooms);
    results.push(TestResult {
        name: "layout_invariants".into(),
        passed: errors.is_empty(),
        detail: if errors.is_empty() {
            "ids unique, positions contiguous, floors 1-10".into()
        } else {
            format!("{} layout errors: {:?}", errors.len(), errors)
        },
    });

    let top: Vec<u32> = rooms.iter().filter(|r| r.floor == 10).map(|r| r.id).collect();
    results.push(TestResult {
        name: "layout_top_floor".into(),
        passed: top.first() == Some(&1001) && top.last() == Some(&1007) && top.len() == 7,
        detail: format!("floor 10 rooms {:?}", top),
    });

    let all_free = rooms.iter().all(Room::is_free);
    results.push(TestResult {
        name: "layout_all_free".into(),
        passed: all_free,
        detail: "fresh layout has every room free".into(),
    });

    if verbose {
        print_floor_map(&HotelState::from_rooms(rooms));
    }

    results
}

// ── 2. Travel metric ────────────────────────────────────────────────────

fn validate_travel_metric(verbose: bool) -> Vec<TestResult> {
    println!("--- Travel Metric ---");
    let mut results = Vec::new();
    let rooms = layout::build_rooms();

    // Full 97×97 sweep
    let mut asymmetric = 0;
    let mut nonzero_self = 0;
    let mut max_cost = 0;
    for a in &rooms {
        if travel::pairwise_travel_time(a, a) != 0 {
            nonzero_self += 1;
        }
        for b in &rooms {
            let ab = travel::pairwise_travel_time(a, b);
            if ab != travel::pairwise_travel_time(b, a) {
                asymmetric += 1;
            }
            max_cost = max_cost.max(ab);
        }
    }
    results.push(TestResult {
        name: "travel_symmetric".into(),
        passed: asymmetric == 0,
        detail: format!("{} asymmetric pairs out of {}", asymmetric, rooms.len().pow(2)),
    });
    results.push(TestResult {
        name: "travel_zero_on_self".into(),
        passed: nonzero_self == 0,
        detail: format!("{} rooms with non-zero self cost", nonzero_self),
    });
    // 110 ↔ 1001: 9 floors × 2 + 9 positions = 27
    results.push(TestResult {
        name: "travel_max_cost".into(),
        passed: max_cost == 27,
        detail: format!("largest pairwise cost {}", max_cost),
    });

    results.push(TestResult {
        name: "travel_set_trivial".into(),
        passed: travel::set_travel_time(&[]) == 0 && travel::set_travel_time(&rooms[..1]) == 0,
        detail: "empty and single-room sets cost 0".into(),
    });

    // Minimum over all pairs, not consecutive pairs
    let spread = [rooms[0], rooms[9], rooms[1]];
    let cost = travel::set_travel_time(&spread);
    results.push(TestResult {
        name: "travel_set_min_pair".into(),
        passed: cost == 1,
        detail: format!("{{101, 110, 102}} → {}", cost),
    });

    if verbose {
        println!("    weights: {:?}", travel::TravelWeights::default());
    }

    results
}

// ── 3. Allocator configuration ──────────────────────────────────────────

fn validate_allocator_config(verbose: bool) -> Vec<TestResult> {
    println!("--- Allocator Config ---");
    let mut results = Vec::new();

    let defaults = AllocatorConfig::default();
    let errors = config::validate_config(&defaults);
    results.push(TestResult {
        name: "config_defaults_valid".into(),
        passed: errors.is_empty(),
        detail: format!(
            "max {} rooms, pool {}, {:?}",
            defaults.max_rooms_per_booking, defaults.candidate_pool_size, errors
        ),
    });

    let broken = AllocatorConfig {
        candidate_pool_size: 2,
        ..AllocatorConfig::default()
    };
    let errors = config::validate_config(&broken);
    results.push(TestResult {
        name: "config_small_pool_rejected".into(),
        passed: errors.len() == 1,
        detail: format!("{:?}", errors),
    });

    if verbose {
        match serde_json::to_string(&defaults) {
            Ok(json) => println!("    defaults: {}", json),
            Err(e) => println!("    defaults: <serialize error: {}>", e),
        }
    }

    results
}

// ── 4. Scenario table ───────────────────────────────────────────────────

fn validate_scenarios(verbose: bool) -> Vec<TestResult> {
    println!("--- Scenarios ---");
    let mut results = Vec::new();

    let scenarios: Vec<Scenario> = match serde_json::from_str(SCENARIOS_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "scenarios_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "scenarios_loaded".into(),
        passed: !scenarios.is_empty(),
        detail: format!("{} scenarios loaded", scenarios.len()),
    });

    for s in &scenarios {
        let rooms = match &s.free_rooms {
            Some(ids) => hotel_with_free(ids),
            None => layout::build_rooms(),
        };
        let outcome = allocator::try_allocate(&rooms, s.count);

        let (passed, detail) = match (&outcome, &s.expect_error) {
            (Ok(result), None) => {
                let ids_ok = s
                    .expect_rooms
                    .as_ref()
                    .map_or(true, |ids| *ids == result.room_ids());
                let time_ok = s
                    .expect_travel_time
                    .map_or(true, |t| t == result.total_travel_time);
                (
                    ids_ok && time_ok,
                    format!(
                        "{} → {:?} travel {}",
                        s.description,
                        result.room_ids(),
                        result.total_travel_time
                    ),
                )
            }
            (Err(e), Some(code)) => (
                e.code() == code,
                format!("{} → {}", s.description, e),
            ),
            (Ok(result), Some(code)) => (
                false,
                format!("expected {}, got rooms {:?}", code, result.room_ids()),
            ),
            (Err(e), None) => (false, format!("unexpected failure: {}", e)),
        };

        if verbose && !passed {
            print_floor_map(&HotelState::from_rooms(rooms));
        }

        results.push(TestResult {
            name: format!("scenario_{}", s.name),
            passed,
            detail,
        });
    }

    results
}

// ── 5. Randomized occupancy sweep ───────────────────────────────────────

fn validate_random_sweep(seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Random Occupancy Sweep ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut checked = 0;
    let mut violations = Vec::new();
    let mut cross_floor = 0;
    for round in 0..50 {
        let rate = [DEFAULT_OCCUPANCY_RATE, 0.7, 0.9][round % 3];
        let state = booking::randomize(&HotelState::new(), rate, &mut rng);
        for count in 1..=5 {
            checked += 1;
            let first = allocator::allocate(state.rooms(), count);
            let second = allocator::allocate(state.rooms(), count);
            if first != second {
                violations.push(format!("round {} count {}: non-deterministic", round, count));
            }
            let Some(result) = first else {
                if state.free_count() >= count {
                    violations.push(format!("round {} count {}: no result", round, count));
                }
                continue;
            };
            if result.rooms.len() != count || !result.rooms.iter().all(Room::is_free) {
                violations.push(format!("round {} count {}: bad room set", round, count));
            }
            let fits_one_floor = state
                .floor_occupancy()
                .iter()
                .any(|f| f.counts.free >= count);
            match result.placement {
                Placement::SingleFloor { .. } if !fits_one_floor => {
                    violations.push(format!("round {} count {}: phantom floor", round, count));
                }
                Placement::CrossFloor if fits_one_floor => {
                    violations.push(format!("round {} count {}: skipped floor", round, count));
                }
                Placement::CrossFloor => cross_floor += 1,
                _ => {}
            }
        }
    }

    results.push(TestResult {
        name: "sweep_invariants".into(),
        passed: violations.is_empty(),
        detail: if violations.is_empty() {
            format!("{} allocations checked, {} cross-floor", checked, cross_floor)
        } else {
            violations.join("; ")
        },
    });

    if verbose {
        let sample = booking::randomize(&HotelState::new(), 0.9, &mut rng);
        println!("    sample at 0.90 occupancy:");
        print_floor_map(&sample);
    }

    results
}

// ── 6. Booking lifecycle ────────────────────────────────────────────────

fn validate_booking_lifecycle(verbose: bool) -> Vec<TestResult> {
    println!("--- Booking Lifecycle ---");
    let mut results = Vec::new();

    let mut state = booking::reset();
    let mut bookings = 0;
    let stop = loop {
        match booking::book(&state, 4) {
            Ok((next, _)) => {
                bookings += 1;
                state = next;
            }
            Err(e) => break e,
        }
    };
    results.push(TestResult {
        name: "lifecycle_fill".into(),
        passed: state.free_count() < 4 && stop.code() == "insufficient_free_rooms",
        detail: format!(
            "{} bookings of 4, {} rooms left, stopped with: {}",
            bookings,
            state.free_count(),
            stop
        ),
    });

    let before = state.clone();
    let rejected = booking::book(&state, 0);
    results.push(TestResult {
        name: "lifecycle_rejection_keeps_state".into(),
        passed: rejected.is_err() && state == before,
        detail: "invalid request leaves the snapshot untouched".into(),
    });

    let summary = state.summary();
    results.push(TestResult {
        name: "lifecycle_summary".into(),
        passed: summary.total() == TOTAL_ROOMS && summary.booked == bookings * 4,
        detail: format!("{:?}", summary),
    });

    if verbose {
        print_floor_map(&state);
    }

    let fresh = booking::reset();
    results.push(TestResult {
        name: "lifecycle_reset".into(),
        passed: fresh.free_count() == TOTAL_ROOMS,
        detail: "reset frees every room".into(),
    });

    results
}
