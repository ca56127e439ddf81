//! Pure room allocation logic for HotelBook.
//!
//! This crate contains all booking logic that is independent of any UI or
//! storage. Functions take plain data and return results, making them
//! unit-testable and usable from the headless harness or any future front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`allocator`] | Two-phase room selection (single floor, then cross floor) |
//! | [`booking`] | Hotel state snapshots: book, randomize, reset |
//! | [`config`] | Allocator limits and travel weights, with validation |
//! | [`layout`] | Fixed 97-room layout across 10 floors and its validation |
//! | [`travel`] | Pairwise and set travel-time metric |

pub mod allocator;
pub mod booking;
pub mod config;
pub mod layout;
pub mod travel;
