#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

//! Reactive map-building vacuum agent for unknown grid worlds.
//!
//! The agent senses only bump, dirt and home signals. It builds a tile map
//! as it goes, walks towards the nearest unknown tile found by
//! breadth-first search, and returns Home once nothing reachable is left
//! to explore.

pub mod simulation;
pub mod ui;
