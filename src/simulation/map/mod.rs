//! The agent's incrementally built picture of the world.
//!
//! This module provides:
//! - Tile classification (`TileState`)
//! - Integer grid coordinates with a y-down convention (`GridCoord`)
//! - The fixed-size believed map (`GridMap`)

mod grid_map;

pub use grid_map::{GridCoord, GridMap, TileState};
