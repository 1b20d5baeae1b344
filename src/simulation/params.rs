//! Simulation defaults.

/// Home tile x coordinate. Home is fixed for the agent's lifetime.
pub const HOME_X: i32 = 1;
/// Home tile y coordinate.
pub const HOME_Y: i32 = 1;

pub const DEFAULT_BOOTSTRAP_STEPS: u32 = 10;
pub const DEFAULT_ITERATION_LIMIT: u32 = 10_000;

/// Bootstrap walk: probability of a left turn.
pub const BOOTSTRAP_TURN_LEFT_P: f64 = 1.0 / 6.0;
/// Bootstrap walk: cumulative probability of any turn (left or right).
pub const BOOTSTRAP_TURN_P: f64 = 2.0 / 6.0;

pub const DEFAULT_WORLD_WIDTH: usize = 12;
pub const DEFAULT_WORLD_HEIGHT: usize = 8;
pub const DEFAULT_DIRT_DENSITY: f64 = 0.25;
pub const DEFAULT_WALL_DENSITY: f64 = 0.1;

/// Smallest grid that still has one interior tile inside the border walls.
pub const MIN_GRID_SIDE: usize = 3;

pub const DEFAULT_TICK_MS: u64 = 80;
pub const LOG_HISTORY_LEN: usize = 64;
