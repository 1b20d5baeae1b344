//! Planning for the mapping agent.
//!
//! This module provides:
//! - Breadth-first frontier search over the believed map
//! - Translation of absolute grid steps into primitive actions

mod actions;
mod frontier;

pub use actions::{Action, ActionPlanner};
pub use frontier::{search, FrontierSearch, Path, SearchMode};
