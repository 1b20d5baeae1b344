pub mod field;
mod log_history;
pub mod render;

pub use log_history::LogHistory;

use crate::simulation::params::LOG_HISTORY_LEN;

/// Mutable state of the terminal dashboard between frames.
#[derive(Clone, Debug)]
pub struct DashboardState {
    pub logs: LogHistory,
    pub paused: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            logs: LogHistory::new(LOG_HISTORY_LEN),
            paused: false,
        }
    }
}

impl DashboardState {
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }
}
