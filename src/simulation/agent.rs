use std::collections::VecDeque;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::simulation::config::AgentConfig;
use crate::simulation::error::ConfigError;
use crate::simulation::map::{GridCoord, GridMap, TileState};
use crate::simulation::params::{BOOTSTRAP_TURN_LEFT_P, BOOTSTRAP_TURN_P};
use crate::simulation::planning::{search, Action, ActionPlanner, Path, SearchMode};
use crate::simulation::pose::AgentPose;

/// What the environment reports after each action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Percept {
    /// The previous forward move was blocked
    pub bump: bool,
    /// The current tile is dirty
    pub dirt: bool,
    /// The current tile is Home
    pub home: bool,
}

impl Percept {
    #[must_use]
    pub const fn new(bump: bool, dirt: bool, home: bool) -> Self {
        Self { bump, dirt, home }
    }
}

/// Controller state, as of the end of the last `execute` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentMode {
    /// Random walk before mapping
    Bootstrapping,
    /// Percept applied, nothing else to do this cycle
    Sensing,
    /// Idle, a frontier search ran this cycle
    Planning,
    /// Draining queued actions
    Acting,
    /// Back home with nothing left to explore; emits no-op forever
    Done,
}

/// Passive diagnostic channel for formatted controller messages.
pub type LogSink = Box<dyn FnMut(&str) + Send>;

/// Reactive map-building vacuum agent.
///
/// Each call to [`VacuumAgent::execute`] consumes one percept and returns
/// one primitive action. The agent maps tiles as it stands on or bumps
/// into them, heads for the nearest unknown tile, and returns Home once
/// no reachable unknown tile is left.
pub struct VacuumAgent {
    map: GridMap,
    pose: AgentPose,
    path: Path,
    actions: VecDeque<Action>,
    last_action: Action,
    finished: bool,
    mode: AgentMode,
    /// `None` once the walk has been finalised (or was disabled).
    bootstrap_remaining: Option<u32>,
    iterations_left: u32,
    limit_reported: bool,
    rng: StdRng,
    sink: Option<LogSink>,
}

impl fmt::Debug for VacuumAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VacuumAgent")
            .field("pose", &self.pose)
            .field("path", &self.path)
            .field("actions", &self.actions)
            .field("last_action", &self.last_action)
            .field("finished", &self.finished)
            .field("mode", &self.mode)
            .field("bootstrap_remaining", &self.bootstrap_remaining)
            .field("iterations_left", &self.iterations_left)
            .finish_non_exhaustive()
    }
}

impl VacuumAgent {
    /// Creates an agent at Home facing East on an all-unknown map.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the grid is too small.
    pub fn new(config: &AgentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (bootstrap_remaining, mode) = if config.bootstrap_steps > 0 {
            (Some(config.bootstrap_steps), AgentMode::Bootstrapping)
        } else {
            (None, AgentMode::Sensing)
        };
        Ok(Self {
            map: GridMap::new(config.width, config.height),
            pose: AgentPose::default(),
            path: Path::default(),
            actions: VecDeque::new(),
            last_action: Action::NoOp,
            finished: false,
            mode,
            bootstrap_remaining,
            iterations_left: config.iteration_limit,
            limit_reported: false,
            rng,
            sink: None,
        })
    }

    /// Attaches a sink that receives every controller message.
    #[must_use]
    pub fn with_log_sink(mut self, sink: impl FnMut(&str) + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    #[must_use]
    pub const fn map(&self) -> &GridMap {
        &self.map
    }

    #[must_use]
    pub const fn pose(&self) -> &AgentPose {
        &self.pose
    }

    /// Remaining planned steps.
    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Actions queued for the current grid step.
    pub fn pending_actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.actions.iter().copied()
    }

    /// True once a search found no reachable unknown tile. Never resets.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub const fn mode(&self) -> AgentMode {
        self.mode
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.mode, AgentMode::Done)
    }

    #[must_use]
    pub const fn last_action(&self) -> Action {
        self.last_action
    }

    #[must_use]
    pub const fn iterations_left(&self) -> u32 {
        self.iterations_left
    }

    fn log(&mut self, message: &str) {
        debug!(target: "vacuum_explorer::agent", "{message}");
        if let Some(sink) = self.sink.as_mut() {
            sink(message);
        }
    }

    /// Consumes one percept and returns the next primitive action.
    pub fn execute(&mut self, percept: Percept) -> Action {
        let action = self.decide(percept);
        self.last_action = action;
        action
    }

    fn decide(&mut self, percept: Percept) -> Action {
        if let Some(remaining) = self.bootstrap_remaining {
            return self.bootstrap_step(remaining, percept.bump);
        }

        if self.mode == AgentMode::Done {
            return Action::NoOp;
        }

        if self.iterations_left == 0 {
            if !self.limit_reported {
                self.limit_reported = true;
                warn!("iteration limit reached, halting");
                self.log("Iteration counter is now 0. Halting!");
            }
            return Action::NoOp;
        }
        self.iterations_left -= 1;

        self.mode = AgentMode::Sensing;
        self.sense(percept);

        // Dirt preempts navigation; any queued plan resumes afterwards.
        if percept.dirt {
            self.log("DIRT -> choosing SUCK action!");
            return Action::Suck;
        }

        if self.path.is_empty() && self.actions.is_empty() {
            self.mode = AgentMode::Planning;
            self.plan();
            if self.finished && self.path.is_empty() && self.pose.is_home() {
                self.mode = AgentMode::Done;
                info!(position = %self.pose.position, "exploration complete, agent is home");
                self.log("Finished: map explored and agent is home");
                return Action::NoOp;
            }
        }

        if self.actions.is_empty() {
            if let Some(step) = self.path.next_step() {
                self.actions
                    .extend(ActionPlanner::translate(self.pose.heading, step));
            }
        }

        match self.actions.pop_front() {
            Some(action) => {
                self.mode = AgentMode::Acting;
                // Heading follows the turn now; position waits for feedback.
                self.pose.apply_turn(action);
                action
            }
            None => Action::NoOp,
        }
    }

    /// Applies a percept to the pose and the map.
    fn sense(&mut self, percept: Percept) {
        self.pose.apply_feedback(percept.bump, self.last_action);

        let message = format!(
            "Position: {}\t\tDirection: {}",
            self.pose.position, self.pose.heading
        );
        self.log(&message);

        if percept.home != self.pose.is_home() {
            warn!(
                position = %self.pose.position,
                percept_home = percept.home,
                "home percept disagrees with tracked pose"
            );
            let message = format!(
                "Home percept {} does not match tracked position {}",
                percept.home, self.pose.position
            );
            self.log(&message);
        }

        if percept.bump {
            self.record(self.pose.ahead(), TileState::Wall);
            self.path.clear();
            self.actions.clear();
        } else if percept.dirt {
            self.record(self.pose.position, TileState::Dirt);
        } else {
            self.record(self.pose.position, TileState::Clear);
        }
    }

    /// Writes a tile classification, leaving Home untouched.
    fn record(&mut self, coord: GridCoord, state: TileState) {
        if self.map.get(coord) != TileState::Home {
            self.map.set(coord, state);
        }
    }

    fn plan(&mut self) {
        let start = self.pose.position;
        if !self.finished {
            if let Some(path) = search(&self.map, start, SearchMode::FindUnknown) {
                self.path = path;
                return;
            }
            self.finished = true;
            info!(
                unknown_left = self.map.unknown_count(),
                "no reachable unknown tile, returning home"
            );
            self.log("Map explored -> returning home");
        }

        match search(&self.map, start, SearchMode::GoHome) {
            Some(path) => self.path = path,
            None => {
                warn!(%start, "home is unreachable from current position");
                self.log("Home unreachable from current position");
            }
        }
    }

    fn bootstrap_step(&mut self, remaining: u32, bumped: bool) -> Action {
        self.pose.apply_feedback(bumped, self.last_action);

        if remaining == 0 {
            self.bootstrap_remaining = None;
            self.mode = AgentMode::Sensing;
            info!(pose = ?self.pose, "bootstrap walk finished");
            self.log("Processing percepts after position randomization");
            return Action::Suck;
        }

        self.bootstrap_remaining = Some(remaining - 1);
        let message = format!("Moving to random start position ({remaining} steps left)");
        self.log(&message);

        let roll: f64 = self.rng.random();
        let action = if roll < BOOTSTRAP_TURN_LEFT_P {
            Action::TurnLeft
        } else if roll < BOOTSTRAP_TURN_P {
            Action::TurnRight
        } else {
            Action::Forward
        };
        self.pose.apply_turn(action);
        action
    }
}
