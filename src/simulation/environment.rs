use rand::Rng;
use tracing::debug;

use crate::simulation::agent::{Percept, VacuumAgent};
use crate::simulation::config::WorldConfig;
use crate::simulation::error::LayoutError;
use crate::simulation::map::GridCoord;
use crate::simulation::params::MIN_GRID_SIDE;
use crate::simulation::planning::Action;
use crate::simulation::pose::{AgentPose, Heading};

/// Ground-truth contents of a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Floor { dirty: bool },
}

impl Cell {
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    #[must_use]
    pub const fn is_dirty(self) -> bool {
        matches!(self, Self::Floor { dirty: true })
    }

    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Floor { dirty: true } => 'D',
            Self::Floor { dirty: false } => '.',
        }
    }
}

/// Running totals kept by the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Actions applied
    pub steps: u64,
    /// Suck actions that removed dirt
    pub cleaned: u32,
    /// Forward actions blocked by a wall
    pub bumps: u32,
}

/// Simulated walled grid world the agent runs in.
///
/// The border is always wall and Home at (1, 1) is always floor. The agent
/// starts at Home facing East, matching its own initial belief.
#[derive(Clone, Debug)]
pub struct VacuumWorld {
    pub width: usize,
    pub height: usize,
    cells: Vec<Cell>,
    agent: AgentPose,
    bumped: bool,
    stats: WorldStats,
}

impl VacuumWorld {
    fn with_cells(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        Self {
            width,
            height,
            cells,
            agent: AgentPose::default(),
            bumped: false,
            stats: WorldStats::default(),
        }
    }

    /// Parses a text layout: `#` wall, `.` clean floor, `D` dirty floor.
    ///
    /// Blank lines and surrounding whitespace are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] if the layout is empty, ragged, smaller
    /// than 3x3, contains other glyphs, has an open border, or walls Home.
    pub fn from_layout(layout: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(LayoutError::Empty);
        };
        let width = first.chars().count();
        let height = rows.len();

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let cell = match glyph {
                    '#' => Cell::Wall,
                    '.' => Cell::Floor { dirty: false },
                    'D' => Cell::Floor { dirty: true },
                    _ => return Err(LayoutError::UnknownGlyph { glyph, x, y }),
                };
                cells.push(cell);
            }
        }

        if width < MIN_GRID_SIDE || height < MIN_GRID_SIDE {
            return Err(LayoutError::TooSmall {
                width,
                height,
                min: MIN_GRID_SIDE,
            });
        }

        for y in 0..height {
            for x in 0..width {
                let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                if border && !cells[y * width + x].is_wall() {
                    return Err(LayoutError::OpenBorder { x, y });
                }
            }
        }

        let world = Self::with_cells(width, height, cells);
        if world.is_wall(GridCoord::home()) {
            return Err(LayoutError::HomeBlocked);
        }
        Ok(world)
    }

    /// Generates a random walled world.
    ///
    /// Interior tiles become walls with probability `wall_density`; floor
    /// tiles start dirty with probability `dirt_density`. Home is always
    /// clean floor. Interior walls may cut off parts of the floor.
    #[must_use]
    pub fn random(config: &WorldConfig, rng: &mut impl Rng) -> Self {
        let (width, height) = (config.width, config.height);
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                let cell = if border {
                    Cell::Wall
                } else if (x, y) == (1, 1) {
                    Cell::Floor { dirty: false }
                } else if rng.random_bool(config.wall_density) {
                    Cell::Wall
                } else {
                    Cell::Floor {
                        dirty: rng.random_bool(config.dirt_density),
                    }
                };
                cells.push(cell);
            }
        }
        Self::with_cells(width, height, cells)
    }

    #[allow(clippy::cast_sign_loss)] // Sign checked first
    fn index(&self, coord: GridCoord) -> Option<usize> {
        let inside = coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height;
        inside.then(|| coord.y as usize * self.width + coord.x as usize)
    }

    /// Returns the cell at `coord`, or `None` outside the world.
    #[must_use]
    pub fn cell(&self, coord: GridCoord) -> Option<Cell> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Returns true for walls and for anything outside the world.
    #[must_use]
    pub fn is_wall(&self, coord: GridCoord) -> bool {
        self.cell(coord).is_none_or(Cell::is_wall)
    }

    /// Iterates the cells of row `y` from West to East.
    pub fn row(&self, y: usize) -> impl Iterator<Item = Cell> + '_ {
        self.cells[y * self.width..(y + 1) * self.width].iter().copied()
    }

    /// True position and heading of the agent.
    #[must_use]
    pub const fn agent_pose(&self) -> &AgentPose {
        &self.agent
    }

    /// Moves the agent. Used to set up scenarios; does not touch stats.
    ///
    /// # Panics
    ///
    /// Panics if `position` is a wall or outside the world.
    pub fn place_agent(&mut self, position: GridCoord, heading: Heading) {
        assert!(
            !self.is_wall(position),
            "cannot place agent on wall tile {position}"
        );
        self.agent = AgentPose::new(position, heading);
        self.bumped = false;
    }

    #[must_use]
    pub const fn stats(&self) -> WorldStats {
        self.stats
    }

    /// Number of floor tiles still dirty.
    #[must_use]
    pub fn dirt_remaining(&self) -> usize {
        self.cells.iter().filter(|c| c.is_dirty()).count()
    }

    /// What the agent senses at its current tile.
    #[must_use]
    pub fn percept(&self) -> Percept {
        let here = self.agent.position;
        Percept {
            bump: self.bumped,
            dirt: self.cell(here).is_some_and(Cell::is_dirty),
            home: here == GridCoord::home(),
        }
    }

    /// Executes one action against the world.
    pub fn apply(&mut self, action: Action) {
        self.stats.steps += 1;
        self.bumped = false;
        match action {
            Action::Forward => {
                let ahead = self.agent.ahead();
                if self.is_wall(ahead) {
                    self.bumped = true;
                    self.stats.bumps += 1;
                } else {
                    self.agent.position = ahead;
                }
            }
            Action::TurnLeft | Action::TurnRight => self.agent.apply_turn(action),
            Action::Suck => {
                if let Some(i) = self.index(self.agent.position) {
                    if self.cells[i].is_dirty() {
                        self.cells[i] = Cell::Floor { dirty: false };
                        self.stats.cleaned += 1;
                    }
                }
            }
            Action::NoOp => {}
        }
    }

    /// Feeds the current percept to `agent` and applies its answer.
    pub fn step(&mut self, agent: &mut VacuumAgent) -> Action {
        let action = agent.execute(self.percept());
        self.apply(action);
        action
    }

    /// Steps until the agent is done or `max_steps` actions were applied.
    pub fn run(&mut self, agent: &mut VacuumAgent, max_steps: u64) -> WorldStats {
        let mut taken = 0;
        while taken < max_steps && !agent.is_done() {
            self.step(agent);
            taken += 1;
        }
        debug!(steps = taken, done = agent.is_done(), stats = ?self.stats, "run finished");
        self.stats
    }
}
