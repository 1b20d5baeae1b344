//! Agent position and compass heading.

use std::fmt;

use crate::simulation::map::GridCoord;
use crate::simulation::planning::Action;

/// Compass heading. Indices run clockwise from North.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Heading {
    /// Returns all headings in clockwise order starting at North.
    #[must_use]
    pub const fn all() -> [Heading; 4] {
        [Heading::North, Heading::East, Heading::South, Heading::West]
    }

    /// Maps any index onto a heading, mod 4.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// One quarter turn clockwise.
    #[must_use]
    pub const fn turn_right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// One quarter turn counter-clockwise.
    #[must_use]
    pub const fn turn_left(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Clockwise quarter turns needed to go from `self` to `target`, in `0..4`.
    #[must_use]
    pub const fn clockwise_steps_to(self, target: Self) -> u8 {
        (target.index() + 4 - self.index()) % 4
    }

    /// Grid offset of one step in this heading (y-down).
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// The coordinate one step from `from` in this heading.
    #[must_use]
    pub const fn step(self, from: GridCoord) -> GridCoord {
        let (dx, dy) = self.offset();
        from.offset(dx, dy)
    }

    /// Heading of the single step `from -> to`, or `None` if the two are not
    /// edge-adjacent.
    #[must_use]
    pub const fn between(from: GridCoord, to: GridCoord) -> Option<Self> {
        match (to.x - from.x, to.y - from.y) {
            (0, -1) => Some(Self::North),
            (1, 0) => Some(Self::East),
            (0, 1) => Some(Self::South),
            (-1, 0) => Some(Self::West),
            _ => None,
        }
    }

    /// Arrow glyph used when drawing the agent.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::North => '^',
            Self::East => '>',
            Self::South => 'v',
            Self::West => '<',
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "NORTH",
            Self::East => "EAST",
            Self::South => "SOUTH",
            Self::West => "WEST",
        };
        f.write_str(name)
    }
}

/// Where the agent believes it is and which way it faces.
///
/// Position moves only when feedback confirms a forward step succeeded.
/// Heading moves only through [`AgentPose::apply_turn`], which the
/// controller calls at the moment a turn is dequeued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentPose {
    pub position: GridCoord,
    pub heading: Heading,
}

impl Default for AgentPose {
    /// Home, facing East.
    fn default() -> Self {
        Self::new(GridCoord::home(), Heading::East)
    }
}

impl AgentPose {
    #[must_use]
    pub const fn new(position: GridCoord, heading: Heading) -> Self {
        Self { position, heading }
    }

    /// The tile directly in front of the agent.
    #[must_use]
    pub const fn ahead(&self) -> GridCoord {
        self.heading.step(self.position)
    }

    #[must_use]
    pub fn is_home(&self) -> bool {
        self.position == GridCoord::home()
    }

    /// Applies the environment's verdict on the previous action.
    ///
    /// A forward move that did not bump advances one tile. Anything else
    /// leaves the position alone; on a bump the caller infers the wall at
    /// [`AgentPose::ahead`].
    pub fn apply_feedback(&mut self, bumped: bool, last_action: Action) {
        if !bumped && last_action == Action::Forward {
            self.position = self.ahead();
        }
    }

    /// Rotates the heading for a turn action. Other actions are ignored.
    pub fn apply_turn(&mut self, action: Action) {
        match action {
            Action::TurnLeft => self.heading = self.heading.turn_left(),
            Action::TurnRight => self.heading = self.heading.turn_right(),
            Action::Forward | Action::Suck | Action::NoOp => {}
        }
    }
}
