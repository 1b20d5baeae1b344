//! Primitive actions and heading-relative step translation.

use std::fmt;

use crate::simulation::pose::Heading;

/// Atomic commands understood by the environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move one tile in the current heading
    Forward,
    /// Rotate 90 degrees counter-clockwise
    TurnLeft,
    /// Rotate 90 degrees clockwise
    TurnRight,
    /// Clean the current tile
    Suck,
    /// Do nothing
    #[default]
    NoOp,
}

impl Action {
    /// Returns all possible actions.
    #[must_use]
    pub const fn all() -> [Action; 5] {
        [
            Action::Forward,
            Action::TurnLeft,
            Action::TurnRight,
            Action::Suck,
            Action::NoOp,
        ]
    }

    #[must_use]
    pub const fn is_turn(self) -> bool {
        matches!(self, Self::TurnLeft | Self::TurnRight)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::TurnLeft => "turn-left",
            Self::TurnRight => "turn-right",
            Self::Suck => "suck",
            Self::NoOp => "no-op",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts one absolute grid step into turns plus a forward move.
///
/// A reversal is always realised as two right turns.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActionPlanner;

impl ActionPlanner {
    /// Actions that take an agent facing `current` one tile towards `target`.
    ///
    /// The result always ends in [`Action::Forward`] and holds at most two
    /// turns before it.
    #[must_use]
    pub fn translate(current: Heading, target: Heading) -> Vec<Action> {
        match current.clockwise_steps_to(target) {
            0 => vec![Action::Forward],
            1 => vec![Action::TurnRight, Action::Forward],
            2 => vec![Action::TurnRight, Action::TurnRight, Action::Forward],
            _ => vec![Action::TurnLeft, Action::Forward],
        }
    }

    /// Heading after applying every turn in `actions` to `start`.
    #[must_use]
    pub fn resulting_heading(start: Heading, actions: &[Action]) -> Heading {
        actions.iter().fold(start, |h, action| match action {
            Action::TurnLeft => h.turn_left(),
            Action::TurnRight => h.turn_right(),
            Action::Forward | Action::Suck | Action::NoOp => h,
        })
    }
}
