//! Breadth-first frontier search over the believed map.
//!
//! The search starts at the agent's tile and walks 4-connected neighbours
//! that are not known walls. Goals are tested when a tile is popped, so an
//! `Unknown` tile ends the search without being expanded past.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::simulation::map::{GridCoord, GridMap, TileState};
use crate::simulation::pose::Heading;

/// What the search is looking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    /// Nearest tile whose state is `Unknown`
    FindUnknown,
    /// The Home tile
    GoHome,
}

/// Absolute steps from the agent to a goal.
///
/// Stored goal-first; [`Path::next_step`] pops from the back so steps come
/// out in travel order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    steps: Vec<Heading>,
}

impl Path {
    /// Builds a path from steps listed goal-to-start.
    #[must_use]
    pub fn from_goal_order(steps: Vec<Heading>) -> Self {
        Self { steps }
    }

    /// Removes and returns the next step to take.
    pub fn next_step(&mut self) -> Option<Heading> {
        self.steps.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Remaining steps in travel order.
    pub fn iter(&self) -> impl Iterator<Item = Heading> + '_ {
        self.steps.iter().rev().copied()
    }

    /// Tiles visited when following the path from `start`, `start` included.
    #[must_use]
    pub fn waypoints(&self, start: GridCoord) -> Vec<GridCoord> {
        let mut out = Vec::with_capacity(self.len() + 1);
        out.push(start);
        let mut at = start;
        for h in self.iter() {
            at = h.step(at);
            out.push(at);
        }
        out
    }
}

/// Breadth-first search bound to one map snapshot.
pub struct FrontierSearch<'a> {
    map: &'a GridMap,
}

impl<'a> FrontierSearch<'a> {
    #[must_use]
    pub const fn new(map: &'a GridMap) -> Self {
        Self { map }
    }

    fn is_goal(&self, node: GridCoord, mode: SearchMode) -> bool {
        match mode {
            SearchMode::FindUnknown => self.map.get(node) == TileState::Unknown,
            SearchMode::GoHome => node == GridCoord::home(),
        }
    }

    /// Finds the path to the first goal tile reached in breadth-first order.
    ///
    /// Returns `None` when the frontier drains without reaching a goal. A
    /// start tile that is itself the goal yields an empty path.
    ///
    /// # Panics
    ///
    /// Panics if `start` is outside the map.
    #[must_use]
    pub fn search(&self, start: GridCoord, mode: SearchMode) -> Option<Path> {
        // Scoped to this call; dropped once the path is rebuilt.
        let mut parents: HashMap<GridCoord, Option<GridCoord>> = HashMap::new();
        let mut frontier: VecDeque<GridCoord> = VecDeque::new();
        parents.insert(start, None);
        frontier.push_back(start);
        let mut expanded = 0usize;

        while let Some(node) = frontier.pop_front() {
            if self.is_goal(node, mode) {
                let path = Self::reconstruct(&parents, node);
                debug!(%start, goal = %node, ?mode, expanded, steps = path.len(), "frontier search found goal");
                return Some(path);
            }
            expanded += 1;
            for next in node.neighbors() {
                if parents.contains_key(&next) {
                    continue;
                }
                if self.map.try_get(next).is_some_and(TileState::is_traversable) {
                    parents.insert(next, Some(node));
                    frontier.push_back(next);
                }
            }
        }

        debug!(%start, ?mode, expanded, "frontier search exhausted");
        None
    }

    /// Walks parent links from `goal` back to the start.
    fn reconstruct(parents: &HashMap<GridCoord, Option<GridCoord>>, goal: GridCoord) -> Path {
        let mut steps = Vec::new();
        let mut child = goal;
        while let Some(parent) = parents[&child] {
            let Some(heading) = Heading::between(parent, child) else {
                panic!("search tree links non-adjacent tiles {parent} -> {child}");
            };
            steps.push(heading);
            child = parent;
        }
        Path::from_goal_order(steps)
    }
}

/// Convenience wrapper around [`FrontierSearch::search`].
#[must_use]
pub fn search(map: &GridMap, start: GridCoord, mode: SearchMode) -> Option<Path> {
    FrontierSearch::new(map).search(start, mode)
}
