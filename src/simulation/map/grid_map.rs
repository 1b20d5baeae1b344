//! Fixed-size tile map built from percepts.

use std::fmt;

use crate::simulation::params::{HOME_X, HOME_Y};

/// Classification of a single tile as far as the agent knows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileState {
    /// Never observed
    #[default]
    Unknown,
    /// Inferred from a bump
    Wall,
    /// Stood on, no dirt seen
    Clear,
    /// Stood on, dirt seen
    Dirt,
    /// The fixed origin tile
    Home,
}

impl TileState {
    /// Returns true if the search may step onto this tile.
    #[must_use]
    pub const fn is_traversable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Returns true once the tile has been classified.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Single-character glyph used by the debug renderers.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Unknown => '?',
            Self::Wall => '#',
            Self::Clear => '.',
            Self::Dirt => 'D',
            Self::Home => 'H',
        }
    }
}

/// A tile coordinate. `y` grows downwards (South).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The fixed Home tile.
    #[must_use]
    pub const fn home() -> Self {
        Self::new(HOME_X, HOME_Y)
    }

    /// Returns this coordinate shifted by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four edge-adjacent coordinates, in East, West, South, North order.
    #[must_use]
    pub const fn neighbors(self) -> [Self; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }

    /// Returns true if `other` shares an edge with `self`.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The agent's believed map: a `width` x `height` array of tile states.
///
/// Home is seeded at (1, 1) on construction. The map enforces nothing
/// beyond bounds; keeping Home intact is the controller's job.
#[derive(Clone, Debug)]
pub struct GridMap {
    tiles: Vec<TileState>,
    width: usize,
    height: usize,
}

impl GridMap {
    /// Creates a map of unknown tiles with Home at (1, 1).
    ///
    /// # Panics
    ///
    /// Panics if the grid is too small to contain the Home tile.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let mut map = Self {
            tiles: vec![TileState::Unknown; width * height],
            width,
            height,
        };
        map.set(GridCoord::home(), TileState::Home);
        map
    }

    /// Returns grid dimensions as `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns true if `coord` lies inside `[0, width) x [0, height)`.
    #[must_use]
    #[allow(clippy::cast_sign_loss)] // Sign checked first
    pub const fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    #[allow(clippy::cast_sign_loss)]
    fn index(&self, coord: GridCoord) -> Option<usize> {
        self.contains(coord)
            .then(|| coord.y as usize * self.width + coord.x as usize)
    }

    fn index_or_panic(&self, coord: GridCoord) -> usize {
        match self.index(coord) {
            Some(i) => i,
            None => panic!(
                "coordinate {coord} out of bounds for {}x{} map",
                self.width, self.height
            ),
        }
    }

    /// Returns the tile state at `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is outside the grid. The world is walled, so an
    /// out-of-bounds query means the pose or the search is corrupt.
    #[must_use]
    pub fn get(&self, coord: GridCoord) -> TileState {
        self.tiles[self.index_or_panic(coord)]
    }

    /// Returns the tile state at `coord`, or `None` outside the grid.
    #[must_use]
    pub fn try_get(&self, coord: GridCoord) -> Option<TileState> {
        self.index(coord).map(|i| self.tiles[i])
    }

    /// Overwrites the tile state at `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is outside the grid.
    pub fn set(&mut self, coord: GridCoord, state: TileState) {
        let i = self.index_or_panic(coord);
        self.tiles[i] = state;
    }

    /// Iterates the tiles of row `y` from West to East.
    pub fn row(&self, y: usize) -> impl Iterator<Item = TileState> + '_ {
        self.tiles[y * self.width..(y + 1) * self.width].iter().copied()
    }

    /// Number of tiles still `Unknown`.
    #[must_use]
    pub fn unknown_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.is_known()).count()
    }

    /// Number of tiles in the given state.
    #[must_use]
    pub fn count(&self, state: TileState) -> usize {
        self.tiles.iter().filter(|&&t| t == state).count()
    }
}
