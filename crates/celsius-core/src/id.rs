//! Strongly-typed identifiers and the [`Cell`] coordinate.

use std::fmt;
use std::ops::Add;

/// A cell on a map, addressed by integer grid coordinates.
///
/// `x` grows eastward and `y` grows northward. A `Cell` is only a key: the
/// owning grid decides whether it is in bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Cell {
    /// One step north.
    pub const NORTH: Cell = Cell { x: 0, y: 1 };
    /// One step south.
    pub const SOUTH: Cell = Cell { x: 0, y: -1 };
    /// One step west.
    pub const WEST: Cell = Cell { x: -1, y: 0 };
    /// One step east.
    pub const EAST: Cell = Cell { x: 1, y: 0 };

    /// Create a cell at `(x, y)`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The four orthogonal neighbours in N, S, W, E order.
    ///
    /// No bounds checking; see `MapGrid::neighbours` for the in-bounds subset.
    pub fn adjacent(self) -> [Cell; 4] {
        [
            self + Self::NORTH,
            self + Self::SOUTH,
            self + Self::WEST,
            self + Self::EAST,
        ]
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Identifies a map owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapId(pub u32);

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map#{}", self.0)
    }
}

impl From<u32> for MapId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies an object (pawn, building, item, filth...) on a host map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThingId(pub u64);

impl fmt::Display for ThingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "thing#{}", self.0)
    }
}

impl From<u64> for ThingId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Index of a terrain definition inside a [`TerrainRegistry`](crate::TerrainRegistry).
///
/// Only meaningful against the registry that issued it. Persisted state
/// stores terrain names instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerrainId(pub u16);

impl fmt::Display for TerrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for TerrainId {
    fn from(v: u16) -> Self {
        Self(v)
    }
}
