//! Error types for grid construction and lookups.

use celsius_core::Cell;
use std::fmt;

/// Errors arising from grid construction or cell lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// A cell is outside the grid.
    CellOutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// Attempted to construct a grid with zero cells.
    EmptyGrid,
    /// A dimension exceeds what cell coordinates can address.
    DimensionTooLarge {
        /// Which dimension.
        name: &'static str,
        /// The requested size.
        value: u32,
        /// The largest accepted size.
        max: u32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellOutOfBounds { cell, bounds } => {
                write!(f, "cell {cell} out of bounds: {bounds}")
            }
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum {max}")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
