//! Error types shared across the thermal simulation.
//!
//! Missing-simulation is recoverable: the host-facing API degrades to the
//! map's outdoor temperature and only the `try_*` accessors surface it.
//! Invalid capacities are programming errors in the host's stat data.

use std::error::Error;
use std::fmt;

use crate::id::{Cell, MapId};

/// Errors from thermal queries and updates.
#[derive(Clone, Debug, PartialEq)]
pub enum ThermalError {
    /// The map has no initialised temperature grid.
    MissingSimulation {
        /// The map that was queried.
        map: MapId,
    },
    /// A cell lies outside the grid it was used with.
    CellOutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// A resolved heat capacity was zero, negative or not finite.
    InvalidCapacity {
        /// The cell whose properties were resolved.
        cell: Cell,
        /// The capacity that was found.
        capacity: f32,
    },
    /// Saved state does not fit the map it is being restored onto.
    InvalidState {
        /// What did not match.
        reason: String,
    },
}

impl fmt::Display for ThermalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSimulation { map } => {
                write!(f, "no temperature grid initialised for {map}")
            }
            Self::CellOutOfBounds {
                cell,
                width,
                height,
            } => write!(f, "cell {cell} out of bounds [0, {width}) x [0, {height})"),
            Self::InvalidCapacity { cell, capacity } => {
                write!(f, "heat capacity at {cell} must be positive, got {capacity}")
            }
            Self::InvalidState { reason } => write!(f, "invalid thermal state: {reason}"),
        }
    }
}

impl Error for ThermalError {}
