//! Spatial layout for Celsius maps.
//!
//! [`MapGrid`] is the single source of truth for bounds checks, flat
//! indexing and 4-neighbour enumeration. Maps are bounded: cells on the
//! edge simply have fewer neighbours.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;

pub use error::SpaceError;
pub use grid::MapGrid;
