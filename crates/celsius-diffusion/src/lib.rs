//! Heat exchange math for Celsius.
//!
//! [`DiffusionEngine`] turns two temperatures and their thermal
//! properties into per-update temperature deltas. It is pure: the grid
//! pass in `celsius-engine` decides which pairs exchange and when the
//! deltas are applied.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod engine;

pub use engine::{DiffusionEngine, DiffusionEngineBuilder, MAX_RELAXATION, TEMPERATURE_CHANGE_PRECISION};
