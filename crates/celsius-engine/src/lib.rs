//! Per-map thermal simulation for Celsius.
//!
//! Ties the pieces together: [`ThermalPropertyResolver`] turns cells
//! into thermal properties, [`TemperatureGrid`] runs the diffusion pass
//! with a [`DiffusionEngine`](celsius_diffusion::DiffusionEngine),
//! [`PhaseChangeController`] freezes and melts terrain, and
//! [`ThermalWorld`] exposes all of it to the host, one grid per map.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod grid;
pub mod heat;
pub mod metrics;
pub mod phase;
pub mod properties;
pub mod world;

pub use config::{ConfigError, ThermalConfig};
pub use grid::TemperatureGrid;
pub use heat::{classify_danger, fire_heat_push, Danger};
pub use metrics::UpdateMetrics;
pub use phase::{MeltOutcome, PhaseChange, PhaseChangeController, UnderTerrainMap};
pub use properties::ThermalPropertyResolver;
pub use world::ThermalWorld;
