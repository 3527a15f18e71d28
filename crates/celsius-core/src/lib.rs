//! Core types and traits for the Celsius thermal simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: cell and object
//! identifiers, thermal properties, the terrain catalogue, the traits a
//! host map implements, the persisted per-map state and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod state;
pub mod terrain;
pub mod thermal;
pub mod thing;
pub mod traits;

pub use error::ThermalError;
pub use id::{Cell, MapId, TerrainId, ThingId};
pub use state::MapThermalState;
pub use terrain::{Affordances, Biome, TerrainDef, TerrainRegistry};
pub use thermal::ThermalProperties;
pub use thing::{Thing, ThingKind};
pub use traits::{Letter, LetterKind, MapReader, MapWriter};
