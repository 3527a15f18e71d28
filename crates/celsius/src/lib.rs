//! Celsius: per-cell temperature simulation for grid-based game maps.
//!
//! This facade re-exports the public API of the Celsius sub-crates, so a
//! host only needs the one dependency.
//!
//! # Quick start
//!
//! The host implements [`types::MapReader`] and [`types::MapWriter`] for
//! its map; here the test double stands in.
//!
//! ```rust
//! use celsius::prelude::*;
//! use celsius_test_utils::MockMap;
//!
//! let mut host = MockMap::new(16, 16);
//! host.set_outdoor_temperature(-10.0);
//!
//! let mut world = ThermalWorld::new(ThermalConfig::default()).unwrap();
//! world.init_map(MapId(0), &host).unwrap();
//!
//! // A heater in the middle of the map.
//! let heater = Cell::new(8, 8);
//! assert!(world.push_heat(MapId(0), &host, heater, 100.0));
//! let hot = world.temperature_for_cell(MapId(0), &host, heater);
//!
//! // Heat spreads on the next pass.
//! world.update(MapId(0), &mut host).unwrap();
//! assert!(world.temperature_for_cell(MapId(0), &host, heater) < hot);
//! assert!(world.temperature_for_cell(MapId(0), &host, Cell::new(8, 9)) > -10.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `celsius-core` | Ids, terrain and thing data, host traits, errors |
//! | [`space`] | `celsius-space` | Grid bounds, indexing and neighbours |
//! | [`diffusion`] | `celsius-diffusion` | Heat exchange formulas |
//! | [`engine`] | `celsius-engine` | Per-map simulation and the host-facing API |
//! | [`persist`] | `celsius-persist` | Save format and state hashing |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Ids, terrain and thing data, host traits and errors (`celsius-core`).
pub use celsius_core as types;

/// Grid bounds, indexing and neighbour enumeration (`celsius-space`).
pub use celsius_space as space;

/// Heat exchange between cells (`celsius-diffusion`).
///
/// [`diffusion::DiffusionEngine`] holds the exchange formulas and the
/// cached air constants.
pub use celsius_diffusion as diffusion;

/// Per-map simulation (`celsius-engine`).
///
/// [`engine::ThermalWorld`] is the entry point hosts call into.
pub use celsius_engine as engine;

/// Saving and loading thermal state (`celsius-persist`).
pub use celsius_persist as persist;

/// Common imports for typical Celsius usage.
///
/// ```rust
/// use celsius::prelude::*;
/// ```
pub mod prelude {
    // Core types and host traits
    pub use celsius_core::{
        Affordances, Biome, Cell, Letter, LetterKind, MapId, MapReader, MapThermalState,
        MapWriter, TerrainDef, TerrainId, TerrainRegistry, ThermalProperties, Thing, ThingId,
        ThingKind,
    };

    // Errors
    pub use celsius_core::ThermalError;
    pub use celsius_engine::ConfigError;
    pub use celsius_persist::PersistError;
    pub use celsius_space::SpaceError;

    // Engine
    pub use celsius_engine::{Danger, ThermalConfig, ThermalWorld, UpdateMetrics};
}
