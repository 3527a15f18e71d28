//! Seeded map fixtures.
//!
//! Every builder takes a seed and uses `ChaCha8Rng`, so a fixture is the
//! same on every platform and run.

use celsius_core::terrain::names;
use celsius_core::{Cell, ThermalProperties, Thing, ThingId, ThingKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::MockMap;

/// Thermal properties of a stone wall.
pub const WALL: ThermalProperties = ThermalProperties::new(2500.0, 1.5);

/// Thermal properties of a wooden door.
pub const DOOR: ThermalProperties = ThermalProperties::new(1000.0, 0.15);

/// Knobs for [`random_map`].
#[derive(Clone, Debug)]
pub struct MapProfile {
    pub width: u32,
    pub height: u32,
    /// Chance a cell holds a wall.
    pub wall_density: f64,
    /// Chance a cell is shallow water.
    pub water_density: f64,
    /// Chance a cell is open to the sky.
    pub exposed_density: f64,
    /// Chance a free cell holds a flammable item.
    pub flammable_density: f64,
    pub outdoor_temperature: f32,
}

impl Default for MapProfile {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            wall_density: 0.15,
            water_density: 0.05,
            exposed_density: 0.3,
            flammable_density: 0.05,
            outdoor_temperature: 10.0,
        }
    }
}

/// A map scattered with walls, ponds, open sky and flammable items.
pub fn random_map(profile: &MapProfile, seed: u64) -> MockMap {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut map = MockMap::new(profile.width, profile.height);
    map.set_outdoor_temperature(profile.outdoor_temperature);
    let mut next_id = 1u64;
    let cells: Vec<Cell> = map.grid().cells().collect();
    for cell in cells {
        if rng.gen_bool(profile.water_density) {
            map.set_terrain_named(cell, names::WATER_SHALLOW);
        } else if rng.gen_bool(profile.wall_density) {
            map.add_thing(
                cell,
                Thing::new(ThingId(next_id), "wall", ThingKind::Building).with_thermal(WALL),
            );
            next_id += 1;
        } else if rng.gen_bool(profile.flammable_density) {
            let ignition = rng.gen_range(150.0..400.0);
            map.add_thing(
                cell,
                Thing::new(ThingId(next_id), "wood", ThingKind::Item).with_ignition(ignition),
            );
            next_id += 1;
        }
        if rng.gen_bool(profile.exposed_density) {
            map.set_exposed(cell, true);
        }
    }
    map
}

/// A `size x size` lake of shallow water ringed by soil.
pub fn lake(size: u32) -> MockMap {
    let mut map = MockMap::new(size, size);
    let grid = map.grid();
    let cells: Vec<Cell> = grid.cells().filter(|&c| !grid.on_edge(c)).collect();
    for cell in cells {
        map.set_terrain_named(cell, names::WATER_SHALLOW);
    }
    map
}

/// Random initial temperatures in `[low, high)`, one per cell of `map`.
pub fn random_temperatures(map: &MockMap, low: f32, high: f32, seed: u64) -> Vec<(Cell, f32)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    map.grid()
        .cells()
        .map(|cell| (cell, rng.gen_range(low..high)))
        .collect()
}
