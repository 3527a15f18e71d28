//! Benchmark profiles for the Celsius thermal simulation.
//!
//! - [`reference_profile`]: 100x100 map (10K cells), a typical colony
//! - [`stress_profile`]: 250x250 map (62.5K cells), the largest common map
//! - [`build_world`]: an initialised world and host for a profile

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use celsius_core::MapId;
use celsius_engine::{ThermalConfig, ThermalWorld};
use celsius_test_utils::fixtures::{self, MapProfile};
use celsius_test_utils::MockMap;

/// Map id used by every benchmark world.
pub const BENCH_MAP: MapId = MapId(0);

/// 100x100 map with walls, ponds and open sky.
pub fn reference_profile() -> MapProfile {
    MapProfile {
        width: 100,
        height: 100,
        ..MapProfile::default()
    }
}

/// 250x250 map, same densities as [`reference_profile`].
pub fn stress_profile() -> MapProfile {
    MapProfile {
        width: 250,
        height: 250,
        ..MapProfile::default()
    }
}

/// Build a host from `profile` and a world simulating it, with random
/// starting temperatures between -20° and 40°.
///
/// Panics if the profile does not describe a valid map.
pub fn build_world(profile: &MapProfile, config: ThermalConfig, seed: u64) -> (ThermalWorld, MockMap) {
    let host = fixtures::random_map(profile, seed);
    let mut world = ThermalWorld::new(config).expect("benchmark config is valid");
    world.init_map(BENCH_MAP, &host).expect("benchmark map is valid");
    for (cell, t) in fixtures::random_temperatures(&host, -20.0, 40.0, seed) {
        world.set_temperature_for_cell(BENCH_MAP, cell, t);
    }
    (world, host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_world_updates() {
        let profile = MapProfile {
            width: 10,
            height: 10,
            ..reference_profile()
        };
        let (mut world, mut host) = build_world(&profile, ThermalConfig::default(), 1);
        let metrics = world.update(BENCH_MAP, &mut host).unwrap();
        assert!(metrics.max_delta > 0.0);
    }
}
