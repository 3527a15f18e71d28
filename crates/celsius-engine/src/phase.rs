//! Freezing and melting of terrain.
//!
//! Water at or below its freezing point turns to ice, and the water is
//! remembered in the [`UnderTerrainMap`]. Ice above [`MELT_THRESHOLD`]
//! turns back into the remembered water, or into a best guess inferred
//! from the neighbours when there is no record (natural ice from world
//! generation). Things that cannot survive on the new terrain are
//! killed, destroyed or uncovered before the terrain changes.

use std::collections::BTreeMap;

use celsius_core::terrain::names;
use celsius_core::{
    Biome, Cell, Letter, LetterKind, MapReader, MapWriter, TerrainDef, TerrainId, ThingKind,
};
use celsius_space::MapGrid;

/// Ice melts once its temperature rises above this.
pub const MELT_THRESHOLD: f32 = 0.0;

/// Terrain recorded beneath frozen cells, keyed by flat cell index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnderTerrainMap {
    entries: BTreeMap<usize, TerrainId>,
}

impl UnderTerrainMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from saved `(cell index, terrain)` pairs.
    pub fn from_pairs(pairs: &[(u32, TerrainId)]) -> Self {
        Self {
            entries: pairs.iter().map(|&(i, t)| (i as usize, t)).collect(),
        }
    }

    /// Entries as `(cell index, terrain)` pairs in ascending cell order.
    pub fn to_pairs(&self) -> Vec<(u32, TerrainId)> {
        self.entries
            .iter()
            .filter_map(|(&i, &t)| u32::try_from(i).ok().map(|i| (i, t)))
            .collect()
    }

    /// Recorded terrain at `index`.
    pub fn get(&self, index: usize) -> Option<TerrainId> {
        self.entries.get(&index).copied()
    }

    /// Record `terrain` at `index`, returning any previous record.
    pub fn insert(&mut self, index: usize, terrain: TerrainId) -> Option<TerrainId> {
        self.entries.insert(index, terrain)
    }

    /// Forget the record at `index`.
    pub fn remove(&mut self, index: usize) -> Option<TerrainId> {
        self.entries.remove(&index)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What melting did to the things in a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeltOutcome {
    /// Living things that drowned.
    pub pawns_killed: u32,
    /// Things destroyed outright (sunk, unsupported, filth, graves).
    pub things_destroyed: u32,
    /// Graves whose contents were ejected.
    pub graves_uncovered: u32,
}

/// A terrain transition performed by [`PhaseChangeController::check_cell`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseChange {
    /// Water turned to ice.
    Froze {
        /// The water that is now under the ice.
        water: TerrainId,
    },
    /// Ice turned into `into`.
    Melted {
        /// Restored or inferred terrain.
        into: TerrainId,
        /// Consequences for things in the cell.
        outcome: MeltOutcome,
    },
}

/// Per-map phase change state machine.
#[derive(Clone, Debug)]
pub struct PhaseChangeController {
    grid: MapGrid,
    under_terrain: UnderTerrainMap,
}

impl PhaseChangeController {
    /// A controller with no recorded under-terrain.
    pub fn new(grid: MapGrid) -> Self {
        Self::with_under_terrain(grid, UnderTerrainMap::new())
    }

    /// A controller resuming from saved records.
    pub fn with_under_terrain(grid: MapGrid, under_terrain: UnderTerrainMap) -> Self {
        Self {
            grid,
            under_terrain,
        }
    }

    /// Recorded under-terrain.
    pub fn under_terrain(&self) -> &UnderTerrainMap {
        &self.under_terrain
    }

    /// Whether `terrain` freezes at `temperature`.
    pub fn should_freeze(terrain: &TerrainDef, temperature: f32) -> bool {
        terrain.water && temperature <= terrain.freezing_point()
    }

    /// Whether ice melts at `temperature`.
    pub fn should_melt(temperature: f32) -> bool {
        temperature > MELT_THRESHOLD
    }

    /// Freeze or melt `cell` if `temperature` calls for it.
    pub fn check_cell<M: MapWriter + ?Sized>(
        &mut self,
        map: &mut M,
        cell: Cell,
        temperature: f32,
    ) -> Option<PhaseChange> {
        let index = self.grid.index_of(cell)?;
        let terrain = map.terrain_at(cell);
        let registry = map.terrains();

        if registry.is_ice(terrain) {
            if Self::should_melt(temperature) {
                return self
                    .melt(map, cell)
                    .map(|(into, outcome)| PhaseChange::Melted { into, outcome });
            }
            return None;
        }

        if let Some(stale) = self.under_terrain.remove(index) {
            log::warn!(
                "dropping under-terrain {:?} at {cell}: cell is no longer ice",
                stale
            );
        }
        let freezes = registry
            .get(terrain)
            .is_some_and(|def| Self::should_freeze(def, temperature));
        if freezes {
            return self
                .freeze(map, cell)
                .map(|water| PhaseChange::Froze { water });
        }
        None
    }

    /// Turn the water at `cell` into ice and remember it.
    ///
    /// Returns the frozen water terrain, or `None` if the cell is not
    /// water or no ice terrain is registered.
    pub fn freeze<M: MapWriter + ?Sized>(&mut self, map: &mut M, cell: Cell) -> Option<TerrainId> {
        let index = self.grid.index_of(cell)?;
        let water = map.terrain_at(cell);
        let registry = map.terrains();
        let def = registry.get(water).filter(|def| def.water)?;
        let ice = registry.ice()?;
        log::debug!("{} freezes at {cell}", def.label);
        map.set_terrain(cell, ice);
        self.under_terrain.insert(index, water);
        Some(water)
    }

    /// Turn the ice at `cell` back into water, removing things that
    /// cannot stay, and clear the snow.
    ///
    /// Returns `None` if the cell is out of bounds, is not ice, or no
    /// plausible water terrain is registered.
    pub fn melt<M: MapWriter + ?Sized>(
        &mut self,
        map: &mut M,
        cell: Cell,
    ) -> Option<(TerrainId, MeltOutcome)> {
        let index = self.grid.index_of(cell)?;
        if !map.terrains().is_ice(map.terrain_at(cell)) {
            return None;
        }
        let Some(into) = self.best_under_ice_terrain(&*map, cell) else {
            log::warn!("ice at {cell} cannot melt: no water terrain registered");
            return None;
        };
        let def = map.terrains().get(into)?.clone();
        let outcome = apply_melt_consequences(map, cell, &def);
        self.under_terrain.remove(index);
        log::debug!("ice melts at {cell} into {}", def.name);
        map.set_terrain(cell, into);
        map.set_snow_depth(cell, 0.0);
        Some((into, outcome))
    }

    /// The terrain ice at `cell` should melt into.
    ///
    /// The recorded under-terrain wins. Otherwise the first neighbour
    /// (N, S, W, E) that is water, or has water recorded under its ice,
    /// is copied. Failing that, shallow water if any neighbour is solid
    /// ground and deep water if the cell is surrounded by ice; ocean
    /// variants on sea ice.
    pub fn best_under_ice_terrain<M: MapReader + ?Sized>(
        &self,
        map: &M,
        cell: Cell,
    ) -> Option<TerrainId> {
        if let Some(recorded) = self
            .grid
            .index_of(cell)
            .and_then(|i| self.under_terrain.get(i))
        {
            return Some(recorded);
        }

        let registry = map.terrains();
        let is_water = |t: TerrainId| registry.get(t).is_some_and(|def| def.water);
        let mut found_ground = false;
        for n in self.grid.neighbours(cell) {
            let terrain = map.terrain_at(n);
            if is_water(terrain) {
                return Some(terrain);
            }
            let under = self
                .grid
                .index_of(n)
                .and_then(|i| self.under_terrain.get(i));
            if let Some(under) = under.filter(|&u| is_water(u)) {
                return Some(under);
            }
            if !registry.is_ice(terrain) || under.is_some_and(|u| !registry.is_ice(u)) {
                found_ground = true;
            }
        }

        let name = match (found_ground, map.biome()) {
            (true, Biome::SeaIce) => names::WATER_OCEAN_SHALLOW,
            (true, Biome::Land) => names::WATER_SHALLOW,
            (false, Biome::SeaIce) => names::WATER_OCEAN_DEEP,
            (false, Biome::Land) => names::WATER_DEEP,
        };
        registry.id_of(name)
    }
}

/// Remove or kill whatever cannot stay on `melted`, last thing first.
pub fn apply_melt_consequences<M: MapWriter + ?Sized>(
    map: &mut M,
    cell: Cell,
    melted: &TerrainDef,
) -> MeltOutcome {
    let mut outcome = MeltOutcome::default();
    let things = map.things_at(cell).to_vec();
    for thing in things.iter().rev() {
        if !melted.passable {
            if thing.is_pawn() {
                log::info!("{} sinks in {} and dies", thing.label, melted.label);
                if thing.player_owned {
                    map.send_letter(Letter {
                        kind: LetterKind::Death,
                        label: format!("{} sunk", thing.label),
                        text: format!(
                            "{} sunk in {} when ice melted.",
                            thing.label, melted.label
                        ),
                        cell,
                    });
                }
                if let Some(remains) = map.kill(thing.id) {
                    map.destroy(remains);
                }
                outcome.pawns_killed += 1;
            } else {
                log::info!("{} sinks in {}", thing.label, melted.label);
                map.destroy(thing.id);
                outcome.things_destroyed += 1;
            }
        } else if thing.kind == (ThingKind::Grave { has_contents: true }) {
            log::info!("{} is uncovered by melting ice", thing.label);
            map.eject_contents(thing.id);
            map.destroy(thing.id);
            outcome.graves_uncovered += 1;
            outcome.things_destroyed += 1;
        } else if thing
            .terrain_affordance
            .is_some_and(|needed| !melted.provides(needed))
        {
            log::info!(
                "{} can't stand on {} and is destroyed",
                thing.label,
                melted.label
            );
            map.destroy(thing.id);
            outcome.things_destroyed += 1;
        } else if thing.kind == ThingKind::Filth && !melted.accepts_filth {
            log::debug!("removing filth {} from {}", thing.label, melted.label);
            map.destroy(thing.id);
            outcome.things_destroyed += 1;
        }
    }
    outcome
}
