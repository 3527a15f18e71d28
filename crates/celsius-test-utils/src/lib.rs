//! Test utilities and mock host maps for Celsius development.
//!
//! [`MockMap`] implements [`MapReader`] and [`MapWriter`] over plain
//! vectors and records every side effect (kills, destructions, letters,
//! fires) so tests can assert on them. [`fixtures`] builds seeded,
//! reproducible maps for larger scenarios and benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use celsius_core::terrain::names;
use celsius_core::{
    Biome, Cell, Letter, MapReader, MapWriter, TerrainId, TerrainRegistry, Thing, ThingId,
    ThingKind,
};
use celsius_space::MapGrid;

/// First id handed out for remains created by [`MapWriter::kill`].
const REMAINS_ID_BASE: u64 = 1 << 40;

/// In-memory host map.
///
/// Starts as all soil on a land biome at 21° outdoors, with the default
/// terrain registry. Out-of-bounds reads return soil and no things.
#[derive(Clone, Debug)]
pub struct MockMap {
    grid: MapGrid,
    registry: TerrainRegistry,
    soil: TerrainId,
    terrain: Vec<TerrainId>,
    things: Vec<Vec<Thing>>,
    snow: Vec<f32>,
    exposed: Vec<bool>,
    biome: Biome,
    outdoor: f32,
    refuse_fires: bool,
    next_remains: u64,
    letters: Vec<Letter>,
    killed: Vec<ThingId>,
    destroyed: Vec<ThingId>,
    ejected: Vec<ThingId>,
    fires: Vec<Cell>,
}

impl MockMap {
    /// A `width x height` soil map. Panics on an empty or oversized grid.
    pub fn new(width: u32, height: u32) -> Self {
        let grid = MapGrid::new(width, height).expect("valid mock map size");
        let registry = TerrainRegistry::with_defaults();
        let soil = registry.id_of(names::SOIL).expect("soil is a default terrain");
        let n = grid.cell_count();
        Self {
            grid,
            registry,
            soil,
            terrain: vec![soil; n],
            things: vec![Vec::new(); n],
            snow: vec![0.0; n],
            exposed: vec![false; n],
            biome: Biome::Land,
            outdoor: 21.0,
            refuse_fires: false,
            next_remains: REMAINS_ID_BASE,
            letters: Vec::new(),
            killed: Vec::new(),
            destroyed: Vec::new(),
            ejected: Vec::new(),
            fires: Vec::new(),
        }
    }

    pub fn with_biome(mut self, biome: Biome) -> Self {
        self.biome = biome;
        self
    }

    /// Layout of the map.
    pub fn grid(&self) -> MapGrid {
        self.grid
    }

    pub fn registry_mut(&mut self) -> &mut TerrainRegistry {
        &mut self.registry
    }

    pub fn set_outdoor_temperature(&mut self, temperature: f32) {
        self.outdoor = temperature;
    }

    pub fn set_exposed(&mut self, cell: Cell, exposed: bool) {
        let i = self.index(cell);
        self.exposed[i] = exposed;
    }

    /// Make the host refuse (or accept) fire requests.
    pub fn refuse_fires(&mut self, refuse: bool) {
        self.refuse_fires = refuse;
    }

    pub fn add_thing(&mut self, cell: Cell, thing: Thing) {
        let i = self.index(cell);
        self.things[i].push(thing);
    }

    /// Open or close the thing with `id`. Returns false if it is not on
    /// the map.
    pub fn set_open(&mut self, id: ThingId, open: bool) -> bool {
        match self.things.iter_mut().flatten().find(|t| t.id == id) {
            Some(thing) => {
                thing.open = open;
                true
            }
            None => false,
        }
    }

    /// Set the terrain by name. Panics if the name is not registered.
    pub fn set_terrain_named(&mut self, cell: Cell, name: &str) {
        let id = self
            .registry
            .id_of(name)
            .unwrap_or_else(|| panic!("unknown terrain {name}"));
        let i = self.index(cell);
        self.terrain[i] = id;
    }

    pub fn terrain_name(&self, cell: Cell) -> &str {
        self.registry
            .name_of(self.terrain_at(cell))
            .unwrap_or("<unregistered>")
    }

    pub fn snow_depth(&self, cell: Cell) -> f32 {
        self.snow[self.index(cell)]
    }

    /// Letters delivered so far.
    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    /// Things killed so far, in order.
    pub fn killed(&self) -> &[ThingId] {
        &self.killed
    }

    /// Things destroyed so far, in order (remains included).
    pub fn destroyed(&self) -> &[ThingId] {
        &self.destroyed
    }

    /// Containers whose contents were ejected.
    pub fn ejected(&self) -> &[ThingId] {
        &self.ejected
    }

    /// Cells where fires were started.
    pub fn fires(&self) -> &[Cell] {
        &self.fires
    }

    fn index(&self, cell: Cell) -> usize {
        self.grid
            .index_of(cell)
            .unwrap_or_else(|| panic!("cell {cell} outside mock map"))
    }

    fn take_thing(&mut self, id: ThingId) -> Option<(usize, Thing)> {
        self.things.iter_mut().enumerate().find_map(|(i, cell)| {
            let pos = cell.iter().position(|t| t.id == id)?;
            Some((i, cell.remove(pos)))
        })
    }
}

impl MapReader for MockMap {
    fn size(&self) -> (u32, u32) {
        (self.grid.width(), self.grid.height())
    }

    fn things_at(&self, cell: Cell) -> &[Thing] {
        self.grid
            .index_of(cell)
            .map_or(&[], |i| self.things[i].as_slice())
    }

    fn terrain_at(&self, cell: Cell) -> TerrainId {
        self.grid
            .index_of(cell)
            .map_or(self.soil, |i| self.terrain[i])
    }

    fn terrains(&self) -> &TerrainRegistry {
        &self.registry
    }

    fn biome(&self) -> Biome {
        self.biome
    }

    fn outdoor_temperature(&self) -> f32 {
        self.outdoor
    }

    fn is_exposed(&self, cell: Cell) -> bool {
        self.grid.index_of(cell).is_some_and(|i| self.exposed[i])
    }
}

impl MapWriter for MockMap {
    fn set_terrain(&mut self, cell: Cell, terrain: TerrainId) {
        let i = self.index(cell);
        self.terrain[i] = terrain;
    }

    fn set_snow_depth(&mut self, cell: Cell, depth: f32) {
        let i = self.index(cell);
        self.snow[i] = depth;
    }

    fn kill(&mut self, thing: ThingId) -> Option<ThingId> {
        let (i, victim) = self.take_thing(thing)?;
        self.killed.push(thing);
        let remains = ThingId(self.next_remains);
        self.next_remains += 1;
        self.things[i].push(Thing::new(
            remains,
            &format!("{} (corpse)", victim.label),
            ThingKind::Item,
        ));
        Some(remains)
    }

    fn destroy(&mut self, thing: ThingId) {
        if self.take_thing(thing).is_some() {
            self.destroyed.push(thing);
        }
    }

    fn eject_contents(&mut self, thing: ThingId) {
        self.ejected.push(thing);
    }

    fn send_letter(&mut self, letter: Letter) {
        self.letters.push(letter);
    }

    fn start_fire(&mut self, cell: Cell) -> bool {
        if self.refuse_fires {
            return false;
        }
        self.fires.push(cell);
        true
    }
}
