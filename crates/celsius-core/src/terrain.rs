//! Terrain catalogue: definitions, affordances and the registry that
//! hands out [`TerrainId`]s.
//!
//! The registry mirrors the host's terrain database closely enough for
//! phase change to make decisions: which terrains are water, which are
//! passable, what they can support, and at what temperature they freeze.

use bitflags::bitflags;
use indexmap::IndexMap;

use crate::id::TerrainId;
use crate::thermal::ThermalProperties;

/// Well-known terrain names used by phase change.
pub mod names {
    /// Ice produced by freezing (or placed by world generation).
    pub const ICE: &str = "Ice";
    /// Shallow fresh water.
    pub const WATER_SHALLOW: &str = "WaterShallow";
    /// Deep fresh water.
    pub const WATER_DEEP: &str = "WaterDeep";
    /// Shallow sea water.
    pub const WATER_OCEAN_SHALLOW: &str = "WaterOceanShallow";
    /// Deep sea water.
    pub const WATER_OCEAN_DEEP: &str = "WaterOceanDeep";
    /// Shallow river water.
    pub const WATER_MOVING_SHALLOW: &str = "WaterMovingShallow";
    /// Chest-deep river water.
    pub const WATER_MOVING_CHEST_DEEP: &str = "WaterMovingChestDeep";
    /// Plain soil.
    pub const SOIL: &str = "Soil";
    /// Sand.
    pub const SAND: &str = "Sand";
    /// Gravel.
    pub const GRAVEL: &str = "Gravel";
}

bitflags! {
    /// What a terrain can support. A thing needs at most one affordance.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Affordances: u32 {
        /// Light structures and items.
        const LIGHT = 1 << 0;
        /// Walls and furniture.
        const MEDIUM = 1 << 1;
        /// Heavy machinery.
        const HEAVY = 1 << 2;
        /// Plants can grow here.
        const GROWABLE = 1 << 3;
        /// Graves and trenches.
        const DIGGABLE = 1 << 4;
        /// Bridges can be built over it.
        const BRIDGEABLE = 1 << 5;
        /// Shallow-water structures.
        const SHALLOW_WATER = 1 << 6;
        /// Flowing water (water mills).
        const MOVING_FLUID = 1 << 7;
    }
}

/// Host biome, as far as water inference cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Biome {
    /// Any biome with fresh water.
    #[default]
    Land,
    /// Frozen sea: melt water is ocean water.
    SeaIce,
}

/// A terrain definition.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainDef {
    /// Unique name; also the persisted identity.
    pub name: String,
    /// Human-readable label for letters and logs.
    pub label: String,
    /// Whether this terrain is liquid water.
    pub water: bool,
    /// Whether pawns and items can stand on it.
    pub passable: bool,
    /// What this terrain can support.
    pub affordances: Affordances,
    /// Whether filth may lie on it.
    pub accepts_filth: bool,
    /// Surface thermal properties; `None` means no terrain temperature.
    pub thermal: Option<ThermalProperties>,
}

impl TerrainDef {
    /// A passable, dry ground terrain with the usual building affordances.
    pub fn ground(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            water: false,
            passable: true,
            affordances: Affordances::LIGHT
                | Affordances::MEDIUM
                | Affordances::HEAVY
                | Affordances::GROWABLE
                | Affordances::DIGGABLE,
            accepts_filth: true,
            thermal: None,
        }
    }

    /// A water terrain; deep water is impassable.
    pub fn water(name: &str, label: &str, deep: bool) -> Self {
        let affordances = if deep {
            Affordances::BRIDGEABLE
        } else {
            Affordances::LIGHT | Affordances::BRIDGEABLE | Affordances::SHALLOW_WATER
        };
        Self {
            name: name.to_string(),
            label: label.to_string(),
            water: true,
            passable: !deep,
            affordances,
            accepts_filth: false,
            thermal: Some(ThermalProperties::new(4200.0, 0.6)),
        }
    }

    /// Temperature at or below which this terrain freezes.
    ///
    /// Sea and river water freeze below zero; everything else at 0°.
    pub fn freezing_point(&self) -> f32 {
        match self.name.as_str() {
            names::WATER_OCEAN_DEEP | names::WATER_OCEAN_SHALLOW => -2.0,
            names::WATER_MOVING_CHEST_DEEP => -3.0,
            names::WATER_MOVING_SHALLOW => -2.0,
            _ => 0.0,
        }
    }

    /// Whether the terrain provides `needed`.
    pub fn provides(&self, needed: Affordances) -> bool {
        self.affordances.contains(needed)
    }
}

/// Registry of terrain definitions, indexed by [`TerrainId`].
///
/// Ids are insertion indices. Re-registering a name replaces the
/// definition in place and keeps its id.
#[derive(Clone, Debug, Default)]
pub struct TerrainRegistry {
    defs: IndexMap<String, TerrainDef>,
}

impl TerrainRegistry {
    /// Maximum number of distinct terrains.
    pub const MAX_TERRAINS: usize = u16::MAX as usize + 1;

    /// An empty registry.
    pub fn new() -> Self {
        Self {
            defs: IndexMap::new(),
        }
    }

    /// A registry with ice, the vanilla water terrains and a few grounds.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        let mut ice = TerrainDef::ground(names::ICE, "ice");
        ice.affordances = Affordances::LIGHT | Affordances::MEDIUM | Affordances::HEAVY;
        ice.thermal = Some(ThermalProperties::new(2100.0, 2.2));

        let mut chest_deep =
            TerrainDef::water(names::WATER_MOVING_CHEST_DEEP, "chest-deep moving water", false);
        chest_deep.affordances = Affordances::BRIDGEABLE | Affordances::MOVING_FLUID;

        let defs = [
            TerrainDef::ground(names::SOIL, "soil"),
            TerrainDef::ground(names::SAND, "sand"),
            TerrainDef::ground(names::GRAVEL, "gravel"),
            ice,
            TerrainDef::water(names::WATER_SHALLOW, "shallow water", false),
            TerrainDef::water(names::WATER_DEEP, "deep water", true),
            TerrainDef::water(names::WATER_OCEAN_SHALLOW, "shallow ocean water", false),
            TerrainDef::water(names::WATER_OCEAN_DEEP, "deep ocean water", true),
            TerrainDef::water(names::WATER_MOVING_SHALLOW, "shallow moving water", false),
            chest_deep,
        ];
        for def in defs {
            self.register(def);
        }
    }

    /// Register (or replace) a definition. Returns `None` when full.
    pub fn register(&mut self, def: TerrainDef) -> Option<TerrainId> {
        if self.defs.len() >= Self::MAX_TERRAINS && !self.defs.contains_key(&def.name) {
            return None;
        }
        let (index, _) = self.defs.insert_full(def.name.clone(), def);
        u16::try_from(index).ok().map(TerrainId)
    }

    /// Look up a definition by id.
    pub fn get(&self, id: TerrainId) -> Option<&TerrainDef> {
        self.defs.get_index(id.0 as usize).map(|(_, def)| def)
    }

    /// Look up an id by name.
    pub fn id_of(&self, name: &str) -> Option<TerrainId> {
        self.defs
            .get_index_of(name)
            .and_then(|i| u16::try_from(i).ok())
            .map(TerrainId)
    }

    /// Name of a terrain, if registered.
    pub fn name_of(&self, id: TerrainId) -> Option<&str> {
        self.get(id).map(|def| def.name.as_str())
    }

    /// Id of the ice terrain, if registered.
    pub fn ice(&self) -> Option<TerrainId> {
        self.id_of(names::ICE)
    }

    /// Whether `id` is the ice terrain.
    pub fn is_ice(&self, id: TerrainId) -> bool {
        self.ice() == Some(id)
    }

    /// Number of registered terrains.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
