//! Host-facing API: per-map simulations behind a single registry.
//!
//! [`ThermalWorld`] owns one [`TemperatureGrid`] and one
//! [`PhaseChangeController`] per registered map. Every call takes the
//! host map by reference; the world never stores host objects.
//!
//! Maps without a grid are not an error on the plain accessors: reads
//! fall back to the host's outdoor temperature and writes report
//! `false`. The `try_*` variants return [`ThermalError`] instead.

use std::time::Instant;

use celsius_core::{Cell, MapId, MapReader, MapThermalState, MapWriter, TerrainId, ThermalError};
use celsius_diffusion::DiffusionEngine;
use celsius_space::{MapGrid, SpaceError};
use indexmap::IndexMap;

use crate::config::{ConfigError, ThermalConfig};
use crate::grid::TemperatureGrid;
use crate::heat::{self, Danger};
use crate::metrics::UpdateMetrics;
use crate::phase::{MeltOutcome, PhaseChange, PhaseChangeController, UnderTerrainMap};
use crate::properties::ThermalPropertyResolver;

/// Thermal state of one map.
#[derive(Clone, Debug)]
struct MapThermal {
    temperatures: TemperatureGrid,
    phase: PhaseChangeController,
}

/// Registry of per-map thermal simulations.
///
/// # Examples
///
/// ```
/// use celsius_core::{Cell, MapId};
/// use celsius_engine::{ThermalConfig, ThermalWorld};
/// use celsius_test_utils::MockMap;
///
/// let mut host = MockMap::new(8, 8);
/// let mut world = ThermalWorld::new(ThermalConfig::default()).unwrap();
/// let map = MapId(0);
/// world.init_map(map, &host).unwrap();
///
/// assert!(world.push_heat(map, &host, Cell::new(4, 4), 100.0));
/// let before = world.temperature_for_cell(map, &host, Cell::new(4, 4));
/// world.update(map, &mut host).unwrap();
/// assert!(world.temperature_for_cell(map, &host, Cell::new(4, 4)) < before);
/// ```
#[derive(Clone, Debug)]
pub struct ThermalWorld {
    config: ThermalConfig,
    engine: DiffusionEngine,
    resolver: ThermalPropertyResolver,
    maps: IndexMap<MapId, MapThermal>,
}

impl ThermalWorld {
    /// Create an empty world. Fails if `config` does not validate.
    pub fn new(config: ThermalConfig) -> Result<Self, ConfigError> {
        let engine = config.diffusion_engine()?;
        let resolver = ThermalPropertyResolver::new(config.air());
        Ok(Self {
            config,
            engine,
            resolver,
            maps: IndexMap::new(),
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &ThermalConfig {
        &self.config
    }

    /// The diffusion engine built from the current configuration.
    pub fn engine(&self) -> &DiffusionEngine {
        &self.engine
    }

    /// Replace the configuration, rebuilding the cached air constants.
    ///
    /// Turning terrain temperatures off drops the stored values; turning
    /// them on seeds them on the next update.
    pub fn set_config(&mut self, config: ThermalConfig) -> Result<(), ConfigError> {
        let engine = config.diffusion_engine()?;
        log::debug!(
            "thermal config changed: air conductivity {:.2}, air relaxation {:.3}",
            engine.air_conductivity(),
            engine.air_relaxation()
        );
        self.resolver = ThermalPropertyResolver::new(config.air());
        self.engine = engine;
        for state in self.maps.values_mut() {
            if config.terrain_temperatures {
                state.temperatures.enable_terrain_temperatures();
            } else {
                state.temperatures.disable_terrain_temperatures();
            }
        }
        self.config = config;
        Ok(())
    }

    /// Start simulating `map`, every cell at the host's outdoor
    /// temperature. Replaces any existing simulation for `map`.
    pub fn init_map<M: MapReader + ?Sized>(&mut self, map: MapId, host: &M) -> Result<(), SpaceError> {
        let (width, height) = host.size();
        let grid = MapGrid::new(width, height)?;
        let mut temperatures = TemperatureGrid::new(grid, host.outdoor_temperature());
        if self.config.terrain_temperatures {
            temperatures.enable_terrain_temperatures();
        }
        let state = MapThermal {
            temperatures,
            phase: PhaseChangeController::new(grid),
        };
        if self.maps.insert(map, state).is_some() {
            log::debug!("thermal simulation for {map} replaced");
        }
        log::info!("thermal simulation initialised for {map} ({width}x{height})");
        Ok(())
    }

    /// Stop simulating `map`. Returns whether it was simulated.
    pub fn remove_map(&mut self, map: MapId) -> bool {
        self.maps.shift_remove(&map).is_some()
    }

    /// Whether `map` has a temperature grid.
    pub fn has_map(&self, map: MapId) -> bool {
        self.maps.contains_key(&map)
    }

    /// Simulated maps in registration order.
    pub fn map_ids(&self) -> impl Iterator<Item = MapId> + '_ {
        self.maps.keys().copied()
    }

    fn state(&self, map: MapId) -> Result<&MapThermal, ThermalError> {
        self.maps
            .get(&map)
            .ok_or(ThermalError::MissingSimulation { map })
    }

    fn state_mut(&mut self, map: MapId) -> Result<&mut MapThermal, ThermalError> {
        self.maps
            .get_mut(&map)
            .ok_or(ThermalError::MissingSimulation { map })
    }

    // ── Temperatures ───────────────────────────────────────────────

    /// Air temperature at `cell`.
    pub fn try_temperature(&self, map: MapId, cell: Cell) -> Result<f32, ThermalError> {
        self.state(map)?.temperatures.get(cell)
    }

    /// Air temperature at `cell`, or the host's outdoor temperature if
    /// `map` has no grid or `cell` is outside it.
    pub fn temperature_for_cell<M: MapReader + ?Sized>(&self, map: MapId, host: &M, cell: Cell) -> f32 {
        match self.try_temperature(map, cell) {
            Ok(t) => t,
            Err(e) => {
                log::debug!("{e}; using outdoor temperature");
                host.outdoor_temperature()
            }
        }
    }

    /// Terrain surface temperature at `cell`, if tracked there.
    pub fn terrain_temperature(&self, map: MapId, cell: Cell) -> Option<f32> {
        self.maps
            .get(&map)
            .and_then(|s| s.temperatures.terrain_temperature(cell))
    }

    /// Overwrite the air temperature at `cell`.
    pub fn try_set_temperature(&mut self, map: MapId, cell: Cell, value: f32) -> Result<(), ThermalError> {
        self.state_mut(map)?.temperatures.set(cell, value)
    }

    /// Overwrite the air temperature at `cell`. Returns `false` (and
    /// changes nothing) if `map` has no grid or `cell` is outside it.
    pub fn set_temperature_for_cell(&mut self, map: MapId, cell: Cell, value: f32) -> bool {
        match self.try_set_temperature(map, cell, value) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("{e}; temperature not set");
                false
            }
        }
    }

    /// Average temperature of a room.
    ///
    /// Rooms touching the map edge are outdoors. Without a grid, or for
    /// a room with no cells, the host's outdoor temperature is returned.
    pub fn room_temperature<M: MapReader + ?Sized>(
        &self,
        map: MapId,
        host: &M,
        cells: &[Cell],
        touches_map_edge: bool,
    ) -> f32 {
        let outdoor = host.outdoor_temperature();
        if touches_map_edge || cells.is_empty() {
            return outdoor;
        }
        let Ok(state) = self.state(map) else {
            log::debug!("no temperature grid for {map}; room uses outdoor temperature");
            return outdoor;
        };
        let sum: f32 = cells
            .iter()
            .map(|&c| state.temperatures.get(c).unwrap_or(outdoor))
            .sum();
        sum / cells.len() as f32
    }

    /// How dangerous `cell` is for someone comfortable in
    /// `[safe_min, safe_max]`.
    pub fn danger_at<M: MapReader + ?Sized>(
        &self,
        map: MapId,
        host: &M,
        cell: Cell,
        safe_min: f32,
        safe_max: f32,
    ) -> Danger {
        heat::classify_danger(self.temperature_for_cell(map, host, cell), safe_min, safe_max)
    }

    /// Whether every cell of a region sits inside `[safe_min, safe_max]`.
    ///
    /// Hosts searching for somewhere to shelter should skip regions that
    /// merely average out as safe; one scorching cell rules the region out.
    pub fn region_is_safe<M: MapReader + ?Sized>(
        &self,
        map: MapId,
        host: &M,
        cells: &[Cell],
        safe_min: f32,
        safe_max: f32,
    ) -> bool {
        cells.iter().all(|&cell| {
            (safe_min..=safe_max).contains(&self.temperature_for_cell(map, host, cell))
        })
    }

    // ── Heat push ──────────────────────────────────────────────────

    /// Push `energy` into `cell`. Returns the temperature change applied.
    pub fn try_push_heat<M: MapReader + ?Sized>(
        &mut self,
        map: MapId,
        host: &M,
        cell: Cell,
        energy: f32,
    ) -> Result<f32, ThermalError> {
        let state = self
            .maps
            .get_mut(&map)
            .ok_or(ThermalError::MissingSimulation { map })?;
        let current = state.temperatures.get(cell)?;
        let capacity = self.resolver.checked_properties(host, cell)?.heat_capacity;
        let delta = heat::heat_push_delta(
            energy,
            self.config.ticks_per_second,
            self.config.heat_push_effect,
            capacity,
        );
        state.temperatures.set(cell, current + delta)?;
        Ok(delta)
    }

    /// Push `energy` into `cell`. Returns `false` and changes nothing if
    /// `map` has no grid.
    pub fn push_heat<M: MapReader + ?Sized>(&mut self, map: MapId, host: &M, cell: Cell, energy: f32) -> bool {
        match self.try_push_heat(map, host, cell, energy) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("cannot push {energy} heat at {cell}: {e}");
                false
            }
        }
    }

    /// Run a heater or cooler at `cell` against `room_temperature`.
    /// Returns the energy pushed, 0 if the target is already met.
    pub fn control_temperature<M: MapReader + ?Sized>(
        &mut self,
        map: MapId,
        host: &M,
        cell: Cell,
        energy_limit: f32,
        target: f32,
        room_temperature: f32,
    ) -> f32 {
        let energy = heat::control_energy(energy_limit, target, room_temperature);
        if energy != 0.0 {
            self.push_heat(map, host, cell, energy);
        }
        energy
    }

    /// A fire at `cell` went out: cool the cell to the lowest ignition
    /// temperature of what is there. Returns the new temperature, or
    /// `None` if nothing changed.
    pub fn fire_extinguished<M: MapReader + ?Sized>(&mut self, map: MapId, host: &M, cell: Cell) -> Option<f32> {
        if !self.config.autoignition {
            return None;
        }
        let temperatures = &mut self.maps.get_mut(&map)?.temperatures;
        let current = temperatures.get(cell).ok()?;
        let ignition = heat::ignition_temperature(host.things_at(cell))?;
        let cooled = current.min(ignition);
        log::debug!("fire out at {cell}: temperature {current:.0} -> {cooled:.0}");
        temperatures.set(cell, cooled).ok()?;
        Some(cooled)
    }

    // ── Phase change entry points ──────────────────────────────────

    /// Freeze the water at `cell` now, regardless of temperature.
    pub fn freeze_cell<M: MapWriter + ?Sized>(
        &mut self,
        map: MapId,
        host: &mut M,
        cell: Cell,
    ) -> Result<Option<TerrainId>, ThermalError> {
        Ok(self.state_mut(map)?.phase.freeze(host, cell))
    }

    /// Melt the ice at `cell` now, regardless of temperature.
    pub fn melt_cell<M: MapWriter + ?Sized>(
        &mut self,
        map: MapId,
        host: &mut M,
        cell: Cell,
    ) -> Result<Option<(TerrainId, MeltOutcome)>, ThermalError> {
        Ok(self.state_mut(map)?.phase.melt(host, cell))
    }

    // ── Update ─────────────────────────────────────────────────────

    /// Run one update pass over `map`: diffusion, then the phase change
    /// and ignition scan.
    ///
    /// Diffusion reads a snapshot and does not depend on cell order. The
    /// scan does: it visits cells in row-major order (`y` then `x`) and
    /// changes terrain as it goes, so natural ice with no recorded
    /// under-terrain infers its water from neighbours that may already
    /// have melted earlier in the same pass.
    pub fn update<M: MapWriter + ?Sized>(&mut self, map: MapId, host: &mut M) -> Result<UpdateMetrics, ThermalError> {
        let config = &self.config;
        let state = self
            .maps
            .get_mut(&map)
            .ok_or(ThermalError::MissingSimulation { map })?;
        let grid = *state.temperatures.grid();
        if host.size() != (grid.width(), grid.height()) {
            let (width, height) = host.size();
            return Err(ThermalError::InvalidState {
                reason: format!(
                    "{map} is {width}x{height} but its grid is {}x{}",
                    grid.width(),
                    grid.height()
                ),
            });
        }

        let mut metrics = UpdateMetrics::default();
        let start = Instant::now();
        metrics.max_delta = state
            .temperatures
            .update(&*host, &self.resolver, &self.engine);
        metrics.diffusion_us = start.elapsed().as_micros() as u64;

        let start = Instant::now();
        if config.freezing_and_melting || config.autoignition {
            for cell in grid.cells() {
                scan_cell(state, host, cell, config, &mut metrics);
            }
        }
        metrics.phase_us = start.elapsed().as_micros() as u64;
        Ok(metrics)
    }

    /// Run [`update`](Self::update) if `tick` falls on the update cadence.
    pub fn tick<M: MapWriter + ?Sized>(
        &mut self,
        map: MapId,
        host: &mut M,
        tick: u64,
    ) -> Result<Option<UpdateMetrics>, ThermalError> {
        if tick % u64::from(self.config.ticks_per_update) != 0 {
            return Ok(None);
        }
        self.update(map, host).map(Some)
    }

    // ── Persistence ────────────────────────────────────────────────

    /// Everything needed to restore `map` later.
    pub fn save_state(&self, map: MapId) -> Result<MapThermalState, ThermalError> {
        let state = self.state(map)?;
        let mut saved = state.temperatures.to_state();
        saved.under_terrain = state.phase.under_terrain().to_pairs();
        Ok(saved)
    }

    /// Restore `map` from `saved`, replacing any current simulation.
    pub fn load_state<M: MapReader + ?Sized>(
        &mut self,
        map: MapId,
        host: &M,
        saved: &MapThermalState,
    ) -> Result<(), ThermalError> {
        let (width, height) = host.size();
        let grid = MapGrid::new(width, height).map_err(|e| ThermalError::InvalidState {
            reason: e.to_string(),
        })?;
        let mut temperatures = TemperatureGrid::from_state(grid, saved)?;
        if self.config.terrain_temperatures {
            temperatures.enable_terrain_temperatures();
        } else {
            temperatures.disable_terrain_temperatures();
        }
        let phase = PhaseChangeController::with_under_terrain(
            grid,
            UnderTerrainMap::from_pairs(&saved.under_terrain),
        );
        self.maps.insert(map, MapThermal { temperatures, phase });
        log::info!(
            "thermal simulation restored for {map} ({} frozen cells)",
            saved.under_terrain.len()
        );
        Ok(())
    }
}

fn scan_cell<M: MapWriter + ?Sized>(
    state: &mut MapThermal,
    host: &mut M,
    cell: Cell,
    config: &ThermalConfig,
    metrics: &mut UpdateMetrics,
) {
    if config.freezing_and_melting {
        if let Ok(surface) = state.temperatures.surface_temperature(cell) {
            match state.phase.check_cell(host, cell, surface) {
                Some(PhaseChange::Froze { .. }) => metrics.cells_frozen += 1,
                Some(PhaseChange::Melted { outcome, .. }) => metrics.record_melt(&outcome),
                None => {}
            }
        }
    }
    if config.autoignition {
        let Ok(air) = state.temperatures.get(cell) else {
            return;
        };
        if heat::should_ignite(air, host.things_at(cell)) && host.start_fire(cell) {
            log::debug!("autoignition at {cell} ({air:.0})");
            metrics.fires_started += 1;
        }
    }
}
