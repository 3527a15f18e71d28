//! Per-map temperature store and the diffusion update pass.

use celsius_core::{Cell, MapReader, MapThermalState, ThermalError, ThermalProperties};
use celsius_diffusion::DiffusionEngine;
use celsius_space::MapGrid;

use crate::properties::ThermalPropertyResolver;

/// Air temperature of every cell of one map, plus optional terrain
/// surface temperatures.
///
/// # Update discipline
///
/// [`update`](Self::update) is Jacobi-style: every delta is computed
/// from the temperatures as they were when the pass started, collected
/// in a scratch buffer and applied only once all cells are done. Each
/// cell sums its neighbour contributions in a fixed N, S, W, E order, so
/// the result does not depend on the order cells are visited in.
#[derive(Clone, Debug)]
pub struct TemperatureGrid {
    grid: MapGrid,
    temperatures: Vec<f32>,
    /// NaN where the terrain has no temperature of its own.
    terrain_temperatures: Option<Vec<f32>>,
    props: Vec<ThermalProperties>,
    deltas: Vec<f32>,
}

impl TemperatureGrid {
    /// A grid with every cell at `initial`.
    pub fn new(grid: MapGrid, initial: f32) -> Self {
        let n = grid.cell_count();
        Self {
            grid,
            temperatures: vec![initial; n],
            terrain_temperatures: None,
            props: Vec::with_capacity(n),
            deltas: vec![0.0; n],
        }
    }

    /// Start tracking terrain temperatures. Values are seeded from the
    /// air temperature on the next update.
    pub fn enable_terrain_temperatures(&mut self) {
        if self.terrain_temperatures.is_none() {
            self.terrain_temperatures = Some(vec![f32::NAN; self.grid.cell_count()]);
        }
    }

    /// Stop tracking terrain temperatures and drop the stored values.
    pub fn disable_terrain_temperatures(&mut self) {
        self.terrain_temperatures = None;
    }

    /// Whether terrain temperatures are tracked.
    pub fn has_terrain_temperatures(&self) -> bool {
        self.terrain_temperatures.is_some()
    }

    /// Layout of this grid.
    pub fn grid(&self) -> &MapGrid {
        &self.grid
    }

    /// Air temperatures in row-major order.
    pub fn temperatures(&self) -> &[f32] {
        &self.temperatures
    }

    fn index(&self, cell: Cell) -> Result<usize, ThermalError> {
        self.grid
            .index_of(cell)
            .ok_or(ThermalError::CellOutOfBounds {
                cell,
                width: self.grid.width(),
                height: self.grid.height(),
            })
    }

    /// Air temperature at `cell`.
    pub fn get(&self, cell: Cell) -> Result<f32, ThermalError> {
        self.index(cell).map(|i| self.temperatures[i])
    }

    /// Overwrite the air temperature at `cell`.
    pub fn set(&mut self, cell: Cell, value: f32) -> Result<(), ThermalError> {
        let i = self.index(cell)?;
        self.temperatures[i] = value;
        Ok(())
    }

    /// Terrain surface temperature at `cell`, if tracked there.
    pub fn terrain_temperature(&self, cell: Cell) -> Option<f32> {
        let i = self.grid.index_of(cell)?;
        self.terrain_temperatures
            .as_ref()
            .map(|t| t[i])
            .filter(|t| !t.is_nan())
    }

    /// The temperature phase change reacts to: the terrain's own if
    /// tracked, otherwise the air above it.
    pub fn surface_temperature(&self, cell: Cell) -> Result<f32, ThermalError> {
        match self.terrain_temperature(cell) {
            Some(t) => Ok(t),
            None => self.get(cell),
        }
    }

    /// Run one diffusion pass. Returns the largest absolute change
    /// applied to any air temperature.
    pub fn update<M: MapReader + ?Sized>(
        &mut self,
        map: &M,
        resolver: &ThermalPropertyResolver,
        engine: &DiffusionEngine,
    ) -> f32 {
        self.update_in_order(map, resolver, engine, 0..self.grid.cell_count())
    }

    fn update_in_order<M, I>(
        &mut self,
        map: &M,
        resolver: &ThermalPropertyResolver,
        engine: &DiffusionEngine,
        order: I,
    ) -> f32
    where
        M: MapReader + ?Sized,
        I: IntoIterator<Item = usize>,
    {
        let grid = self.grid;
        self.props.clear();
        self.props
            .extend(grid.cells().map(|cell| resolver.properties(map, cell)));
        let outdoor = map.outdoor_temperature();

        for i in order {
            let t = self.temperatures[i];
            let p = self.props[i];
            let mut delta = 0.0;
            for n in grid.neighbour_indices(i) {
                delta += engine
                    .diffuse_mutual(t, p, self.temperatures[n], self.props[n])
                    .0;
            }
            if map.is_exposed(grid.cell_at(i)) {
                delta += engine.diffuse_single(t, outdoor, p);
            }
            self.deltas[i] = delta;
        }

        let mut max_delta = 0.0f32;
        for (t, d) in self.temperatures.iter_mut().zip(&self.deltas) {
            *t += d;
            max_delta = max_delta.max(d.abs());
        }

        if self.terrain_temperatures.is_some() {
            self.exchange_with_terrain(map, resolver, engine);
        }
        max_delta
    }

    /// Let every cell with a terrain temperature and no thermal thing
    /// exchange heat with the air above it.
    fn exchange_with_terrain<M: MapReader + ?Sized>(
        &mut self,
        map: &M,
        resolver: &ThermalPropertyResolver,
        engine: &DiffusionEngine,
    ) {
        let Some(terrain) = self.terrain_temperatures.as_mut() else {
            return;
        };
        for (i, cell) in self.grid.cells().enumerate() {
            let tracked = if resolver.has_thermal_thing(map, cell) {
                None
            } else {
                resolver.terrain_properties(map, cell)
            };
            let Some(tp) = tracked else {
                terrain[i] = f32::NAN;
                continue;
            };
            let air_temp = self.temperatures[i];
            if terrain[i].is_nan() {
                terrain[i] = air_temp;
                continue;
            }
            let (dt_terrain, dt_air) = engine.diffuse_mutual(terrain[i], tp, air_temp, self.props[i]);
            terrain[i] += dt_terrain;
            self.temperatures[i] += dt_air;
        }
    }

    /// Snapshot the temperature arrays. Under-terrain entries are owned
    /// by phase change and filled in by the caller.
    pub fn to_state(&self) -> MapThermalState {
        MapThermalState {
            width: self.grid.width(),
            height: self.grid.height(),
            temperatures: self.temperatures.clone(),
            terrain_temperatures: self.terrain_temperatures.clone(),
            under_terrain: Vec::new(),
        }
    }

    /// Rebuild a grid from saved arrays.
    pub fn from_state(grid: MapGrid, state: &MapThermalState) -> Result<Self, ThermalError> {
        let n = grid.cell_count();
        if state.width != grid.width() || state.height != grid.height() {
            return Err(ThermalError::InvalidState {
                reason: format!(
                    "state is {}x{} but map is {}x{}",
                    state.width,
                    state.height,
                    grid.width(),
                    grid.height()
                ),
            });
        }
        if !state.is_consistent() {
            return Err(ThermalError::InvalidState {
                reason: format!("arrays do not match {n} cells"),
            });
        }
        Ok(Self {
            grid,
            temperatures: state.temperatures.clone(),
            terrain_temperatures: state.terrain_temperatures.clone(),
            props: Vec::with_capacity(n),
            deltas: vec![0.0; n],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celsius_core::terrain::names;
    use celsius_core::{Thing, ThingId, ThingKind};
    use celsius_test_utils::MockMap;
    use proptest::prelude::*;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(width: u32, height: u32) -> (TemperatureGrid, ThermalPropertyResolver, DiffusionEngine) {
        let engine = DiffusionEngine::builder().build().unwrap();
        let resolver = ThermalPropertyResolver::new(engine.air());
        let grid = TemperatureGrid::new(MapGrid::new(width, height).unwrap(), 20.0);
        (grid, resolver, engine)
    }

    #[test]
    fn get_and_set_check_bounds() {
        let (mut g, _, _) = setup(3, 2);
        assert_eq!(g.get(Cell::new(2, 1)), Ok(20.0));
        g.set(Cell::new(2, 1), -5.0).unwrap();
        assert_eq!(g.get(Cell::new(2, 1)), Ok(-5.0));
        assert_eq!(
            g.set(Cell::new(3, 0), 1.0),
            Err(ThermalError::CellOutOfBounds {
                cell: Cell::new(3, 0),
                width: 3,
                height: 2
            })
        );
    }

    #[test]
    fn uniform_field_is_stationary() {
        let (mut g, r, e) = setup(4, 4);
        let map = MockMap::new(4, 4);
        assert_eq!(g.update(&map, &r, &e), 0.0);
        assert!(g.temperatures().iter().all(|&t| t == 20.0));
    }

    #[test]
    fn hot_spot_spreads_and_conserves_heat() {
        let (mut g, r, e) = setup(5, 5);
        let map = MockMap::new(5, 5);
        g.set(Cell::new(2, 2), 100.0).unwrap();
        let before: f32 = g.temperatures().iter().sum();
        let max = g.update(&map, &r, &e);
        let after: f32 = g.temperatures().iter().sum();
        assert!(max > 0.0);
        assert!(g.get(Cell::new(2, 2)).unwrap() < 100.0);
        assert!(g.get(Cell::new(2, 3)).unwrap() > 20.0);
        assert_eq!(g.get(Cell::new(0, 0)), Ok(20.0));
        assert!((before - after).abs() < 1e-3);
    }

    #[test]
    fn exposed_cells_drift_to_outdoors() {
        let (mut g, r, e) = setup(1, 1);
        let mut map = MockMap::new(1, 1);
        map.set_outdoor_temperature(-10.0);
        map.set_exposed(Cell::new(0, 0), true);
        g.update(&map, &r, &e);
        let t = g.get(Cell::new(0, 0)).unwrap();
        assert!(t < 20.0 && t > -10.0);
    }

    #[test]
    fn terrain_temperature_seeds_then_exchanges() {
        let (mut g, r, e) = setup(2, 1);
        let mut map = MockMap::new(2, 1);
        let water = Cell::new(1, 0);
        map.set_terrain_named(water, names::WATER_SHALLOW);
        g.enable_terrain_temperatures();

        g.update(&map, &r, &e);
        assert_eq!(g.terrain_temperature(Cell::new(0, 0)), None);
        assert_eq!(g.terrain_temperature(water), Some(20.0));

        g.set(water, 30.0).unwrap();
        g.update(&map, &r, &e);
        let terrain = g.terrain_temperature(water).unwrap();
        assert!(terrain > 20.0);
        assert_eq!(g.surface_temperature(water), Ok(terrain));
    }

    #[test]
    fn thermal_thing_hides_terrain_temperature() {
        let (mut g, r, e) = setup(1, 1);
        let mut map = MockMap::new(1, 1);
        let cell = Cell::new(0, 0);
        map.set_terrain_named(cell, names::WATER_SHALLOW);
        g.enable_terrain_temperatures();
        g.update(&map, &r, &e);
        assert!(g.terrain_temperature(cell).is_some());

        map.add_thing(
            cell,
            Thing::new(ThingId(1), "bridge", ThingKind::Building)
                .with_thermal(ThermalProperties::new(900.0, 1.0)),
        );
        g.update(&map, &r, &e);
        assert!(g.terrain_temperature(cell).is_none());
        assert_eq!(g.surface_temperature(cell), g.get(cell));
    }

    #[test]
    fn state_round_trip() {
        let (mut g, _, _) = setup(3, 3);
        g.enable_terrain_temperatures();
        g.set(Cell::new(1, 2), 7.5).unwrap();
        let state = g.to_state();
        let back = TemperatureGrid::from_state(*g.grid(), &state).unwrap();
        assert!(back.to_state().bit_identical(&state));

        let other = MapGrid::new(2, 2).unwrap();
        assert!(TemperatureGrid::from_state(other, &state).is_err());
    }

    fn walled_map(width: u32, height: u32, rng: &mut ChaCha8Rng) -> MockMap {
        use rand::Rng;
        let mut map = MockMap::new(width, height);
        let mut id = 0;
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                if rng.gen_bool(0.3) {
                    id += 1;
                    map.add_thing(
                        Cell::new(x, y),
                        Thing::new(ThingId(id), "block", ThingKind::Building).with_thermal(
                            ThermalProperties::new(
                                rng.gen_range(100.0..20_000.0),
                                rng.gen_range(0.0..5.0),
                            ),
                        ),
                    );
                }
                if rng.gen_bool(0.2) {
                    map.set_exposed(Cell::new(x, y), true);
                }
            }
        }
        map
    }

    proptest! {
        #[test]
        fn update_is_order_independent(w in 1u32..12, h in 1u32..12, seed in any::<u64>()) {
            use rand::Rng;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let map = walled_map(w, h, &mut rng);
            let (mut a, r, e) = setup(w, h);
            for i in 0..a.grid().cell_count() {
                let cell = a.grid().cell_at(i);
                a.set(cell, rng.gen_range(-40.0..60.0)).unwrap();
            }
            a.enable_terrain_temperatures();
            let mut b = a.clone();

            let mut order: Vec<usize> = (0..a.grid().cell_count()).collect();
            order.shuffle(&mut rng);
            a.update(&map, &r, &e);
            b.update_in_order(&map, &r, &e, order);

            prop_assert!(a.to_state().bit_identical(&b.to_state()));
        }
    }
}
