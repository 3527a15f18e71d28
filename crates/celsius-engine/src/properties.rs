//! Resolution of per-cell thermal properties.

use celsius_core::{Cell, MapReader, ThermalError, ThermalProperties, Thing};

/// Maps a cell to the `(capacity, conductivity)` pair it diffuses with.
///
/// The first thing in the cell with a positive heat capacity wins;
/// empty cells use the air defaults. Resolution is O(things in cell),
/// so the update pass resolves every cell once per tick and reuses the
/// result for all four neighbour pairs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermalPropertyResolver {
    air: ThermalProperties,
}

impl ThermalPropertyResolver {
    /// A resolver falling back to `air` for empty cells.
    pub fn new(air: ThermalProperties) -> Self {
        Self { air }
    }

    /// Air defaults.
    pub fn air(&self) -> ThermalProperties {
        self.air
    }

    /// First thermal thing in `things`, if any.
    pub fn thermal_thing<'a>(&self, things: &'a [Thing]) -> Option<&'a Thing> {
        things.iter().find(|t| t.is_thermal())
    }

    /// Properties of `cell`.
    pub fn properties<M: MapReader + ?Sized>(&self, map: &M, cell: Cell) -> ThermalProperties {
        self.thermal_thing(map.things_at(cell))
            .and_then(Thing::thermal_properties)
            .unwrap_or(self.air)
    }

    /// Properties of `cell`, rejecting capacities that would poison the
    /// grid (infinite, for instance).
    pub fn checked_properties<M: MapReader + ?Sized>(
        &self,
        map: &M,
        cell: Cell,
    ) -> Result<ThermalProperties, ThermalError> {
        let props = self.properties(map, cell);
        if props.is_valid() {
            Ok(props)
        } else {
            Err(ThermalError::InvalidCapacity {
                cell,
                capacity: props.heat_capacity,
            })
        }
    }

    /// Whether a thermal thing occupies `cell`.
    pub fn has_thermal_thing<M: MapReader + ?Sized>(&self, map: &M, cell: Cell) -> bool {
        self.thermal_thing(map.things_at(cell)).is_some()
    }

    /// Surface properties of the terrain at `cell`, if it tracks a
    /// temperature of its own.
    pub fn terrain_properties<M: MapReader + ?Sized>(
        &self,
        map: &M,
        cell: Cell,
    ) -> Option<ThermalProperties> {
        map.terrains()
            .get(map.terrain_at(cell))
            .and_then(|def| def.thermal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celsius_core::terrain::names;
    use celsius_core::{ThingId, ThingKind};
    use celsius_test_utils::MockMap;

    const AIR: ThermalProperties = ThermalProperties::new(1200.0, 0.03);

    #[test]
    fn empty_cell_is_air() {
        let map = MockMap::new(3, 3);
        let r = ThermalPropertyResolver::new(AIR);
        assert_eq!(r.properties(&map, Cell::new(1, 1)), AIR);
        assert!(!r.has_thermal_thing(&map, Cell::new(1, 1)));
    }

    #[test]
    fn first_thermal_thing_wins() {
        let mut map = MockMap::new(3, 3);
        let cell = Cell::new(1, 1);
        map.add_thing(cell, Thing::new(ThingId(1), "rug", ThingKind::Item));
        map.add_thing(
            cell,
            Thing::new(ThingId(2), "wall", ThingKind::Building)
                .with_thermal(ThermalProperties::new(5000.0, 1.0)),
        );
        map.add_thing(
            cell,
            Thing::new(ThingId(3), "door", ThingKind::Building)
                .with_thermal(ThermalProperties::new(300.0, 4.0)),
        );
        let r = ThermalPropertyResolver::new(AIR);
        assert_eq!(
            r.properties(&map, cell),
            ThermalProperties::new(5000.0, 1.0)
        );
        assert_eq!(r.thermal_thing(map.things_at(cell)).unwrap().id, ThingId(2));
    }

    #[test]
    fn open_door_resolves_as_air() {
        let mut map = MockMap::new(3, 3);
        let cell = Cell::new(1, 1);
        map.add_thing(
            cell,
            Thing::new(ThingId(4), "door", ThingKind::Building)
                .with_thermal(ThermalProperties::new(1000.0, 0.15)),
        );
        let r = ThermalPropertyResolver::new(AIR);
        assert_eq!(r.properties(&map, cell), ThermalProperties::new(1000.0, 0.15));

        assert!(map.set_open(ThingId(4), true));
        assert_eq!(r.properties(&map, cell), AIR);
        assert!(!r.has_thermal_thing(&map, cell));

        assert!(map.set_open(ThingId(4), false));
        assert!(r.has_thermal_thing(&map, cell));
    }

    #[test]
    fn checked_rejects_infinite_capacity() {
        let mut map = MockMap::new(2, 2);
        let cell = Cell::new(0, 1);
        map.add_thing(
            cell,
            Thing::new(ThingId(9), "singularity", ThingKind::Item)
                .with_thermal(ThermalProperties::new(f32::INFINITY, 1.0)),
        );
        let r = ThermalPropertyResolver::new(AIR);
        assert!(matches!(
            r.checked_properties(&map, cell),
            Err(ThermalError::InvalidCapacity { .. })
        ));
        assert_eq!(r.checked_properties(&map, Cell::new(1, 1)), Ok(AIR));
    }

    #[test]
    fn terrain_properties_follow_registry() {
        let mut map = MockMap::new(2, 1);
        map.set_terrain_named(Cell::new(1, 0), names::WATER_DEEP);
        let r = ThermalPropertyResolver::new(AIR);
        assert!(r.terrain_properties(&map, Cell::new(0, 0)).is_none());
        assert!(r.terrain_properties(&map, Cell::new(1, 0)).is_some());
    }
}
