//! Plain-data thermal state of one map, as saved and restored.

use crate::id::TerrainId;

/// Everything the simulation persists for a map.
///
/// `temperatures` and `terrain_temperatures` are row-major with
/// `width * height` entries. `under_terrain` holds `(cell index, terrain)`
/// pairs in ascending cell order.
#[derive(Clone, Debug, PartialEq)]
pub struct MapThermalState {
    /// Grid width.
    pub width: u32,
    /// Grid height.
    pub height: u32,
    /// Air temperature per cell.
    pub temperatures: Vec<f32>,
    /// Terrain surface temperature per cell, NaN where not tracked.
    pub terrain_temperatures: Option<Vec<f32>>,
    /// Terrain recorded beneath frozen cells.
    pub under_terrain: Vec<(u32, TerrainId)>,
}

impl MapThermalState {
    /// Number of cells described.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether all arrays match the declared dimensions and the
    /// under-terrain list is sorted, unique and in range.
    pub fn is_consistent(&self) -> bool {
        let n = self.cell_count();
        if self.temperatures.len() != n {
            return false;
        }
        if let Some(terrain) = &self.terrain_temperatures {
            if terrain.len() != n {
                return false;
            }
        }
        self.under_terrain
            .windows(2)
            .all(|pair| pair[0].0 < pair[1].0)
            && self
                .under_terrain
                .last()
                .is_none_or(|&(idx, _)| (idx as usize) < n)
    }

    /// Whether two states hold bit-identical data.
    ///
    /// Unlike `==`, NaN terrain temperatures compare equal to themselves.
    pub fn bit_identical(&self, other: &Self) -> bool {
        fn bits(v: &[f32]) -> impl Iterator<Item = u32> + '_ {
            v.iter().map(|f| f.to_bits())
        }
        self.width == other.width
            && self.height == other.height
            && bits(&self.temperatures).eq(bits(&other.temperatures))
            && match (&self.terrain_temperatures, &other.terrain_temperatures) {
                (Some(a), Some(b)) => bits(a).eq(bits(b)),
                (None, None) => true,
                _ => false,
            }
            && self.under_terrain == other.under_terrain
    }
}
