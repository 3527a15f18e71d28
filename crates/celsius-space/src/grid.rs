//! Bounded 2D map grid with 4-connected neighbourhood (N/S/W/E).

use crate::error::SpaceError;
use celsius_core::Cell;
use smallvec::SmallVec;

/// A bounded two-dimensional grid of `width * height` cells.
///
/// Cell `(x, y)` lives at flat index `y * width + x` (row-major).
/// Neighbours are the four cardinal directions in the fixed order
/// north, south, west, east; out-of-bounds neighbours are omitted, so
/// corners have 2 and edges have 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapGrid {
    width: u32,
    height: u32,
}

impl MapGrid {
    /// Maximum size of either axis. Keeps `cell_count()` within `u32`.
    pub const MAX_DIM: u32 = u16::MAX as u32;

    /// Create a `width x height` grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use celsius_core::Cell;
    /// use celsius_space::MapGrid;
    ///
    /// let grid = MapGrid::new(16, 8).unwrap();
    /// assert_eq!(grid.cell_count(), 128);
    /// assert_eq!(grid.neighbours(Cell::new(0, 0)).len(), 2);
    /// assert_eq!(grid.neighbours(Cell::new(3, 3)).len(), 4);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptyGrid);
        }
        if width > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether `cell` lies inside the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    /// Flat index of `cell`, or `None` if out of bounds.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// Flat index of `cell`, or a descriptive error.
    pub fn checked_index(&self, cell: Cell) -> Result<usize, SpaceError> {
        self.index_of(cell).ok_or_else(|| SpaceError::CellOutOfBounds {
            cell,
            bounds: format!("[0, {}) x [0, {})", self.width, self.height),
        })
    }

    /// Cell at flat `index`. The index must be below `cell_count()`.
    pub fn cell_at(&self, index: usize) -> Cell {
        let w = self.width as usize;
        Cell::new((index % w) as i32, (index / w) as i32)
    }

    /// In-bounds orthogonal neighbours of `cell`, in N, S, W, E order.
    pub fn neighbours(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        cell.adjacent()
            .into_iter()
            .filter(|&c| self.contains(c))
            .collect()
    }

    /// Flat indices of the in-bounds neighbours of the cell at `index`,
    /// in N, S, W, E order.
    pub fn neighbour_indices(&self, index: usize) -> SmallVec<[usize; 4]> {
        let w = self.width as usize;
        let x = index % w;
        let y = index / w;
        let mut out = SmallVec::new();
        if y + 1 < self.height as usize {
            out.push(index + w);
        }
        if y > 0 {
            out.push(index - w);
        }
        if x > 0 {
            out.push(index - 1);
        }
        if x + 1 < w {
            out.push(index + 1);
        }
        out
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count()).map(move |i| self.cell_at(i))
    }

    /// Whether `cell` touches the map edge.
    pub fn on_edge(&self, cell: Cell) -> bool {
        self.contains(cell)
            && (cell.x == 0
                || cell.y == 0
                || cell.x as u32 == self.width - 1
                || cell.y as u32 == self.height - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_empty() {
        assert_eq!(MapGrid::new(0, 5), Err(SpaceError::EmptyGrid));
        assert_eq!(MapGrid::new(5, 0), Err(SpaceError::EmptyGrid));
    }

    #[test]
    fn rejects_too_large() {
        let err = MapGrid::new(MapGrid::MAX_DIM + 1, 1).unwrap_err();
        assert!(matches!(err, SpaceError::DimensionTooLarge { name: "width", .. }));
        let err = MapGrid::new(1, MapGrid::MAX_DIM + 1).unwrap_err();
        assert!(matches!(err, SpaceError::DimensionTooLarge { name: "height", .. }));
    }

    #[test]
    fn neighbours_interior() {
        let g = MapGrid::new(5, 5).unwrap();
        let n = g.neighbours(Cell::new(2, 2));
        assert_eq!(
            n.as_slice(),
            &[
                Cell::new(2, 3),
                Cell::new(2, 1),
                Cell::new(1, 2),
                Cell::new(3, 2)
            ]
        );
    }

    #[test]
    fn neighbours_corner_and_edge() {
        let g = MapGrid::new(5, 5).unwrap();
        assert_eq!(g.neighbours(Cell::new(0, 0)).len(), 2);
        assert_eq!(g.neighbours(Cell::new(4, 4)).len(), 2);
        assert_eq!(g.neighbours(Cell::new(2, 0)).len(), 3);
    }

    #[test]
    fn single_cell_has_no_neighbours() {
        let g = MapGrid::new(1, 1).unwrap();
        assert!(g.neighbours(Cell::new(0, 0)).is_empty());
        assert!(g.neighbour_indices(0).is_empty());
    }

    #[test]
    fn checked_index_reports_bounds() {
        let g = MapGrid::new(3, 2).unwrap();
        assert_eq!(g.checked_index(Cell::new(2, 1)), Ok(5));
        let err = g.checked_index(Cell::new(3, 0)).unwrap_err();
        assert!(err.to_string().contains("[0, 3) x [0, 2)"));
    }

    #[test]
    fn on_edge() {
        let g = MapGrid::new(4, 4).unwrap();
        assert!(g.on_edge(Cell::new(0, 2)));
        assert!(g.on_edge(Cell::new(3, 3)));
        assert!(!g.on_edge(Cell::new(1, 2)));
        assert!(!g.on_edge(Cell::new(-1, 2)));
    }

    proptest! {
        #[test]
        fn index_round_trips(w in 1u32..64, h in 1u32..64, seed in any::<usize>()) {
            let g = MapGrid::new(w, h).unwrap();
            let i = seed % g.cell_count();
            let c = g.cell_at(i);
            prop_assert!(g.contains(c));
            prop_assert_eq!(g.index_of(c), Some(i));
        }

        #[test]
        fn neighbour_indices_match_neighbours(w in 1u32..32, h in 1u32..32, seed in any::<usize>()) {
            let g = MapGrid::new(w, h).unwrap();
            let i = seed % g.cell_count();
            let by_cell: Vec<usize> = g
                .neighbours(g.cell_at(i))
                .into_iter()
                .filter_map(|c| g.index_of(c))
                .collect();
            let by_index: Vec<usize> = g.neighbour_indices(i).into_vec();
            prop_assert_eq!(by_cell, by_index);
        }

        #[test]
        fn neighbourhood_is_symmetric(w in 1u32..32, h in 1u32..32, seed in any::<usize>()) {
            let g = MapGrid::new(w, h).unwrap();
            let i = seed % g.cell_count();
            for n in g.neighbour_indices(i) {
                prop_assert!(g.neighbour_indices(n).contains(&i));
            }
        }
    }
}
