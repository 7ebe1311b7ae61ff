//! Row-major boolean occupancy grid.
//!
//! The grid uses a coordinate system where:
//! - Cell (0, 0) has its min corner at the world origin
//! - Positive X is to the right, positive Y is up
//! - Cell (x, y) covers the area from (x, y) * cell_size to (x+1, y+1) * cell_size
//!
//! `true` means passable (floor), `false` means impassable (wall). Cells
//! outside the grid are treated as impassable by every query.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{GridCoord, WorldPoint};

/// Boolean occupancy grid with a fixed cell size.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    /// Passable flags, row-major: index = y * width + x.
    cells: Vec<bool>,
    /// Grid width in cells
    width: usize,
    /// Grid height in cells
    height: usize,
    /// World units per cell
    cell_size: f32,
}

impl OccupancyGrid {
    /// Create an all-passable grid with the given dimensions
    pub fn new(width: usize, height: usize, cell_size: f32) -> Self {
        Self {
            cells: vec![true; width * height],
            width,
            height,
            cell_size,
        }
    }

    /// Create a grid from row-major passable flags.
    ///
    /// `cells.len()` must equal `width * height`.
    pub fn from_cells(width: usize, height: usize, cell_size: f32, cells: Vec<bool>) -> Self {
        assert_eq!(
            cells.len(),
            width * height,
            "cell count must match grid dimensions"
        );
        Self {
            cells,
            width,
            height,
            cell_size,
        }
    }

    /// Create a grid with a random fraction of impassable cells.
    ///
    /// Deterministic for a given seed. `obstacle_fraction` is clamped to
    /// [0, 1].
    pub fn random(
        width: usize,
        height: usize,
        cell_size: f32,
        obstacle_fraction: f64,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let p = obstacle_fraction.clamp(0.0, 1.0);
        let cells = (0..width * height).map(|_| !rng.gen_bool(p)).collect();
        Self {
            cells,
            width,
            height,
            cell_size,
        }
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// World units per cell
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Check if grid coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Convert grid coordinates to flat array index
    #[inline]
    fn coord_to_index(&self, coord: GridCoord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// Check if a cell is passable. Out-of-bounds cells are impassable.
    #[inline]
    pub fn is_passable(&self, coord: GridCoord) -> bool {
        self.coord_to_index(coord)
            .map(|i| self.cells[i])
            .unwrap_or(false)
    }

    /// Set a cell's passable flag. Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set_passable(&mut self, coord: GridCoord, passable: bool) {
        if let Some(i) = self.coord_to_index(coord) {
            self.cells[i] = passable;
        }
    }

    /// Convert world coordinates to grid coordinates
    #[inline]
    pub fn world_to_grid(&self, point: WorldPoint) -> GridCoord {
        GridCoord::new(
            (point.x / self.cell_size).floor() as i32,
            (point.y / self.cell_size).floor() as i32,
        )
    }

    /// Convert grid coordinates to world coordinates (cell center)
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> WorldPoint {
        WorldPoint::new(
            (coord.x as f32 + 0.5) * self.cell_size,
            (coord.y as f32 + 0.5) * self.cell_size,
        )
    }

    /// World coordinates of a cell's min corner
    #[inline]
    pub fn cell_corner(&self, coord: GridCoord) -> WorldPoint {
        WorldPoint::new(
            coord.x as f32 * self.cell_size,
            coord.y as f32 * self.cell_size,
        )
    }

    /// Iterate over all cells with their coordinates
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, bool)> + '_ {
        (0..self.cells.len()).map(move |i| {
            let x = (i % self.width) as i32;
            let y = (i / self.width) as i32;
            (GridCoord::new(x, y), self.cells[i])
        })
    }

    /// Count passable cells
    pub fn passable_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}
