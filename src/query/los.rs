//! Line-of-sight oracles.
//!
//! The oracle answers one question: do two points see each other along an
//! unobstructed straight line? Two domain variants exist, a sampling test
//! against an occupancy grid and an exact segment test against indexed
//! obstacle polygons. Both are pure and deterministic; the [`LineOfSight`]
//! trait is the seam that lets the expansion engine take either.

use crate::core::{GridCoord, WorldPoint};
use crate::grid::OccupancyGrid;

use super::ObstacleIndex;

/// Predicate deciding unobstructed visibility between two world points.
pub trait LineOfSight {
    /// True when `to` is visible from `from`.
    ///
    /// Not required to be symmetric: the grid variant's terminal-sample
    /// rule makes a wall visible from open ground but nothing visible from
    /// inside the wall beyond itself.
    fn visible(&self, from: WorldPoint, to: WorldPoint) -> bool;
}

/// Oracle for an obstacle-free domain; every pair of points sees each other.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClearSight;

impl LineOfSight for ClearSight {
    #[inline]
    fn visible(&self, _from: WorldPoint, _to: WorldPoint) -> bool {
        true
    }
}

impl LineOfSight for ObstacleIndex {
    #[inline]
    fn visible(&self, from: WorldPoint, to: WorldPoint) -> bool {
        !self.blocks(from, to)
    }
}

/// Grid-occupancy oracle over world coordinates.
///
/// Maps both endpoints to their occupied cells and delegates to
/// [`grid_los`].
#[derive(Clone, Copy, Debug)]
pub struct GridSight<'a> {
    grid: &'a OccupancyGrid,
}

impl<'a> GridSight<'a> {
    /// Wrap an occupancy grid as a line-of-sight oracle.
    pub fn new(grid: &'a OccupancyGrid) -> Self {
        Self { grid }
    }
}

impl LineOfSight for GridSight<'_> {
    fn visible(&self, from: WorldPoint, to: WorldPoint) -> bool {
        grid_los(
            self.grid,
            self.grid.world_to_grid(from),
            self.grid.world_to_grid(to),
        )
    }
}

/// Sampling line-of-sight test between two grid cells.
///
/// The segment between the cells is sampled at `max(|dx|, |dy|)` integer
/// positions. Visibility fails when a sample leaves the grid or lands on an
/// impassable cell — unless that cell is the target itself, in which case
/// the observer sees the wall it hits (intentionally asymmetric). When a
/// step moves diagonally and BOTH orthogonal cells flanking the step are
/// impassable, visibility fails even though the stepped-onto cell is
/// passable: no seeing through the crack where two walls meet corner to
/// corner.
pub fn grid_los(grid: &OccupancyGrid, from: GridCoord, to: GridCoord) -> bool {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let steps = from.chebyshev_distance(&to);
    if steps == 0 {
        return true;
    }

    let mut prev = from;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let cur = GridCoord::new(
            (from.x as f32 + dx as f32 * t) as i32,
            (from.y as f32 + dy as f32 * t) as i32,
        );

        if !grid.in_bounds(cur) {
            return false;
        }
        if !grid.is_passable(cur) {
            // The terminal wall itself is visible; anything past it is not
            return cur == to;
        }

        // Diagonal step: both flanking orthogonal cells impassable blocks
        if cur.x != prev.x && cur.y != prev.y {
            let flank_a = GridCoord::new(prev.x, cur.y);
            let flank_b = GridCoord::new(cur.x, prev.y);
            if !grid.is_passable(flank_a) && !grid.is_passable(flank_b) {
                return false;
            }
        }
        prev = cur;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> GridCoord {
        GridCoord::new(x, y)
    }

    #[test]
    fn test_same_cell_visible() {
        let grid = OccupancyGrid::new(3, 3, 1.0);
        assert!(grid_los(&grid, c(1, 1), c(1, 1)));
    }

    #[test]
    fn test_clear_line_visible() {
        let grid = OccupancyGrid::new(5, 5, 1.0);
        assert!(grid_los(&grid, c(0, 0), c(4, 4)));
        assert!(grid_los(&grid, c(0, 2), c(4, 2)));
    }

    #[test]
    fn test_wall_blocks_beyond() {
        let mut grid = OccupancyGrid::new(5, 5, 1.0);
        grid.set_passable(c(2, 2), false);

        assert!(!grid_los(&grid, c(0, 2), c(4, 2)));
        assert!(!grid_los(&grid, c(4, 2), c(0, 2)));
    }

    #[test]
    fn test_terminal_wall_is_visible() {
        let mut grid = OccupancyGrid::new(5, 5, 1.0);
        grid.set_passable(c(2, 2), false);

        // The observer sees the wall it hits...
        assert!(grid_los(&grid, c(0, 2), c(2, 2)));
        // ...but nothing beyond it, and nothing from inside the wall out
        assert!(!grid_los(&grid, c(0, 2), c(3, 2)));
        assert!(!grid_los(&grid, c(2, 2), c(4, 2)));
    }

    #[test]
    fn test_out_of_bounds_not_visible() {
        let grid = OccupancyGrid::new(3, 3, 1.0);
        assert!(!grid_los(&grid, c(1, 1), c(5, 1)));
        assert!(!grid_los(&grid, c(1, 1), c(1, -2)));
    }

    #[test]
    fn test_diagonal_corner_blocked_when_both_flanks_walled() {
        let mut grid = OccupancyGrid::new(3, 3, 1.0);
        grid.set_passable(c(1, 0), false);
        grid.set_passable(c(0, 1), false);

        // (1,1) is passable but the corner crack is sealed
        assert!(!grid_los(&grid, c(0, 0), c(1, 1)));
        // And nothing further along that diagonal either
        assert!(!grid_los(&grid, c(0, 0), c(2, 2)));
    }

    #[test]
    fn test_diagonal_corner_open_when_one_flank_passable() {
        let mut grid = OccupancyGrid::new(3, 3, 1.0);
        grid.set_passable(c(1, 0), false);

        assert!(grid_los(&grid, c(0, 0), c(1, 1)));
        assert!(grid_los(&grid, c(0, 0), c(2, 2)));
    }

    #[test]
    fn test_grid_sight_world_coordinates() {
        let mut grid = OccupancyGrid::new(5, 5, 10.0);
        grid.set_passable(c(2, 2), false);
        let sight = GridSight::new(&grid);

        assert!(sight.visible(WorldPoint::new(5.0, 25.0), WorldPoint::new(15.0, 25.0)));
        assert!(!sight.visible(WorldPoint::new(5.0, 25.0), WorldPoint::new(45.0, 25.0)));
    }

    #[test]
    fn test_clear_sight_always_visible() {
        let sight = ClearSight;
        assert!(sight.visible(WorldPoint::ZERO, WorldPoint::new(1e6, -1e6)));
    }
}
