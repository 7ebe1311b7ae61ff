//! Grid-mode visibility: BFS expansion over the cell graph and the
//! angular raycast sweep.
//!
//! Both produce a [`GridVisibility`] with visible floor cells and visible
//! wall cells kept apart. A wall cell is visible when a sight line
//! terminates on it; walls never propagate visibility further.

use std::collections::{HashSet, VecDeque};

use log::trace;

use crate::core::{GridCoord, WorldPoint};
use crate::grid::OccupancyGrid;

use super::los::grid_los;
use super::VisibilityOptions;

/// Visible cells of a grid query, split by cell kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridVisibility {
    /// Visible passable cells, observer included.
    pub floor: HashSet<GridCoord>,
    /// Impassable cells a sight line terminated on.
    pub walls: HashSet<GridCoord>,
}

impl GridVisibility {
    /// Total visible cell count, floor and walls combined.
    pub fn len(&self) -> usize {
        self.floor.len() + self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floor.is_empty() && self.walls.is_empty()
    }

    /// Membership test over both sets.
    pub fn contains(&self, cell: GridCoord) -> bool {
        self.floor.contains(&cell) || self.walls.contains(&cell)
    }
}

/// BFS visibility expansion from an observer cell.
///
/// Frontier cells are the 4-neighbors of already-visible floor cells; each
/// is admitted when the sampled line of sight from the observer reaches it.
/// Impassable frontier cells land in `walls` and are not expanded. With
/// `max_range` set, cells whose center lies farther than the range (in
/// world units) from the observer's center are never considered.
///
/// An observer that is out of bounds or standing on an impassable cell
/// yields an empty result.
pub fn expand_grid_visibility(
    grid: &OccupancyGrid,
    observer: GridCoord,
    options: &VisibilityOptions,
) -> GridVisibility {
    let mut result = GridVisibility::default();
    if !grid.is_passable(observer) {
        return result;
    }

    let origin_center = grid.grid_to_world(observer);
    let in_range = |cell: GridCoord| match options.max_range {
        Some(range) => origin_center.distance(&grid.grid_to_world(cell)) <= range,
        None => true,
    };

    let mut queue = VecDeque::new();
    let mut seen = HashSet::new();
    queue.push_back(observer);
    seen.insert(observer);
    result.floor.insert(observer);

    while let Some(cell) = queue.pop_front() {
        for neighbor in cell.neighbors_4() {
            if !grid.in_bounds(neighbor) || !seen.insert(neighbor) {
                continue;
            }
            if !in_range(neighbor) || !grid_los(grid, observer, neighbor) {
                continue;
            }
            if grid.is_passable(neighbor) {
                result.floor.insert(neighbor);
                queue.push_back(neighbor);
            } else {
                result.walls.insert(neighbor);
            }
        }
    }

    trace!(
        "grid expansion from {observer:?}: {} floor, {} walls",
        result.floor.len(),
        result.walls.len()
    );
    result
}

/// Angular raycast sweep from an observer cell.
///
/// Casts one ray per `angle_step_deg` through a full turn, marching
/// cell-by-cell out to `max_range` (in cells; unbounded rays stop at the
/// grid edge). Each ray marks the passable cells it crosses as floor and
/// stops at the first impassable cell, marking it as a visible wall.
pub fn raycast_sweep(
    grid: &OccupancyGrid,
    observer: GridCoord,
    options: &VisibilityOptions,
) -> GridVisibility {
    let mut result = GridVisibility::default();
    if !grid.is_passable(observer) {
        return result;
    }
    result.floor.insert(observer);

    // Unbounded rays must cover the grid diagonal; max(width, height)
    // would strand the far corners
    let reach = match options.max_range {
        Some(range) => (range / grid.cell_size()).ceil() as i32,
        None => {
            let w = grid.width() as f32;
            let h = grid.height() as f32;
            (w * w + h * h).sqrt().ceil() as i32
        }
    };

    let origin = WorldPoint::new(observer.x as f32, observer.y as f32);
    let step = options.angle_step_deg.max(f32::EPSILON);
    let rays = (360.0 / step).ceil() as u32;
    for ray in 0..rays {
        let angle = (ray as f32 * step).to_radians();

        for distance in 1..=reach {
            let sample = origin.point_at(angle, distance as f32);
            let cell = GridCoord::new(sample.x as i32, sample.y as i32);
            if !grid.in_bounds(cell) {
                break;
            }
            if grid.is_passable(cell) {
                result.floor.insert(cell);
            } else {
                result.walls.insert(cell);
                break;
            }
        }
    }

    trace!(
        "raycast sweep from {observer:?}: {} floor, {} walls over {rays} rays",
        result.floor.len(),
        result.walls.len()
    );
    result
}
