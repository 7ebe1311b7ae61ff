//! Visibility queries over meshes and occupancy grids.
//!
//! The mesh path runs frontier expansion ([`expand_visibility`]) with a
//! pluggable [`LineOfSight`] oracle; the grid path offers BFS expansion
//! ([`expand_grid_visibility`]) and an angular [`raycast_sweep`]. The
//! [`compute_visibility`] entry point dispatches on [`Domain`] and picks
//! the canonical oracle for each.

mod expansion;
mod grid_visibility;
mod los;
mod obstacles;

pub use expansion::{expand_visibility, MeshVisibility};
pub use grid_visibility::{expand_grid_visibility, raycast_sweep, GridVisibility};
pub use los::{grid_los, ClearSight, GridSight, LineOfSight};
pub use obstacles::ObstacleIndex;

use serde::{Deserialize, Serialize};

use crate::core::WorldPoint;
use crate::grid::OccupancyGrid;
use crate::mesh::Mesh;

/// Tuning knobs shared by all visibility queries.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct VisibilityOptions {
    /// Visibility radius in world units. `None` means unbounded.
    pub max_range: Option<f32>,
    /// Angular resolution of [`raycast_sweep`], in degrees.
    pub angle_step_deg: f32,
    /// Cap on expansion steps for mesh queries. `None` means unbounded.
    pub step_budget: Option<usize>,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            max_range: None,
            angle_step_deg: 1.0,
            step_budget: None,
        }
    }
}

impl VisibilityOptions {
    /// Options with a visibility radius and everything else default.
    pub fn with_range(range: f32) -> Self {
        Self {
            max_range: Some(range),
            ..Self::default()
        }
    }
}

/// The structure a visibility query runs against.
#[derive(Clone, Copy, Debug)]
pub enum Domain<'a> {
    /// Mesh with no occluders beyond its own connectivity.
    Mesh(&'a Mesh),
    /// Mesh with sight lines tested against hole polygons.
    MeshWithObstacles(&'a Mesh, &'a ObstacleIndex),
    /// Occupancy grid, queried by cell through BFS expansion.
    Grid(&'a OccupancyGrid),
    /// Occupancy grid, queried by cell through the angular raycast sweep
    /// at the configured `angle_step_deg`.
    GridSweep(&'a OccupancyGrid),
}

/// Result of [`compute_visibility`], shaped by the domain it ran against.
#[derive(Clone, Debug, PartialEq)]
pub enum VisibilityResult {
    Mesh(MeshVisibility),
    Grid(GridVisibility),
}

impl VisibilityResult {
    pub fn as_mesh(&self) -> Option<&MeshVisibility> {
        match self {
            Self::Mesh(v) => Some(v),
            Self::Grid(_) => None,
        }
    }

    pub fn as_grid(&self) -> Option<&GridVisibility> {
        match self {
            Self::Grid(v) => Some(v),
            Self::Mesh(_) => None,
        }
    }
}

/// Compute visibility from a world-space observer against a domain.
///
/// Mesh domains expand with [`ClearSight`] (connectivity only) or the
/// obstacle index as oracle; grid domains map the observer into cell
/// space and run BFS expansion, or the raycast sweep for
/// [`Domain::GridSweep`].
pub fn compute_visibility(
    observer: WorldPoint,
    domain: Domain<'_>,
    options: &VisibilityOptions,
) -> VisibilityResult {
    match domain {
        Domain::Mesh(mesh) => {
            VisibilityResult::Mesh(expand_visibility(mesh, observer, &ClearSight, options))
        }
        Domain::MeshWithObstacles(mesh, holes) => {
            VisibilityResult::Mesh(expand_visibility(mesh, observer, holes, options))
        }
        Domain::Grid(grid) => {
            if !observer.is_finite() {
                return VisibilityResult::Grid(GridVisibility::default());
            }
            let cell = grid.world_to_grid(observer);
            VisibilityResult::Grid(expand_grid_visibility(grid, cell, options))
        }
        Domain::GridSweep(grid) => {
            if !observer.is_finite() {
                return VisibilityResult::Grid(GridVisibility::default());
            }
            let cell = grid.world_to_grid(observer);
            VisibilityResult::Grid(raycast_sweep(grid, cell, options))
        }
    }
}
