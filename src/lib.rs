//! 2D visibility computation over triangle meshes and occupancy grids.
//!
//! The crate builds triangle meshes from occupancy grids (obstacle cells
//! become hole polygons), locates points in the mesh, and answers
//! visibility queries two ways:
//!
//! - **Mesh mode**: frontier expansion over the mesh dual graph, gated by
//!   a pluggable line-of-sight oracle and an optional range limit.
//! - **Grid mode**: BFS expansion over cells with sampled sight lines, or
//!   an angular raycast sweep.
//!
//! ```
//! use drishti::{compute_visibility, Domain, Mesh, OccupancyGrid, VisibilityOptions, WorldPoint};
//!
//! let grid = OccupancyGrid::new(8, 8, 1.0);
//! let mesh = Mesh::from_grid(&grid)?;
//! let result = compute_visibility(
//!     WorldPoint::new(4.5, 4.5),
//!     Domain::Mesh(&mesh),
//!     &VisibilityOptions::with_range(5.0),
//! );
//! assert!(!result.as_mesh().unwrap().is_empty());
//! # Ok::<(), drishti::MeshError>(())
//! ```

pub mod core;
pub mod error;
pub mod grid;
pub mod mesh;
pub mod query;

pub use self::core::{Bounds, GridCoord, WorldPoint};
pub use error::{MeshError, Result};
pub use grid::OccupancyGrid;
pub use mesh::{EdgeKey, Mesh, MeshBuilder, Triangle, TriangleId, VertexId};
pub use query::{
    compute_visibility, expand_grid_visibility, expand_visibility, grid_los, raycast_sweep,
    ClearSight, Domain, GridSight, GridVisibility, LineOfSight, MeshVisibility, ObstacleIndex,
    VisibilityOptions, VisibilityResult,
};
