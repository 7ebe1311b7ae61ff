//! Triangle mesh with dual-graph adjacency.
//!
//! Triangles live in a flat arena and refer to each other by integer index,
//! never by ownership links, so the cyclic neighbor relation carries no
//! reference cycles. The mesh is built once ([`MeshBuilder`], or
//! [`Mesh::from_grid`] for a grid of diagonally split squares) and is
//! read-only afterwards: queries never mutate it, and independent queries
//! may run concurrently against a shared `&Mesh`.
//!
//! Adjacency is wired through canonical edge keys: each triangle registers
//! its three unordered vertex pairs, and when a second triangle registers
//! against an existing key the two are linked through the matching neighbor
//! slots. Neighbor slot `i` of a triangle corresponds to the edge between
//! its vertices `i` and `(i + 1) % 3`. A third registration against one key
//! means the input is not a manifold triangulation and construction fails.

mod builder;
mod locate;

pub use builder::MeshBuilder;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::{Bounds, WorldPoint};
use crate::error::Result;
use crate::grid::OccupancyGrid;
use crate::query::ObstacleIndex;

/// Stable identity of a deduplicated mesh vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Arena index of this vertex.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stable identity of a mesh triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriangleId(pub u32);

impl TriangleId {
    /// Arena index of this triangle.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Canonical unordered vertex pair identifying a mesh edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    /// Smaller vertex id.
    pub a: VertexId,
    /// Larger vertex id.
    pub b: VertexId,
}

impl EdgeKey {
    /// Build the canonical key for an edge between two vertices.
    #[inline]
    pub fn new(u: VertexId, v: VertexId) -> Self {
        if u <= v {
            Self { a: u, b: v }
        } else {
            Self { a: v, b: u }
        }
    }
}

/// A mesh triangle: three vertices in consistent winding, up to three
/// neighbors (slot-aligned with the edges), and an obstacle flag.
#[derive(Clone, Copy, Debug)]
pub struct Triangle {
    /// Vertex ids in winding order.
    pub vertices: [VertexId; 3],
    /// Neighbor across edge (v_i, v_{i+1 mod 3}), if any.
    pub neighbors: [Option<TriangleId>; 3],
    /// Obstacle triangles block visibility and never enter a visible set.
    pub is_obstacle: bool,
}

impl Triangle {
    /// Vertex pair of edge slot `i`.
    #[inline]
    pub fn edge(&self, i: usize) -> (VertexId, VertexId) {
        (self.vertices[i], self.vertices[(i + 1) % 3])
    }
}

/// Immutable triangle mesh with vertex arena and edge adjacency.
#[derive(Clone, Debug)]
pub struct Mesh {
    vertices: Vec<WorldPoint>,
    triangles: Vec<Triangle>,
    /// Incident (triangle, edge slot) pairs per canonical edge: one for a
    /// boundary edge, two for an interior edge.
    adjacency: HashMap<EdgeKey, Vec<(TriangleId, u8)>>,
    /// Bounding box of all vertices, for point-location fast reject.
    bounds: Bounds,
}

impl Mesh {
    pub(crate) fn from_parts(
        vertices: Vec<WorldPoint>,
        triangles: Vec<Triangle>,
        adjacency: HashMap<EdgeKey, Vec<(TriangleId, u8)>>,
    ) -> Self {
        let bounds = Bounds::from_points(&vertices);
        Self {
            vertices,
            triangles,
            adjacency,
            bounds,
        }
    }

    /// Build a mesh from an occupancy grid, splitting each cell along one
    /// diagonal into two triangles. Impassable cells become obstacle
    /// triangle pairs.
    pub fn from_grid(grid: &OccupancyGrid) -> Result<Self> {
        Ok(Self::from_grid_with_holes(grid)?.0)
    }

    /// As [`Mesh::from_grid`], additionally collecting every impassable
    /// cell's square as a hole polygon in an [`ObstacleIndex`] for the
    /// polygon-obstacle oracle.
    pub fn from_grid_with_holes(grid: &OccupancyGrid) -> Result<(Self, ObstacleIndex)> {
        let mut builder = MeshBuilder::with_capacity(grid.cell_count() * 2);
        let mut holes: Vec<Vec<WorldPoint>> = Vec::new();
        let cs = grid.cell_size();

        for (coord, passable) in grid.iter() {
            let corner = grid.cell_corner(coord);
            // Square corners: p0 top-left, p1 top-right, p2 bottom-left,
            // p3 bottom-right (in grid orientation); split along p0-p3.
            let p0 = corner;
            let p1 = WorldPoint::new(corner.x + cs, corner.y);
            let p2 = WorldPoint::new(corner.x, corner.y + cs);
            let p3 = WorldPoint::new(corner.x + cs, corner.y + cs);

            builder.push([p0, p1, p3], !passable);
            builder.push([p0, p3, p2], !passable);

            if !passable {
                holes.push(vec![p0, p1, p3, p2]);
            }
        }

        let mesh = builder.build()?;
        Ok((mesh, ObstacleIndex::new(holes)))
    }

    /// Number of triangles in the arena.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of deduplicated vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Triangle by id.
    #[inline]
    pub fn triangle(&self, id: TriangleId) -> &Triangle {
        &self.triangles[id.index()]
    }

    /// Vertex position by id.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> WorldPoint {
        self.vertices[id.index()]
    }

    /// The three vertex positions of a triangle, in winding order.
    #[inline]
    pub fn vertex_positions(&self, id: TriangleId) -> [WorldPoint; 3] {
        let t = self.triangle(id);
        [
            self.vertex(t.vertices[0]),
            self.vertex(t.vertices[1]),
            self.vertex(t.vertices[2]),
        ]
    }

    /// Centroid of a triangle.
    pub fn centroid(&self, id: TriangleId) -> WorldPoint {
        let [a, b, c] = self.vertex_positions(id);
        WorldPoint::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
    }

    /// Midpoint of a triangle's edge slot `i`.
    pub fn edge_midpoint(&self, id: TriangleId, i: usize) -> WorldPoint {
        let (u, v) = self.triangle(id).edge(i);
        self.vertex(u).midpoint(&self.vertex(v))
    }

    /// Bounding box of all mesh vertices.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Iterate triangle ids in arena order.
    pub fn triangle_ids(&self) -> impl Iterator<Item = TriangleId> {
        (0..self.triangles.len() as u32).map(TriangleId)
    }

    /// Iterate triangles with their ids.
    pub fn triangles(&self) -> impl Iterator<Item = (TriangleId, &Triangle)> {
        self.triangles
            .iter()
            .enumerate()
            .map(|(i, t)| (TriangleId(i as u32), t))
    }
}
