//! Incremental mesh construction with vertex deduplication and adjacency
//! wiring.

use std::collections::HashMap;

use log::debug;

use crate::core::WorldPoint;
use crate::error::{MeshError, Result};

use super::{EdgeKey, Mesh, Triangle, TriangleId, VertexId};

/// Accumulates triangles supplied by an external triangulator (or the grid
/// splitter) and assembles the mesh in one pass.
///
/// Vertices are deduplicated by exact coordinate bit pattern: triangulators
/// and the grid splitter emit shared corners bit-identically, so no epsilon
/// merging is needed or wanted.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    vertices: Vec<WorldPoint>,
    vertex_lookup: HashMap<(u32, u32), VertexId>,
    triangles: Vec<Triangle>,
    /// First triangle (input order) with a NaN/Inf vertex, reported at build.
    non_finite: Option<usize>,
}

impl MeshBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder sized for an expected triangle count.
    pub fn with_capacity(triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(triangle_count),
            vertex_lookup: HashMap::with_capacity(triangle_count),
            triangles: Vec::with_capacity(triangle_count),
            non_finite: None,
        }
    }

    /// Number of triangles pushed so far.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// No triangles pushed yet.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Add a triangle by its three vertex coordinates in winding order.
    pub fn push(&mut self, coords: [WorldPoint; 3], is_obstacle: bool) {
        if self.non_finite.is_none() && coords.iter().any(|p| !p.is_finite()) {
            self.non_finite = Some(self.triangles.len());
        }

        let vertices = coords.map(|p| self.intern_vertex(p));
        self.triangles.push(Triangle {
            vertices,
            neighbors: [None; 3],
            is_obstacle,
        });
    }

    fn intern_vertex(&mut self, p: WorldPoint) -> VertexId {
        let key = (p.x.to_bits(), p.y.to_bits());
        if let Some(&id) = self.vertex_lookup.get(&key) {
            return id;
        }
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(p);
        self.vertex_lookup.insert(key, id);
        id
    }

    /// Assemble the mesh: accumulate edge incidences and wire mutual
    /// neighbor links. Fails on non-finite vertices or a non-manifold edge.
    pub fn build(self) -> Result<Mesh> {
        if let Some(triangle) = self.non_finite {
            return Err(MeshError::NonFiniteVertex { triangle });
        }

        let mut adjacency: HashMap<EdgeKey, Vec<(TriangleId, u8)>> =
            HashMap::with_capacity(self.triangles.len() * 2);
        let mut triangles = self.triangles;

        for index in 0..triangles.len() {
            let id = TriangleId(index as u32);
            for slot in 0..3u8 {
                let (u, v) = triangles[index].edge(slot as usize);
                let key = EdgeKey::new(u, v);
                let incident = adjacency.entry(key).or_default();

                match incident.as_slice() {
                    [] => {}
                    &[(other, other_slot)] => {
                        triangles[other.index()].neighbors[other_slot as usize] = Some(id);
                        triangles[index].neighbors[slot as usize] = Some(other);
                    }
                    &[(first, _), (second, _), ..] => {
                        return Err(MeshError::NonManifoldEdge {
                            key,
                            first: first.index(),
                            second: second.index(),
                            third: index,
                        });
                    }
                }
                incident.push((id, slot));
            }
        }

        debug!(
            "mesh built: {} triangles, {} vertices, {} edges",
            triangles.len(),
            self.vertices.len(),
            adjacency.len()
        );

        Ok(Mesh::from_parts(self.vertices, triangles, adjacency))
    }
}
