//! Point location over the triangle arena.

use crate::core::geometry::point_in_triangle;
use crate::core::WorldPoint;

use super::{Mesh, TriangleId};

impl Mesh {
    /// Find the triangle containing a point.
    ///
    /// Linear scan with three half-plane sign tests per triangle. The first
    /// containing triangle wins, so a point exactly on a shared edge
    /// resolves by arena order; edges have zero measure, so the
    /// nondeterminism is acceptable for visibility queries.
    ///
    /// Returns `None` when the point lies in no triangle or carries a
    /// non-finite coordinate. Obstacle triangles are located like any
    /// other; the caller decides what an observer inside one means.
    pub fn locate(&self, point: WorldPoint) -> Option<TriangleId> {
        if !point.is_finite() || !self.bounds().contains(point) {
            return None;
        }

        self.triangle_ids().find(|&id| {
            let [a, b, c] = self.vertex_positions(id);
            point_in_triangle(point, a, b, c)
        })
    }
}
