//! Bounding-box indexed obstacle polygons ("holes").
//!
//! Each hole polygon carries its axis-aligned bounding box so the segment
//! blocking test can reject most polygons with four comparisons before
//! running the exact per-edge orientation predicates.

use crate::core::geometry::segments_intersect;
use crate::core::{Bounds, WorldPoint};

/// One hole polygon with its precomputed bounding box.
#[derive(Clone, Debug)]
struct Obstacle {
    vertices: Vec<WorldPoint>,
    bounds: Bounds,
}

/// Indexed collection of polygonal obstacles within the navigable domain.
#[derive(Clone, Debug, Default)]
pub struct ObstacleIndex {
    obstacles: Vec<Obstacle>,
}

impl ObstacleIndex {
    /// Build the index from polygon vertex lists.
    ///
    /// Consecutive duplicate vertices are dropped; polygons left with fewer
    /// than three vertices are ignored rather than reported as errors.
    pub fn new(polygons: Vec<Vec<WorldPoint>>) -> Self {
        let obstacles = polygons
            .into_iter()
            .filter_map(|polygon| {
                let vertices = dedup_consecutive(polygon);
                if vertices.len() < 3 {
                    return None;
                }
                let bounds = Bounds::from_points(&vertices);
                Some(Obstacle { vertices, bounds })
            })
            .collect();
        Self { obstacles }
    }

    /// An index with no obstacles; blocks nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of indexed polygons.
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// No polygons indexed.
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Does any obstacle polygon block the segment from `a` to `b`?
    ///
    /// A zero-length segment is never blocked. Per polygon: bounding-box
    /// fast reject, then the segment is tested against every polygon edge;
    /// any true intersection blocks.
    pub fn blocks(&self, a: WorldPoint, b: WorldPoint) -> bool {
        if a == b {
            return false;
        }
        let segment_bounds = Bounds::from_segment(a, b);

        self.obstacles.iter().any(|obstacle| {
            segment_bounds.overlaps(&obstacle.bounds)
                && polygon_edges_intersect(a, b, &obstacle.vertices)
        })
    }

    /// Iterate the indexed polygons.
    pub fn polygons(&self) -> impl Iterator<Item = &[WorldPoint]> {
        self.obstacles.iter().map(|o| o.vertices.as_slice())
    }
}

fn dedup_consecutive(mut polygon: Vec<WorldPoint>) -> Vec<WorldPoint> {
    polygon.dedup();
    // A closing vertex repeating the first is the same degeneracy
    if polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon.pop();
    }
    polygon
}

fn polygon_edges_intersect(a: WorldPoint, b: WorldPoint, vertices: &[WorldPoint]) -> bool {
    let n = vertices.len();
    (0..n).any(|i| segments_intersect(a, b, vertices[i], vertices[(i + 1) % n]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> WorldPoint {
        WorldPoint::new(x, y)
    }

    fn unit_square(x: f32, y: f32) -> Vec<WorldPoint> {
        vec![
            p(x, y),
            p(x + 1.0, y),
            p(x + 1.0, y + 1.0),
            p(x, y + 1.0),
        ]
    }

    #[test]
    fn test_segment_through_polygon_blocked() {
        let index = ObstacleIndex::new(vec![unit_square(1.0, 0.0)]);

        assert!(index.blocks(p(0.0, 0.5), p(3.0, 0.5)));
        assert!(index.blocks(p(3.0, 0.5), p(0.0, 0.5)));
    }

    #[test]
    fn test_segment_missing_polygon_clear() {
        let index = ObstacleIndex::new(vec![unit_square(1.0, 0.0)]);

        assert!(!index.blocks(p(0.0, 2.0), p(3.0, 2.0)));
        assert!(!index.blocks(p(0.0, 0.5), p(0.5, 0.5))); // stops short
    }

    #[test]
    fn test_bbox_fast_reject_agrees_with_exact_test() {
        let index = ObstacleIndex::new(vec![unit_square(10.0, 10.0)]);

        // Far away: rejected by bbox
        assert!(!index.blocks(p(0.0, 0.0), p(1.0, 1.0)));
        // Bbox overlaps but the segment passes above the square
        assert!(!index.blocks(p(9.0, 11.0), p(10.4, 11.8)));
    }

    #[test]
    fn test_zero_length_segment_never_blocked() {
        let index = ObstacleIndex::new(vec![unit_square(0.0, 0.0)]);

        assert!(!index.blocks(p(0.5, 0.5), p(0.5, 0.5)));
    }

    #[test]
    fn test_degenerate_polygons_ignored() {
        let index = ObstacleIndex::new(vec![
            vec![],
            vec![p(0.0, 0.0)],
            vec![p(0.0, 0.0), p(1.0, 0.0)],
            vec![p(0.0, 0.0), p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0)],
        ]);

        assert!(index.is_empty());
    }

    #[test]
    fn test_duplicate_vertices_dropped() {
        let index = ObstacleIndex::new(vec![vec![
            p(0.0, 0.0),
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(1.0, 1.0),
            p(0.0, 1.0),
            p(0.0, 0.0), // closing duplicate
        ]]);

        assert_eq!(index.len(), 1);
        assert_eq!(index.polygons().next().unwrap().len(), 4);
        assert!(index.blocks(p(-1.0, 0.5), p(2.0, 0.5)));
    }
}
