//! Frontier expansion over the mesh dual graph (TEA / d-TEA).
//!
//! Starting from the triangle containing the observer, visibility is
//! propagated across shared edges: a popped candidate is kept when the
//! oracle can see at least one of its representative points (vertices and
//! edge midpoints) from the observer, and its neighbors are pushed when
//! they are passable, unvisited, and — with a range limit configured —
//! their shared-edge midpoint lies within range.
//!
//! The result is the set of triangles graph-reachable through a chain of
//! locally edge-visible, non-obstacle triangles. That is a
//! reachability-bounded approximation of the true visibility polygon: it
//! can omit a triangle whose only sight line crosses no tested
//! representative point, and include one whose tested point is visible
//! while the rest of it is not. The approximation is deliberate and part of
//! the algorithm's contract.
//!
//! Expansion is iterative (explicit worklist, no recursion) and each query
//! owns its worklist and visited set, so any number of queries may run
//! concurrently against one shared mesh.

use log::trace;

use crate::core::WorldPoint;
use crate::mesh::{Mesh, TriangleId};

use super::los::LineOfSight;
use super::VisibilityOptions;

/// Visible triangle set produced by mesh-mode expansion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshVisibility {
    /// Visible triangle ids, sorted ascending.
    visible: Vec<TriangleId>,
}

impl MeshVisibility {
    fn empty() -> Self {
        Self::default()
    }

    /// Number of visible triangles.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// No triangle is visible.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Membership test by triangle id.
    pub fn contains(&self, id: TriangleId) -> bool {
        self.visible.binary_search(&id).is_ok()
    }

    /// Visible triangle ids, sorted ascending.
    pub fn ids(&self) -> &[TriangleId] {
        &self.visible
    }
}

/// Per-query scratch state. Never shared between queries; the mesh stays
/// read-only throughout.
struct ExpansionContext {
    worklist: Vec<TriangleId>,
    visited: Vec<bool>,
    visible: Vec<TriangleId>,
}

impl ExpansionContext {
    fn new(triangle_count: usize, origin: TriangleId) -> Self {
        Self {
            worklist: vec![origin],
            visited: vec![false; triangle_count],
            visible: Vec::new(),
        }
    }
}

/// Expand visibility from an observer point across the mesh.
///
/// Returns an empty set when the observer lies outside the mesh, inside an
/// obstacle triangle, or carries a non-finite coordinate.
pub fn expand_visibility<L: LineOfSight>(
    mesh: &Mesh,
    observer: WorldPoint,
    oracle: &L,
    options: &VisibilityOptions,
) -> MeshVisibility {
    if !observer.is_finite() {
        return MeshVisibility::empty();
    }
    let Some(origin) = mesh.locate(observer) else {
        return MeshVisibility::empty();
    };
    if mesh.triangle(origin).is_obstacle {
        return MeshVisibility::empty();
    }

    let mut ctx = ExpansionContext::new(mesh.triangle_count(), origin);
    let mut popped = 0usize;

    while let Some(id) = ctx.worklist.pop() {
        if ctx.visited[id.index()] {
            continue;
        }
        let triangle = mesh.triangle(id);
        if triangle.is_obstacle {
            continue;
        }

        if let Some(budget) = options.step_budget {
            if popped >= budget {
                break;
            }
        }
        popped += 1;

        // Blind or visible, the candidate is settled: marking rejected
        // triangles visited keeps each one oracle-tested at most once
        // even when several visible neighbors pushed it
        ctx.visited[id.index()] = true;
        if !candidate_visible(mesh, observer, oracle, id) {
            continue;
        }

        ctx.visible.push(id);

        for slot in 0..3 {
            let Some(neighbor) = triangle.neighbors[slot] else {
                continue;
            };
            if ctx.visited[neighbor.index()] || mesh.triangle(neighbor).is_obstacle {
                continue;
            }
            if let Some(range) = options.max_range {
                let midpoint = mesh.edge_midpoint(id, slot);
                if observer.distance(&midpoint) > range {
                    continue;
                }
            }
            ctx.worklist.push(neighbor);
        }
    }

    trace!(
        "expansion from {observer:?}: {} of {} triangles visible after {popped} steps",
        ctx.visible.len(),
        mesh.triangle_count()
    );

    ctx.visible.sort_unstable();
    MeshVisibility {
        visible: ctx.visible,
    }
}

/// Oracle-test a candidate triangle's representative points: its three
/// vertices and three edge midpoints, each checked from the observer,
/// short-circuiting on the first visible one.
fn candidate_visible<L: LineOfSight>(
    mesh: &Mesh,
    observer: WorldPoint,
    oracle: &L,
    id: TriangleId,
) -> bool {
    let [a, b, c] = mesh.vertex_positions(id);

    [a, b, c, a.midpoint(&b), b.midpoint(&c), c.midpoint(&a)]
        .into_iter()
        .any(|p| oracle.visible(observer, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridCoord;
    use crate::grid::OccupancyGrid;
    use crate::query::los::{ClearSight, GridSight};
    use crate::query::ObstacleIndex;

    fn open_mesh(w: usize, h: usize) -> Mesh {
        Mesh::from_grid(&OccupancyGrid::new(w, h, 1.0)).unwrap()
    }

    fn options() -> VisibilityOptions {
        VisibilityOptions::default()
    }

    #[test]
    fn test_open_mesh_fully_visible() {
        let mesh = open_mesh(4, 4);
        let result = expand_visibility(
            &mesh,
            WorldPoint::new(2.1, 2.1),
            &ClearSight,
            &options(),
        );

        assert_eq!(result.len(), mesh.triangle_count());
    }

    #[test]
    fn test_origin_triangle_always_included() {
        let mesh = open_mesh(4, 4);
        let observer = WorldPoint::new(0.3, 0.2);
        let origin = mesh.locate(observer).unwrap();

        let result = expand_visibility(&mesh, observer, &ClearSight, &options());
        assert!(result.contains(origin));
    }

    #[test]
    fn test_observer_outside_mesh_empty() {
        let mesh = open_mesh(4, 4);
        let result = expand_visibility(
            &mesh,
            WorldPoint::new(-3.0, 1.0),
            &ClearSight,
            &options(),
        );

        assert!(result.is_empty());
    }

    #[test]
    fn test_observer_in_obstacle_triangle_empty() {
        let mut grid = OccupancyGrid::new(3, 3, 1.0);
        grid.set_passable(GridCoord::new(1, 1), false);
        let mesh = Mesh::from_grid(&grid).unwrap();

        let result = expand_visibility(
            &mesh,
            WorldPoint::new(1.5, 1.4),
            &ClearSight,
            &options(),
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_obstacle_triangles_never_visible() {
        let mut grid = OccupancyGrid::new(3, 3, 1.0);
        grid.set_passable(GridCoord::new(1, 1), false);
        let mesh = Mesh::from_grid(&grid).unwrap();

        let result = expand_visibility(
            &mesh,
            WorldPoint::new(0.5, 0.4),
            &ClearSight,
            &options(),
        );

        for &id in result.ids() {
            assert!(!mesh.triangle(id).is_obstacle);
        }
        assert!(!result.is_empty());
    }

    #[test]
    fn test_obstacle_polygons_bound_expansion() {
        // A vertical wall of hole cells splits the 5x1 corridor
        let mut grid = OccupancyGrid::new(5, 1, 1.0);
        grid.set_passable(GridCoord::new(2, 0), false);
        let (mesh, holes) = Mesh::from_grid_with_holes(&grid).unwrap();

        let result = expand_visibility(&mesh, WorldPoint::new(0.5, 0.4), &holes, &options());

        // Cells 0 and 1 visible (4 triangles), nothing past the wall
        let visible_cells: Vec<usize> = result.ids().iter().map(|id| id.index() / 2).collect();
        assert!(visible_cells.iter().all(|&cell| cell < 2));
        assert!(result.contains(crate::mesh::TriangleId(0)));
        assert!(!result.contains(crate::mesh::TriangleId(8)));
    }

    #[test]
    fn test_range_zero_limits_to_origin() {
        let mesh = open_mesh(4, 4);
        let observer = WorldPoint::new(2.1, 2.1);
        let origin = mesh.locate(observer).unwrap();

        let result = expand_visibility(
            &mesh,
            observer,
            &ClearSight,
            &VisibilityOptions {
                max_range: Some(0.0),
                ..VisibilityOptions::default()
            },
        );

        assert!(result.len() <= 1);
        if !result.is_empty() {
            assert!(result.contains(origin));
        }
    }

    #[test]
    fn test_range_monotonicity() {
        let grid = OccupancyGrid::random(12, 12, 1.0, 0.2, 7);
        let mesh = Mesh::from_grid(&grid).unwrap();
        let observer = WorldPoint::new(6.2, 6.3);
        let sight = GridSight::new(&grid);

        let mut previous = MeshVisibility::empty();
        for range in [1.0f32, 2.5, 4.0, 8.0, 20.0] {
            let result = expand_visibility(
                &mesh,
                observer,
                &sight,
                &VisibilityOptions {
                    max_range: Some(range),
                    ..VisibilityOptions::default()
                },
            );
            for &id in previous.ids() {
                assert!(result.contains(id), "range {range} lost triangle {id:?}");
            }
            previous = result;
        }
    }

    #[test]
    fn test_determinism() {
        let grid = OccupancyGrid::random(10, 10, 1.0, 0.25, 99);
        let (mesh, holes) = Mesh::from_grid_with_holes(&grid).unwrap();
        let observer = WorldPoint::new(4.4, 5.6);

        let a = expand_visibility(&mesh, observer, &holes, &options());
        let b = expand_visibility(&mesh, observer, &holes, &options());
        assert_eq!(a, b);
    }

    #[test]
    fn test_visible_set_is_connected_to_origin() {
        let grid = OccupancyGrid::random(10, 10, 1.0, 0.3, 3);
        let mesh = Mesh::from_grid(&grid).unwrap();
        let observer = WorldPoint::new(5.2, 5.1);
        let sight = GridSight::new(&grid);

        let result = expand_visibility(&mesh, observer, &sight, &options());
        let Some(origin) = mesh.locate(observer) else {
            return;
        };
        if result.is_empty() {
            return;
        }

        // Flood the adjacency graph from the origin restricted to the
        // visible set; everything visible must be reached
        let mut reached = vec![false; mesh.triangle_count()];
        let mut stack = vec![origin];
        reached[origin.index()] = true;
        while let Some(id) = stack.pop() {
            for neighbor in mesh.triangle(id).neighbors.into_iter().flatten() {
                if !reached[neighbor.index()] && result.contains(neighbor) {
                    reached[neighbor.index()] = true;
                    stack.push(neighbor);
                }
            }
        }
        for &id in result.ids() {
            assert!(reached[id.index()], "triangle {id:?} disconnected");
        }
    }

    /// Oracle that rejects a fixed point set and counts how often one
    /// sentinel point is queried.
    struct MarkedBlind {
        blind: Vec<WorldPoint>,
        sentinel: WorldPoint,
        sentinel_calls: std::cell::Cell<usize>,
    }

    impl LineOfSight for MarkedBlind {
        fn visible(&self, _from: WorldPoint, to: WorldPoint) -> bool {
            if to == self.sentinel {
                self.sentinel_calls.set(self.sentinel_calls.get() + 1);
            }
            !self.blind.contains(&to)
        }
    }

    #[test]
    fn test_blind_triangle_oracle_tested_once() {
        let mesh = open_mesh(3, 3);
        // All six representative points of triangle 8 (first half of the
        // center cell) are blind. Its three neighbors stay visible through
        // an earlier point in their own candidate order, so the sentinel
        // midpoint (1.5, 1.0) is only ever queried by triangle 8's own
        // test. Three visible neighbors push the blind triangle; it must
        // still be tested exactly once.
        let blind = vec![
            WorldPoint::new(1.0, 1.0),
            WorldPoint::new(2.0, 1.0),
            WorldPoint::new(2.0, 2.0),
            WorldPoint::new(1.5, 1.0),
            WorldPoint::new(2.0, 1.5),
            WorldPoint::new(1.5, 1.5),
        ];
        let oracle = MarkedBlind {
            blind,
            sentinel: WorldPoint::new(1.5, 1.0),
            sentinel_calls: std::cell::Cell::new(0),
        };

        let result = expand_visibility(&mesh, WorldPoint::new(0.5, 0.3), &oracle, &options());

        assert!(!result.contains(TriangleId(8)));
        assert!(result.contains(TriangleId(9)));
        assert_eq!(oracle.sentinel_calls.get(), 1);
    }

    #[test]
    fn test_step_budget_bounds_work() {
        let mesh = open_mesh(8, 8);
        let result = expand_visibility(
            &mesh,
            WorldPoint::new(4.1, 4.1),
            &ClearSight,
            &VisibilityOptions {
                step_budget: Some(5),
                ..VisibilityOptions::default()
            },
        );

        assert!(result.len() <= 5);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_non_finite_observer_empty() {
        let mesh = open_mesh(2, 2);
        let result = expand_visibility(
            &mesh,
            WorldPoint::new(f32::NAN, 0.5),
            &ClearSight,
            &options(),
        );
        assert!(result.is_empty());
    }
}
