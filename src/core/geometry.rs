//! Exact-sign geometry predicates.
//!
//! All predicates are total over finite input and allocation-free. NaN/Inf
//! coordinates are out of contract; callers validate at the API boundary
//! ([`crate::mesh::Mesh::locate`], mesh construction).

use super::point::WorldPoint;

/// Signed area of the parallelogram spanned by (b - a) and (c - a).
///
/// Positive when a→b→c turns counter-clockwise, negative when clockwise,
/// zero when collinear.
#[inline]
pub fn orient2d(a: WorldPoint, b: WorldPoint, c: WorldPoint) -> f32 {
    (b - a).cross(&(c - a))
}

/// True when a→b→c turns strictly counter-clockwise.
#[inline]
pub fn ccw(a: WorldPoint, b: WorldPoint, c: WorldPoint) -> bool {
    orient2d(a, b, c) > 0.0
}

/// Segment AB intersects segment CD.
///
/// Intersection holds iff the orientations of (A,C,D) and (B,C,D) differ,
/// and the orientations of (C,A,B) and (D,A,B) differ. Shared endpoints and
/// collinear overlaps where one orientation pair agrees do not count as
/// intersections, matching the blocking test the obstacle index needs: a
/// sight line grazing an obstacle corner is not blocked.
#[inline]
pub fn segments_intersect(a: WorldPoint, b: WorldPoint, c: WorldPoint, d: WorldPoint) -> bool {
    ccw(a, c, d) != ccw(b, c, d) && ccw(a, b, c) != ccw(a, b, d)
}

/// Point containment in the triangle (a, b, c) via three half-plane signs.
///
/// Inside iff no strictly-positive and strictly-negative sign coexist, so
/// the test is winding-agnostic and edge-inclusive. Points exactly on a
/// shared edge are contained by both incident triangles; the point-location
/// scan breaks that tie by iteration order.
#[inline]
pub fn point_in_triangle(p: WorldPoint, a: WorldPoint, b: WorldPoint, c: WorldPoint) -> bool {
    let d1 = orient2d(p, a, b);
    let d2 = orient2d(p, b, c);
    let d3 = orient2d(p, c, a);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}
