//! Axis-aligned bounding box for fast-reject tests.
//!
//! [`Bounds`] is the rectangle used to cheaply reject segment/obstacle
//! intersection tests before running the exact orientation predicates.

use super::point::WorldPoint;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    /// Minimum corner (smallest x and y values).
    pub min: WorldPoint,
    /// Maximum corner (largest x and y values).
    pub max: WorldPoint,
}

impl Bounds {
    /// Create a new bounding box from min and max corners.
    #[inline]
    pub const fn new(min: WorldPoint, max: WorldPoint) -> Self {
        Self { min, max }
    }

    /// Create an empty (invalid) bounding box.
    ///
    /// The empty bounds has min > max, so it will expand to fit any point.
    #[inline]
    pub fn empty() -> Self {
        Self {
            min: WorldPoint::new(f32::INFINITY, f32::INFINITY),
            max: WorldPoint::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Check if the bounds are empty (invalid).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Smallest bounds containing all given points.
    pub fn from_points(points: &[WorldPoint]) -> Self {
        let mut bounds = Self::empty();
        for &p in points {
            bounds.expand_to_include(p);
        }
        bounds
    }

    /// Bounds of a segment between two endpoints.
    #[inline]
    pub fn from_segment(a: WorldPoint, b: WorldPoint) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Check if a point is inside the bounding box.
    #[inline]
    pub fn contains(&self, point: WorldPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if this bounds overlaps another.
    #[inline]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Expand bounds to include a point.
    #[inline]
    pub fn expand_to_include(&mut self, point: WorldPoint) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }
}
