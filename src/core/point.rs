//! Point and coordinate types for the visibility domains.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Grid coordinates (integer cell indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance (max of x and y distance), the sample count of a
    /// line-of-sight ray between two cells
    #[inline]
    pub fn chebyshev_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Get the 4 cardinal neighbors (N, E, S, W)
    #[inline]
    pub fn neighbors_4(&self) -> [GridCoord; 4] {
        [
            GridCoord::new(self.x, self.y + 1), // North
            GridCoord::new(self.x + 1, self.y), // East
            GridCoord::new(self.x, self.y - 1), // South
            GridCoord::new(self.x - 1, self.y), // West
        ]
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

/// World coordinates (f32, shared coordinate space of the mesh)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint between this point and another
    #[inline]
    pub fn midpoint(&self, other: &WorldPoint) -> WorldPoint {
        WorldPoint::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Create a point at a given angle and distance from this point
    #[inline]
    pub fn point_at(&self, angle: f32, distance: f32) -> WorldPoint {
        WorldPoint::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }

    /// Normalize to unit length; the zero vector stays zero
    #[inline]
    pub fn normalize(&self) -> WorldPoint {
        let len = (self.x * self.x + self.y * self.y).sqrt();
        if len > 0.0 {
            WorldPoint::new(self.x / len, self.y / len)
        } else {
            WorldPoint::ZERO
        }
    }

    /// Cross product (z-component of 3D cross product)
    #[inline]
    pub fn cross(&self, other: &WorldPoint) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Component-wise minimum
    #[inline]
    pub fn min(&self, other: WorldPoint) -> WorldPoint {
        WorldPoint::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum
    #[inline]
    pub fn max(&self, other: WorldPoint) -> WorldPoint {
        WorldPoint::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Both coordinates are finite (no NaN/Inf)
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for WorldPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        WorldPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for WorldPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        WorldPoint::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for WorldPoint {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        WorldPoint::new(self.x * scalar, self.y * scalar)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_grid_coord_neighbors() {
        let c = GridCoord::new(5, 5);
        let n4 = c.neighbors_4();
        assert_eq!(n4[0], GridCoord::new(5, 6)); // N
        assert_eq!(n4[1], GridCoord::new(6, 5)); // E
        assert_eq!(n4[2], GridCoord::new(5, 4)); // S
        assert_eq!(n4[3], GridCoord::new(4, 5)); // W
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = GridCoord::new(0, 0);
        let b = GridCoord::new(3, -7);
        assert_eq!(a.chebyshev_distance(&b), 7);
        assert_eq!(b.chebyshev_distance(&a), 7);
        assert_eq!(a.chebyshev_distance(&a), 0);
    }

    #[test]
    fn test_world_point_distance() {
        let a = WorldPoint::new(0.0, 0.0);
        let b = WorldPoint::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn test_midpoint() {
        let a = WorldPoint::new(0.0, 0.0);
        let b = WorldPoint::new(2.0, 6.0);
        assert_eq!(a.midpoint(&b), WorldPoint::new(1.0, 3.0));
    }

    #[test]
    fn test_point_at() {
        let origin = WorldPoint::ZERO;
        let east = origin.point_at(0.0, 2.0);
        assert_relative_eq!(east.x, 2.0);
        assert_relative_eq!(east.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_normalize() {
        let v = WorldPoint::new(3.0, 4.0).normalize();
        assert_relative_eq!(v.x, 0.6);
        assert_relative_eq!(v.y, 0.8);
        assert_eq!(WorldPoint::ZERO.normalize(), WorldPoint::ZERO);
    }

    #[test]
    fn test_is_finite() {
        assert!(WorldPoint::new(1.0, -2.0).is_finite());
        assert!(!WorldPoint::new(f32::NAN, 0.0).is_finite());
        assert!(!WorldPoint::new(0.0, f32::INFINITY).is_finite());
    }
}
