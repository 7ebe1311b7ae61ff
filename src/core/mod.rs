//! Core types for the drishti visibility library.
//!
//! This module provides the fundamental types used throughout the library:
//! - [`WorldPoint`] and [`GridCoord`]: Coordinate types
//! - [`Bounds`]: Axis-aligned bounding box for fast-reject tests
//! - [`geometry`]: Orientation, intersection, and containment predicates

mod bounds;
mod point;

pub mod geometry;

pub use bounds::Bounds;
pub use point::{GridCoord, WorldPoint};
