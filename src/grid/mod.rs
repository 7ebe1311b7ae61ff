//! Occupancy-grid domain representation.

mod occupancy;

pub use occupancy::OccupancyGrid;
