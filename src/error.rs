//! Error types for drishti

use thiserror::Error;

use crate::mesh::EdgeKey;

/// Mesh construction error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// An edge key accumulated more than two incident triangles. The input
    /// is not a manifold triangulation; construction cannot recover.
    #[error("non-manifold edge {key:?}: triangles {first}, {second}, {third} share it")]
    NonManifoldEdge {
        /// The offending canonical edge.
        key: EdgeKey,
        /// First triangle registered against the edge.
        first: usize,
        /// Second triangle registered against the edge.
        second: usize,
        /// Third triangle that attempted to register.
        third: usize,
    },

    /// A triangle vertex carried a NaN or infinite coordinate.
    #[error("triangle {triangle} has a non-finite vertex coordinate")]
    NonFiniteVertex {
        /// Index of the triangle in input order.
        triangle: usize,
    },
}

/// Crate result alias
pub type Result<T> = std::result::Result<T, MeshError>;
