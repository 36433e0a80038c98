//! hyperplane: exact-decimal analytic geometry
//!
//! Vectors of arbitrary dimension, lines in the plane and planes in space,
//! all backed by `rust_decimal::Decimal` coordinates.

pub mod gp;
pub mod precision;

// Re-exports for convenience
pub use gp::{Hyperplane, Intersection, Line, Plane, Vector};
pub use rust_decimal::Decimal;

/// Result type for geometric operations
pub type Result<T> = std::result::Result<T, GeomError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeomError {
    #[error("Invalid vector: {0}")]
    InvalidVector(String),

    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Cannot normalize the zero vector")]
    ZeroVector,

    #[error("Cannot compute an angle with the zero vector")]
    ZeroVectorInAngle,

    #[error("No unique parallel component: basis is the zero vector")]
    NoUniqueParallelComponent,

    #[error("No unique orthogonal component: basis is the zero vector")]
    NoUniqueOrthogonalComponent,

    #[error("Cross product is undefined for dimensions {left} and {right}")]
    UnsupportedCrossProduct { left: usize, right: usize },

    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),
}
