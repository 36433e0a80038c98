//! Geometric primitives package.
//!
//! `Vector` carries all the arithmetic. `Line` and `Plane` are the same
//! linear-equation type, `Hyperplane<DIM>`, fixed to 2 and 3 dimensions.

mod vector;
mod hyperplane;
mod lin;
mod pln;

// Re-export all types at module level
pub use vector::Vector;
pub use hyperplane::Hyperplane;
pub use lin::{Intersection, Line};
pub use pln::Plane;
