//! Plane in 3D space, written as `A·x_1 + B·x_2 + C·x_3 = k`.

use super::{Hyperplane, Vector};
use crate::precision;
use crate::Result;
use rust_decimal::Decimal;

/// A plane in 3D space: the points `x` with `n·x = k`.
///
/// Parallelism is checked with [`Hyperplane::is_parallel_with`], which
/// compares the normal vectors.
pub type Plane = Hyperplane<3>;

impl Hyperplane<3> {
    /// Creates the plane `a·x_1 + b·x_2 + c·x_3 = k`.
    ///
    /// Fails with `Overflow` if the basepoint leaves the decimal range.
    pub fn from_coefficients(a: Decimal, b: Decimal, c: Decimal, k: Decimal) -> Result<Self> {
        Self::assemble(Vector::from_array([a, b, c]), k, precision::CONFUSION)
    }
}
