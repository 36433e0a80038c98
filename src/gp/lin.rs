//! Line in the plane, written as `A·x_1 + B·x_2 = k`.

use super::{Hyperplane, Vector};
use crate::precision;
use crate::{GeomError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A line in 2D space: the points `x` with `n·x = k`.
pub type Line = Hyperplane<2>;

/// Outcome of intersecting two lines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Intersection {
    /// The lines cross at exactly one point.
    Point(Vector),
    /// Both equations describe the same line.
    Coincident,
    /// The lines are parallel and never meet.
    Parallel,
}

impl Intersection {
    /// Returns the intersection point, if it is unique.
    pub fn point(&self) -> Option<&Vector> {
        match self {
            Intersection::Point(p) => Some(p),
            _ => None,
        }
    }
}

impl Hyperplane<2> {
    /// Creates the line `a·x_1 + b·x_2 = k`.
    ///
    /// Fails with `Overflow` if the basepoint leaves the decimal range.
    pub fn from_coefficients(a: Decimal, b: Decimal, k: Decimal) -> Result<Self> {
        Self::assemble(Vector::from_array([a, b]), k, precision::CONFUSION)
    }

    /// Intersects two lines using Cramer's rule.
    ///
    /// A (near) zero determinant is not an error: the lines are then either
    /// coincident or parallel, and the outcome says which. Fails with
    /// `Overflow` if the crossing point leaves the decimal range.
    pub fn intersection_with(&self, other: &Line) -> Result<Intersection> {
        let (a, b) = (self.normal_vector()[0], self.normal_vector()[1]);
        let (c, d) = (other.normal_vector()[0], other.normal_vector()[1]);
        let (k1, k2) = (self.constant_term(), other.constant_term());
        let overflow = || GeomError::Overflow("line intersection");

        let determinant = precision::checked_determinant(a, b, c, d).ok_or_else(overflow)?;
        if precision::is_near_zero(determinant, self.shared_tolerance(other)) {
            return Ok(if self.coincides_with(other) {
                tracing::debug!(line = %self, "intersection: same line");
                Intersection::Coincident
            } else {
                tracing::debug!(line = %self, other = %other, "intersection: parallel lines");
                Intersection::Parallel
            });
        }

        let x = precision::checked_determinant(d, b, k2, k1)
            .and_then(|n| n.checked_div(determinant))
            .ok_or_else(overflow)?;
        let y = precision::checked_determinant(a, c, k1, k2)
            .and_then(|n| n.checked_div(determinant))
            .ok_or_else(overflow)?;
        Ok(Intersection::Point(Vector::from_array([x, y])))
    }
}
