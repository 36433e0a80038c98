//! Vector with exact decimal coordinates.
//!
//! The dimension is fixed at construction. Binary operations check that
//! both operands have the same dimension and report
//! [`GeomError::DimensionMismatch`] otherwise.

use crate::precision;
use crate::{GeomError, Result};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, Neg};

/// An immutable vector of decimal coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Decimal>", into = "Vec<Decimal>")]
pub struct Vector {
    coordinates: Vec<Decimal>,
}

impl Vector {
    /// Creates a vector from its coordinates.
    /// Fails with `InvalidVector` if there are none.
    pub fn new<I>(coordinates: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Decimal>,
    {
        let coordinates: Vec<Decimal> = coordinates.into_iter().map(Into::into).collect();
        if coordinates.is_empty() {
            return Err(GeomError::InvalidVector(
                "the coordinates must be nonempty".to_string(),
            ));
        }
        Ok(Self { coordinates })
    }

    /// Creates a vector from floating point coordinates.
    ///
    /// Each value is converted to its shortest decimal form, so `0.1`
    /// becomes exactly `0.1`. NaN and infinities are rejected.
    pub fn from_floats(coordinates: &[f64]) -> Result<Self> {
        let coordinates = coordinates
            .iter()
            .map(|&x| {
                Decimal::from_f64(x).ok_or_else(|| {
                    GeomError::InvalidVector(format!("coordinate {} is not representable", x))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(coordinates)
    }

    // N is a fixed, nonzero dimension at every call site.
    pub(crate) fn from_array<const N: usize>(coordinates: [Decimal; N]) -> Self {
        Self {
            coordinates: coordinates.to_vec(),
        }
    }

    /// Creates the zero vector of the given dimension.
    pub fn zero(dimension: usize) -> Result<Self> {
        Self::new(vec![Decimal::ZERO; dimension])
    }

    /// Returns the number of coordinates.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    /// Returns the coordinates.
    #[inline]
    pub fn coordinates(&self) -> &[Decimal] {
        &self.coordinates
    }

    /// Iterates over the coordinates.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Decimal> {
        self.coordinates.iter()
    }

    fn check_dimension(&self, other: &Vector) -> Result<()> {
        if self.dimension() != other.dimension() {
            return Err(GeomError::DimensionMismatch {
                expected: self.dimension(),
                found: other.dimension(),
            });
        }
        Ok(())
    }

    fn map(&self, f: impl Fn(Decimal) -> Decimal) -> Vector {
        Vector {
            coordinates: self.coordinates.iter().map(|&x| f(x)).collect(),
        }
    }

    fn try_map(
        &self,
        operation: &'static str,
        f: impl Fn(Decimal) -> Option<Decimal>,
    ) -> Result<Vector> {
        let coordinates = self
            .coordinates
            .iter()
            .map(|&x| f(x).ok_or(GeomError::Overflow(operation)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Vector { coordinates })
    }

    // Callers have already checked the dimensions.
    fn try_zip_with(
        &self,
        other: &Vector,
        operation: &'static str,
        f: impl Fn(Decimal, Decimal) -> Option<Decimal>,
    ) -> Result<Vector> {
        let coordinates = self
            .coordinates
            .iter()
            .zip(&other.coordinates)
            .map(|(&x, &y)| f(x, y).ok_or(GeomError::Overflow(operation)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Vector { coordinates })
    }

    fn dot_unchecked(&self, other: &Vector) -> Result<Decimal> {
        self.coordinates
            .iter()
            .zip(&other.coordinates)
            .try_fold(Decimal::ZERO, |sum, (&x, &y)| {
                x.checked_mul(y).and_then(|p| sum.checked_add(p))
            })
            .ok_or(GeomError::Overflow("dot product"))
    }

    /// Largest absolute coordinate `m`, and the norm of the vector divided
    /// by `m`. The magnitude is their product.
    fn scaled_norm(&self) -> (Decimal, Decimal) {
        let scale = self
            .coordinates
            .iter()
            .map(|x| x.abs())
            .max()
            .unwrap_or(Decimal::ZERO);
        if scale.is_zero() {
            return (Decimal::ZERO, Decimal::ZERO);
        }
        // Every ratio lies in [-1, 1] and one of them is exactly +/-1, so the
        // sum of squares is in [1, dimension].
        let sum: Decimal = self
            .coordinates
            .iter()
            .map(|&x| {
                let ratio = x / scale;
                ratio * ratio
            })
            .sum();
        (scale, sum.sqrt().unwrap_or(Decimal::ONE))
    }

    /// Returns the sum of two vectors.
    pub fn plus(&self, other: &Vector) -> Result<Vector> {
        self.check_dimension(other)?;
        self.try_zip_with(other, "vector sum", Decimal::checked_add)
    }

    /// Returns the difference of two vectors.
    pub fn minus(&self, other: &Vector) -> Result<Vector> {
        self.check_dimension(other)?;
        self.try_zip_with(other, "vector difference", Decimal::checked_sub)
    }

    /// Returns the element-wise product of two vectors.
    pub fn component_mul(&self, other: &Vector) -> Result<Vector> {
        self.check_dimension(other)?;
        self.try_zip_with(other, "element-wise product", Decimal::checked_mul)
    }

    /// Returns the vector scaled by `c`.
    pub fn times_scalar(&self, c: Decimal) -> Result<Vector> {
        self.try_map("scalar product", |x| x.checked_mul(c))
    }

    /// Returns the Euclidean norm.
    ///
    /// The coordinates are scaled by the largest of them before squaring,
    /// so neither large nor tiny coordinates lose the result. Fails with
    /// `Overflow` only if the norm itself exceeds the decimal range.
    pub fn magnitude(&self) -> Result<Decimal> {
        let (scale, norm) = self.scaled_norm();
        scale
            .checked_mul(norm)
            .ok_or(GeomError::Overflow("magnitude"))
    }

    /// Returns the unit vector with the same direction.
    ///
    /// Fails with `ZeroVector` when the magnitude is below `tolerance`.
    pub fn normalize(&self, tolerance: Decimal) -> Result<Vector> {
        let (scale, norm) = self.scaled_norm();
        if scale.is_zero() || self.is_zero(tolerance) {
            return Err(GeomError::ZeroVector);
        }
        self.try_map("normalize", |x| (x / scale).checked_div(norm))
    }

    /// Computes the dot product.
    pub fn dot(&self, other: &Vector) -> Result<Decimal> {
        self.check_dimension(other)?;
        self.dot_unchecked(other)
    }

    /// Cosine of the angle between two vectors, clamped to [-1, 1].
    fn cosine_to(&self, other: &Vector, tolerance: Decimal) -> Result<Decimal> {
        self.check_dimension(other)?;
        let u = self
            .normalize(tolerance)
            .map_err(|_| GeomError::ZeroVectorInAngle)?;
        let v = other
            .normalize(tolerance)
            .map_err(|_| GeomError::ZeroVectorInAngle)?;
        // Rounding in the normalization can push the dot product past +/-1.
        Ok(u.dot_unchecked(&v)?.clamp(Decimal::NEGATIVE_ONE, Decimal::ONE))
    }

    /// Returns the angle to another vector in radians, in [0, PI].
    ///
    /// Fails with `ZeroVectorInAngle` if either vector is (near) zero.
    pub fn angle_to(&self, other: &Vector, tolerance: Decimal) -> Result<f64> {
        let cosine = self.cosine_to(other, tolerance)?;
        // Every decimal in [-1, 1] has an f64 image.
        Ok(cosine.to_f64().unwrap_or_default().acos())
    }

    /// Returns the angle to another vector in degrees, in [0, 180].
    pub fn angle_to_degrees(&self, other: &Vector, tolerance: Decimal) -> Result<f64> {
        self.angle_to(other, tolerance).map(f64::to_degrees)
    }

    /// Returns true if the dot product is within `tolerance` of zero.
    /// The zero vector is orthogonal to every vector.
    pub fn is_orthogonal_to(&self, other: &Vector, tolerance: Decimal) -> Result<bool> {
        Ok(precision::is_near_zero(self.dot(other)?, tolerance))
    }

    /// Returns true if the magnitude is below `tolerance`.
    pub fn is_zero(&self, tolerance: Decimal) -> bool {
        let (scale, norm) = self.scaled_norm();
        // A magnitude past the decimal range is certainly not small.
        scale
            .checked_mul(norm)
            .is_some_and(|magnitude| precision::is_near_zero(magnitude, tolerance))
    }

    /// Returns true if the vectors point along the same or opposite directions.
    ///
    /// The zero vector is parallel to every vector. Otherwise the sine of the
    /// angle between the two directions must be below `tolerance`.
    pub fn is_parallel_to(&self, other: &Vector, tolerance: Decimal) -> Result<bool> {
        self.check_dimension(other)?;
        if self.is_zero(tolerance) || other.is_zero(tolerance) {
            return Ok(true);
        }
        let u = self.normalize(tolerance)?;
        let v = other.normalize(tolerance)?;
        // |sin| is the length of u's component orthogonal to v.
        let along = u.dot_unchecked(&v)?;
        let sine = u
            .try_zip_with(&v, "parallel check", |a, b| {
                along.checked_mul(b).and_then(|p| a.checked_sub(p))
            })?
            .magnitude()?;
        Ok(precision::is_near_zero(sine, tolerance))
    }

    /// Returns the component of this vector parallel to `basis`.
    ///
    /// Fails with `NoUniqueParallelComponent` if `basis` is (near) zero.
    pub fn project_onto(&self, basis: &Vector, tolerance: Decimal) -> Result<Vector> {
        self.check_dimension(basis)?;
        let unit = basis
            .normalize(tolerance)
            .map_err(|_| GeomError::NoUniqueParallelComponent)?;
        let weight = self.dot_unchecked(&unit)?;
        unit.times_scalar(weight)
    }

    /// Returns the component of this vector orthogonal to `basis`.
    ///
    /// Fails with `NoUniqueOrthogonalComponent` if `basis` is (near) zero.
    pub fn orthogonal_component(&self, basis: &Vector, tolerance: Decimal) -> Result<Vector> {
        let parallel = self.project_onto(basis, tolerance).map_err(|e| match e {
            GeomError::NoUniqueParallelComponent => GeomError::NoUniqueOrthogonalComponent,
            other => other,
        })?;
        self.minus(&parallel)
    }

    /// Splits this vector into its (parallel, orthogonal) components
    /// relative to `basis`.
    pub fn decompose(&self, basis: &Vector, tolerance: Decimal) -> Result<(Vector, Vector)> {
        let parallel = self.project_onto(basis, tolerance)?;
        let orthogonal = self.minus(&parallel)?;
        Ok((parallel, orthogonal))
    }

    /// Computes the cross product of two 3-dimensional vectors.
    pub fn cross(&self, other: &Vector) -> Result<Vector> {
        let (a, b) = match (self.coordinates.as_slice(), other.coordinates.as_slice()) {
            ([a0, a1, a2], [b0, b1, b2]) => ([*a0, *a1, *a2], [*b0, *b1, *b2]),
            _ => {
                return Err(GeomError::UnsupportedCrossProduct {
                    left: self.dimension(),
                    right: other.dimension(),
                })
            }
        };
        let component = |i: usize, j: usize| {
            precision::checked_determinant(a[i], a[j], b[i], b[j])
                .ok_or(GeomError::Overflow("cross product"))
        };
        Ok(Vector {
            coordinates: vec![component(1, 2)?, component(2, 0)?, component(0, 1)?],
        })
    }

    /// Computes the 2D cross product (signed scalar result).
    ///
    /// This is the z coordinate of the cross product of both vectors
    /// embedded in the XY plane.
    pub fn perp_dot(&self, other: &Vector) -> Result<Decimal> {
        match (self.coordinates.as_slice(), other.coordinates.as_slice()) {
            ([a0, a1], [b0, b1]) => precision::checked_determinant(*a0, *a1, *b0, *b1)
                .ok_or(GeomError::Overflow("cross product")),
            _ => Err(GeomError::UnsupportedCrossProduct {
                left: self.dimension(),
                right: other.dimension(),
            }),
        }
    }

    /// Area of the parallelogram spanned by two 2D or two 3D vectors.
    pub fn parallelogram_area(&self, other: &Vector) -> Result<Decimal> {
        match (self.dimension(), other.dimension()) {
            (2, 2) => Ok(self.perp_dot(other)?.abs()),
            _ => self.cross(other)?.magnitude(),
        }
    }

    /// Area of the triangle spanned by two 2D or two 3D vectors.
    pub fn triangle_area(&self, other: &Vector) -> Result<Decimal> {
        Ok(self.parallelogram_area(other)? / Decimal::TWO)
    }

    /// Returns a copy with every coordinate rounded to `places` decimals.
    pub fn rounded(&self, places: u32) -> Vector {
        self.map(|x| x.round_dp(places).normalize())
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector: (")?;
        for (i, x) in self.coordinates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, ")")
    }
}

impl TryFrom<Vec<Decimal>> for Vector {
    type Error = GeomError;

    fn try_from(coordinates: Vec<Decimal>) -> Result<Self> {
        Self::new(coordinates)
    }
}

impl From<Vector> for Vec<Decimal> {
    fn from(v: Vector) -> Self {
        v.coordinates
    }
}

impl Index<usize> for Vector {
    type Output = Decimal;

    fn index(&self, index: usize) -> &Decimal {
        &self.coordinates[index]
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a Decimal;
    type IntoIter = std::slice::Iter<'a, Decimal>;

    fn into_iter(self) -> Self::IntoIter {
        self.coordinates.iter()
    }
}

impl Neg for &Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        self.map(|x| -x)
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        -&self
    }
}
