//! Linear equation `n·x = k` in a fixed number of dimensions.
//!
//! Lines (`DIM = 2`) and planes (`DIM = 3`) share everything here: the
//! basepoint derivation, the coincidence test and the equation rendering.

use super::Vector;
use crate::precision;
use crate::{GeomError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The set of points `x` with `normal_vector · x = constant_term`.
///
/// The basepoint is derived once at construction. It is absent when the
/// normal vector is zero within the tolerance; such a degenerate equation
/// describes either all of space (`k = 0`) or nothing.
#[derive(Clone, Debug, Serialize)]
pub struct Hyperplane<const DIM: usize> {
    normal_vector: Vector,
    constant_term: Decimal,
    #[serde(skip)]
    basepoint: Option<Vector>,
    tolerance: Decimal,
}

impl<const DIM: usize> Hyperplane<DIM> {
    const NONZERO_DIMENSION: () = assert!(DIM > 0, "hyperplane dimension must be nonzero");

    /// Creates `normal_vector · x = constant_term` with the default tolerance.
    pub fn new(normal_vector: Vector, constant_term: Decimal) -> Result<Self> {
        Self::with_tolerance(normal_vector, constant_term, precision::CONFUSION)
    }

    /// Creates `normal_vector · x = constant_term` whose zero, parallelism
    /// and coincidence checks use `tolerance`.
    ///
    /// Fails with `DimensionMismatch` unless the normal vector has `DIM`
    /// coordinates, and with `Overflow` if the basepoint leaves the decimal
    /// range.
    pub fn with_tolerance(
        normal_vector: Vector,
        constant_term: Decimal,
        tolerance: Decimal,
    ) -> Result<Self> {
        let () = Self::NONZERO_DIMENSION;
        if normal_vector.dimension() != DIM {
            return Err(GeomError::DimensionMismatch {
                expected: DIM,
                found: normal_vector.dimension(),
            });
        }
        Self::assemble(normal_vector, constant_term, tolerance)
    }

    // The caller guarantees that `normal_vector` has DIM coordinates.
    pub(super) fn assemble(
        normal_vector: Vector,
        constant_term: Decimal,
        tolerance: Decimal,
    ) -> Result<Self> {
        let basepoint = Self::compute_basepoint(&normal_vector, constant_term, tolerance)?;
        Ok(Self {
            normal_vector,
            constant_term,
            basepoint,
            tolerance,
        })
    }

    fn compute_basepoint(
        normal_vector: &Vector,
        constant_term: Decimal,
        tolerance: Decimal,
    ) -> Result<Option<Vector>> {
        let coordinates = normal_vector.coordinates();
        // A normal that is not zero as a whole may still have every single
        // coordinate below the tolerance; fall back to the largest one.
        let Some(index) = precision::first_nonzero_index(coordinates, tolerance)
            .or_else(|| largest_coordinate_index(coordinates))
            .filter(|&i| !coordinates[i].is_zero() && !normal_vector.is_zero(tolerance))
        else {
            tracing::debug!(
                dimension = DIM,
                constant_term = %constant_term,
                "normal vector is zero, no basepoint"
            );
            return Ok(None);
        };
        let mut point = [Decimal::ZERO; DIM];
        point[index] = constant_term
            .checked_div(coordinates[index])
            .ok_or(GeomError::Overflow("basepoint"))?;
        Ok(Some(Vector::from_array(point)))
    }

    /// Returns the normal vector.
    #[inline]
    pub fn normal_vector(&self) -> &Vector {
        &self.normal_vector
    }

    /// Returns the constant term.
    #[inline]
    pub fn constant_term(&self) -> Decimal {
        self.constant_term
    }

    /// Returns a point satisfying the equation, if the normal vector is nonzero.
    #[inline]
    pub fn basepoint(&self) -> Option<&Vector> {
        self.basepoint.as_ref()
    }

    /// Returns the tolerance of the zero, parallelism and coincidence checks.
    #[inline]
    pub fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    /// Returns the dimension of the space, `DIM`.
    #[inline]
    pub const fn dimension(&self) -> usize {
        DIM
    }

    /// Returns true if the normal vector is zero.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.basepoint.is_none()
    }

    /// Tolerance for comparing two hyperplanes: the looser of the two, so
    /// that every comparison is symmetric.
    pub(super) fn shared_tolerance(&self, other: &Self) -> Decimal {
        self.tolerance.max(other.tolerance)
    }

    /// Returns true if the normal vectors are parallel.
    pub fn is_parallel_with(&self, other: &Self) -> bool {
        let parallel = self
            .normal_vector
            .is_parallel_to(&other.normal_vector, self.shared_tolerance(other));
        matches!(parallel, Ok(true))
    }

    /// Returns true if both equations describe the same set of points.
    ///
    /// Parallel but distinct hyperplanes are not coincident: the segment
    /// between the two basepoints must also be orthogonal to both normals.
    pub fn coincides_with(&self, other: &Self) -> bool {
        let tolerance = self.shared_tolerance(other);
        let (p, q) = match (&self.basepoint, &other.basepoint) {
            (Some(p), Some(q)) => (p, q),
            (None, None) => {
                return self
                    .constant_term
                    .checked_sub(other.constant_term)
                    .is_some_and(|d| precision::is_near_zero(d, tolerance))
            }
            _ => return false,
        };
        if !self.is_parallel_with(other) {
            return false;
        }
        // An overflowing difference is far from orthogonal.
        let Ok(offset) = p.minus(q) else {
            return false;
        };
        [&self.normal_vector, &other.normal_vector].iter().all(|normal| {
            let within = normal
                .normalize(tolerance)
                .and_then(|unit| offset.is_orthogonal_to(&unit, tolerance));
            matches!(within, Ok(true))
        })
    }
}

fn largest_coordinate_index(coordinates: &[Decimal]) -> Option<usize> {
    let largest = coordinates.iter().map(|x| x.abs()).max()?;
    coordinates.iter().position(|x| x.abs() == largest)
}

impl<const DIM: usize> PartialEq for Hyperplane<DIM> {
    fn eq(&self, other: &Self) -> bool {
        self.coincides_with(other)
    }
}

impl<const DIM: usize> Default for Hyperplane<DIM> {
    /// The degenerate equation `0 = 0`.
    fn default() -> Self {
        let () = Self::NONZERO_DIMENSION;
        Self {
            normal_vector: Vector::from_array([Decimal::ZERO; DIM]),
            constant_term: Decimal::ZERO,
            basepoint: None,
            tolerance: precision::CONFUSION,
        }
    }
}

impl<'de, const DIM: usize> Deserialize<'de> for Hyperplane<DIM> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Equation {
            normal_vector: Vector,
            constant_term: Decimal,
            tolerance: Decimal,
        }

        let eq = Equation::deserialize(deserializer)?;
        Self::with_tolerance(eq.normal_vector, eq.constant_term, eq.tolerance)
            .map_err(serde::de::Error::custom)
    }
}

fn display_round(value: Decimal) -> Decimal {
    value.round_dp(precision::DISPLAY_DECIMAL_PLACES).normalize()
}

fn write_term(out: &mut String, coefficient: Decimal, index: usize, is_initial_term: bool) {
    if coefficient.is_sign_negative() {
        out.push('-');
    } else if !is_initial_term {
        out.push('+');
    }
    if !is_initial_term {
        out.push(' ');
    }
    if coefficient.abs() != Decimal::ONE {
        out.push_str(&coefficient.abs().to_string());
    }
    out.push_str(&format!("x_{}", index + 1));
}

impl<const DIM: usize> fmt::Display for Hyperplane<DIM> {
    /// Renders the equation as a signed polynomial, e.g. `-x_1 + 2x_2 = 3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lhs = String::new();
        for (i, c) in self.normal_vector.iter().enumerate() {
            let c = display_round(*c);
            if c.is_zero() {
                continue;
            }
            if !lhs.is_empty() {
                lhs.push(' ');
            }
            let is_initial_term = lhs.is_empty();
            write_term(&mut lhs, c, i, is_initial_term);
        }
        if lhs.is_empty() {
            lhs.push('0');
        }
        write!(f, "{} = {}", lhs, display_round(self.constant_term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    type Hyperplane4 = Hyperplane<4>;

    fn hyperplane(normal: [Decimal; 4], k: Decimal) -> Hyperplane4 {
        Hyperplane4::new(Vector::new(normal).unwrap(), k).unwrap()
    }

    #[test]
    fn test_hyperplane_rejects_wrong_dimension() {
        let err = Hyperplane4::new(Vector::new([1, 2]).unwrap(), dec!(1)).unwrap_err();
        assert_eq!(err, GeomError::DimensionMismatch { expected: 4, found: 2 });
    }

    #[test]
    fn test_hyperplane_basepoint_uses_first_nonzero_coordinate() {
        let h = hyperplane([dec!(0), dec!(0.00000000001), dec!(4), dec!(2)], dec!(10));
        let basepoint = h.basepoint().unwrap();
        assert_eq!(basepoint.coordinates(), &[dec!(0), dec!(0), dec!(2.5), dec!(0)]);
        assert_eq!(h.normal_vector().dot(basepoint).unwrap(), dec!(10));
    }

    #[test]
    fn test_hyperplane_degenerate() {
        let h = Hyperplane4::default();
        assert!(h.is_degenerate());
        assert!(h.basepoint().is_none());
        assert_eq!(h, hyperplane([dec!(0); 4], dec!(0)));
        assert_ne!(h, hyperplane([dec!(0); 4], dec!(1)));
        assert_ne!(h, hyperplane([dec!(1), dec!(0), dec!(0), dec!(0)], dec!(0)));
    }

    #[test]
    fn test_hyperplane_parallel_but_distinct() {
        let h1 = hyperplane([dec!(1), dec!(2), dec!(3), dec!(4)], dec!(1));
        let h2 = hyperplane([dec!(2), dec!(4), dec!(6), dec!(8)], dec!(3));
        assert!(h1.is_parallel_with(&h2));
        assert!(!h1.coincides_with(&h2));
        let h3 = hyperplane([dec!(-2), dec!(-4), dec!(-6), dec!(-8)], dec!(-2));
        assert!(h1.coincides_with(&h3));
    }

    #[test]
    fn test_hyperplane_tolerance_is_configurable() {
        let normal = Vector::new([dec!(0.001), dec!(0), dec!(0), dec!(0)]).unwrap();
        let coarse = Hyperplane4::with_tolerance(normal.clone(), dec!(1), dec!(0.01)).unwrap();
        assert!(coarse.is_degenerate());
        let fine = Hyperplane4::new(normal, dec!(1)).unwrap();
        assert_eq!(fine.basepoint().unwrap()[0], dec!(1000));
    }

    #[test]
    fn test_hyperplane_basepoint_overflow() {
        let normal = Vector::new([dec!(0.000000001), dec!(0), dec!(0), dec!(0)]).unwrap();
        let err = Hyperplane4::new(normal, dec!(100000000000000000000)).unwrap_err();
        assert_eq!(err, GeomError::Overflow("basepoint"));
    }

    #[test]
    fn test_hyperplane_degenerate_matches_zero_normal() {
        let tolerance = dec!(0.00000000000000000001);
        let normal = Vector::new([dec!(0.000000000000001), dec!(0), dec!(0), dec!(0)]).unwrap();
        let fine = Hyperplane4::with_tolerance(normal.clone(), dec!(1), tolerance).unwrap();
        assert!(!normal.is_zero(tolerance));
        assert!(!fine.is_degenerate());
        assert_eq!(fine.basepoint().unwrap()[0], dec!(1000000000000000));
        let coarse = Hyperplane4::new(normal.clone(), dec!(1)).unwrap();
        assert!(normal.is_zero(coarse.tolerance()));
        assert!(coarse.is_degenerate());

        // No single coordinate reaches the tolerance, but the whole normal does.
        let spread = Vector::new([dec!(0.00000000009); 4]).unwrap();
        let h = Hyperplane4::new(spread.clone(), dec!(0.00000000009)).unwrap();
        assert!(!spread.is_zero(precision::CONFUSION));
        assert!(!h.is_degenerate());
        assert_eq!(
            h.basepoint().unwrap().coordinates(),
            &[dec!(1), dec!(0), dec!(0), dec!(0)]
        );
    }

    #[test]
    fn test_hyperplane_comparison_uses_looser_tolerance() {
        let x_axis = Vector::new([dec!(1), dec!(0), dec!(0), dec!(0)]).unwrap();
        let loose = Hyperplane4::with_tolerance(x_axis, dec!(0), dec!(0.001)).unwrap();
        let tight = hyperplane([dec!(1), dec!(0.00001), dec!(0), dec!(0)], dec!(0));
        assert!(loose.is_parallel_with(&tight));
        assert!(tight.is_parallel_with(&loose));
        assert_eq!(loose, tight);
        assert_eq!(tight, loose);

        let also_tight = hyperplane([dec!(1), dec!(0), dec!(0), dec!(0)], dec!(0));
        assert!(!tight.is_parallel_with(&also_tight));
        assert_ne!(also_tight, tight);
    }

    #[test]
    fn test_hyperplane_display() {
        let h = hyperplane([dec!(-1), dec!(2), dec!(0), dec!(1.23456)], dec!(3.0));
        assert_eq!(h.to_string(), "-x_1 + 2x_2 + 1.235x_4 = 3");
        let h = hyperplane([dec!(0.0001), dec!(-1), dec!(-2.5), dec!(1)], dec!(-0.5));
        assert_eq!(h.to_string(), "-x_2 - 2.5x_3 + x_4 = -0.5");
        assert_eq!(Hyperplane4::default().to_string(), "0 = 0");
    }

    #[test]
    fn test_hyperplane_serde() {
        let h = hyperplane([dec!(1), dec!(0), dec!(-2), dec!(0)], dec!(4));
        let json = serde_json::to_string(&h).unwrap();
        let back: Hyperplane4 = serde_json::from_str(&json).unwrap();
        assert_eq!(back.basepoint(), h.basepoint());
        assert_eq!(back.normal_vector(), h.normal_vector());

        let bad = r#"{"normal_vector":["1"],"constant_term":"4","tolerance":"0.0000000001"}"#;
        assert!(serde_json::from_str::<Hyperplane4>(bad).is_err());
    }
}
