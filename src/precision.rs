//! Precision constants for geometric comparisons.
//!
//! Square roots and inverse cosines leave rounding residue behind, so
//! geometric predicates compare against an absolute tolerance instead of
//! testing for exact zero. Nothing here is global state: callers pass the
//! tolerance they want, these are only the usual values.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Confusion tolerance: a quantity below this magnitude is treated as zero.
/// Used for zero-vector, orthogonality and parallelism checks.
/// Value: 1.0e-10
pub const CONFUSION: Decimal = dec!(0.0000000001);

/// Number of decimal places kept when rendering coefficients for display.
pub const DISPLAY_DECIMAL_PLACES: u32 = 3;

/// Check if a value is within `tolerance` of zero.
#[inline]
pub fn is_near_zero(value: Decimal, tolerance: Decimal) -> bool {
    value.abs() < tolerance
}

/// Index of the first element whose magnitude reaches `tolerance`.
pub fn first_nonzero_index(values: &[Decimal], tolerance: Decimal) -> Option<usize> {
    values.iter().position(|v| !is_near_zero(*v, tolerance))
}

/// Determinant `a·d - b·c` of the 2x2 matrix `[[a, b], [c, d]]`.
/// Returns `None` if any intermediate product or the difference overflows.
pub fn checked_determinant(a: Decimal, b: Decimal, c: Decimal, d: Decimal) -> Option<Decimal> {
    a.checked_mul(d)?.checked_sub(b.checked_mul(c)?)
}
