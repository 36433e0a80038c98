//! Line intersections and coincidence

use hyperplane::{Intersection, Line, Vector};
use rust_decimal_macros::dec;

fn line(a: f64, b: f64, k: &str) -> Line {
    let normal = Vector::from_floats(&[a, b]).unwrap();
    Line::new(normal, k.parse().unwrap()).unwrap()
}

#[test]
fn test_intersection_unique_point() {
    let l1 = line(7.204, 3.182, "8.68");
    let l2 = line(8.172, 4.114, "9.883");
    let intersection = l1.intersection_with(&l2).unwrap();
    let point = intersection.point().expect("lines should cross");
    assert!((point[0] - dec!(1.173)).abs() < dec!(0.001));
    assert!((point[1] - dec!(0.073)).abs() < dec!(0.001));
    // The point lies on both lines.
    for l in [&l1, &l2] {
        let residual = l.normal_vector().dot(point).unwrap() - l.constant_term();
        assert!(residual.abs() < dec!(0.0000000001));
    }
}

#[test]
fn test_intersection_proportional_equations() {
    // Normal vectors and constant terms are both scaled by 2.5, so the zero
    // determinant comes from the two equations describing one line.
    let l1 = line(4.046, 2.836, "1.21");
    let l2 = line(10.115, 7.09, "3.025");
    let intersection = l1.intersection_with(&l2).unwrap();
    assert!(intersection.point().is_none());
    assert_eq!(intersection, Intersection::Coincident);
    assert_eq!(l1, l2);
}

#[test]
fn test_intersection_parallel_lines() {
    let l1 = line(1.182, 5.562, "6.744");
    let l2 = line(1.773, 8.343, "9.525");
    assert!(l1.is_parallel_with(&l2));
    assert_ne!(l1, l2);
    assert_eq!(l1.intersection_with(&l2).unwrap(), Intersection::Parallel);
}

#[test]
fn test_line_equality_is_not_parallelism() {
    let l1 = line(1.0, 1.0, "1");
    let l2 = line(-3.0, -3.0, "-3");
    let l3 = line(-3.0, -3.0, "3");
    assert_eq!(l1, l2);
    assert!(l1.is_parallel_with(&l3));
    assert_ne!(l1, l3);
}

#[test]
fn test_degenerate_lines() {
    let zero = Line::default();
    let also_zero = line(0.0, 0.0, "0");
    let empty = line(0.0, 0.0, "2");
    assert_eq!(zero, also_zero);
    assert_ne!(zero, empty);
    assert!(zero.basepoint().is_none());
    assert_eq!(zero.intersection_with(&also_zero).unwrap(), Intersection::Coincident);
    assert_eq!(zero.intersection_with(&empty).unwrap(), Intersection::Parallel);
}

#[test]
fn test_line_equality_with_different_tolerances() {
    let x_axis = Vector::new([1, 0]).unwrap();
    let tilted = Vector::new([dec!(1), dec!(0.00001)]).unwrap();
    let loose = Line::with_tolerance(x_axis, dec!(2), dec!(0.001)).unwrap();
    let tight = Line::new(tilted, dec!(2)).unwrap();
    assert_eq!(loose == tight, tight == loose);
    assert_eq!(loose, tight);
    assert!(loose.intersection_with(&tight).unwrap().point().is_none());
    assert!(tight.intersection_with(&loose).unwrap().point().is_none());
}

#[test]
fn test_line_rejects_three_dimensional_normal() {
    let normal = Vector::new([1, 2, 3]).unwrap();
    assert!(Line::new(normal, dec!(1)).is_err());
}

#[test]
fn test_intersection_serde() {
    let l1 = line(1.0, 1.0, "3");
    let l2 = line(1.0, -1.0, "1");
    let intersection = l1.intersection_with(&l2).unwrap();
    let json = serde_json::to_string(&intersection).unwrap();
    let back: Intersection = serde_json::from_str(&json).unwrap();
    assert_eq!(back, intersection);
}
