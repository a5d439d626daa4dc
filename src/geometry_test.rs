#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, PI};

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn rect(origin_x: &str, origin_y: &str, width: &str, height: &str, rotation: &str) -> RectangleDetails {
    RectangleDetails {
        kind: None,
        origin_x: origin_x.to_owned(),
        origin_y: origin_y.to_owned(),
        width: width.to_owned(),
        height: height.to_owned(),
        rotation: rotation.to_owned(),
        extra: serde_json::Map::new(),
    }
}

// =============================================================
// parse_numeric
// =============================================================

#[test]
fn parse_numeric_reads_plain_decimals() {
    assert_eq!(parse_numeric("42", f64::NAN), 42.0);
    assert_eq!(parse_numeric("-3.25", f64::NAN), -3.25);
    assert_eq!(parse_numeric("+7", f64::NAN), 7.0);
    assert_eq!(parse_numeric(".5", f64::NAN), 0.5);
    assert_eq!(parse_numeric("5.", f64::NAN), 5.0);
}

#[test]
fn parse_numeric_uses_leading_numeric_prefix() {
    assert_eq!(parse_numeric("  12.5mm", f64::NAN), 12.5);
    assert_eq!(parse_numeric("1e3", f64::NAN), 1000.0);
    assert_eq!(parse_numeric("2e", f64::NAN), 2.0);
    assert_eq!(parse_numeric("3e+", f64::NAN), 3.0);
    assert_eq!(parse_numeric("4.5.6", f64::NAN), 4.5);
}

#[test]
fn parse_numeric_falls_back_on_garbage() {
    assert!(parse_numeric("abc", f64::NAN).is_nan());
    assert_eq!(parse_numeric("", 7.0), 7.0);
    assert_eq!(parse_numeric("-", 1.0), 1.0);
    assert_eq!(parse_numeric(".", 1.0), 1.0);
    assert_eq!(parse_numeric("Infinity", 0.0), 0.0);
}

#[test]
fn parse_numeric_rejects_overflow_to_infinity() {
    assert_eq!(parse_numeric("1e999", -1.0), -1.0);
}

// =============================================================
// Degrees
// =============================================================

#[test]
fn degrees_to_radians_converts() {
    assert!(approx_eq(degrees_to_radians(180.0), PI));
    assert!(approx_eq(degrees_to_radians(90.0), FRAC_PI_2));
    assert_eq!(degrees_to_radians(0.0), 0.0);
}

#[test]
fn normalize_degrees_wraps_into_range() {
    assert_eq!(normalize_degrees(-90.0), 270.0);
    assert_eq!(normalize_degrees(720.0), 0.0);
    assert_eq!(normalize_degrees(45.0), 45.0);
    assert_eq!(normalize_degrees(-360.0), 0.0);
}

#[test]
fn normalize_degrees_maps_non_finite_to_zero() {
    assert_eq!(normalize_degrees(f64::NAN), 0.0);
    assert_eq!(normalize_degrees(f64::INFINITY), 0.0);
    assert_eq!(normalize_degrees(f64::NEG_INFINITY), 0.0);
}

// =============================================================
// Rotation
// =============================================================

#[test]
fn rotate_point_quarter_turn_about_origin() {
    let p = rotate_point(10.0, 0.0, FRAC_PI_2, 0.0, 0.0);
    assert!(point_approx_eq(p, Point::new(0.0, 10.0)));
}

#[test]
fn rotate_point_offsets_result_by_origin() {
    let p = rotate_point(10.0, 0.0, FRAC_PI_2, 5.0, 5.0);
    assert!(point_approx_eq(p, Point::new(5.0, 15.0)));
}

#[test]
fn rotate_point_zero_angle_is_translation() {
    let p = rotate_point(3.0, 4.0, 0.0, 1.0, 1.0);
    assert_eq!(p, Point::new(4.0, 5.0));
}

#[test]
fn rotate_around_corner_pivots_absolute_point() {
    let p = rotate_around_corner(Point::new(20.0, 10.0), FRAC_PI_2, Point::new(10.0, 10.0));
    assert!(point_approx_eq(p, Point::new(10.0, 20.0)));
}

#[test]
fn rotate_around_corner_leaves_origin_fixed() {
    let origin = Point::new(-4.0, 9.0);
    let p = rotate_around_corner(origin, 1.234, origin);
    assert!(point_approx_eq(p, origin));
}

// =============================================================
// Rectangle corners
// =============================================================

#[test]
fn corners_unrotated_subtract_height() {
    let corners = rectangle_corner_points(&rect("0", "0", "100", "50", "0")).unwrap();
    assert_eq!(
        corners,
        [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, -50.0),
            Point::new(0.0, -50.0),
        ]
    );
}

#[test]
fn corners_respect_origin() {
    let corners = rectangle_corner_points(&rect("10", "20", "5", "4", "0")).unwrap();
    assert_eq!(corners[0], Point::new(10.0, 20.0));
    assert_eq!(corners[2], Point::new(15.0, 16.0));
}

#[test]
fn corners_default_missing_origin_and_rotation_to_zero() {
    let corners = rectangle_corner_points(&rect("", "junk", "2", "3", "")).unwrap();
    assert_eq!(corners[0], Point::new(0.0, 0.0));
    assert_eq!(corners[3], Point::new(0.0, -3.0));
}

#[test]
fn corners_none_for_degenerate_rectangles() {
    assert!(rectangle_corner_points(&rect("0", "0", "0", "50", "0")).is_none());
    assert!(rectangle_corner_points(&rect("0", "0", "100", "0", "0")).is_none());
    assert!(rectangle_corner_points(&rect("0", "0", "", "50", "0")).is_none());
    assert!(rectangle_corner_points(&rect("0", "0", "100", "abc", "0")).is_none());
}

#[test]
fn corners_allow_negative_extent() {
    let corners = rectangle_corner_points(&rect("0", "0", "-10", "10", "0")).unwrap();
    assert_eq!(corners[1], Point::new(-10.0, 0.0));
}

#[test]
fn corners_rotate_about_top_left() {
    let corners = rectangle_corner_points(&rect("0", "0", "100", "50", "90")).unwrap();
    let expected = [
        Point::new(0.0, 0.0),
        Point::new(0.0, 100.0),
        Point::new(50.0, 100.0),
        Point::new(50.0, 0.0),
    ];
    for (got, want) in corners.iter().zip(expected) {
        assert!(point_approx_eq(*got, want), "got {got:?}, want {want:?}");
    }
}

#[test]
fn corners_rotation_keeps_top_left_fixed() {
    let corners = rectangle_corner_points(&rect("7", "-3", "10", "20", "33")).unwrap();
    assert!(point_approx_eq(corners[0], Point::new(7.0, -3.0)));
}

#[test]
fn corners_full_turn_matches_unrotated() {
    let plain = rectangle_corner_points(&rect("1", "2", "30", "40", "0")).unwrap();
    let turned = rectangle_corner_points(&rect("1", "2", "30", "40", "360")).unwrap();
    for (a, b) in plain.iter().zip(turned) {
        assert!((a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6);
    }
}

#[test]
fn corner_points_method_delegates() {
    let r = rect("0", "0", "100", "50", "0");
    assert_eq!(r.corner_points(), rectangle_corner_points(&r));
}

#[test]
fn default_rectangle_is_drawable() {
    let corners = RectangleDetails::default().corner_points().unwrap();
    assert_eq!(corners[2], Point::new(100.0, -100.0));
}
