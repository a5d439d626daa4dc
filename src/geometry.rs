//! Coordinate math for the shape renderer.
//!
//! Everything here is a pure function of its arguments. The only spatial
//! computation the editor needs beyond plain coordinates is the outline of an
//! oriented rectangle, produced by [`rectangle_corner_points`].

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::shape::RectangleDetails;

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Leniently parse a decimal string.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"12.5mm"` reads as `12.5`. Input without a numeric prefix, or whose value
/// is not finite, yields `fallback`.
#[must_use]
pub fn parse_numeric(value: &str, fallback: f64) -> f64 {
    let prefix = numeric_prefix(value.trim_start());
    match prefix.parse::<f64>() {
        Ok(num) if num.is_finite() => num,
        _ => fallback,
    }
}

fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    end = digits_from(end);
    let mut digit_count = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digit_count += frac_end - (end + 1);
        if digit_count > 0 {
            end = frac_end;
        }
    }
    if digit_count == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }
    &text[..end]
}

#[must_use]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    (degrees * std::f64::consts::PI) / 180.0
}

/// Wrap an angle into `[0, 360)`. Non-finite input maps to `0`.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let normalized = degrees % 360.0;
    if normalized < 0.0 { normalized + 360.0 } else { normalized }
}

/// Rotate the offset `(x, y)` by `radians` and place the result relative to
/// `(origin_x, origin_y)`.
///
/// With a zero origin this is a plain rotation about `(0, 0)`; callers that
/// need to pivot an absolute point use [`rotate_around_corner`].
#[must_use]
pub fn rotate_point(x: f64, y: f64, radians: f64, origin_x: f64, origin_y: f64) -> Point {
    let (sin, cos) = radians.sin_cos();
    Point {
        x: origin_x + x * cos - y * sin,
        y: origin_y + x * sin + y * cos,
    }
}

/// Rotate an absolute `point` about `origin`.
#[must_use]
pub fn rotate_around_corner(point: Point, radians: f64, origin: Point) -> Point {
    let rotated = rotate_point(point.x - origin.x, point.y - origin.y, radians, 0.0, 0.0);
    Point {
        x: rotated.x + origin.x,
        y: rotated.y + origin.y,
    }
}

/// Outline of a rectangle as `[top-left, top-right, bottom-right, bottom-left]`.
///
/// The bottom edge sits at `OriginY - Height`; renderers depend on this
/// orientation. A non-zero `Rotation` (degrees) pivots every corner about the
/// top-left corner.
///
/// Returns `None` when the width or height is missing, non-finite or zero,
/// meaning the rectangle should not be drawn.
#[must_use]
pub fn rectangle_corner_points(rectangle: &RectangleDetails) -> Option<[Point; 4]> {
    let width = parse_numeric(&rectangle.width, f64::NAN);
    let height = parse_numeric(&rectangle.height, f64::NAN);
    if !width.is_finite() || !height.is_finite() || width == 0.0 || height == 0.0 {
        return None;
    }
    let origin_x = parse_numeric(&rectangle.origin_x, 0.0);
    let origin_y = parse_numeric(&rectangle.origin_y, 0.0);
    let rotation = degrees_to_radians(parse_numeric(&rectangle.rotation, 0.0));

    let top_left = Point::new(origin_x, origin_y);
    let corners = [
        top_left,
        Point::new(origin_x + width, origin_y),
        Point::new(origin_x + width, origin_y - height),
        Point::new(origin_x, origin_y - height),
    ];
    if rotation == 0.0 {
        return Some(corners);
    }
    Some(corners.map(|corner| rotate_around_corner(corner, rotation, top_left)))
}

impl RectangleDetails {
    /// See [`rectangle_corner_points`].
    #[must_use]
    pub fn corner_points(&self) -> Option<[Point; 4]> {
        rectangle_corner_points(self)
    }
}
