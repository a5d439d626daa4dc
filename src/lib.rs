//! Computation layer behind the safety-field shape editor.
//!
//! The editor draws fields and cutouts as rectangles, circles or polygons on
//! a 2-D canvas. This crate owns the parts of that work that are not drawing:
//! turning stored shape records into one canonical model, choosing stable
//! colors and line styles, and computing the outline of rotated rectangles.
//! Every operation is pure and infallible; bad input degrades to a default.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`normalize`] | Legacy record ingestion into [`shape::Shape`] lists |
//! | [`shape`] | Canonical shape model, defaults, role synchronization |
//! | [`color`] | Seeded hue sampling, HSV→RGB, hex and `rgba()` strings |
//! | [`style`] | Line width / dash table |
//! | [`config`] | Color profiles and palette overrides |
//! | [`geometry`] | Points, rotation, rectangle corners |
//! | [`consts`] | Shared defaults |
//! | [`error`] | Errors for the text-ingestion helpers |

pub mod color;
pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod normalize;
pub mod shape;
pub mod style;

pub use color::{ColorSet, build_color_set, pick_field_color, pick_shape_color, with_alpha};
pub use config::{ColorProfile, Palette};
pub use error::ShapeError;
pub use geometry::{Point, rectangle_corner_points};
pub use normalize::{build_shape_key, initialize_shapes, shapes_from_json};
pub use shape::{GeometryType, Shape, ShapeKind};
pub use style::{LineDash, ShapeStyle, resolve_shape_style};
