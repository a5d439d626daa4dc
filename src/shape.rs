//! Canonical shape model shared by the editor and the renderer.
//!
//! A [`Shape`] always carries all three geometry sub-records (polygon,
//! rectangle, circle) so switching its [`GeometryType`] never loses geometry.
//! Only the sub-record matching the type is drawn.
//!
//! The shape's functional role ([`ShapeKind`]) is owned by the shape itself.
//! Each sub-record also carries a copy in its legacy `Type` slot for
//! renderer compatibility; [`Shape::apply_kind`] and [`Shape::sync_kind`]
//! are the only ways those copies are written, which keeps all four equal.
//!
//! Coordinates stay decimal strings, matching what the editor binds to its
//! input fields. [`crate::geometry::parse_numeric`] reads them.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::consts::{DEFAULT_EXTENT, DEFAULT_FIELD_TYPE, DEFAULT_KIND, DEFAULT_POLYGON_KIND, SHAPE_ID_PREFIX};
use crate::normalize::kind_of;

/// Which geometry sub-record is authoritative for a shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    #[default]
    Polygon,
    Rectangle,
    Circle,
}

impl GeometryType {
    /// Case-insensitive lookup by name.
    #[must_use]
    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "polygon" => Some(Self::Polygon),
            "rectangle" => Some(Self::Rectangle),
            "circle" => Some(Self::Circle),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Polygon => "Polygon",
            Self::Rectangle => "Rectangle",
            Self::Circle => "Circle",
        }
    }
}

/// Functional role of a shape.
///
/// `Field` and `CutOut` are the roles the editor knows about; anything else a
/// caller stores is kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeKind {
    #[default]
    Field,
    CutOut,
    Other(String),
}

impl ShapeKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Field => DEFAULT_KIND,
            Self::CutOut => DEFAULT_POLYGON_KIND,
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for ShapeKind {
    /// An empty string means "unset" and resolves to `Field`.
    fn from(raw: &str) -> Self {
        match raw {
            "" | DEFAULT_KIND => Self::Field,
            DEFAULT_POLYGON_KIND => Self::CutOut,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for ShapeKind {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<ShapeKind> for String {
    fn from(kind: ShapeKind) -> Self {
        kind.as_str().to_owned()
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A polygon vertex with decimal-string coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolygonPoint {
    #[serde(rename = "X")]
    pub x: String,
    #[serde(rename = "Y")]
    pub y: String,
    /// Exporter keys with no meaning here, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PolygonPoint {
    #[must_use]
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self { x: x.into(), y: y.into(), extra: Map::new() }
    }
}

/// Where a polygon record keeps its role.
///
/// Legacy records either carry a direct `Type` key or nest it inside an
/// `attributes` map together with other exporter attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolygonTypeSlot {
    Attributes {
        attributes: Map<String, Value>,
    },
    Direct {
        #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<ShapeKind>,
    },
}

/// Polygon geometry plus its role slot.
///
/// Deserialization reads the same loose layouts the normalizer accepts, so a
/// record with both `attributes` and a direct `Type` keeps each where it was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct PolygonDetails {
    #[serde(flatten)]
    pub slot: PolygonTypeSlot,
    #[serde(default)]
    pub points: Vec<PolygonPoint>,
    /// Keys outside the slot and points, carried through unchanged. With the
    /// attributes layout this includes a direct `Type`, which is not a role
    /// location there.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PolygonDetails {
    /// The role stored in whichever slot this polygon uses. Values that are
    /// neither a non-empty string nor a number read as unset.
    #[must_use]
    pub fn type_value(&self) -> Option<ShapeKind> {
        match &self.slot {
            PolygonTypeSlot::Attributes { attributes } => attributes.get("Type").and_then(kind_of),
            PolygonTypeSlot::Direct { kind } => kind.clone(),
        }
    }

    /// Write the role into whichever slot this polygon uses.
    pub fn set_type_value(&mut self, kind: &ShapeKind) {
        match &mut self.slot {
            PolygonTypeSlot::Attributes { attributes } => {
                attributes.insert("Type".to_owned(), Value::String(kind.as_str().to_owned()));
            }
            PolygonTypeSlot::Direct { kind: slot } => *slot = Some(kind.clone()),
        }
    }
}

impl Default for PolygonDetails {
    /// A 100×100 square cutout anchored at the origin.
    fn default() -> Self {
        Self {
            slot: PolygonTypeSlot::Direct { kind: Some(ShapeKind::CutOut) },
            points: vec![
                PolygonPoint::new("0", "0"),
                PolygonPoint::new(DEFAULT_EXTENT, "0"),
                PolygonPoint::new(DEFAULT_EXTENT, DEFAULT_EXTENT),
                PolygonPoint::new("0", DEFAULT_EXTENT),
            ],
            extra: Map::new(),
        }
    }
}

/// Oriented rectangle. `Rotation` is in degrees about the origin corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RectangleDetails {
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ShapeKind>,
    #[serde(default)]
    pub origin_x: String,
    #[serde(default)]
    pub origin_y: String,
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub rotation: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for RectangleDetails {
    /// A 100×100 axis-aligned field at the origin.
    fn default() -> Self {
        Self {
            kind: Some(ShapeKind::Field),
            origin_x: "0".to_owned(),
            origin_y: "0".to_owned(),
            width: DEFAULT_EXTENT.to_owned(),
            height: DEFAULT_EXTENT.to_owned(),
            rotation: "0".to_owned(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CircleDetails {
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ShapeKind>,
    #[serde(default)]
    pub center_x: String,
    #[serde(default)]
    pub center_y: String,
    #[serde(default)]
    pub radius: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CircleDetails {
    /// A field of radius 100 centered on the origin.
    fn default() -> Self {
        Self {
            kind: Some(ShapeKind::Field),
            center_x: "0".to_owned(),
            center_y: "0".to_owned(),
            radius: DEFAULT_EXTENT.to_owned(),
            extra: Map::new(),
        }
    }
}

/// A safety-zone shape after normalization.
///
/// Shapes are built by [`create_default_shape`] or
/// [`crate::normalize::initialize_shapes`], both of which leave the role
/// synchronized. A shape deserialized directly should be passed through
/// `initialize_shapes` (or have [`Shape::sync_kind`] called) before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub geometry_type: GeometryType,
    pub fieldtype: String,
    pub(crate) kind: ShapeKind,
    pub polygon: PolygonDetails,
    pub rectangle: RectangleDetails,
    pub circle: CircleDetails,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Shape {
    #[must_use]
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Set the shape's role and overwrite the copy held by each sub-record.
    pub fn apply_kind(&mut self, kind: ShapeKind) {
        self.kind = match kind {
            ShapeKind::Other(raw) if raw.is_empty() => ShapeKind::Field,
            other => other,
        };
        self.sync_kind();
    }

    /// Re-copy the shape's role into every sub-record after an edit touched
    /// one of them directly.
    pub fn sync_kind(&mut self) {
        self.polygon.set_type_value(&self.kind);
        self.rectangle.kind = Some(self.kind.clone());
        self.circle.kind = Some(self.kind.clone());
    }

    /// True when the role is the same in the shape and all three sub-records.
    #[must_use]
    pub fn kind_is_synchronized(&self) -> bool {
        let expected = Some(&self.kind);
        self.polygon.type_value().as_ref() == expected
            && self.rectangle.kind.as_ref() == expected
            && self.circle.kind.as_ref() == expected
    }
}

/// A fresh identifier, unique across the process.
#[must_use]
pub fn create_shape_id() -> String {
    format!("{SHAPE_ID_PREFIX}{}", Uuid::new_v4().simple())
}

/// A fully populated default shape for list position `index`.
#[must_use]
pub fn create_default_shape(index: usize, geometry_type: GeometryType) -> Shape {
    let mut shape = Shape {
        id: create_shape_id(),
        name: default_shape_name(index),
        geometry_type,
        fieldtype: DEFAULT_FIELD_TYPE.to_owned(),
        kind: ShapeKind::Field,
        polygon: PolygonDetails::default(),
        rectangle: RectangleDetails::default(),
        circle: CircleDetails::default(),
        visible: true,
    };
    shape.sync_kind();
    shape
}

/// Positional display label, `"Shape 1"` for index 0.
#[must_use]
pub fn default_shape_name(index: usize) -> String {
    format!("Shape {}", index + 1)
}

/// Render points as the editor's text form, `"(x,y),(x,y)"`.
#[must_use]
pub fn format_polygon_points(points: &[PolygonPoint]) -> String {
    points
        .iter()
        .map(|point| format!("({},{})", point.x, point.y))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse the editor's `"(x,y),(x,y)"` text form.
///
/// Parentheses are optional per pair and whitespace around coordinates is
/// ignored. A missing coordinate becomes `"0"`; blank input yields no points.
#[must_use]
pub fn parse_polygon_points(text: &str) -> Vec<PolygonPoint> {
    let sanitized = text.trim();
    if sanitized.is_empty() {
        return Vec::new();
    }
    sanitized
        .split("),")
        .map(|segment| segment.replace(['(', ')'], "").trim().to_owned())
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let mut coords = pair.split(',').map(str::trim);
            let x = coords.next().filter(|v| !v.is_empty()).unwrap_or("0");
            let y = coords.next().filter(|v| !v.is_empty()).unwrap_or("0");
            PolygonPoint::new(x, y)
        })
        .collect()
}
