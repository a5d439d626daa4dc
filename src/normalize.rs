//! Ingest loosely-typed shape records into canonical [`Shape`]s.
//!
//! Shape lists arrive from several generations of exporters: the role may
//! sit on the shape (`kind` / `Kind`) or only on a geometry sub-record, the
//! polygon may nest its role inside `attributes`, coordinates may be strings
//! or numbers, and whole sub-records may be missing. [`initialize_shapes`]
//! accepts all of these and never fails; every gap is filled from the
//! defaults in [`crate::shape`].

#[cfg(test)]
#[path = "normalize_test.rs"]
mod normalize_test;

use serde_json::{Map, Value, json};

use crate::consts::{DEFAULT_FIELD_TYPE, DEFAULT_KIND};
use crate::error::ShapeError;
use crate::shape::{
    CircleDetails, GeometryType, PolygonDetails, PolygonPoint, PolygonTypeSlot, RectangleDetails, Shape, ShapeKind,
    create_default_shape, create_shape_id, default_shape_name,
};

/// Normalize a list of shape records.
///
/// Anything other than a non-empty JSON array (including `None`) yields a
/// single default shape. Otherwise each record becomes one shape, in input
/// order. The returned shapes share no data with `data`.
#[must_use]
pub fn initialize_shapes(data: Option<&Value>) -> Vec<Shape> {
    let Some(records) = data.and_then(Value::as_array).filter(|records| !records.is_empty()) else {
        tracing::debug!("no shape records supplied, synthesizing default shape");
        return vec![create_default_shape(0, GeometryType::Polygon)];
    };
    records
        .iter()
        .enumerate()
        .map(|(index, value)| normalize_record(index, value))
        .collect()
}

/// Parse JSON text and normalize it with [`initialize_shapes`].
///
/// # Errors
///
/// Returns [`ShapeError::Json`] if `text` is not valid JSON.
pub fn shapes_from_json(text: &str) -> Result<Vec<Shape>, ShapeError> {
    let value: Value = serde_json::from_str(text)?;
    Ok(initialize_shapes(Some(&value)))
}

/// Stable fingerprint of a shape's attributes for memoization.
///
/// Attributes are emitted as sorted `key=value` pairs joined by `|`. For
/// `"Polygon"` the ordered points follow as `X:Y` pairs joined by `;`, read
/// from either `X`/`Y` or `x`/`y`.
#[must_use]
pub fn build_shape_key(shape_type: &str, attrs: &Map<String, Value>, points: &[Value]) -> String {
    let mut entries: Vec<(&String, &Value)> = attrs.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    let attr_entries = entries
        .into_iter()
        .map(|(key, value)| format!("{key}={}", key_text(value)))
        .collect::<Vec<_>>()
        .join("|");

    let mut key = format!("{shape_type}|{attr_entries}");
    if shape_type == GeometryType::Polygon.as_str() {
        let point_entries = points
            .iter()
            .map(|point| format!("{}:{}", point_coord(point, "X", "x"), point_coord(point, "Y", "y")))
            .collect::<Vec<_>>()
            .join(";");
        key.push('|');
        key.push_str(&point_entries);
    }
    key
}

impl Shape {
    /// [`build_shape_key`] over the sub-record selected by `type`.
    #[must_use]
    pub fn active_geometry_key(&self) -> String {
        let shape_type = self.geometry_type.as_str();
        match self.geometry_type {
            GeometryType::Polygon => {
                let attrs = match &self.polygon.slot {
                    PolygonTypeSlot::Attributes { attributes } => attributes.clone(),
                    PolygonTypeSlot::Direct { kind } => {
                        let mut attrs = Map::new();
                        if let Some(kind) = kind {
                            attrs.insert("Type".to_owned(), Value::String(kind.as_str().to_owned()));
                        }
                        attrs
                    }
                };
                let points: Vec<Value> = self
                    .polygon
                    .points
                    .iter()
                    .map(|point| json!({ "X": point.x, "Y": point.y }))
                    .collect();
                build_shape_key(shape_type, &attrs, &points)
            }
            GeometryType::Rectangle => build_shape_key(shape_type, &object_of(serde_json::to_value(&self.rectangle)), &[]),
            GeometryType::Circle => build_shape_key(shape_type, &object_of(serde_json::to_value(&self.circle)), &[]),
        }
    }
}

fn object_of(value: Result<Value, serde_json::Error>) -> Map<String, Value> {
    match value {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn key_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(raw) => raw.clone(),
        other => other.to_string(),
    }
}

fn point_coord(point: &Value, upper: &str, lower: &str) -> String {
    point
        .get(upper)
        .filter(|v| !v.is_null())
        .or_else(|| point.get(lower).filter(|v| !v.is_null()))
        .map(key_text)
        .unwrap_or_default()
}

// =============================================================================
// RECORD ACCESS
// =============================================================================

/// Typed reads from one loosely-typed shape record.
struct Record<'a> {
    value: &'a Value,
}

impl<'a> Record<'a> {
    fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// A non-empty string, or a number rendered as text.
    fn text(&self, key: &str) -> Option<String> {
        self.value.get(key).and_then(non_empty_text)
    }

    fn object(&self, key: &str) -> Option<&'a Map<String, Value>> {
        self.value.get(key).and_then(Value::as_object)
    }

    /// Only an explicit `false` hides a shape.
    fn visible(&self) -> bool {
        self.value.get("visible").and_then(Value::as_bool) != Some(false)
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::String(raw) if !raw.is_empty() => Some(raw.clone()),
        Value::Number(num) => Some(num.to_string()),
        _ => None,
    }
}

/// A role read with the same rule as the other text fields.
pub(crate) fn kind_of(value: &Value) -> Option<ShapeKind> {
    non_empty_text(value).map(ShapeKind::from)
}

/// Coordinates are kept as text; numbers are rendered, anything else is empty.
fn coordinate(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(raw)) => raw.clone(),
        Some(Value::Number(num)) => num.to_string(),
        _ => String::new(),
    }
}

// =============================================================================
// SUB-RECORD COPIES
// =============================================================================

const POLYGON_KEYS: &[&str] = &["attributes", "points"];
const POINT_KEYS: &[&str] = &["X", "Y", "x", "y"];
const RECTANGLE_KEYS: &[&str] = &["Type", "OriginX", "OriginY", "Width", "Height", "Rotation"];
const CIRCLE_KEYS: &[&str] = &["Type", "CenterX", "CenterY", "Radius"];

/// Every entry of `map` whose key is not in `known`.
fn extra_keys(map: &Map<String, Value>, known: &[&str]) -> Map<String, Value> {
    map.iter()
        .filter(|(key, _)| !known.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn copy_polygon(map: &Map<String, Value>) -> PolygonDetails {
    let direct_kind = map.get("Type").and_then(kind_of);
    let (slot, extra) = match map.get("attributes").and_then(Value::as_object) {
        Some(attributes) => {
            let mut attributes = attributes.clone();
            // A direct `Type` only counts when the attributes map has no `Type` key at all.
            if !attributes.contains_key("Type") {
                if let Some(kind) = &direct_kind {
                    attributes.insert("Type".to_owned(), Value::String(kind.as_str().to_owned()));
                }
            }
            (PolygonTypeSlot::Attributes { attributes }, extra_keys(map, POLYGON_KEYS))
        }
        // A non-object `attributes` is not a slot and passes through as-is.
        None => (PolygonTypeSlot::Direct { kind: direct_kind }, extra_keys(map, &["points", "Type"])),
    };
    let points = map
        .get("points")
        .and_then(Value::as_array)
        .map(|points| {
            points
                .iter()
                .filter_map(Value::as_object)
                .map(|point| PolygonPoint {
                    x: coordinate_either(point, "X", "x"),
                    y: coordinate_either(point, "Y", "y"),
                    extra: extra_keys(point, POINT_KEYS),
                })
                .collect()
        })
        .unwrap_or_default();
    PolygonDetails { slot, points, extra }
}

impl From<Map<String, Value>> for PolygonDetails {
    fn from(map: Map<String, Value>) -> Self {
        copy_polygon(&map)
    }
}

fn coordinate_either(map: &Map<String, Value>, upper: &str, lower: &str) -> String {
    if map.contains_key(upper) { coordinate(map, upper) } else { coordinate(map, lower) }
}

fn copy_rectangle(map: &Map<String, Value>) -> RectangleDetails {
    RectangleDetails {
        kind: map.get("Type").and_then(kind_of),
        origin_x: coordinate(map, "OriginX"),
        origin_y: coordinate(map, "OriginY"),
        width: coordinate(map, "Width"),
        height: coordinate(map, "Height"),
        rotation: coordinate(map, "Rotation"),
        extra: extra_keys(map, RECTANGLE_KEYS),
    }
}

fn copy_circle(map: &Map<String, Value>) -> CircleDetails {
    CircleDetails {
        kind: map.get("Type").and_then(kind_of),
        center_x: coordinate(map, "CenterX"),
        center_y: coordinate(map, "CenterY"),
        radius: coordinate(map, "Radius"),
        extra: extra_keys(map, CIRCLE_KEYS),
    }
}

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Pick the shape's role from the first location that names one.
fn resolve_kind(
    record: &Record<'_>,
    polygon: Option<&PolygonDetails>,
    rectangle: Option<&RectangleDetails>,
    circle: Option<&CircleDetails>,
) -> (ShapeKind, &'static str) {
    if let Some(kind) = record.value.get("kind").and_then(kind_of) {
        return (kind, "kind");
    }
    if let Some(kind) = record.value.get("Kind").and_then(kind_of) {
        return (kind, "Kind");
    }
    if let Some(kind) = polygon.and_then(PolygonDetails::type_value) {
        return (kind, "polygon");
    }
    if let Some(kind) = rectangle.and_then(|r| r.kind.clone()) {
        return (kind, "rectangle");
    }
    if let Some(kind) = circle.and_then(|c| c.kind.clone()) {
        return (kind, "circle");
    }
    (ShapeKind::from(DEFAULT_KIND), "default")
}

fn normalize_record(index: usize, value: &Value) -> Shape {
    if !value.is_object() {
        tracing::warn!(index, "shape record is not an object, using defaults");
    }
    let record = Record::new(value);

    let polygon = record.object("polygon").map(copy_polygon);
    let rectangle = record.object("rectangle").map(copy_rectangle);
    let circle = record.object("circle").map(copy_circle);

    let (kind, source) = resolve_kind(&record, polygon.as_ref(), rectangle.as_ref(), circle.as_ref());
    if source != "kind" {
        tracing::debug!(index, source, kind = %kind, "inferred shape kind");
    }

    let mut polygon = polygon.unwrap_or_default();
    if polygon.type_value().is_none() {
        polygon.set_type_value(&kind);
    }
    let mut rectangle = rectangle.unwrap_or_default();
    if rectangle.kind.is_none() {
        rectangle.kind = Some(kind.clone());
    }
    let mut circle = circle.unwrap_or_default();
    if circle.kind.is_none() {
        circle.kind = Some(kind.clone());
    }

    let geometry_type = match record.text("type") {
        None => GeometryType::Polygon,
        Some(raw) => GeometryType::from_name(&raw).unwrap_or_else(|| {
            tracing::warn!(index, geometry_type = %raw, "unknown geometry type, treating as Polygon");
            GeometryType::Polygon
        }),
    };

    let mut shape = Shape {
        id: record.text("id").unwrap_or_else(create_shape_id),
        name: record.text("name").unwrap_or_else(|| default_shape_name(index)),
        geometry_type,
        fieldtype: record.text("fieldtype").unwrap_or_else(|| DEFAULT_FIELD_TYPE.to_owned()),
        kind: kind.clone(),
        polygon,
        rectangle,
        circle,
        visible: record.visible(),
    };
    shape.apply_kind(kind);
    shape
}
