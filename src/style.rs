//! Outline styling by field classification and shape role.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_LINE_WIDTH;

/// Stroke pattern for a shape outline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDash {
    #[default]
    Solid,
    Dash,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    pub line_width: f64,
    pub line_dash: LineDash,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self { line_width: DEFAULT_LINE_WIDTH, line_dash: LineDash::Solid }
    }
}

/// Line width and dash for a shape.
///
/// Both arguments match by case-insensitive containment:
///
/// | role | field type | width | dash |
/// |------|------------|-------|------|
/// | `field` | `warning` | 1 | solid |
/// | `field` | `protective` | 2 | solid |
/// | `cutout` | `protective` or `warning` | 2 | dash |
/// | anything else | | 1.5 | solid |
#[must_use]
pub fn resolve_shape_style(field_type: &str, shape_type: &str) -> ShapeStyle {
    let field = field_type.to_ascii_lowercase();
    let shape = shape_type.to_ascii_lowercase();
    let is_protective = field.contains("protective");
    let is_warning = field.contains("warning");

    if shape.contains("field") {
        if is_warning {
            return ShapeStyle { line_width: 1.0, line_dash: LineDash::Solid };
        }
        if is_protective {
            return ShapeStyle { line_width: 2.0, line_dash: LineDash::Solid };
        }
    } else if shape.contains("cutout") && (is_protective || is_warning) {
        return ShapeStyle { line_width: 2.0, line_dash: LineDash::Dash };
    }
    ShapeStyle::default()
}
