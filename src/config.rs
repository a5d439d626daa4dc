//! Color profiles and the palette that groups them.
//!
//! The built-in [`Palette`] matches what the editor has always shown. A
//! deployment can shift individual values with a partial JSON override,
//! either passed directly to [`Palette::from_json`] or through the
//! `FIELDSHAPES_PALETTE` environment variable read by [`Palette::from_env`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::{DEFAULT_LINE_ALPHA, PALETTE_ENV_VAR};
use crate::error::ShapeError;

/// Hue family and opacity for one category of shapes.
///
/// Hues are sampled from `[hue_center - hue_spread, hue_center + hue_spread)`;
/// `saturation` and `value` are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorProfile {
    pub hue_center: f64,
    pub hue_spread: f64,
    pub saturation: f64,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_alpha: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_alpha: Option<f64>,
}

impl ColorProfile {
    /// Reds for protective fields.
    pub const FIELD_PROTECTIVE: Self = Self {
        hue_center: 350.0,
        hue_spread: 20.0,
        saturation: 75.0,
        value: 100.0,
        line_alpha: Some(0.5),
        fill_alpha: Some(0.125),
    };

    /// Yellows for warning fields.
    pub const FIELD_WARNING: Self = Self {
        hue_center: 60.0,
        hue_spread: 10.0,
        saturation: 80.0,
        value: 100.0,
        line_alpha: Some(0.5),
        fill_alpha: Some(0.125),
    };

    /// Dark greens for generic shapes.
    pub const SHAPE: Self = Self {
        hue_center: 120.0,
        hue_spread: 30.0,
        saturation: 60.0,
        value: 30.0,
        line_alpha: Some(0.5),
        fill_alpha: Some(0.125),
    };

    #[must_use]
    pub fn line_alpha(&self) -> f64 {
        self.line_alpha.unwrap_or(DEFAULT_LINE_ALPHA)
    }

    /// Falls back to the line alpha when unset.
    #[must_use]
    pub fn fill_alpha(&self) -> f64 {
        self.fill_alpha.unwrap_or_else(|| self.line_alpha())
    }

    fn validate(&self, name: &str) -> Result<(), ShapeError> {
        let invalid = |reason: String| ShapeError::InvalidProfile { name: name.to_owned(), reason };
        let numbers = [
            ("hueCenter", self.hue_center),
            ("hueSpread", self.hue_spread),
            ("saturation", self.saturation),
            ("value", self.value),
            ("lineAlpha", self.line_alpha()),
            ("fillAlpha", self.fill_alpha()),
        ];
        if let Some((field, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{field} is not finite")));
        }
        if self.hue_spread < 0.0 {
            return Err(invalid(format!("hueSpread {} is negative", self.hue_spread)));
        }
        for (field, percent) in [("saturation", self.saturation), ("value", self.value)] {
            if !(0.0..=100.0).contains(&percent) {
                return Err(invalid(format!("{field} {percent} outside 0..=100")));
            }
        }
        for (field, alpha) in [("lineAlpha", self.line_alpha()), ("fillAlpha", self.fill_alpha())] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(invalid(format!("{field} {alpha} outside 0..=1")));
            }
        }
        Ok(())
    }
}

/// The three profiles the editor colors shapes with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub protective: ColorProfile,
    pub warning: ColorProfile,
    pub shape: ColorProfile,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            protective: ColorProfile::FIELD_PROTECTIVE,
            warning: ColorProfile::FIELD_WARNING,
            shape: ColorProfile::SHAPE,
        }
    }
}

impl Palette {
    /// Overlay a partial JSON object on the default palette.
    ///
    /// Keys are profile names (`protective`, `warning`, `shape`) mapping to
    /// camelCase profile fields; anything omitted keeps its default.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Json`] for malformed JSON or wrongly typed fields,
    /// [`ShapeError::InvalidProfile`] for out-of-range values.
    pub fn from_json(text: &str) -> Result<Self, ShapeError> {
        let overrides: Value = serde_json::from_str(text)?;
        let mut merged = serde_json::to_value(Self::default())?;
        merge_values(&mut merged, overrides);
        let palette: Self = serde_json::from_value(merged)?;
        palette.validate()?;
        Ok(palette)
    }

    /// Read overrides from `FIELDSHAPES_PALETTE`. An unset or blank variable
    /// yields the default palette.
    ///
    /// # Errors
    ///
    /// Same as [`Palette::from_json`].
    pub fn from_env() -> Result<Self, ShapeError> {
        match std::env::var(PALETTE_ENV_VAR) {
            Ok(raw) if !raw.trim().is_empty() => {
                tracing::debug!(var = PALETTE_ENV_VAR, "loading palette overrides");
                Self::from_json(&raw)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Profile for a field classification: warning when the name contains
    /// `warning` (any case), protective otherwise.
    #[must_use]
    pub fn profile_for_field(&self, field_type: &str) -> &ColorProfile {
        if field_type.to_ascii_lowercase().contains("warning") {
            &self.warning
        } else {
            &self.protective
        }
    }

    fn validate(&self) -> Result<(), ShapeError> {
        self.protective.validate("protective")?;
        self.warning.validate("warning")?;
        self.shape.validate("shape")
    }
}

/// Recursively merge `patch` into `base`. Objects merge key by key; any
/// other value replaces what was there.
fn merge_values(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, patch) => *base = patch,
    }
}
