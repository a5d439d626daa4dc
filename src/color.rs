//! Deterministic, seed-derived shape colors.
//!
//! A seed (usually a shape id) hashes to a unit value, which picks a hue
//! inside a [`ColorProfile`]'s band. The same seed therefore paints the same
//! color on every reload and every platform, and shapes of one category stay
//! within one hue family.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use serde::{Deserialize, Serialize};

use crate::config::{ColorProfile, Palette};
use crate::consts::FALLBACK_RGB;

/// 8-bit RGB channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }
}

/// Paint colors for one shape. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSet {
    /// `rgba(r, g, b, a)` at the profile's line alpha.
    pub stroke: String,
    /// `rgba(r, g, b, a)` at the profile's fill alpha.
    pub fill: String,
    /// Opaque `#rrggbb`.
    pub hex: String,
}

/// Map a seed to `[0, 1]` with a 31-multiplier rolling hash over UTF-16
/// code units in wrapping `u32` arithmetic, divided by `u32::MAX`.
///
/// An empty seed maps to `0`.
#[must_use]
pub fn hash_string_to_unit(seed: &str) -> f64 {
    if seed.is_empty() {
        return 0.0;
    }
    let hash = seed
        .encode_utf16()
        .fold(0u32, |hash, unit| hash.wrapping_mul(31).wrapping_add(u32::from(unit)));
    f64::from(hash) / f64::from(u32::MAX)
}

/// Wrap a hue into `[0, 360)`.
#[must_use]
pub fn wrap_hue(hue: f64) -> f64 {
    let normalized = hue % 360.0;
    if normalized < 0.0 { normalized + 360.0 } else { normalized }
}

/// Pick a hue in `[center - spread, center + spread)` for `seed`.
#[must_use]
pub fn sample_hue(center: f64, spread: f64, seed: &str) -> f64 {
    let unit = hash_string_to_unit(seed);
    wrap_hue(center - spread + unit * spread * 2.0)
}

/// HSV to RGB. `h` in degrees, `s` and `v` in percent.
///
/// Hues outside `[0, 360)` fall in no sector and produce the gray `v - c`.
#[must_use]
pub fn hsva_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let saturation = s / 100.0;
    let value = v / 100.0;
    let chroma = value * saturation;
    let h_prime = h / 60.0;
    let x = chroma * (1.0 - ((h_prime % 2.0) - 1.0).abs());

    let (r1, g1, b1) = if (0.0..1.0).contains(&h_prime) {
        (chroma, x, 0.0)
    } else if (1.0..2.0).contains(&h_prime) {
        (x, chroma, 0.0)
    } else if (2.0..3.0).contains(&h_prime) {
        (0.0, chroma, x)
    } else if (3.0..4.0).contains(&h_prime) {
        (0.0, x, chroma)
    } else if (4.0..5.0).contains(&h_prime) {
        (x, 0.0, chroma)
    } else if (5.0..6.0).contains(&h_prime) {
        (chroma, 0.0, x)
    } else {
        (0.0, 0.0, 0.0)
    };

    let m = value - chroma;
    Rgb {
        r: to_channel(r1 + m),
        g: to_channel(g1 + m),
        b: to_channel(b1 + m),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(unit: f64) -> u8 {
    if unit.is_nan() {
        return 0;
    }
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Lowercase, zero-padded `#rrggbb`.
#[must_use]
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Derive the paint colors for `seed` within `profile`.
///
/// The hue is sampled from `"{seed}:{salt}"`, so a caller can derive several
/// distinct colors for one seed by varying `salt`.
#[must_use]
pub fn build_color_set(profile: &ColorProfile, seed: &str, salt: &str) -> ColorSet {
    let hue = sample_hue(profile.hue_center, profile.hue_spread, &format!("{seed}:{salt}"));
    let Rgb { r, g, b } = hsva_to_rgb(hue, profile.saturation, profile.value);
    ColorSet {
        stroke: format!("rgba({r}, {g}, {b}, {})", profile.line_alpha()),
        fill: format!("rgba({r}, {g}, {b}, {})", profile.fill_alpha()),
        hex: rgb_to_hex(r, g, b),
    }
}

/// Colors for a field, using the warning or protective profile by field type.
#[must_use]
pub fn pick_field_color(palette: &Palette, field_type: &str, seed: &str) -> ColorSet {
    build_color_set(palette.profile_for_field(field_type), seed, "")
}

/// Colors for a generic shape.
#[must_use]
pub fn pick_shape_color(palette: &Palette, seed: &str) -> ColorSet {
    build_color_set(&palette.shape, seed, "")
}

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<Rgb> {
    let hex = raw.trim().strip_prefix('#')?.trim();
    if !hex.is_ascii() {
        return None;
    }
    let expanded = match hex.len() {
        3 => hex.chars().flat_map(|ch| [ch, ch]).collect::<String>(),
        6 => hex.to_owned(),
        _ => return None,
    };
    let channel = |at: usize| u8::from_str_radix(&expanded[at..at + 2], 16);
    match (channel(0), channel(2), channel(4)) {
        (Ok(r), Ok(g), Ok(b)) => Some(Rgb { r, g, b }),
        _ => None,
    }
}

/// Re-express a hex color as `rgba(...)` with `alpha`.
///
/// A missing or empty color yields the fallback slate `rgba(15, 23, 42, a)`.
/// Anything that is not a well-formed `#rgb` / `#rrggbb` value is returned
/// unchanged.
#[must_use]
pub fn with_alpha(color: Option<&str>, alpha: f64) -> String {
    let Some(color) = color.filter(|c| !c.is_empty()) else {
        let (r, g, b) = FALLBACK_RGB;
        return format!("rgba({r}, {g}, {b}, {alpha})");
    };
    match parse_hex_rgb(color) {
        Some(Rgb { r, g, b }) if color.starts_with('#') => format!("rgba({r}, {g}, {b}, {alpha})"),
        _ => color.to_owned(),
    }
}
