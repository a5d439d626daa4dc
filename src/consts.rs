//! Shared defaults for the fieldshapes crate.

// ── Shape records ───────────────────────────────────────────────

/// Field classification assigned when a record carries none.
pub const DEFAULT_FIELD_TYPE: &str = "ProtectiveSafeBlanking";

/// Functional role assigned when no record location names one.
pub const DEFAULT_KIND: &str = "Field";

/// Role written into the default polygon sub-record.
pub const DEFAULT_POLYGON_KIND: &str = "CutOut";

/// Prefix of generated shape identifiers.
pub const SHAPE_ID_PREFIX: &str = "shape-";

/// Edge length of the default rectangle and polygon, and radius of the
/// default circle.
pub const DEFAULT_EXTENT: &str = "100";

// ── Colors ──────────────────────────────────────────────────────

/// Channels of the dark slate used by `with_alpha` for missing colors.
pub const FALLBACK_RGB: (u8, u8, u8) = (15, 23, 42);

/// Stroke alpha applied when a profile leaves it unset.
pub const DEFAULT_LINE_ALPHA: f64 = 0.5;

// ── Styles ──────────────────────────────────────────────────────

/// Line width for combinations outside the style table.
pub const DEFAULT_LINE_WIDTH: f64 = 1.5;

// ── Configuration ───────────────────────────────────────────────

/// Environment variable holding a JSON palette override.
pub const PALETTE_ENV_VAR: &str = "FIELDSHAPES_PALETTE";
