//! Column naming conventions for flattened trial tables.
//!
//! Raw tracker columns are named `<bodypart>_<suffix>` where the suffix is
//! `x`, `y` or `likelihood`. Derived columns carry their unit in a trailing
//! parenthesised tag so that later stages can find them by suffix.

/// Number of header levels written by the pose tracker.
pub const TRACKER_HEADER_DEPTH: usize = 3;

/// Fixed label given to the row index once the header is flattened.
pub const FRAME_INDEX_NAME: &str = "bodyparts_coords";

/// Shared elapsed-time column.
pub const TIME_COLUMN: &str = "time (seconds)";

/// Unit tag carried by every speed column.
pub const SPEED_UNIT: &str = "(pixels per second)";

/// Unit tag carried by every max-normalized column.
pub const NORMALIZED_UNIT: &str = "(normalized)";

/// Horizontal position suffix.
pub const X_SUFFIX: &str = "x";

/// Vertical position suffix.
pub const Y_SUFFIX: &str = "y";

/// Detection confidence suffix.
pub const LIKELIHOOD_SUFFIX: &str = "likelihood";

/// Split a flat column name into `(variable, suffix)` at the last underscore.
///
/// `paw1_x` splits into `("paw1", "x")`, and `left_paw_likelihood` into
/// `("left_paw", "likelihood")`. Names without an underscore return `None`.
pub fn split_variable(name: &str) -> Option<(&str, &str)> {
    name.rsplit_once('_')
}

/// Column holding one position axis of a body part.
pub fn axis_column(body_part: &str, suffix: &str) -> String {
    format!("{}_{}", body_part, suffix)
}

/// Speed column of a body part, e.g. `paw1_speed (pixels per second)`.
pub fn speed_column(body_part: &str) -> String {
    format!("{}_speed {}", body_part, SPEED_UNIT)
}

/// Snapshot of the unsmoothed speed kept when intermediates are requested.
pub fn raw_speed_column(body_part: &str) -> String {
    format!("{}_speed (raw)", body_part)
}

/// Snapshot of the median-filtered speed kept when intermediates are requested.
pub fn smoothed_speed_column(body_part: &str) -> String {
    format!("{}_speed (smoothed)", body_part)
}

/// Signed per-axis velocity column, e.g. `paw1_x_velocity`.
pub fn velocity_component_column(body_part: &str, suffix: &str) -> String {
    format!("{}_{}_velocity", body_part, suffix)
}

/// True for columns carrying the speed unit tag.
pub fn is_speed_column(name: &str) -> bool {
    name.ends_with(SPEED_UNIT)
}

/// Body part owning a speed column, e.g. `paw1` for `paw1_speed (pixels per second)`.
pub fn speed_body_part(name: &str) -> Option<&str> {
    name.strip_suffix(SPEED_UNIT)
        .map(str::trim_end)
        .and_then(|stem| stem.strip_suffix("_speed"))
}

/// Name of the normalized counterpart of a speed column.
///
/// Replaces the `(pixels per second)` tag with `(normalized)`; returns `None`
/// when the name does not carry the speed tag.
pub fn normalized_column(speed_column: &str) -> Option<String> {
    speed_column
        .strip_suffix(SPEED_UNIT)
        .map(|stem| format!("{}{}", stem, NORMALIZED_UNIT))
}
