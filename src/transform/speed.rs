//! Per-body-part speed derived from frame-to-frame displacement.
//!
//! Body parts are discovered from flat column names by splitting at the
//! last underscore, so `left_paw_x` belongs to `left_paw`. A part is a
//! candidate when it owns an `_x` or `_y` column; it is processed only when
//! it owns both. Candidates missing one axis are reported as skipped.

use crate::core::columns::{
    axis_column, speed_column, split_variable, velocity_component_column, TIME_COLUMN, X_SUFFIX,
    Y_SUFFIX,
};
use crate::core::TrialTable;
use crate::error::{KinematicsError, Result};
use crate::transform::timebase::{add_time_column, validate_frame_rate};
use crate::utils::stats::diff;

/// Outcome of a speed derivation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeedReport {
    /// Body parts that received derived columns, in table order.
    pub processed: Vec<String>,
    /// Body parts owning only one of the two position columns.
    pub skipped: Vec<String>,
}

impl SpeedReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn was_processed(&self, body_part: &str) -> bool {
        self.processed.iter().any(|p| p == body_part)
    }
}

/// Discover body parts from flat column names.
///
/// Returns `(complete, incomplete)`: parts with both position columns and
/// parts with only one, each in order of first appearance.
pub fn discover_body_parts<S: AsRef<str>>(names: &[S]) -> (Vec<String>, Vec<String>) {
    let has = |candidate: &str| names.iter().any(|n| n.as_ref() == candidate);

    let mut candidates: Vec<&str> = Vec::new();
    for name in names {
        if let Some((part, suffix)) = split_variable(name.as_ref()) {
            if (suffix == X_SUFFIX || suffix == Y_SUFFIX) && !candidates.contains(&part) {
                candidates.push(part);
            }
        }
    }

    candidates.into_iter().fold(
        (Vec::new(), Vec::new()),
        |(mut complete, mut incomplete), part| {
            if has(&axis_column(part, X_SUFFIX)) && has(&axis_column(part, Y_SUFFIX)) {
                complete.push(part.to_string());
            } else {
                incomplete.push(part.to_string());
            }
            (complete, incomplete)
        },
    )
}

fn check_lengths(expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(KinematicsError::DimensionMismatch { expected, got });
    }
    Ok(())
}

/// Speed in pixels per second from positions and elapsed time.
///
/// `speed[i] = sqrt(dx² + dy²) / dt` with `dx`, `dy`, `dt` the first
/// differences at frame `i`. Frame 0 has no predecessor and is NaN.
pub fn speed(x: &[f64], y: &[f64], time: &[f64]) -> Result<Vec<f64>> {
    check_lengths(x.len(), y.len())?;
    check_lengths(x.len(), time.len())?;

    let dx = diff(x);
    let dy = diff(y);
    let dt = diff(time);

    Ok(dx
        .iter()
        .zip(&dy)
        .zip(&dt)
        .map(|((dx, dy), dt)| (dx * dx + dy * dy).sqrt() / dt)
        .collect())
}

/// Signed velocity along one axis: `d(position) / dt`, frame 0 NaN.
pub fn axis_velocity(position: &[f64], time: &[f64]) -> Result<Vec<f64>> {
    check_lengths(position.len(), time.len())?;
    Ok(diff(position)
        .iter()
        .zip(diff(time))
        .map(|(dp, dt)| dp / dt)
        .collect())
}

fn report_skipped(skipped: &[String]) {
    for part in skipped {
        tracing::warn!(
            body_part = %part,
            "skipping body part without both x and y position columns"
        );
    }
}

/// Derive `time (seconds)` and a `<part>_speed (pixels per second)` column
/// for every body part with both position columns.
///
/// Existing speed columns are overwritten, so the call is idempotent.
pub fn add_speed_columns(table: &mut TrialTable, frame_rate: f64) -> Result<SpeedReport> {
    validate_frame_rate(frame_rate)?;
    add_time_column(table, frame_rate)?;

    let names = table.column_names();
    let (processed, skipped) = discover_body_parts(&names);
    report_skipped(&skipped);

    let time = table.values(TIME_COLUMN)?.to_vec();
    for part in &processed {
        let x = table.values(&axis_column(part, X_SUFFIX))?;
        let y = table.values(&axis_column(part, Y_SUFFIX))?;
        let series = speed(x, y, &time)?;
        table.set_column(&speed_column(part), series)?;
    }

    tracing::debug!(
        processed = processed.len(),
        skipped = skipped.len(),
        "derived speed columns"
    );
    Ok(SpeedReport { processed, skipped })
}

/// Add signed `<part>_x_velocity` and `<part>_y_velocity` columns.
///
/// Uses the same discovery rule and time base as [`add_speed_columns`].
pub fn add_velocity_components(table: &mut TrialTable, frame_rate: f64) -> Result<SpeedReport> {
    validate_frame_rate(frame_rate)?;
    add_time_column(table, frame_rate)?;

    let names = table.column_names();
    let (processed, skipped) = discover_body_parts(&names);
    report_skipped(&skipped);

    let time = table.values(TIME_COLUMN)?.to_vec();
    for part in &processed {
        for suffix in [X_SUFFIX, Y_SUFFIX] {
            let position = table.values(&axis_column(part, suffix))?;
            let series = axis_velocity(position, &time)?;
            table.set_column(&velocity_component_column(part, suffix), series)?;
        }
    }

    tracing::debug!(processed = processed.len(), "derived velocity components");
    Ok(SpeedReport { processed, skipped })
}
