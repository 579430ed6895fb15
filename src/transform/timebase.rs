//! Conversion of frame indices into elapsed seconds.

use crate::core::columns::TIME_COLUMN;
use crate::core::TrialTable;
use crate::error::{KinematicsError, Result};

/// Check that a frame rate is finite and strictly positive.
pub fn validate_frame_rate(frame_rate: f64) -> Result<()> {
    if frame_rate.is_finite() && frame_rate > 0.0 {
        Ok(())
    } else {
        Err(KinematicsError::InvalidParameter(format!(
            "frame_rate must be positive and finite, got {}",
            frame_rate
        )))
    }
}

/// Elapsed seconds for `frames` frames: `t[i] = i / frame_rate`.
pub fn elapsed_seconds(frames: usize, frame_rate: f64) -> Result<Vec<f64>> {
    validate_frame_rate(frame_rate)?;
    Ok((0..frames).map(|i| i as f64 / frame_rate).collect())
}

/// Write the shared `time (seconds)` column, replacing any previous one.
pub fn add_time_column(table: &mut TrialTable, frame_rate: f64) -> Result<()> {
    let time = elapsed_seconds(table.len(), frame_rate)?;
    table.set_column(TIME_COLUMN, time)?;
    tracing::debug!(frames = table.len(), frame_rate, "derived time base");
    Ok(())
}
