//! Centered median filter for suppressing single-frame tracking jitter.
//!
//! Windows that run past either end of the series are padded according to
//! an [`EdgeMode`]. NaN cells are left out of each window's median, so the
//! undefined first-frame speed does not poison its neighbours; a window
//! holding only NaN yields NaN.

use crate::core::columns::is_speed_column;
use crate::core::TrialTable;
use crate::error::{KinematicsError, Result};
use crate::utils::stats::nan_median;

/// Default median window size.
pub const DEFAULT_WINDOW: usize = 3;

/// Padding policy for windows that extend past the series ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeMode {
    /// Repeat the edge sample: `a a | a b c | c c`.
    #[default]
    Nearest,
    /// Mirror about the edge, repeating it: `b a | a b c | c b`.
    Reflect,
}

impl EdgeMode {
    fn index(self, i: isize, n: usize) -> usize {
        let n = n as isize;
        let j = match self {
            EdgeMode::Nearest => i.clamp(0, n - 1),
            EdgeMode::Reflect => {
                let period = 2 * n;
                let m = i.rem_euclid(period);
                if m < n {
                    m
                } else {
                    period - 1 - m
                }
            }
        };
        j as usize
    }
}

/// Check that a median window is a positive odd integer.
pub fn validate_window(window: usize) -> Result<()> {
    if window == 0 || window % 2 == 0 {
        return Err(KinematicsError::InvalidParameter(format!(
            "median window must be a positive odd integer, got {}",
            window
        )));
    }
    Ok(())
}

/// Apply `f` to a centered, edge-padded window around every sample.
fn centered_apply<F>(series: &[f64], window: usize, mode: EdgeMode, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = series.len();
    if n == 0 {
        return Vec::new();
    }

    let half = (window / 2) as isize;
    let mut buffer = Vec::with_capacity(window);

    (0..n as isize)
        .map(|i| {
            buffer.clear();
            buffer.extend((i - half..=i + half).map(|j| series[mode.index(j, n)]));
            f(&buffer)
        })
        .collect()
}

/// Median-filter a series; the output has the input's length.
///
/// # Errors
/// `InvalidParameter` when `window` is zero or even.
pub fn median_filter(series: &[f64], window: usize, mode: EdgeMode) -> Result<Vec<f64>> {
    validate_window(window)?;
    Ok(centered_apply(series, window, mode, nan_median))
}

/// Median-filter every speed column in place.
///
/// Returns the names of the filtered columns.
pub fn apply_median_filter(
    table: &mut TrialTable,
    window: usize,
    mode: EdgeMode,
) -> Result<Vec<String>> {
    validate_window(window)?;

    let targets: Vec<String> = table
        .column_names()
        .into_iter()
        .filter(|name| is_speed_column(name))
        .collect();

    for name in &targets {
        let filtered = median_filter(table.values(name)?, window, mode)?;
        table.set_column(name, filtered)?;
    }

    tracing::debug!(columns = targets.len(), window, ?mode, "applied median filter");
    Ok(targets)
}
