//! Causal exponential-decay convolution of speed series.
//!
//! Each output sample is a recency-weighted accumulation of the series up
//! to that frame:
//!
//! ```text
//! out[i] = Σ_{j=0..=i} series[i - j] · exp(-t[j] / tau)
//! ```
//!
//! which is the leading `len(series)` samples of the full discrete
//! convolution with the kernel built from the elapsed-time column.

use crate::core::columns::{is_speed_column, TIME_COLUMN};
use crate::core::TrialTable;
use crate::error::{KinematicsError, Result};

/// Default decay constant, in seconds.
pub const DEFAULT_TAU: f64 = 1.0;

/// Check that a decay constant is finite and strictly positive.
pub fn validate_tau(tau: f64) -> Result<()> {
    if tau.is_finite() && tau > 0.0 {
        Ok(())
    } else {
        Err(KinematicsError::InvalidParameter(format!(
            "tau must be positive and finite, got {}",
            tau
        )))
    }
}

/// Exponential decay kernel `exp(-t / tau)` over an elapsed-time series.
pub fn decay_kernel(time: &[f64], tau: f64) -> Result<Vec<f64>> {
    validate_tau(tau)?;
    Ok(time.iter().map(|t| (-t / tau).exp()).collect())
}

/// Full discrete convolution truncated to the first `series.len()` samples.
///
/// Summation is direct, so a NaN affects only its own frame and the frames
/// after it.
pub fn causal_convolve(series: &[f64], kernel: &[f64]) -> Vec<f64> {
    let n = series.len();
    let mut result = vec![0.0; n];

    for (i, out) in result.iter_mut().enumerate() {
        let taps = kernel.len().min(i + 1);
        for j in 0..taps {
            *out += series[i - j] * kernel[j];
        }
    }

    result
}

/// Convolve every speed column in place with the decay kernel.
///
/// The kernel is built from the table's `time (seconds)` column. Returns
/// the names of the convolved columns.
///
/// # Errors
/// `InvalidParameter` for a bad `tau`; `MalformedInput` when the table has
/// no time column.
pub fn apply_convolution(table: &mut TrialTable, tau: f64) -> Result<Vec<String>> {
    validate_tau(tau)?;

    let time = table.column(TIME_COLUMN).ok_or_else(|| {
        KinematicsError::MalformedInput(format!(
            "decay convolution needs a '{}' column",
            TIME_COLUMN
        ))
    })?;
    let kernel = decay_kernel(time, tau)?;

    let targets: Vec<String> = table
        .column_names()
        .into_iter()
        .filter(|name| is_speed_column(name))
        .collect();

    for name in &targets {
        let convolved = causal_convolve(table.values(name)?, &kernel);
        table.set_column(name, convolved)?;
    }

    tracing::debug!(columns = targets.len(), tau, "applied decay convolution");
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn kernel_starts_at_one_and_decays() {
        let k = decay_kernel(&[0.0, 1.0, 2.0], 1.0).unwrap();
        assert_relative_eq!(k[0], 1.0);
        assert_relative_eq!(k[1], (-1.0_f64).exp());
        assert_relative_eq!(k[2], (-2.0_f64).exp());
    }

    #[test]
    fn larger_tau_decays_slower() {
        let fast = decay_kernel(&[0.0, 1.0], 0.5).unwrap();
        let slow = decay_kernel(&[0.0, 1.0], 2.0).unwrap();
        assert!(slow[1] > fast[1]);
    }

    #[test]
    fn impulse_reproduces_kernel() {
        let kernel = [1.0, 0.5, 0.25, 0.125];
        let result = causal_convolve(&[1.0, 0.0, 0.0, 0.0], &kernel);
        assert_eq!(result, kernel.to_vec());
    }

    #[test]
    fn matches_hand_computed_sum() {
        let result = causal_convolve(&[2.0, 3.0, 4.0], &[1.0, 0.5, 0.25]);
        assert_relative_eq!(result[0], 2.0);
        assert_relative_eq!(result[1], 3.0 + 2.0 * 0.5);
        assert_relative_eq!(result[2], 4.0 + 3.0 * 0.5 + 2.0 * 0.25);
    }

    #[test]
    fn nan_propagates_forward_only() {
        let result = causal_convolve(&[1.0, f64::NAN, 1.0], &[1.0, 0.5, 0.25]);
        assert_relative_eq!(result[0], 1.0);
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
    }

    #[test]
    fn output_length_matches_input() {
        assert_eq!(causal_convolve(&[1.0; 7], &[1.0; 7]).len(), 7);
        assert!(causal_convolve(&[], &[]).is_empty());
    }

    #[test]
    fn invalid_tau_is_rejected() {
        for tau in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                decay_kernel(&[0.0], tau),
                Err(KinematicsError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn missing_time_column_is_malformed() {
        let mut table =
            TrialTable::from_columns(vec![("paw1_speed (pixels per second)", vec![1.0, 2.0])])
                .unwrap();
        assert!(matches!(
            apply_convolution(&mut table, 1.0),
            Err(KinematicsError::MalformedInput(_))
        ));
    }

    #[test]
    fn convolves_speed_columns_in_place() {
        let mut table = TrialTable::from_columns(vec![
            ("time (seconds)", vec![0.0, 1.0]),
            ("paw1_speed (pixels per second)", vec![2.0, 3.0]),
        ])
        .unwrap();
        let touched = apply_convolution(&mut table, 1.0).unwrap();

        assert_eq!(touched, vec!["paw1_speed (pixels per second)"]);
        let speed = table.column("paw1_speed (pixels per second)").unwrap();
        assert_relative_eq!(speed[0], 2.0);
        assert_relative_eq!(speed[1], 3.0 + 2.0 * (-1.0_f64).exp());
        assert_eq!(table.column("time (seconds)"), Some(&[0.0, 1.0][..]));
    }
}
