//! Statistical utility functions.

use std::cmp::Ordering;

/// Calculate the median of a slice.
///
/// An even number of values yields the mean of the two middle values.
/// Returns NaN for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Median of the non-NaN values of a slice; NaN when none remain.
pub fn nan_median(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    median(&finite)
}

/// Largest finite value of a slice, or `None` when there is none.
pub fn max_finite(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
}

/// First difference `x[i] - x[i-1]`; element 0 is NaN.
pub fn diff(values: &[f64]) -> Vec<f64> {
    let mut result = Vec::with_capacity(values.len());
    if values.is_empty() {
        return result;
    }
    result.push(f64::NAN);
    result.extend(values.windows(2).map(|w| w[1] - w[0]));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn median_odd_and_even() {
        assert_relative_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_relative_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn nan_median_skips_nan() {
        assert_relative_eq!(nan_median(&[f64::NAN, 5.0, 1.0, 3.0]), 3.0);
        assert_relative_eq!(nan_median(&[f64::NAN, f64::NAN, 7.0]), 7.0);
        assert!(nan_median(&[f64::NAN, f64::NAN]).is_nan());
    }

    #[test]
    fn max_finite_ignores_nan_and_inf() {
        assert_eq!(max_finite(&[1.0, f64::NAN, 3.0, f64::INFINITY]), Some(3.0));
        assert_eq!(max_finite(&[-2.0, -1.0]), Some(-1.0));
        assert_eq!(max_finite(&[f64::NAN]), None);
        assert_eq!(max_finite(&[]), None);
    }

    #[test]
    fn diff_leads_with_nan() {
        let d = diff(&[1.0, 4.0, 2.0]);
        assert!(d[0].is_nan());
        assert_relative_eq!(d[1], 3.0);
        assert_relative_eq!(d[2], -2.0);
        assert!(diff(&[]).is_empty());
    }
}
