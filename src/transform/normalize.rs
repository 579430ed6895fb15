//! Max-normalization of processed speed series.

use crate::core::columns::{is_speed_column, normalized_column};
use crate::core::TrialTable;
use crate::error::{KinematicsError, Result};
use crate::utils::stats::max_finite;

/// Result of a max-normalization, keeping the divisor for inverse transforms.
#[derive(Debug, Clone)]
pub struct MaxScaleResult {
    /// Transformed data.
    pub data: Vec<f64>,
    /// Divisor used; `None` when the series had no usable maximum.
    pub scale: Option<f64>,
}

impl MaxScaleResult {
    /// Inverse transform to recover the original scale.
    pub fn inverse(&self) -> Vec<f64> {
        match self.scale {
            Some(scale) => self.data.iter().map(|&x| x * scale).collect(),
            None => vec![f64::NAN; self.data.len()],
        }
    }
}

/// Divide a series by its own largest finite value.
///
/// NaN cells stay NaN. A series whose maximum is zero, or which has no
/// finite value at all, normalizes to all-NaN.
pub fn normalize_by_max(series: &[f64]) -> MaxScaleResult {
    match max_finite(series).filter(|&m| m != 0.0) {
        Some(max) => MaxScaleResult {
            data: series.iter().map(|&x| x / max).collect(),
            scale: Some(max),
        },
        None => MaxScaleResult {
            data: vec![f64::NAN; series.len()],
            scale: None,
        },
    }
}

/// Add a `<part>_speed (normalized)` column for every speed column.
///
/// Returns the names of the normalized columns.
pub fn normalize_speed(table: &mut TrialTable) -> Result<Vec<String>> {
    let targets: Vec<(String, String)> = table
        .column_names()
        .into_iter()
        .filter(|name| is_speed_column(name))
        .filter_map(|name| normalized_column(&name).map(|out| (name, out)))
        .collect();

    let mut written = Vec::with_capacity(targets.len());
    for (source, target) in targets {
        let result = normalize_by_max(table.values(&source)?);
        if result.scale.is_none() {
            tracing::warn!(column = %source, "no non-zero finite maximum; normalized column is NaN");
        }
        table.set_column(&target, result.data)?;
        written.push(target);
    }

    tracing::debug!(columns = written.len(), "normalized speed columns");
    Ok(written)
}

/// Normalize a single named column, returning the new column's name.
pub fn normalize_column(table: &mut TrialTable, source: &str) -> Result<String> {
    let target = normalized_column(source).ok_or_else(|| {
        KinematicsError::MalformedInput(format!("'{}' is not a speed column", source))
    })?;
    let result = normalize_by_max(table.values(source)?);
    table.set_column(&target, result.data)?;
    Ok(target)
}
