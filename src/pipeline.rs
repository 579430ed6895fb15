//! End-to-end processing of a trial table.
//!
//! Runs the stages in their fixed order on a table the caller owns:
//! header flattening (when the table still has the tracker's three-level
//! header), time base, speed, median filter, decay convolution and
//! normalization. Every parameter is validated before the table is touched.

use crate::core::columns::{
    is_speed_column, raw_speed_column, smoothed_speed_column, speed_body_part,
};
use crate::core::TrialTable;
use crate::error::Result;
use crate::io::{read_trial_coordinates, write_table};
use crate::transform::convolve::{apply_convolution, validate_tau, DEFAULT_TAU};
use crate::transform::filter::{apply_median_filter, validate_window, EdgeMode, DEFAULT_WINDOW};
use crate::transform::normalize::normalize_speed;
use crate::transform::rename::rename_columns;
use crate::transform::speed::{add_speed_columns, add_velocity_components, SpeedReport};
use crate::transform::timebase::validate_frame_rate;
use std::path::Path;

/// Parameters accepted by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Camera frames per second.
    pub frame_rate: f64,
    /// Median filter window, a positive odd integer.
    pub median_window_size: usize,
    /// Padding policy of the median filter.
    pub median_edge_mode: EdgeMode,
    /// Decay constant of the convolution kernel, in seconds.
    pub tau: f64,
    /// Keep `(raw)` and `(smoothed)` snapshots of each speed column.
    pub keep_intermediate: bool,
    /// Also derive signed per-axis velocity columns.
    pub velocity_components: bool,
}

impl PipelineConfig {
    /// Configuration with default filter settings for the given frame rate.
    pub fn new(frame_rate: f64) -> Self {
        Self {
            frame_rate,
            median_window_size: DEFAULT_WINDOW,
            median_edge_mode: EdgeMode::default(),
            tau: DEFAULT_TAU,
            keep_intermediate: false,
            velocity_components: false,
        }
    }

    pub fn with_median_window(mut self, window: usize) -> Self {
        self.median_window_size = window;
        self
    }

    pub fn with_edge_mode(mut self, mode: EdgeMode) -> Self {
        self.median_edge_mode = mode;
        self
    }

    pub fn with_tau(mut self, tau: f64) -> Self {
        self.tau = tau;
        self
    }

    /// Keep snapshots of the raw and smoothed speed alongside the final columns.
    pub fn keep_intermediate(mut self) -> Self {
        self.keep_intermediate = true;
        self
    }

    pub fn with_velocity_components(mut self) -> Self {
        self.velocity_components = true;
        self
    }

    /// Check every parameter.
    pub fn validate(&self) -> Result<()> {
        validate_frame_rate(self.frame_rate)?;
        validate_window(self.median_window_size)?;
        validate_tau(self.tau)?;
        Ok(())
    }
}

/// What a pipeline run did to the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineReport {
    /// Frames in the table, unchanged by every stage.
    pub frames: usize,
    /// Whether the tracker header was flattened.
    pub renamed: bool,
    /// Body parts processed and skipped by speed derivation.
    pub speed: SpeedReport,
    /// Columns passed through the median filter.
    pub smoothed: Vec<String>,
    /// Columns passed through the decay convolution.
    pub convolved: Vec<String>,
    /// Normalized columns added.
    pub normalized: Vec<String>,
}

/// The full processing pipeline for one configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline, rejecting invalid parameters up front.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage on `table` in place.
    pub fn run(&self, table: &mut TrialTable) -> Result<PipelineReport> {
        let frames = table.len();
        let mut report = PipelineReport {
            frames,
            ..Default::default()
        };

        if !table.is_flat() {
            rename_columns(table)?;
            report.renamed = true;
        }

        report.speed = add_speed_columns(table, self.config.frame_rate)?;
        if self.config.velocity_components {
            add_velocity_components(table, self.config.frame_rate)?;
        }

        if self.config.keep_intermediate {
            snapshot_speed(table, raw_speed_column)?;
        }
        report.smoothed = apply_median_filter(
            table,
            self.config.median_window_size,
            self.config.median_edge_mode,
        )?;

        if self.config.keep_intermediate {
            snapshot_speed(table, smoothed_speed_column)?;
        }
        report.convolved = apply_convolution(table, self.config.tau)?;

        report.normalized = normalize_speed(table)?;

        debug_assert_eq!(table.len(), frames);
        tracing::info!(
            frames,
            body_parts = report.speed.processed.len(),
            skipped = report.speed.skipped.len(),
            "pipeline finished"
        );
        Ok(report)
    }

    /// Read a tracker file, run the pipeline and write the flat result.
    pub fn process_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<PipelineReport> {
        let mut table = read_trial_coordinates(input)?;
        let report = self.run(&mut table)?;
        write_table(&table, output)?;
        Ok(report)
    }
}

/// Copy every speed column under the name produced by `rename`.
fn snapshot_speed(table: &mut TrialTable, rename: fn(&str) -> String) -> Result<()> {
    let names: Vec<String> = table
        .column_names()
        .into_iter()
        .filter(|name| is_speed_column(name))
        .collect();

    for name in names {
        if let Some(part) = speed_body_part(&name) {
            let values = table.values(&name)?.to_vec();
            table.set_column(&rename(part), values)?;
        }
    }
    Ok(())
}
