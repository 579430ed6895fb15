//! Utility functions shared by the pipeline stages.

pub mod stats;

pub use stats::{diff, max_finite, median, nan_median};
