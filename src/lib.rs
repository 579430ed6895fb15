//! # trial-kinematics
//!
//! Post-processing of pose-tracking output for cross-trial comparison.
//!
//! Takes per-frame body-part pixel coordinates (with detection confidence)
//! as produced by a pose tracker, flattens them into a [`core::TrialTable`],
//! derives per-body-part speed in pixels per second, smooths it with a
//! median filter, accumulates it with a causal exponential-decay kernel and
//! normalizes each series by its maximum, so trials recorded at different
//! frame rates can be compared.
//!
//! # Example
//!
//! ```
//! use trial_kinematics::prelude::*;
//!
//! let mut table = TrialTable::from_columns(vec![
//!     ("paw1_x", vec![633.45, 633.34, 634.10, 635.02]),
//!     ("paw1_y", vec![326.82, 327.42, 327.90, 328.11]),
//!     ("paw1_likelihood", vec![0.99, 0.99, 0.98, 0.99]),
//! ])
//! .unwrap();
//!
//! let pipeline = Pipeline::new(PipelineConfig::new(19.0)).unwrap();
//! let report = pipeline.run(&mut table).unwrap();
//!
//! assert_eq!(report.speed.processed, vec!["paw1"]);
//! assert_eq!(table.len(), 4);
//! ```

pub mod core;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod transform;
pub mod utils;

pub use error::{KinematicsError, Result};

pub mod prelude {
    pub use crate::core::{ColumnKey, TrialTable, TrialTableBuilder};
    pub use crate::error::{KinematicsError, Result};
    pub use crate::pipeline::{Pipeline, PipelineConfig, PipelineReport};
    pub use crate::transform::{EdgeMode, SpeedReport};
}
