//! Pipeline stages over a trial table.
//!
//! Each stage has a slice-level function working on plain series and a
//! table-level function mutating the table in place. Stages run in the
//! order rename → time base → speed → median filter → decay convolution →
//! normalization.
//!
//! # Example
//!
//! ```
//! use trial_kinematics::core::TrialTable;
//! use trial_kinematics::transform::{
//!     add_speed_columns, apply_convolution, apply_median_filter, normalize_speed, EdgeMode,
//! };
//!
//! let mut table = TrialTable::from_columns(vec![
//!     ("paw1_x", vec![0.0, 3.0, 6.0, 6.0]),
//!     ("paw1_y", vec![0.0, 4.0, 8.0, 8.0]),
//! ])
//! .unwrap();
//!
//! add_speed_columns(&mut table, 19.0).unwrap();
//! apply_median_filter(&mut table, 3, EdgeMode::Nearest).unwrap();
//! apply_convolution(&mut table, 1.0).unwrap();
//! normalize_speed(&mut table).unwrap();
//!
//! assert!(table.has_column("paw1_speed (normalized)"));
//! ```

pub mod convolve;
pub mod filter;
pub mod normalize;
pub mod rename;
pub mod speed;
pub mod timebase;

pub use convolve::{apply_convolution, causal_convolve, decay_kernel, DEFAULT_TAU};
pub use filter::{apply_median_filter, median_filter, EdgeMode, DEFAULT_WINDOW};
pub use normalize::{normalize_by_max, normalize_column, normalize_speed, MaxScaleResult};
pub use rename::rename_columns;
pub use speed::{
    add_speed_columns, add_velocity_components, axis_velocity, discover_body_parts, speed,
    SpeedReport,
};
pub use timebase::{add_time_column, elapsed_seconds};
