//! Error types for the trial-kinematics library.

use thiserror::Error;

/// Result type alias for trial table operations.
pub type Result<T> = std::result::Result<T, KinematicsError>;

/// Errors that can occur while reading or transforming a trial table.
///
/// Undefined numeric cells (the first-row derivative, a zero maximum during
/// normalization) are not errors; they travel through the table as NaN.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Invalid parameter value (frame rate, decay constant, window size).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Input does not have the shape a stage or reader expects.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Column length does not match the table's row count.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A named column is not present in the table.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// Frame index past the end of the table.
    #[error("index out of bounds: {index} (size: {size})")]
    IndexOutOfBounds { index: usize, size: usize },

    /// A column label would appear twice.
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// Underlying reader or writer failed.
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for KinematicsError {
    fn from(err: std::io::Error) -> Self {
        KinematicsError::Io(err.to_string())
    }
}
