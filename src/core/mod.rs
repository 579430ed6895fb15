//! Core data structures for pose-tracking trial tables.

pub mod columns;
mod trial_table;

pub use trial_table::{ColumnKey, TrialTable, TrialTableBuilder, ValueLayout};
