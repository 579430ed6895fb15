//! TrialTable data structure holding per-frame tracking observations.

use crate::error::{KinematicsError, Result};
use std::collections::HashSet;
use std::fmt;

/// Layout of the value matrix handed to the table constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueLayout {
    /// Each inner vector is a column (column-major).
    #[default]
    Column,
    /// Each inner vector is a frame across columns (row-major).
    Row,
}

/// Label of one column, one entry per header level.
///
/// Files written by the pose tracker carry three levels
/// (`scorer`, `bodyparts`, `coords`); flattened tables carry one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnKey {
    levels: Vec<String>,
}

impl ColumnKey {
    /// Single-level key.
    pub fn flat(name: impl Into<String>) -> Self {
        Self {
            levels: vec![name.into()],
        }
    }

    /// Multi-level key, outermost level first.
    pub fn multi<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            levels: levels.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of header levels.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Levels joined with `_`; equals the name for flat keys.
    pub fn label(&self) -> String {
        self.levels.join("_")
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An ordered table of per-frame numeric observations.
///
/// Row `i` is video frame `i`; the frame index is implicit in row order.
/// Values are stored column-major: `values[column][frame]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialTable {
    frames: usize,
    index_name: Option<String>,
    level_names: Vec<String>,
    keys: Vec<ColumnKey>,
    values: Vec<Vec<f64>>,
}

/// Builder for constructing a TrialTable.
#[derive(Debug, Clone, Default)]
pub struct TrialTableBuilder {
    frames: Option<usize>,
    index_name: Option<String>,
    level_names: Vec<String>,
    keys: Vec<ColumnKey>,
    values: Vec<Vec<f64>>,
    layout: ValueLayout,
}

impl TrialTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame count explicitly (needed only for tables without columns).
    pub fn frames(mut self, frames: usize) -> Self {
        self.frames = Some(frames);
        self
    }

    pub fn index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = Some(name.into());
        self
    }

    /// Names of the header levels, outermost first.
    pub fn level_names(mut self, names: Vec<String>) -> Self {
        self.level_names = names;
        self
    }

    pub fn keys(mut self, keys: Vec<ColumnKey>) -> Self {
        self.keys = keys;
        self
    }

    /// Add one flat column.
    pub fn column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.keys.push(ColumnKey::flat(name));
        self.values.push(values);
        self.layout = ValueLayout::Column;
        self
    }

    /// Set the value matrix with the given layout.
    pub fn values(mut self, values: Vec<Vec<f64>>, layout: ValueLayout) -> Self {
        self.values = values;
        self.layout = layout;
        self
    }

    pub fn build(self) -> Result<TrialTable> {
        TrialTable::new(
            self.frames,
            self.index_name,
            self.level_names,
            self.keys,
            self.values,
            self.layout,
        )
    }
}

impl TrialTable {
    /// Create a table, validating shape and label uniqueness.
    pub fn new(
        frames: Option<usize>,
        index_name: Option<String>,
        level_names: Vec<String>,
        keys: Vec<ColumnKey>,
        values: Vec<Vec<f64>>,
        layout: ValueLayout,
    ) -> Result<Self> {
        let (values, inferred) = match layout {
            ValueLayout::Column => {
                let inferred = values.first().map(Vec::len);
                (values, inferred)
            }
            ValueLayout::Row => {
                let width = keys.len();
                for row in &values {
                    if row.len() != width {
                        return Err(KinematicsError::DimensionMismatch {
                            expected: width,
                            got: row.len(),
                        });
                    }
                }
                let rows = values.len();
                let columns = (0..width)
                    .map(|c| values.iter().map(|row| row[c]).collect())
                    .collect();
                (columns, Some(rows))
            }
        };

        if values.len() != keys.len() {
            return Err(KinematicsError::DimensionMismatch {
                expected: keys.len(),
                got: values.len(),
            });
        }

        let frames = frames.or(inferred).unwrap_or(0);

        for column in &values {
            if column.len() != frames {
                return Err(KinematicsError::DimensionMismatch {
                    expected: frames,
                    got: column.len(),
                });
            }
        }

        if let Some(first) = keys.first() {
            let depth = first.depth();
            if keys.iter().any(|k| k.depth() != depth) {
                return Err(KinematicsError::MalformedInput(
                    "column keys have differing header depths".to_string(),
                ));
            }
            if !level_names.is_empty() && level_names.len() != depth {
                return Err(KinematicsError::DimensionMismatch {
                    expected: depth,
                    got: level_names.len(),
                });
            }
        }

        let mut seen = HashSet::with_capacity(keys.len());
        for key in &keys {
            if !seen.insert(key) {
                return Err(KinematicsError::DuplicateColumn(key.label()));
            }
        }

        Ok(Self {
            frames,
            index_name,
            level_names,
            keys,
            values,
        })
    }

    /// Create a flat table from named columns.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let (keys, values): (Vec<_>, Vec<_>) = columns
            .into_iter()
            .map(|(name, v)| (ColumnKey::flat(name), v))
            .unzip();
        Self::new(None, None, vec![], keys, values, ValueLayout::Column)
    }

    /// Number of frames (rows).
    pub fn len(&self) -> usize {
        self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    pub fn n_columns(&self) -> usize {
        self.keys.len()
    }

    /// Header depth shared by all keys; 1 for flat tables and 0 when there are no columns.
    pub fn header_depth(&self) -> usize {
        self.keys.first().map_or(0, ColumnKey::depth)
    }

    pub fn is_flat(&self) -> bool {
        self.header_depth() <= 1
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    pub fn set_index_name(&mut self, name: impl Into<String>) {
        self.index_name = Some(name.into());
    }

    pub fn level_names(&self) -> &[String] {
        &self.level_names
    }

    pub fn keys(&self) -> &[ColumnKey] {
        &self.keys
    }

    /// Replace every column key at once, e.g. when flattening the header.
    ///
    /// Level names are cleared when the new keys are flat.
    pub fn set_keys(&mut self, keys: Vec<ColumnKey>) -> Result<()> {
        if keys.len() != self.keys.len() {
            return Err(KinematicsError::DimensionMismatch {
                expected: self.keys.len(),
                got: keys.len(),
            });
        }
        let mut seen = HashSet::with_capacity(keys.len());
        for key in &keys {
            if !seen.insert(key) {
                return Err(KinematicsError::DuplicateColumn(key.label()));
            }
        }
        if keys.iter().all(|k| k.depth() == 1) {
            self.level_names.clear();
        }
        self.keys = keys;
        Ok(())
    }

    /// Flat labels of every column, in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.keys.iter().map(ColumnKey::label).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.keys.iter().position(|k| k.label() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Values of a column, or `None` when absent.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.position(name).map(|i| self.values[i].as_slice())
    }

    /// Values of a column, failing with `ColumnNotFound` when absent.
    pub fn values(&self, name: &str) -> Result<&[f64]> {
        self.column(name)
            .ok_or_else(|| KinematicsError::ColumnNotFound(name.to_string()))
    }

    /// Mutable values of a column; the length is fixed by the table.
    pub fn column_mut(&mut self, name: &str) -> Option<&mut [f64]> {
        self.position(name)
            .map(move |i| self.values[i].as_mut_slice())
    }

    /// Column values in table order.
    pub fn values_by_column(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Overwrite a column, or append it when absent.
    pub fn set_column(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        if values.len() != self.frames {
            return Err(KinematicsError::DimensionMismatch {
                expected: self.frames,
                got: values.len(),
            });
        }
        match self.position(name) {
            Some(i) => self.values[i] = values,
            None => {
                if self.header_depth() > 1 {
                    return Err(KinematicsError::MalformedInput(format!(
                        "cannot append flat column '{}' to a {}-level header",
                        name,
                        self.header_depth()
                    )));
                }
                self.keys.push(ColumnKey::flat(name));
                self.values.push(values);
            }
        }
        Ok(())
    }

    /// Remove a column and return its values.
    pub fn remove_column(&mut self, name: &str) -> Result<Vec<f64>> {
        let i = self
            .position(name)
            .ok_or_else(|| KinematicsError::ColumnNotFound(name.to_string()))?;
        self.keys.remove(i);
        Ok(self.values.remove(i))
    }

    /// Rename a flat column.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<()> {
        let i = self
            .position(from)
            .ok_or_else(|| KinematicsError::ColumnNotFound(from.to_string()))?;
        if from != to && self.has_column(to) {
            return Err(KinematicsError::DuplicateColumn(to.to_string()));
        }
        self.keys[i] = ColumnKey::flat(to);
        Ok(())
    }

    /// Values of every column at one frame.
    pub fn row(&self, frame: usize) -> Result<Vec<f64>> {
        if frame >= self.frames {
            return Err(KinematicsError::IndexOutOfBounds {
                index: frame,
                size: self.frames,
            });
        }
        Ok(self.values.iter().map(|col| col[frame]).collect())
    }

    /// Check if any cell is NaN or infinite.
    pub fn has_missing_values(&self) -> bool {
        self.values
            .iter()
            .any(|col| col.iter().any(|v| !v.is_finite()))
    }
}
