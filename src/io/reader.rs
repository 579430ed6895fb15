//! Delimited-text readers for tracker output and processed tables.
//!
//! Tracker files carry three header rows, each led by its level name:
//!
//! ```text
//! scorer,heatmap_tracker,heatmap_tracker,heatmap_tracker
//! bodyparts,paw1,paw1,paw1
//! coords,x,y,likelihood
//! 0,633.45,326.82,0.99
//! 1,633.34,327.42,0.99
//! ```
//!
//! Processed tables carry a single header row led by the index name. In
//! both forms every body row starts with its frame counter, which must equal
//! the row position. Empty cells read as NaN.

use crate::core::columns::TRACKER_HEADER_DEPTH;
use crate::core::{ColumnKey, TrialTable, TrialTableBuilder, ValueLayout};
use crate::error::{KinematicsError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const DELIMITER: char = ',';

fn split_line(line: &str) -> Vec<&str> {
    line.split(DELIMITER).map(str::trim).collect()
}

fn parse_cell(cell: &str, line_no: usize) -> Result<f64> {
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>().map_err(|_| {
        KinematicsError::MalformedInput(format!(
            "line {}: cannot parse '{}' as a number",
            line_no, cell
        ))
    })
}

/// Read a table whose header spans `header_rows` lines.
fn read_table<R: BufRead>(reader: R, header_rows: usize) -> Result<TrialTable> {
    let lines: Vec<String> = reader
        .lines()
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.len() < header_rows {
        return Err(KinematicsError::MalformedInput(format!(
            "expected {} header rows, found {}",
            header_rows,
            lines.len()
        )));
    }

    let mut level_names = Vec::with_capacity(header_rows);
    let mut levels: Vec<Vec<String>> = Vec::with_capacity(header_rows);
    for (i, line) in lines[..header_rows].iter().enumerate() {
        let cells = split_line(line);
        if let Some(width) = levels.first().map(Vec::len) {
            if cells.len() - 1 != width {
                return Err(KinematicsError::MalformedInput(format!(
                    "line {}: header has {} columns, expected {}",
                    i + 1,
                    cells.len() - 1,
                    width
                )));
            }
        }
        level_names.push(cells[0].to_string());
        levels.push(cells[1..].iter().map(|c| c.to_string()).collect());
    }

    let width = levels.first().map_or(0, Vec::len);
    let keys: Vec<ColumnKey> = (0..width)
        .map(|c| ColumnKey::multi(levels.iter().map(|level| level[c].clone())))
        .collect();

    let mut body = &lines[header_rows..];
    let mut index_name = None;

    if header_rows == 1 {
        index_name = Some(level_names[0].clone()).filter(|n| !n.is_empty());
        level_names.clear();
    } else if let Some(first) = body.first() {
        // Multi-level writers may follow the header with an index-name row.
        let cells = split_line(first);
        if cells[0].parse::<usize>().is_err() && cells[1..].iter().all(|c| c.is_empty()) {
            index_name = Some(cells[0].to_string());
            body = &body[1..];
        }
    }

    let offset = lines.len() - body.len();
    let mut rows = Vec::with_capacity(body.len());
    for (frame, line) in body.iter().enumerate() {
        let line_no = offset + frame + 1;
        let cells = split_line(line);

        let counter = cells[0].parse::<usize>().map_err(|_| {
            KinematicsError::MalformedInput(format!(
                "line {}: frame index '{}' is not an integer",
                line_no, cells[0]
            ))
        })?;
        if counter != frame {
            return Err(KinematicsError::MalformedInput(format!(
                "line {}: frame index {} out of sequence, expected {}",
                line_no, counter, frame
            )));
        }
        if cells.len() - 1 != width {
            return Err(KinematicsError::MalformedInput(format!(
                "line {}: row has {} values, expected {}",
                line_no,
                cells.len() - 1,
                width
            )));
        }

        let row = cells[1..]
            .iter()
            .map(|cell| parse_cell(cell, line_no))
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    let mut builder = TrialTableBuilder::new()
        .frames(rows.len())
        .level_names(level_names)
        .keys(keys)
        .values(rows, ValueLayout::Row);
    if let Some(name) = index_name {
        builder = builder.index_name(name);
    }
    builder.build()
}

/// Read tracker output with a three-level header from any buffered reader.
pub fn read_trial_coordinates_from<R: BufRead>(reader: R) -> Result<TrialTable> {
    let table = read_table(reader, TRACKER_HEADER_DEPTH)?;
    tracing::debug!(
        frames = table.len(),
        columns = table.n_columns(),
        "read tracker coordinates"
    );
    Ok(table)
}

/// Read tracker output with a three-level header from a file.
pub fn read_trial_coordinates(path: impl AsRef<Path>) -> Result<TrialTable> {
    let file = File::open(path.as_ref())?;
    read_trial_coordinates_from(BufReader::new(file))
}

/// Read an already-flattened table (single header row) from any buffered reader.
pub fn read_speed_coordinates_from<R: BufRead>(reader: R) -> Result<TrialTable> {
    let table = read_table(reader, 1)?;
    tracing::debug!(
        frames = table.len(),
        columns = table.n_columns(),
        "read flat table"
    );
    Ok(table)
}

/// Read an already-flattened table (single header row) from a file.
pub fn read_speed_coordinates(path: impl AsRef<Path>) -> Result<TrialTable> {
    let file = File::open(path.as_ref())?;
    read_speed_coordinates_from(BufReader::new(file))
}
