//! Delimited-text writer, the inverse of the readers in [`crate::io::reader`].

use crate::core::TrialTable;
use crate::error::{KinematicsError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn format_cell(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

fn check_label(label: &str) -> Result<()> {
    if label.contains(',') || label.contains('\n') {
        return Err(KinematicsError::MalformedInput(format!(
            "label '{}' contains a delimiter",
            label
        )));
    }
    Ok(())
}

/// Serialize a table: header row(s), then one line per frame led by its index.
///
/// Flat tables get a single header row led by the index name. Multi-level
/// tables get one row per level led by the level name, followed by an
/// index-name row when the index is named. NaN is written as an empty cell
/// and numbers in their shortest round-trip form.
pub fn write_table_to<W: Write>(table: &TrialTable, mut writer: W) -> Result<()> {
    let depth = table.header_depth().max(1);
    let index_name = table.index_name().unwrap_or("");
    check_label(index_name)?;

    if depth == 1 {
        let mut header = vec![index_name.to_string()];
        for name in table.column_names() {
            check_label(&name)?;
            header.push(name);
        }
        writeln!(writer, "{}", header.join(","))?;
    } else {
        for level in 0..depth {
            let level_name = table.level_names().get(level).map_or("", String::as_str);
            check_label(level_name)?;
            let mut header = vec![level_name.to_string()];
            for key in table.keys() {
                check_label(&key.levels()[level])?;
                header.push(key.levels()[level].clone());
            }
            writeln!(writer, "{}", header.join(","))?;
        }
        if !index_name.is_empty() {
            writeln!(writer, "{}{}", index_name, ",".repeat(table.n_columns()))?;
        }
    }

    let columns = table.values_by_column();
    for frame in 0..table.len() {
        let mut line = frame.to_string();
        for column in columns {
            line.push(',');
            line.push_str(&format_cell(column[frame]));
        }
        writeln!(writer, "{}", line)?;
    }

    writer.flush()?;
    Ok(())
}

/// Serialize a table to a file, replacing any existing file.
pub fn write_table(table: &TrialTable, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_table_to(table, BufWriter::new(file))?;
    tracing::debug!(
        path = %path.as_ref().display(),
        frames = table.len(),
        columns = table.n_columns(),
        "wrote table"
    );
    Ok(())
}
