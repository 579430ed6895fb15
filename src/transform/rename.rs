//! Flattening of the tracker's three-level column header.

use crate::core::columns::{FRAME_INDEX_NAME, TRACKER_HEADER_DEPTH};
use crate::core::{ColumnKey, TrialTable};
use crate::error::{KinematicsError, Result};

/// Flatten `(scorer, bodypart, coord)` column keys into `<bodypart>_<coord>`.
///
/// The scorer level is dropped and the row index is labelled
/// [`FRAME_INDEX_NAME`]. Values are untouched.
///
/// # Errors
/// `MalformedInput` when any key does not have exactly three levels. The
/// table is left unchanged in that case.
pub fn rename_columns(table: &mut TrialTable) -> Result<()> {
    if let Some(bad) = table
        .keys()
        .iter()
        .find(|k| k.depth() != TRACKER_HEADER_DEPTH)
    {
        return Err(KinematicsError::MalformedInput(format!(
            "column '{}' has {} header levels, expected {}",
            bad,
            bad.depth(),
            TRACKER_HEADER_DEPTH
        )));
    }

    let flat: Vec<ColumnKey> = table
        .keys()
        .iter()
        .map(|k| ColumnKey::flat(k.levels()[1..].join("_")))
        .collect();

    table.set_keys(flat)?;
    table.set_index_name(FRAME_INDEX_NAME);

    tracing::debug!(columns = table.n_columns(), "flattened tracker header");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{TrialTableBuilder, ValueLayout};

    fn tracker_table() -> TrialTable {
        let keys = ["paw1", "paw2"]
            .iter()
            .flat_map(|part| {
                ["x", "y", "likelihood"]
                    .into_iter()
                    .map(move |axis| ColumnKey::multi(["heatmap_tracker", *part, axis]))
            })
            .collect();
        TrialTableBuilder::new()
            .level_names(vec!["scorer".into(), "bodyparts".into(), "coords".into()])
            .keys(keys)
            .values(
                vec![
                    vec![633.45, 326.82, 0.99, 417.58, 328.60, 0.99],
                    vec![633.34, 327.42, 0.99, 418.41, 328.23, 0.98],
                ],
                ValueLayout::Row,
            )
            .build()
            .unwrap()
    }

    #[test]
    fn flattens_three_level_header() {
        let mut table = tracker_table();
        rename_columns(&mut table).unwrap();

        assert_eq!(
            table.column_names(),
            vec![
                "paw1_x",
                "paw1_y",
                "paw1_likelihood",
                "paw2_x",
                "paw2_y",
                "paw2_likelihood"
            ]
        );
        assert_eq!(table.index_name(), Some("bodyparts_coords"));
        assert!(table.level_names().is_empty());
        assert!(table.is_flat());
    }

    #[test]
    fn values_are_unchanged() {
        let original = tracker_table();
        let mut table = original.clone();
        rename_columns(&mut table).unwrap();

        assert_eq!(table.len(), original.len());
        assert_eq!(table.values_by_column(), original.values_by_column());
    }

    #[test]
    fn flat_header_is_rejected() {
        let mut table = TrialTable::from_columns(vec![("paw1_x", vec![1.0])]).unwrap();
        let before = table.clone();
        let err = rename_columns(&mut table).unwrap_err();

        assert!(matches!(err, KinematicsError::MalformedInput(_)));
        assert_eq!(table, before);
    }
}
