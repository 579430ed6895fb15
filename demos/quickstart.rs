//! Quickstart example: process one small in-memory trial.
//!
//! Run with: cargo run --example quickstart

use trial_kinematics::core::{ColumnKey, TrialTableBuilder, ValueLayout};
use trial_kinematics::prelude::*;

fn main() -> Result<()> {
    println!("=== trial-kinematics Quickstart ===\n");

    // 1. Build a table shaped like tracker output: (scorer, bodyparts, coords)
    let keys = ["paw1", "nose"]
        .iter()
        .flat_map(|part| {
            ["x", "y", "likelihood"]
                .into_iter()
                .map(move |coord| ColumnKey::multi(["heatmap_tracker", *part, coord]))
        })
        .collect();

    let rows: Vec<Vec<f64>> = (0..40)
        .map(|i| {
            let t = i as f64 / 19.0;
            vec![
                633.0 + 40.0 * (2.0 * t).sin(), // paw1 swings
                326.0 + 15.0 * (2.0 * t).cos(),
                0.99,
                410.0 + 2.0 * t, // nose drifts slowly
                300.0,
                0.97,
            ]
        })
        .collect();

    let mut table = TrialTableBuilder::new()
        .level_names(vec!["scorer".into(), "bodyparts".into(), "coords".into()])
        .keys(keys)
        .values(rows, ValueLayout::Row)
        .build()?;
    println!("Trial with {} frames, {} columns", table.len(), table.n_columns());

    // 2. Run every stage at 19 fps with a 0.5 s decay constant
    let config = PipelineConfig::new(19.0).with_tau(0.5).keep_intermediate();
    let report = Pipeline::new(config)?.run(&mut table)?;

    println!("\n--- Pipeline report ---");
    println!("Header flattened: {}", report.renamed);
    println!("Body parts: {:?}", report.speed.processed);
    println!("Skipped: {:?}", report.speed.skipped);

    // 3. Inspect the results
    for part in &report.speed.processed {
        let raw = table.values(&format!("{}_speed (raw)", part))?;
        let normalized = table.values(&format!("{}_speed (normalized)", part))?;
        let peak = normalized
            .iter()
            .position(|&v| v == 1.0)
            .unwrap_or_default();
        println!(
            "{:>5}: raw speed at frame 1 = {:.2} px/s, normalized peak at frame {}",
            part, raw[1], peak
        );
    }

    println!("\nColumns: {:?}", table.column_names());
    Ok(())
}
