//! Summary command for exported result files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;
use wind_eval::{GradeSummary, GradedRow, Scale};

pub fn run(input: PathBuf, json: bool) -> Result<()> {
    debug!(input = %input.display(), "reading result file");

    let rows = GradedRow::from_path(&input)
        .with_context(|| format!("Failed to read results from {}", input.display()))?;

    // Counts come from the file as written, not from re-rating the points.
    let summary = GradeSummary::from_grades(rows.iter().map(|r| (r.grades, r.verdict)));

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Total points: {}", summary.total);
    println!("  위험: {}", summary.hazardous);
    println!("  양호: {}", summary.acceptable);
    println!();

    println!("{:<10} {:>6} {:>8}", "Scale", "Grade", "Points");
    println!("{:-<26}", "");
    for scale in Scale::all() {
        let Some(counts) = summary.scales.get(scale) else {
            continue;
        };
        for (label, count) in &counts.grades {
            println!("{:<10} {:>6} {:>8}", scale.name(), label, count);
        }
        if counts.unclassified > 0 {
            println!("{:<10} {:>6} {:>8}", scale.name(), "-", counts.unclassified);
        }
    }

    let hazardous: Vec<&str> = rows
        .iter()
        .filter(|r| r.verdict.is_hazardous())
        .map(|r| r.site.as_str())
        .collect();
    if !hazardous.is_empty() {
        println!();
        println!("Hazardous points: {}", hazardous.join(", "));
    }

    Ok(())
}
