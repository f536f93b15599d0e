//! Survey evaluation command.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};
use wind_eval::{Assessment, AssessmentConfig, AugmentedTable, LawsonPolicy};

pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    chart: Option<PathBuf>,
    json: Option<PathBuf>,
    lawson_policy: &str,
) -> Result<()> {
    let Some(policy) = LawsonPolicy::from_str_loose(lawson_policy) else {
        bail!(
            "Unknown Lawson policy '{}' (expected binned or conditional)",
            lawson_policy
        );
    };

    let config = AssessmentConfig::builder().lawson_policy(policy).build();
    let assessment = Assessment::new(config).context("Band tables failed validation")?;

    debug!(input = %input.display(), "evaluating survey");
    let table = assessment
        .evaluate_path(&input)
        .with_context(|| format!("Failed to evaluate {}", input.display()))?;

    print_table(&table);
    println!();

    let summary = table.summary();
    println!(
        "Points: {}  위험: {}  양호: {}  (Lawson policy: {})",
        summary.total,
        summary.hazardous,
        summary.acceptable,
        policy.name()
    );

    if let Some(path) = output {
        table
            .save_csv(&path)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
        info!(path = %path.display(), "result CSV saved");
        println!("Saved to: {}", path.display());
    }

    if let Some(path) = chart {
        let svg = assessment.render_nomogram(&table);
        std::fs::write(&path, svg)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
        info!(path = %path.display(), "nomogram saved");
        println!("Nomogram: {}", path.display());
    }

    if let Some(path) = json {
        table
            .save_json(&path)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
        info!(path = %path.display(), "JSON report saved");
        println!("Report: {}", path.display());
    }

    Ok(())
}

/// Prints the augmented table as an aligned grid.
fn print_table(table: &AugmentedTable) {
    let headers = table.output_headers();
    let rows = table.output_rows();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |cells: &[&str]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<w$}", c, w = *w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    println!("{}", render(header_refs.as_slice()));
    let rule = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    println!("{:-<rule$}", "", rule = rule);
    for row in &rows {
        println!("{}", render(row.as_slice()));
    }
}
