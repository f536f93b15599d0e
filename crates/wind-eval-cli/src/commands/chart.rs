//! Nomogram chart command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use wind_eval::{Assessment, AssessmentConfig, NomogramConfig};

pub fn run(input: PathBuf, output: PathBuf, title: String) -> Result<()> {
    let config = AssessmentConfig::builder()
        .nomogram(NomogramConfig::new(title))
        .build();
    let assessment = Assessment::new(config).context("Band tables failed validation")?;

    let table = assessment
        .evaluate_path(&input)
        .with_context(|| format!("Failed to read survey from {}", input.display()))?;

    let geometry = assessment.nomogram(&table);
    info!(
        points = table.len(),
        markers = geometry.markers.len(),
        "nomogram computed"
    );

    let svg = wind_eval::nomogram::render_svg(&geometry, &assessment.config().nomogram);
    std::fs::write(&output, svg)
        .with_context(|| format!("Failed to write to {}", output.display()))?;
    println!("Nomogram: {}", output.display());

    Ok(())
}
