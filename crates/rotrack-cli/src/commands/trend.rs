//! The `rotrack trend` command.

use std::path::PathBuf;

use anyhow::Result;

use rotrack_core::trend::analyze_trend;

use super::{load_dossier, OutputFormat};

pub fn execute(dossier_path: PathBuf, format: OutputFormat) -> Result<()> {
    let dossier = load_dossier(&dossier_path)?;
    let analysis = analyze_trend(&dossier.evaluations);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        OutputFormat::Text | OutputFormat::Markdown => {
            println!("Trend: {}", analysis.trend);
            println!("Complete evaluations: {}", analysis.sample_count);
            if let (Some(first), Some(second), Some(diff)) = (
                analysis.first_half_average,
                analysis.second_half_average,
                analysis.difference,
            ) {
                println!("Earlier half average: {first:.2}");
                println!("Later half average: {second:.2}");
                println!("Difference: {diff:+.2}");
            }
        }
    }

    Ok(())
}
