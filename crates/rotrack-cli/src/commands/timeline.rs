//! The `rotrack timeline` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use rotrack_core::report::{status_label, ProgressReport};

use super::{load_dossier, resolve_as_of, OutputFormat};

pub fn execute(
    dossier_path: PathBuf,
    as_of: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let dossier = load_dossier(&dossier_path)?;
    let now = resolve_as_of(as_of.as_deref())?;
    let report = ProgressReport::build(&dossier, now);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report.timeline)?);
        }
        OutputFormat::Markdown => {
            println!("{}", report.to_markdown());
        }
        OutputFormat::Text => {
            println!(
                "{} — period {} of {} (as of {})",
                report.rotation_name,
                report.current_period,
                report.total_periods,
                now.format("%Y-%m-%d")
            );

            let mut table = Table::new();
            table.set_header(vec!["Period", "Start", "End", "Status", "Evaluation"]);
            for p in &report.timeline {
                let marker = if p.is_current { " *" } else { "" };
                let evaluation = p
                    .evaluation
                    .as_ref()
                    .map(|e| e.performance_level.to_string())
                    .unwrap_or_else(|| "-".to_string());
                table.add_row(vec![
                    Cell::new(format!("{}{marker}", p.period_number)),
                    Cell::new(p.period_start),
                    Cell::new(p.period_end),
                    Cell::new(status_label(p)),
                    Cell::new(evaluation),
                ]);
            }
            println!("{table}");

            if !report.overdue_periods.is_empty() {
                println!("{} overdue period(s)", report.overdue_periods.len());
            }
        }
    }

    Ok(())
}
