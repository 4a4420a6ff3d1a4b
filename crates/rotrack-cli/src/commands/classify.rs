//! The `rotrack classify` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use rotrack_core::session::EvaluationSession;

use super::{load_dossier, OutputFormat};

/// Parse a comma-separated list of 1-based criterion numbers into indices.
fn parse_indices(list: Option<&str>) -> Result<Vec<usize>> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };
    list.split(',')
        .map(|s| {
            let n: usize = s
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid criterion number: '{}'", s.trim()))?;
            anyhow::ensure!(n >= 1, "criterion numbers start at 1");
            Ok(n - 1)
        })
        .collect()
}

pub fn execute(
    dossier_path: PathBuf,
    select: Option<String>,
    deselect: Option<String>,
    reset: bool,
    format: OutputFormat,
) -> Result<()> {
    let dossier = load_dossier(&dossier_path)?;
    let mut session = EvaluationSession::new(dossier.criteria);

    // A fresh sitting starts from a cleared session before any toggles apply.
    if reset {
        session.reset();
    }
    for index in parse_indices(select.as_deref())? {
        session.select(index)?;
    }
    for index in parse_indices(deselect.as_deref())? {
        session.deselect(index)?;
    }

    let classification = session.classification();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&classification)?);
        }
        OutputFormat::Text | OutputFormat::Markdown => {
            let mut table = Table::new();
            table.set_header(vec!["#", "Category", "Section", "Selected", "Criterion"]);
            for (i, c) in session.criteria().iter().enumerate() {
                table.add_row(vec![
                    Cell::new(i + 1),
                    Cell::new(c.category),
                    Cell::new(&c.section),
                    Cell::new(if c.is_selected { "x" } else { "" }),
                    Cell::new(&c.description),
                ]);
            }
            println!("{table}");

            println!(
                "Fail criteria selected: {}/{}",
                classification.fail_selected, classification.fail_total
            );
            println!(
                "Honors criteria selected: {}/{}",
                classification.honors_selected, classification.honors_total
            );
            if !classification.uncovered_honors_sections.is_empty() {
                println!(
                    "Honors sections without a selection: {}",
                    classification.uncovered_honors_sections.join(", ")
                );
            }
            println!("Performance: {}", classification.level);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_one_based() {
        assert_eq!(parse_indices(Some("1, 3,10")).unwrap(), vec![0, 2, 9]);
        assert!(parse_indices(None).unwrap().is_empty());
        assert!(parse_indices(Some("0")).is_err());
        assert!(parse_indices(Some("two")).is_err());
    }
}
