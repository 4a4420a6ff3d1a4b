//! The `rotrack report` command.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use rotrack_core::report::ProgressReport;

use super::{load_dossier, resolve_as_of};

/// Lowercase, dash-separated form of a name for use in file names.
fn slug(name: &str) -> String {
    let slug: Vec<String> = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect();
    if slug.is_empty() {
        "trainee".to_string()
    } else {
        slug.join("-")
    }
}

/// Where one requested report rendering goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    /// Markdown on stdout, nothing written.
    Text,
    Json,
    Markdown,
}

/// Expand a `--format` value into the renderings to produce.
///
/// Every entry is checked before anything is built or written.
fn parse_formats(format: &str) -> Result<Vec<ReportFormat>> {
    let mut formats = Vec::new();
    for fmt in format.split(',').map(str::trim) {
        match fmt {
            "all" => formats.extend([ReportFormat::Json, ReportFormat::Markdown]),
            "text" => formats.push(ReportFormat::Text),
            "json" => formats.push(ReportFormat::Json),
            "markdown" | "md" => formats.push(ReportFormat::Markdown),
            other => bail!("unknown format '{other}', expected text, json, markdown or all"),
        }
    }
    formats.dedup();
    Ok(formats)
}

pub fn execute(
    dossier_path: PathBuf,
    as_of: Option<String>,
    format: String,
    output: PathBuf,
) -> Result<()> {
    let formats = parse_formats(&format)?;
    let dossier = load_dossier(&dossier_path)?;
    let now = resolve_as_of(as_of.as_deref())?;
    let report = ProgressReport::build(&dossier, now);

    let stem = format!("report-{}-{}", slug(&report.trainee), now.format("%Y-%m-%d"));
    if formats.iter().any(|f| *f != ReportFormat::Text) {
        std::fs::create_dir_all(&output)
            .with_context(|| format!("failed to create {}", output.display()))?;
    }

    for fmt in &formats {
        match fmt {
            ReportFormat::Text => print!("{}", report.to_markdown()),
            ReportFormat::Json => {
                let path = output.join(format!("{stem}.json"));
                report.save_json(&path)?;
                eprintln!("JSON report: {}", path.display());
            }
            ReportFormat::Markdown => {
                let path = output.join(format!("{stem}.md"));
                std::fs::write(&path, report.to_markdown())
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!("Markdown report: {}", path.display());
            }
        }
    }

    println!(
        "Period {} of {} · trend {} · performance {}",
        report.current_period, report.total_periods, report.trend.trend, report.classification.level
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_names() {
        assert_eq!(slug("R. Okafor"), "r-okafor");
        assert_eq!(slug("  "), "trainee");
        assert_eq!(slug("Ana María"), "ana-mar-a");
    }
    #[test]
    fn formats_expand_and_validate() {
        assert_eq!(
            parse_formats("all").unwrap(),
            vec![ReportFormat::Json, ReportFormat::Markdown]
        );
        assert_eq!(
            parse_formats("md, text").unwrap(),
            vec![ReportFormat::Markdown, ReportFormat::Text]
        );
        let err = parse_formats("json,markdwon").unwrap_err();
        assert!(err.to_string().contains("unknown format 'markdwon'"));
    }
}
