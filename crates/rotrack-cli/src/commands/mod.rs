//! Subcommand implementations.

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};

use rotrack_core::model::{parse_date, start_of_day, Dossier};
use rotrack_core::parser;

pub mod classify;
pub mod init;
pub mod report;
pub mod timeline;
pub mod trend;
pub mod validate;

/// Output formats for the read-only commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl OutputFormat {
    /// Resolve `--format`, falling back to the configured default.
    pub fn resolve(flag: Option<&str>, default: &str) -> Result<Self> {
        match flag.unwrap_or(default) {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => anyhow::bail!("unknown format '{other}', expected text, json or markdown"),
        }
    }
}

/// Load a dossier, logging where it came from.
pub fn load_dossier(path: &Path) -> Result<Dossier> {
    let dossier = parser::parse_dossier(path)?;
    tracing::info!(
        rotation = %dossier.rotation_name,
        evaluations = dossier.evaluations.len(),
        criteria = dossier.criteria.len(),
        "loaded dossier {}",
        path.display()
    );
    Ok(dossier)
}

/// Resolve `--as-of` to the start of that day, or the current time.
pub fn resolve_as_of(as_of: Option<&str>) -> Result<DateTime<Utc>> {
    match as_of {
        Some(date) => Ok(start_of_day(parse_date(date)?)),
        None => Ok(Utc::now()),
    }
}
