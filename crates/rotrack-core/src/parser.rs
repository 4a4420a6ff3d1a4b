//! TOML dossier parser.
//!
//! Loads rotation, enrollment, evaluation and criteria records from TOML
//! files and directories, and validates them.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{
    parse_date, Criterion, Dossier, Enrollment, Evaluation, LevelTag, PerformanceLevel,
    RotationConfig,
};
use crate::schedule::total_periods;

/// Intermediate TOML structure for parsing dossier files.
#[derive(Debug, Deserialize)]
struct TomlDossierFile {
    rotation: TomlRotation,
    enrollment: TomlEnrollment,
    #[serde(default)]
    evaluations: Vec<TomlEvaluation>,
    #[serde(default)]
    criteria: Vec<TomlCriterion>,
}

#[derive(Debug, Deserialize)]
struct TomlRotation {
    name: String,
    duration_weeks: u32,
    #[serde(default)]
    evaluation_interval_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TomlEnrollment {
    #[serde(default)]
    trainee: String,
    start_date: String,
    #[serde(default)]
    end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlEvaluation {
    period_number: u32,
    performance_level: String,
    #[serde(default)]
    is_complete: bool,
    #[serde(default)]
    evaluated_on: Option<String>,
    #[serde(default)]
    evaluator: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlCriterion {
    category: String,
    section: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    selected: bool,
}

/// Parse a single TOML file into a [`Dossier`].
pub fn parse_dossier(path: &Path) -> Result<Dossier> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dossier file: {}", path.display()))?;

    parse_dossier_str(&content, path)
}

/// Parse a TOML string into a [`Dossier`].
pub fn parse_dossier_str(content: &str, source_path: &Path) -> Result<Dossier> {
    let parsed: TomlDossierFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let enrollment = Enrollment {
        trainee: parsed.enrollment.trainee,
        start_date: parse_date(&parsed.enrollment.start_date)?,
        end_date: parsed
            .enrollment
            .end_date
            .as_deref()
            .map(parse_date)
            .transpose()?,
    };

    let evaluations = parsed
        .evaluations
        .into_iter()
        .map(|e| {
            Ok(Evaluation {
                period_number: e.period_number,
                performance_level: LevelTag::from(e.performance_level),
                is_complete: e.is_complete,
                evaluated_on: e.evaluated_on.as_deref().map(parse_date).transpose()?,
                evaluator: e.evaluator,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let criteria = parsed
        .criteria
        .into_iter()
        .map(|c| {
            let category: PerformanceLevel = c
                .category
                .parse()
                .map_err(|e: String| anyhow::anyhow!("{}", e))?;
            Ok(Criterion {
                category,
                section: c.section,
                description: c.description,
                is_selected: c.selected,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Dossier {
        rotation_name: parsed.rotation.name,
        rotation: RotationConfig::new(
            parsed.rotation.duration_weeks,
            parsed.rotation.evaluation_interval_days,
        ),
        enrollment,
        evaluations,
        criteria,
    })
}

/// Recursively load all `.toml` dossier files from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_dossier_directory(dir: &Path) -> Result<Vec<Dossier>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    let mut dossiers = Vec::new();
    for path in paths {
        if path.is_dir() {
            dossiers.extend(load_dossier_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_dossier(&path) {
                Ok(dossier) => dossiers.push(dossier),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(dossiers)
}

/// A warning from dossier validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The record the warning is about (e.g. "evaluation 3"), if any.
    pub subject: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn general(message: impl Into<String>) -> Self {
        Self {
            subject: None,
            message: message.into(),
        }
    }

    fn about(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            message: message.into(),
        }
    }
}

/// Validate a dossier for data-entry problems the engine tolerates silently.
pub fn validate_dossier(dossier: &Dossier) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let rotation = &dossier.rotation;

    if let Err(e) = rotation.validate() {
        warnings.push(ValidationWarning::general(e.to_string()));
    }

    if matches!(rotation.evaluation_interval_days, Some(d) if d <= 0) {
        warnings.push(ValidationWarning::general(
            "evaluation_interval_days is not positive; rotation is treated as a single period",
        ));
    }

    if let Some(end) = dossier.enrollment.end_date {
        if end < dossier.enrollment.start_date {
            warnings.push(ValidationWarning::general(format!(
                "enrollment end date {end} is before start date {}",
                dossier.enrollment.start_date
            )));
        }
    }

    let total = total_periods(rotation);
    let mut complete_per_period: HashMap<u32, usize> = HashMap::new();

    for (i, eval) in dossier.evaluations.iter().enumerate() {
        let subject = format!("evaluation {}", i + 1);

        if eval.period_number == 0 || eval.period_number > total {
            warnings.push(ValidationWarning::about(
                &subject,
                format!(
                    "period {} is outside the rotation (1..={total})",
                    eval.period_number
                ),
            ));
        }

        if let LevelTag::Unrecognized(raw) = &eval.performance_level {
            warnings.push(ValidationWarning::about(
                &subject,
                format!("unrecognized performance level '{raw}' will be scored as PASS"),
            ));
        }

        if eval.is_complete {
            let seen = complete_per_period.entry(eval.period_number).or_default();
            *seen += 1;
            if *seen == 2 {
                warnings.push(ValidationWarning::about(
                    &subject,
                    format!(
                        "period {} has more than one complete evaluation; only the first is used",
                        eval.period_number
                    ),
                ));
            }
        }
    }

    let has = |level: PerformanceLevel| dossier.criteria.iter().any(|c| c.category == level);
    if has(PerformanceLevel::Honors) && !has(PerformanceLevel::Fail) {
        warnings.push(ValidationWarning::general(
            "criteria define honors items but no fail items",
        ));
    }
    if has(PerformanceLevel::Fail) && !has(PerformanceLevel::Honors) {
        warnings.push(ValidationWarning::general(
            "criteria define fail items but no honors items",
        ));
    }

    warnings
}
