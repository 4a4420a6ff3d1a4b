//! Progress report assembly with JSON persistence and markdown export.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::{classify, Classification};
use crate::model::{Dossier, RotationConfig};
use crate::schedule::{current_period, total_periods};
use crate::timeline::{period_statuses, PeriodStatus};
use crate::trend::{analyze_trend, TrendAnalysis};

/// A snapshot of one trainee's progress through a rotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The "now" every period flag was computed against.
    pub as_of: DateTime<Utc>,
    pub trainee: String,
    pub rotation_name: String,
    pub rotation: RotationConfig,
    pub total_periods: u32,
    pub current_period: u32,
    /// Number of complete evaluations on record.
    pub completed_evaluations: usize,
    /// Past periods with no complete evaluation.
    pub overdue_periods: Vec<u32>,
    pub timeline: Vec<PeriodStatus>,
    pub trend: TrendAnalysis,
    pub classification: Classification,
}

impl ProgressReport {
    /// Run every engine component over the dossier as of `now`.
    pub fn build(dossier: &Dossier, now: DateTime<Utc>) -> Self {
        let rotation = dossier.rotation;
        let timeline = period_statuses(&dossier.enrollment, &rotation, &dossier.evaluations, now);
        let overdue_periods = timeline
            .iter()
            .filter(|p| p.is_overdue())
            .map(|p| p.period_number)
            .collect();

        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            as_of: now,
            trainee: dossier.enrollment.trainee.clone(),
            rotation_name: dossier.rotation_name.clone(),
            rotation,
            total_periods: total_periods(&rotation),
            current_period: current_period(dossier.enrollment.start_date, &rotation, now),
            completed_evaluations: dossier.evaluations.iter().filter(|e| e.is_complete).count(),
            overdue_periods,
            timeline,
            trend: analyze_trend(&dossier.evaluations),
            classification: classify(&dossier.criteria),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ProgressReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        let trainee = if self.trainee.is_empty() {
            "Unnamed trainee"
        } else {
            self.trainee.as_str()
        };
        md.push_str(&format!("## {} — {}\n\n", trainee, self.rotation_name));
        md.push_str(&format!(
            "**As of:** {} · **Period:** {} of {} · **Trend:** {} · **Performance:** {}\n\n",
            self.as_of.format("%Y-%m-%d"),
            self.current_period,
            self.total_periods,
            self.trend.trend,
            self.classification.level
        ));

        md.push_str("| Period | Start | End | Status | Evaluation |\n");
        md.push_str("|--------|-------|-----|--------|------------|\n");
        for p in &self.timeline {
            let evaluation = p
                .evaluation
                .as_ref()
                .map(|e| e.performance_level.to_string())
                .unwrap_or_else(|| "-".to_string());
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                p.period_number,
                p.period_start,
                p.period_end,
                status_label(p),
                evaluation
            ));
        }

        if !self.overdue_periods.is_empty() {
            let list: Vec<String> = self.overdue_periods.iter().map(u32::to_string).collect();
            md.push_str(&format!("\n**Overdue periods:** {}\n", list.join(", ")));
        }

        if !self.classification.uncovered_honors_sections.is_empty() {
            md.push_str(&format!(
                "\n**Honors sections without a selection:** {}\n",
                self.classification.uncovered_honors_sections.join(", ")
            ));
        }

        md
    }
}

/// Short status word for a timeline row.
pub fn status_label(period: &PeriodStatus) -> &'static str {
    if period.has_evaluation {
        "evaluated"
    } else if period.is_current {
        "due"
    } else if period.is_future {
        "upcoming"
    } else {
        "overdue"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{start_of_day, Criterion, Enrollment, Evaluation, PerformanceLevel};
    use crate::trend::Trend;
    use chrono::{Duration, NaiveDate};

    fn make_dossier() -> Dossier {
        Dossier {
            rotation_name: "Family Medicine".into(),
            rotation: RotationConfig::new(6, Some(14)),
            enrollment: Enrollment {
                trainee: "J. Moreau".into(),
                start_date: NaiveDate::from_ymd_opt(2026, 9, 7).unwrap(),
                end_date: None,
            },
            evaluations: vec![
                Evaluation::complete(1, PerformanceLevel::Fail),
                Evaluation::complete(3, PerformanceLevel::Honors),
            ],
            criteria: vec![
                Criterion::new(PerformanceLevel::Honors, "Notes", true),
                Criterion::new(PerformanceLevel::Honors, "Presentation", false),
            ],
        }
    }

    fn as_of() -> DateTime<Utc> {
        // day 30 -> period 3
        start_of_day(NaiveDate::from_ymd_opt(2026, 9, 7).unwrap()) + Duration::days(30)
    }

    #[test]
    fn build_composes_engine_outputs() {
        let report = ProgressReport::build(&make_dossier(), as_of());
        assert_eq!(report.total_periods, 3);
        assert_eq!(report.current_period, 3);
        assert_eq!(report.completed_evaluations, 2);
        assert_eq!(report.overdue_periods, vec![2]);
        assert_eq!(report.timeline.len(), 3);
        assert_eq!(report.trend.trend, Trend::Improving);
        assert_eq!(report.classification.level, PerformanceLevel::Pass);
        assert_eq!(
            report.classification.uncovered_honors_sections,
            vec!["Presentation".to_string()]
        );
    }

    #[test]
    fn json_roundtrip() {
        let report = ProgressReport::build(&make_dossier(), as_of());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/progress.json");

        report.save_json(&path).unwrap();
        let loaded = ProgressReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.timeline, report.timeline);
        assert_eq!(loaded.trend.trend, Trend::Improving);
    }

    #[test]
    fn json_labels_are_plain_strings() {
        let report = ProgressReport::build(&make_dossier(), as_of());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["trend"]["trend"], "improving");
        assert_eq!(value["classification"]["level"], "pass");
        assert_eq!(value["timeline"][0]["evaluation"]["performance_level"], "FAIL");
    }

    #[test]
    fn markdown_output() {
        let report = ProgressReport::build(&make_dossier(), as_of());
        let md = report.to_markdown();
        assert!(md.contains("J. Moreau — Family Medicine"));
        assert!(md.contains("**Period:** 3 of 3"));
        assert!(md.contains("**Trend:** improving"));
        assert!(md.contains("| 2 | 2026-09-21 | 2026-10-05 | overdue | - |"));
        assert!(md.contains("| 3 | 2026-10-05 | 2026-10-19 | evaluated | HONORS |"));
        assert!(md.contains("**Overdue periods:** 2"));
        assert!(md.contains("Presentation"));
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ProgressReport::load_json(&dir.path().join("missing.json")).is_err());
    }
}
