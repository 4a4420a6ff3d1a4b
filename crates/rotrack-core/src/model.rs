//! Core data model types for rotrack.
//!
//! These are the snapshots a caller hands to the engine: the rotation's
//! cadence, the enrollment that anchors period 1, recorded evaluations and
//! the selectable criteria the performance classifier reads.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// A rotation's fixed duration and evaluation cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Length of the rotation in weeks.
    pub duration_weeks: u32,
    /// Days between evaluations. Absent or non-positive means one undivided period.
    #[serde(default)]
    pub evaluation_interval_days: Option<i64>,
}

impl RotationConfig {
    pub fn new(duration_weeks: u32, evaluation_interval_days: Option<i64>) -> Self {
        Self {
            duration_weeks,
            evaluation_interval_days,
        }
    }

    /// The evaluation interval, if it actually divides the rotation.
    pub fn interval_days(&self) -> Option<u64> {
        self.evaluation_interval_days
            .filter(|&d| d > 0)
            .map(|d| d as u64)
    }

    /// Total length of the rotation in days.
    pub fn total_days(&self) -> u64 {
        u64::from(self.duration_weeks) * 7
    }

    /// Check the caller contract the engine itself does not enforce.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.duration_weeks == 0 {
            return Err(EngineError::InvalidRotation(
                "duration_weeks must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Binding of a trainee to one rotation instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Trainee display name.
    #[serde(default)]
    pub trainee: String,
    /// First day of period 1.
    pub start_date: NaiveDate,
    /// Optional scheduled end of the enrollment.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Enrollment {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            trainee: String::new(),
            start_date,
            end_date: None,
        }
    }
}

/// Aggregate performance level, shared by criteria, evaluations and the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceLevel {
    Fail,
    Pass,
    Honors,
}

impl PerformanceLevel {
    pub const ALL: [PerformanceLevel; 3] = [
        PerformanceLevel::Fail,
        PerformanceLevel::Pass,
        PerformanceLevel::Honors,
    ];

    /// The stored evaluation tag (`FAIL`, `PASS`, `HONORS`).
    pub fn tag(self) -> &'static str {
        match self {
            PerformanceLevel::Fail => "FAIL",
            PerformanceLevel::Pass => "PASS",
            PerformanceLevel::Honors => "HONORS",
        }
    }

    /// Match a stored evaluation tag exactly. Case variants do not match.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "FAIL" => Some(PerformanceLevel::Fail),
            "PASS" => Some(PerformanceLevel::Pass),
            "HONORS" => Some(PerformanceLevel::Honors),
            _ => None,
        }
    }
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceLevel::Fail => write!(f, "fail"),
            PerformanceLevel::Pass => write!(f, "pass"),
            PerformanceLevel::Honors => write!(f, "honors"),
        }
    }
}

impl FromStr for PerformanceLevel {
    type Err = String;

    /// Accepts only the canonical lowercase labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail" => Ok(PerformanceLevel::Fail),
            "pass" => Ok(PerformanceLevel::Pass),
            "honors" => Ok(PerformanceLevel::Honors),
            other => Err(format!(
                "unknown performance level '{other}', expected fail, pass or honors"
            )),
        }
    }
}

/// The level tag recorded on an evaluation.
///
/// Legacy records may carry tags outside the canonical `FAIL`/`PASS`/`HONORS`
/// set (lowercase variants included). They are kept verbatim so validation can
/// report them and so they serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LevelTag {
    Known(PerformanceLevel),
    Unrecognized(String),
}

impl LevelTag {
    pub fn level(&self) -> Option<PerformanceLevel> {
        match self {
            LevelTag::Known(level) => Some(*level),
            LevelTag::Unrecognized(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LevelTag::Known(level) => level.tag(),
            LevelTag::Unrecognized(raw) => raw,
        }
    }
}

impl From<PerformanceLevel> for LevelTag {
    fn from(level: PerformanceLevel) -> Self {
        LevelTag::Known(level)
    }
}

impl From<String> for LevelTag {
    fn from(raw: String) -> Self {
        match PerformanceLevel::from_tag(&raw) {
            Some(level) => LevelTag::Known(level),
            None => LevelTag::Unrecognized(raw),
        }
    }
}

impl From<&str> for LevelTag {
    fn from(raw: &str) -> Self {
        LevelTag::from(raw.to_string())
    }
}

impl From<LevelTag> for String {
    fn from(tag: LevelTag) -> Self {
        match tag {
            LevelTag::Known(level) => level.tag().to_string(),
            LevelTag::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for LevelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded periodic evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// 1-based period this evaluation covers.
    pub period_number: u32,
    /// Recorded level tag.
    pub performance_level: LevelTag,
    /// Only complete evaluations count toward trend and timeline matching.
    #[serde(default)]
    pub is_complete: bool,
    /// Date the evaluation was filed.
    #[serde(default)]
    pub evaluated_on: Option<NaiveDate>,
    /// Name of the evaluator.
    #[serde(default)]
    pub evaluator: Option<String>,
}

impl Evaluation {
    /// A complete evaluation with the given level.
    pub fn complete(period_number: u32, level: impl Into<LevelTag>) -> Self {
        Self {
            period_number,
            performance_level: level.into(),
            is_complete: true,
            evaluated_on: None,
            evaluator: None,
        }
    }

    /// A draft (incomplete) evaluation with the given level.
    pub fn draft(period_number: u32, level: impl Into<LevelTag>) -> Self {
        Self {
            is_complete: false,
            ..Self::complete(period_number, level)
        }
    }
}

/// A single selectable evaluation statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    /// Which threshold this criterion counts toward.
    pub category: PerformanceLevel,
    /// Grouping label (e.g. "Clinical reasoning").
    pub section: String,
    /// The statement shown to the evaluator.
    #[serde(default)]
    pub description: String,
    /// Whether the evaluator has ticked this criterion.
    #[serde(default, alias = "selected")]
    pub is_selected: bool,
}

impl Criterion {
    pub fn new(category: PerformanceLevel, section: impl Into<String>, is_selected: bool) -> Self {
        Self {
            category,
            section: section.into(),
            description: String::new(),
            is_selected,
        }
    }
}

/// Everything recorded for one trainee on one rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dossier {
    /// Rotation display name (e.g. "Internal Medicine").
    pub rotation_name: String,
    pub rotation: RotationConfig,
    pub enrollment: Enrollment,
    #[serde(default)]
    pub evaluations: Vec<Evaluation>,
    #[serde(default)]
    pub criteria: Vec<Criterion>,
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| EngineError::InvalidDate(s.to_string()))
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
