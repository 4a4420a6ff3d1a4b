//! Per-period status timeline.
//!
//! Reconciles the rotation schedule with recorded evaluations. The timeline
//! is rebuilt from scratch on every call.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{start_of_day, Enrollment, Evaluation, RotationConfig};
use crate::schedule::{add_days, current_period, total_periods};

/// One slice of the rotation and the evaluation matched to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStatus {
    /// 1-based period number.
    pub period_number: u32,
    /// First day of the period (inclusive).
    pub period_start: NaiveDate,
    /// First day after the period (exclusive). Equals the next period's start.
    pub period_end: NaiveDate,
    /// The period containing "now".
    pub is_current: bool,
    /// The period has not started yet.
    pub is_future: bool,
    /// A complete evaluation exists for this period.
    pub has_evaluation: bool,
    /// The first complete evaluation recorded for this period.
    pub evaluation: Option<Evaluation>,
}

impl PeriodStatus {
    /// Past period with no complete evaluation.
    pub fn is_overdue(&self) -> bool {
        !self.is_current && !self.is_future && !self.has_evaluation
    }

    /// Current period still waiting for its evaluation.
    pub fn is_due(&self) -> bool {
        self.is_current && !self.has_evaluation
    }

    /// Whether `date` falls inside `[period_start, period_end)`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.period_start <= date && date < self.period_end
    }
}

/// Build the ordered status list for every period of the rotation.
///
/// Produces exactly [`total_periods`] entries numbered from 1. When several
/// complete evaluations share a period number the first one in `evaluations`
/// wins and the rest are ignored.
pub fn period_statuses(
    enrollment: &Enrollment,
    config: &RotationConfig,
    evaluations: &[Evaluation],
    now: DateTime<Utc>,
) -> Vec<PeriodStatus> {
    let start_date = enrollment.start_date;
    let current = current_period(start_date, config, now);
    let total = total_periods(config);
    // Without a cadence the single period spans the whole rotation.
    let span = config.interval_days().unwrap_or_else(|| config.total_days());

    (1..=total)
        .map(|period| {
            let period_start = add_days(start_date, u64::from(period - 1) * span);
            let period_end = add_days(period_start, span);
            let evaluation = evaluations
                .iter()
                .find(|e| e.is_complete && e.period_number == period)
                .cloned();

            PeriodStatus {
                period_number: period,
                period_start,
                period_end,
                is_current: period == current,
                is_future: start_of_day(period_start) > now,
                has_evaluation: evaluation.is_some(),
                evaluation,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LevelTag, PerformanceLevel};
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn enrollment() -> Enrollment {
        Enrollment::new(date(2026, 9, 7))
    }

    #[test]
    fn contiguous_weekly_periods() {
        let config = RotationConfig::new(4, Some(7));
        let now = start_of_day(date(2026, 9, 16));
        let statuses = period_statuses(&enrollment(), &config, &[], now);

        assert_eq!(statuses.len(), 4);
        assert_eq!(statuses[0].period_start, date(2026, 9, 7));
        assert_eq!(statuses[3].period_end, date(2026, 10, 5));
        for pair in statuses.windows(2) {
            assert_eq!(pair[0].period_end, pair[1].period_start);
            assert_eq!(pair[0].period_number + 1, pair[1].period_number);
        }
    }

    #[test]
    fn current_and_future_flags() {
        let config = RotationConfig::new(4, Some(7));
        // day 9 -> period 2
        let now = start_of_day(date(2026, 9, 16));
        let statuses = period_statuses(&enrollment(), &config, &[], now);

        let current: Vec<u32> = statuses
            .iter()
            .filter(|s| s.is_current)
            .map(|s| s.period_number)
            .collect();
        assert_eq!(current, vec![2]);
        assert!(!statuses[0].is_future);
        assert!(!statuses[1].is_future);
        assert!(statuses[2].is_future);
        assert!(statuses[3].is_future);
        assert!(statuses[0].is_overdue());
        assert!(statuses[1].is_due());
    }

    #[test]
    fn period_starting_exactly_now_is_not_future() {
        let config = RotationConfig::new(4, Some(7));
        let now = start_of_day(date(2026, 9, 14));
        let statuses = period_statuses(&enrollment(), &config, &[], now);
        assert!(!statuses[1].is_future);
        assert!(statuses[1].is_current);
    }

    #[test]
    fn matches_only_complete_evaluations_first_wins() {
        let config = RotationConfig::new(3, Some(7));
        let now = start_of_day(date(2026, 9, 30));
        let evaluations = vec![
            Evaluation::draft(1, PerformanceLevel::Fail),
            Evaluation::complete(1, PerformanceLevel::Pass),
            Evaluation::complete(1, PerformanceLevel::Honors),
            Evaluation::draft(2, PerformanceLevel::Pass),
            Evaluation::complete(9, PerformanceLevel::Pass),
        ];
        let statuses = period_statuses(&enrollment(), &config, &evaluations, now);

        assert!(statuses[0].has_evaluation);
        assert_eq!(
            statuses[0].evaluation.as_ref().map(|e| &e.performance_level),
            Some(&LevelTag::Known(PerformanceLevel::Pass))
        );
        assert!(!statuses[1].has_evaluation);
        assert!(statuses[1].evaluation.is_none());
        assert!(!statuses[2].has_evaluation);
    }

    #[test]
    fn single_period_without_interval() {
        let config = RotationConfig::new(6, None);
        let now = start_of_day(date(2026, 8, 1));
        let statuses = period_statuses(&enrollment(), &config, &[], now);

        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].period_start, date(2026, 9, 7));
        assert_eq!(statuses[0].period_end, date(2026, 10, 19));
        assert!(statuses[0].is_current);
        assert!(statuses[0].is_future);
    }

    #[test]
    fn final_partial_period_keeps_cadence() {
        // 14 days in 5-day slices: 3 periods, last one runs past the rotation
        let config = RotationConfig::new(2, Some(5));
        let now = start_of_day(date(2026, 9, 7)) + Duration::days(100);
        let statuses = period_statuses(&enrollment(), &config, &[], now);

        assert_eq!(statuses.len(), 3);
        assert_eq!(statuses[2].period_start, date(2026, 9, 17));
        assert_eq!(statuses[2].period_end, date(2026, 9, 22));
        assert!(statuses[2].is_current);
        assert!(statuses[2].contains(date(2026, 9, 21)));
        assert!(!statuses[2].contains(date(2026, 9, 22)));
    }
}
