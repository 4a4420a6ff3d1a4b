//! Evaluation period arithmetic.
//!
//! A rotation of `duration_weeks` is sliced into periods of
//! `evaluation_interval_days`. A final partial slice still counts as a period.

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::model::{start_of_day, RotationConfig};

/// Number of evaluation periods in a rotation. Always at least 1.
///
/// `ceil(duration_weeks * 7 / interval)`, or 1 when the interval is absent
/// or non-positive.
pub fn total_periods(config: &RotationConfig) -> u32 {
    let Some(interval) = config.interval_days() else {
        return 1;
    };
    let periods = config.total_days().div_ceil(interval).max(1);
    u32::try_from(periods).unwrap_or(u32::MAX)
}

/// The 1-based period that contains `now`, clamped into `[1, total_periods]`.
///
/// Day 0 of a period belongs to that period. A start date in the future
/// reports period 1; a rotation that has fully elapsed reports its last period.
pub fn current_period(start_date: NaiveDate, config: &RotationConfig, now: DateTime<Utc>) -> u32 {
    let Some(interval) = config.interval_days() else {
        return 1;
    };

    let start = start_of_day(start_date);
    if now < start {
        return 1;
    }

    let days_elapsed = (now - start).num_days() as u64;
    let period = days_elapsed / interval + 1;
    let total = u64::from(total_periods(config));
    if period > total {
        tracing::debug!(
            days_elapsed,
            period,
            total,
            "rotation elapsed, clamping to last period"
        );
    }
    u32::try_from(period.min(total)).unwrap_or(u32::MAX)
}

/// `date + days`, saturating at the last representable date.
pub(crate) fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}
