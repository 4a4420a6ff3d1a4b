//! Trend classification across periodic evaluations.
//!
//! Complete evaluations are ordered by period, scored `FAIL=0, PASS=1,
//! HONORS=2`, split in half, and the difference of the half averages is
//! compared against a fixed threshold.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Evaluation, LevelTag, PerformanceLevel};

/// Half-average difference that must be exceeded to call a direction.
pub const TREND_THRESHOLD: f64 = 0.25;

/// Score used for tags outside the canonical set.
pub const UNRECOGNIZED_SCORE: u8 = 1;

/// Direction of performance across periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
    InsufficientData,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Improving => write!(f, "improving"),
            Trend::Stable => write!(f, "stable"),
            Trend::Declining => write!(f, "declining"),
            Trend::InsufficientData => write!(f, "insufficient_data"),
        }
    }
}

/// Trend label together with the numbers it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    /// The classified direction.
    pub trend: Trend,
    /// Number of complete evaluations considered.
    pub sample_count: usize,
    /// Mean score of the earlier half. `None` with fewer than two samples.
    pub first_half_average: Option<f64>,
    /// Mean score of the later half (takes the extra item for odd counts).
    pub second_half_average: Option<f64>,
    /// `second_half_average - first_half_average`.
    pub difference: Option<f64>,
}

/// Numeric score of a recorded level tag.
///
/// Unrecognized tags, lowercase variants included, score as a pass.
pub fn level_score(tag: &LevelTag) -> u8 {
    match tag.level() {
        Some(PerformanceLevel::Fail) => 0,
        Some(PerformanceLevel::Pass) => 1,
        Some(PerformanceLevel::Honors) => 2,
        None => {
            tracing::debug!(tag = tag.as_str(), "unrecognized level tag scored as pass");
            UNRECOGNIZED_SCORE
        }
    }
}

/// Classify the direction of change across complete evaluations.
pub fn trend(evaluations: &[Evaluation]) -> Trend {
    analyze_trend(evaluations).trend
}

/// Classify the trend and keep the intermediate averages.
pub fn analyze_trend(evaluations: &[Evaluation]) -> TrendAnalysis {
    let mut complete: Vec<&Evaluation> = evaluations.iter().filter(|e| e.is_complete).collect();
    let n = complete.len();

    if n < 2 {
        return TrendAnalysis {
            trend: Trend::InsufficientData,
            sample_count: n,
            first_half_average: None,
            second_half_average: None,
            difference: None,
        };
    }

    // stable: ties keep encounter order
    complete.sort_by_key(|e| e.period_number);
    let scores: Vec<u8> = complete
        .iter()
        .map(|e| level_score(&e.performance_level))
        .collect();

    let (first, second) = scores.split_at(n / 2);
    let first_avg = average(first);
    let second_avg = average(second);
    let diff = second_avg - first_avg;

    let trend = if diff > TREND_THRESHOLD {
        Trend::Improving
    } else if diff < -TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    };

    TrendAnalysis {
        trend,
        sample_count: n,
        first_half_average: Some(first_avg),
        second_half_average: Some(second_avg),
        difference: Some(diff),
    }
}

fn average(scores: &[u8]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use PerformanceLevel::{Fail, Honors, Pass};

    fn complete_series(levels: &[PerformanceLevel]) -> Vec<Evaluation> {
        levels
            .iter()
            .enumerate()
            .map(|(i, &level)| Evaluation::complete(i as u32 + 1, level))
            .collect()
    }

    #[test]
    fn empty_and_single_are_insufficient() {
        assert_eq!(trend(&[]), Trend::InsufficientData);
        assert_eq!(trend(&complete_series(&[Honors])), Trend::InsufficientData);
    }

    #[test]
    fn drafts_do_not_count() {
        let evaluations = vec![
            Evaluation::complete(1, Fail),
            Evaluation::draft(2, Honors),
            Evaluation::draft(3, Honors),
        ];
        let analysis = analyze_trend(&evaluations);
        assert_eq!(analysis.trend, Trend::InsufficientData);
        assert_eq!(analysis.sample_count, 1);
        assert!(analysis.difference.is_none());
    }

    #[test]
    fn improving_example() {
        let analysis = analyze_trend(&complete_series(&[Fail, Fail, Pass, Honors]));
        assert_eq!(analysis.trend, Trend::Improving);
        assert_eq!(analysis.first_half_average, Some(0.0));
        assert_eq!(analysis.second_half_average, Some(1.5));
        assert_eq!(analysis.difference, Some(1.5));
    }

    #[test]
    fn declining_pair() {
        assert_eq!(trend(&complete_series(&[Honors, Pass])), Trend::Declining);
    }

    #[test]
    fn unordered_input_is_sorted_by_period() {
        let evaluations = vec![
            Evaluation::complete(4, Honors),
            Evaluation::complete(1, Fail),
            Evaluation::complete(3, Honors),
            Evaluation::complete(2, Fail),
        ];
        assert_eq!(trend(&evaluations), Trend::Improving);
    }

    #[test]
    fn odd_count_extra_item_goes_to_second_half() {
        // first half [F], second half [P, P]
        let analysis = analyze_trend(&complete_series(&[Fail, Pass, Pass]));
        assert_eq!(analysis.first_half_average, Some(0.0));
        assert_eq!(analysis.second_half_average, Some(1.0));
        assert_eq!(analysis.trend, Trend::Improving);
    }

    #[test]
    fn exact_positive_threshold_is_stable() {
        let analysis = analyze_trend(&complete_series(&[
            Pass, Pass, Pass, Pass, Pass, Pass, Pass, Honors,
        ]));
        assert_eq!(analysis.difference, Some(0.25));
        assert_eq!(analysis.trend, Trend::Stable);
    }

    #[test]
    fn exact_negative_threshold_is_stable() {
        let analysis = analyze_trend(&complete_series(&[
            Honors, Pass, Pass, Pass, Pass, Pass, Pass, Pass,
        ]));
        assert_eq!(analysis.difference, Some(-0.25));
        assert_eq!(analysis.trend, Trend::Stable);
    }

    #[test]
    fn unrecognized_tags_score_as_pass() {
        assert_eq!(level_score(&LevelTag::from("honors")), 1);
        assert_eq!(level_score(&LevelTag::from("Excellent")), 1);
        assert_eq!(level_score(&LevelTag::from("HONORS")), 2);

        // lowercase "honors" collapses to pass, so no improvement is seen
        let evaluations = vec![
            Evaluation::complete(1, Pass),
            Evaluation::complete(2, "honors"),
        ];
        assert_eq!(trend(&evaluations), Trend::Stable);
    }

    #[test]
    fn duplicate_periods_keep_encounter_order() {
        let evaluations = vec![
            Evaluation::complete(1, Honors),
            Evaluation::complete(1, Fail),
        ];
        // [H, F] -> 0 - 2
        assert_eq!(trend(&evaluations), Trend::Declining);

        let swapped = vec![
            Evaluation::complete(1, Fail),
            Evaluation::complete(1, Honors),
        ];
        assert_eq!(trend(&swapped), Trend::Improving);
    }

    #[test]
    fn label_strings() {
        assert_eq!(Trend::InsufficientData.to_string(), "insufficient_data");
        assert_eq!(
            serde_json::to_string(&Trend::InsufficientData).unwrap(),
            "\"insufficient_data\""
        );
    }
}
