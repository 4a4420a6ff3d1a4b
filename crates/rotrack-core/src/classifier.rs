//! Aggregate performance classification from selected criteria.
//!
//! Precedence is `fail > honors > pass`:
//! 1. at least 30% of fail criteria selected → fail
//! 2. at least 80% of honors criteria selected, with every honors section
//!    represented by a selection → honors
//! 3. otherwise pass
//!
//! Pass criteria never enter the ratios.

use serde::{Deserialize, Serialize};

use crate::model::{Criterion, PerformanceLevel};

/// Minimum selected share of fail criteria, as `numerator / denominator`.
pub const FAIL_RATIO: (usize, usize) = (3, 10);

/// Minimum selected share of honors criteria, as `numerator / denominator`.
pub const HONORS_RATIO: (usize, usize) = (4, 5);

/// The classified level and the counts behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub level: PerformanceLevel,
    pub fail_selected: usize,
    pub fail_total: usize,
    pub honors_selected: usize,
    pub honors_total: usize,
    /// Distinct sections that contain honors criteria, in first-seen order.
    pub honors_sections: Vec<String>,
    /// Honors sections with no selected honors criterion.
    pub uncovered_honors_sections: Vec<String>,
}

impl Classification {
    pub fn fail_ratio(&self) -> Option<f64> {
        ratio(self.fail_selected, self.fail_total)
    }

    pub fn honors_ratio(&self) -> Option<f64> {
        ratio(self.honors_selected, self.honors_total)
    }
}

fn ratio(selected: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| selected as f64 / total as f64)
}

/// `selected / total >= numerator / denominator`, without float rounding.
fn meets(selected: usize, total: usize, (numerator, denominator): (usize, usize)) -> bool {
    total > 0 && selected * denominator >= total * numerator
}

/// Aggregate performance label for a criteria snapshot.
pub fn performance_level(criteria: &[Criterion]) -> PerformanceLevel {
    classify(criteria).level
}

/// Classify a criteria snapshot and report the counts behind the label.
pub fn classify(criteria: &[Criterion]) -> Classification {
    let mut fail_selected = 0;
    let mut fail_total = 0;
    let mut honors_selected = 0;
    let mut honors_total = 0;
    let mut honors_sections: Vec<String> = Vec::new();
    let mut covered: Vec<&str> = Vec::new();

    for c in criteria {
        match c.category {
            PerformanceLevel::Fail => {
                fail_total += 1;
                if c.is_selected {
                    fail_selected += 1;
                }
            }
            PerformanceLevel::Honors => {
                honors_total += 1;
                if !honors_sections.contains(&c.section) {
                    honors_sections.push(c.section.clone());
                }
                if c.is_selected {
                    honors_selected += 1;
                    if !covered.contains(&c.section.as_str()) {
                        covered.push(&c.section);
                    }
                }
            }
            PerformanceLevel::Pass => {}
        }
    }

    let uncovered_honors_sections: Vec<String> = honors_sections
        .iter()
        .filter(|s| !covered.contains(&s.as_str()))
        .cloned()
        .collect();

    let level = if meets(fail_selected, fail_total, FAIL_RATIO) {
        PerformanceLevel::Fail
    } else if meets(honors_selected, honors_total, HONORS_RATIO)
        && uncovered_honors_sections.is_empty()
    {
        PerformanceLevel::Honors
    } else {
        PerformanceLevel::Pass
    };

    Classification {
        level,
        fail_selected,
        fail_total,
        honors_selected,
        honors_total,
        honors_sections,
        uncovered_honors_sections,
    }
}
