use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::evaluator::RuleResult;

/// Aggregate over one group's rule results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupScore {
    pub score: f64,
    pub max_score: f64,
    /// `score / max_score`, or 0 for a group with nothing to earn.
    pub percent: f64,
}

impl GroupScore {
    pub fn new(score: f64, max_score: f64) -> Self {
        Self {
            score,
            max_score,
            percent: percent(score, max_score),
        }
    }
}

/// Totals across every group of a rule set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub group_scores: BTreeMap<String, GroupScore>,
    pub total_score: f64,
    pub total_max_score: f64,
}

impl ScoreSummary {
    /// Score for a group, zeroed when the group is not part of the result.
    pub fn group(&self, key: &str) -> GroupScore {
        self.group_scores.get(key).copied().unwrap_or_default()
    }

    pub fn percent(&self) -> f64 {
        percent(self.total_score, self.total_max_score)
    }
}

pub fn aggregate_group(rule_results: &[RuleResult]) -> GroupScore {
    let score = total(rule_results.iter().map(|result| result.points_earned));
    let max_score = total(rule_results.iter().map(|result| result.max_points));
    GroupScore::new(score, max_score)
}

pub fn aggregate_all(group_scores: BTreeMap<String, GroupScore>) -> ScoreSummary {
    let total_score = total(group_scores.values().map(|group| group.score));
    let total_max_score = total(group_scores.values().map(|group| group.max_score));

    ScoreSummary {
        group_scores,
        total_score,
        total_max_score,
    }
}

/// Ratio guarded against empty or degenerate denominators.
pub fn percent(score: f64, max_score: f64) -> f64 {
    if max_score > 0.0 && score.is_finite() && max_score.is_finite() {
        score / max_score
    } else {
        0.0
    }
}

/// Sum starting from positive zero so empty inputs serialize as `0.0`.
pub(crate) fn total(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |acc, value| acc + value)
}
