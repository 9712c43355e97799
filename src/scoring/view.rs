use serde::Serialize;

use super::builder::ScoringModule;
use super::domain::OrgId;
use super::evaluator::RuleResult;
use super::rules::CategoryRuleSet;

/// Breakdown of an organization's score for chips, progress rings, and admin pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgScoreView {
    pub org_id: OrgId,
    pub org_name: String,
    pub category: String,
    pub category_label: String,
    pub total_score: f64,
    pub total_max_score: f64,
    pub percent: f64,
    pub groups: Vec<GroupScoreView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupScoreView {
    pub key: String,
    pub label: String,
    pub score: f64,
    pub max_score: f64,
    pub percent: f64,
    pub rules: Vec<RuleResult>,
}

impl OrgScoreView {
    /// Lay a scoring module out in the rule set's group order.
    pub fn build(
        org_id: OrgId,
        org_name: &str,
        rule_set: &CategoryRuleSet,
        module: &ScoringModule,
    ) -> Self {
        let summary = &module.result.score_summary;
        let groups = rule_set
            .groups
            .iter()
            .map(|group| {
                let score = summary.group(&group.key);
                GroupScoreView {
                    key: group.key.clone(),
                    label: group.label.clone(),
                    score: score.score,
                    max_score: score.max_score,
                    percent: score.percent,
                    rules: module.rule_results_for(&group.key).cloned().collect(),
                }
            })
            .collect();

        Self {
            org_id,
            org_name: org_name.to_string(),
            category: module.category.clone(),
            category_label: rule_set.label.clone(),
            total_score: summary.total_score,
            total_max_score: summary.total_max_score,
            percent: summary.percent(),
            groups,
        }
    }

    /// Whole-number percentage for display, e.g. `72` for 0.724.
    pub fn display_percent(&self) -> u8 {
        (self.percent * 100.0).round().clamp(0.0, 100.0) as u8
    }

    pub fn missed_rules(&self) -> impl Iterator<Item = &RuleResult> {
        self.groups
            .iter()
            .flat_map(|group| group.rules.iter())
            .filter(|rule| !rule.satisfied && rule.max_points > 0.0)
    }
}
