use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregate::{aggregate_all, aggregate_group, ScoreSummary};
use super::domain::OrgSnapshot;
use super::evaluator::{evaluate, RuleResult};
use super::registry::RuleSetRegistry;
use super::rules::CategoryRuleSet;

/// Derived scoring attached to an organization. Always recomputable from the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringModule {
    pub category: String,
    pub result: ScoringResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    pub score_summary: ScoreSummary,
    /// Flattened in rule set order: group order, then rule order.
    pub rule_results: Vec<RuleResult>,
}

impl ScoringModule {
    pub fn rule_results_for<'a>(
        &'a self,
        group_key: &'a str,
    ) -> impl Iterator<Item = &'a RuleResult> {
        self.result
            .rule_results
            .iter()
            .filter(move |result| result.group_key == group_key)
    }
}

/// Stateless engine pairing the shared registry with the evaluation pipeline.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    registry: Arc<RuleSetRegistry>,
}

impl ScoringEngine {
    pub fn new(registry: Arc<RuleSetRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RuleSetRegistry {
        &self.registry
    }

    /// Primary category of an organization: its first listed category, or the
    /// registry default when it lists none.
    pub fn primary_category<'a>(&'a self, org: &'a OrgSnapshot) -> Option<&'a str> {
        match org.categories.first() {
            Some(category) => Some(category.as_str()),
            None => self.registry.default_category(),
        }
    }

    pub fn resolve_rule_set(&self, org: &OrgSnapshot) -> Option<&CategoryRuleSet> {
        let category = self.primary_category(org)?;
        let rule_set = self.registry.resolve(category);
        if rule_set.is_none() {
            debug!(org_id = %org.id.0, category, "no rule set registered for category");
        }
        rule_set
    }

    /// Score an organization, or `None` when its category has no rule set.
    pub fn compute_org_scoring(&self, org: &OrgSnapshot) -> Option<ScoringModule> {
        let rule_set = self.resolve_rule_set(org)?;
        let module = score_with(rule_set, org);

        debug!(
            org_id = %org.id.0,
            category = %module.category,
            total_score = module.result.score_summary.total_score,
            total_max_score = module.result.score_summary.total_max_score,
            "computed organization scoring"
        );

        Some(module)
    }
}

/// Evaluate every rule of a rule set against one organization.
pub fn score_with(rule_set: &CategoryRuleSet, org: &OrgSnapshot) -> ScoringModule {
    let mut rule_results = Vec::with_capacity(rule_set.rule_count());
    let mut group_scores = BTreeMap::new();

    for group in &rule_set.groups {
        let start = rule_results.len();
        rule_results.extend(
            group
                .rules
                .iter()
                .map(|rule| evaluate(&group.key, rule, org)),
        );
        group_scores.insert(group.key.clone(), aggregate_group(&rule_results[start..]));
    }

    ScoringModule {
        category: rule_set.category.clone(),
        result: ScoringResult {
            score_summary: aggregate_all(group_scores),
            rule_results,
        },
    }
}
