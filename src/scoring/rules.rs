use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::aggregate::total;
use super::domain::{ContactType, SocialPlatform};

/// One weighted criterion inside a scoring group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub key: String,
    pub label: String,
    pub weight: f64,
    pub predicate: RulePredicate,
}

impl Rule {
    pub fn new(key: &str, label: &str, weight: f64, predicate: RulePredicate) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            weight,
            predicate,
        }
    }
}

/// Condition checked against an organization snapshot.
///
/// Predicates are data so rule sets can be loaded from JSON and edited
/// without touching the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RulePredicate {
    #[serde(rename_all = "camelCase")]
    HasContact {
        contact_type: ContactType,
        scope: LocationScope,
        #[serde(default)]
        public_only: bool,
    },
    PrimaryLocationAddress,
    HasLocation,
    Verified,
    Claimed,
    HasSocialLink {
        #[serde(default)]
        platform: Option<SocialPlatform>,
    },
    SocialLinkCount {
        target: u32,
    },
    ProgramCount {
        minimum: u32,
    },
    ProgramDetail {
        field: ProgramField,
    },
    ProfileField {
        field: ProfileField,
    },
    AllOf {
        predicates: Vec<RulePredicate>,
    },
    AnyOf {
        predicates: Vec<RulePredicate>,
    },
}

/// Which locations a contact requirement applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationScope {
    Primary,
    Any,
    /// Partial credit: share of locations meeting the requirement.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgramField {
    Description,
    AgeRange,
    Tuition,
    Schedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    Description,
    Logo,
    Website,
    Email,
    FoundedYear,
    Accreditation,
}

/// Named cluster of rules, e.g. trust or curriculum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringGroup {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl ScoringGroup {
    pub fn new(key: &str, label: &str, rules: Vec<Rule>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            rules,
        }
    }

    pub fn max_score(&self) -> f64 {
        total(self.rules.iter().map(|rule| rule.weight))
    }
}

/// Every group that applies to one organization category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRuleSet {
    pub category: String,
    pub label: String,
    pub groups: Vec<ScoringGroup>,
}

impl CategoryRuleSet {
    pub fn new(category: &str, label: &str, groups: Vec<ScoringGroup>) -> Self {
        Self {
            category: category.to_string(),
            label: label.to_string(),
            groups,
        }
    }

    pub fn group(&self, key: &str) -> Option<&ScoringGroup> {
        self.groups.iter().find(|group| group.key == key)
    }

    pub fn rule_count(&self) -> usize {
        self.groups.iter().map(|group| group.rules.len()).sum()
    }

    /// Reject configurations the evaluator is not prepared to handle.
    pub fn validate(&self) -> Result<(), RuleSetError> {
        if self.category.trim().is_empty() {
            return Err(RuleSetError::EmptyCategory);
        }

        let mut group_keys = BTreeSet::new();
        for group in &self.groups {
            if group.key.trim().is_empty() {
                return Err(RuleSetError::EmptyGroupKey {
                    category: self.category.clone(),
                });
            }
            if !group_keys.insert(group.key.as_str()) {
                return Err(RuleSetError::DuplicateGroup {
                    category: self.category.clone(),
                    group: group.key.clone(),
                });
            }

            let mut rule_keys = BTreeSet::new();
            for rule in &group.rules {
                let location = || RuleLocation {
                    category: self.category.clone(),
                    group: group.key.clone(),
                    rule: rule.key.clone(),
                };

                if rule.key.trim().is_empty() {
                    return Err(RuleSetError::EmptyRuleKey {
                        category: self.category.clone(),
                        group: group.key.clone(),
                    });
                }
                if !rule_keys.insert(rule.key.as_str()) {
                    return Err(RuleSetError::DuplicateRule(location()));
                }
                if !rule.weight.is_finite() || rule.weight < 0.0 {
                    return Err(RuleSetError::InvalidWeight {
                        at: location(),
                        weight: rule.weight,
                    });
                }
                if let Some(reason) = predicate_defect(&rule.predicate) {
                    return Err(RuleSetError::InvalidPredicate {
                        at: location(),
                        reason,
                    });
                }
            }
        }

        Ok(())
    }
}

fn predicate_defect(predicate: &RulePredicate) -> Option<&'static str> {
    match predicate {
        RulePredicate::SocialLinkCount { target: 0 } => {
            Some("social link target must be positive")
        }
        RulePredicate::ProgramCount { minimum: 0 } => Some("program minimum must be positive"),
        RulePredicate::AllOf { predicates } | RulePredicate::AnyOf { predicates } => {
            if predicates.is_empty() {
                return Some("composite predicate must list at least one condition");
            }
            predicates.iter().find_map(predicate_defect)
        }
        _ => None,
    }
}

/// Position of a rule inside the registry, used in validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLocation {
    pub category: String,
    pub group: String,
    pub rule: String,
}

impl std::fmt::Display for RuleLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.category, self.group, self.rule)
    }
}

/// Configuration defects caught when a rule set is registered.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleSetError {
    #[error("rule set category must not be empty")]
    EmptyCategory,
    #[error("rule set {category} has a group without a key")]
    EmptyGroupKey { category: String },
    #[error("rule set {category} group {group} has a rule without a key")]
    EmptyRuleKey { category: String, group: String },
    #[error("rule set {category} declares group {group} more than once")]
    DuplicateGroup { category: String, group: String },
    #[error("rule {0} is declared more than once")]
    DuplicateRule(RuleLocation),
    #[error("rule {at} has invalid weight {weight}")]
    InvalidWeight { at: RuleLocation, weight: f64 },
    #[error("rule {at} has an invalid predicate: {reason}")]
    InvalidPredicate {
        at: RuleLocation,
        reason: &'static str,
    },
    #[error("category {0} is registered more than once")]
    DuplicateCategory(String),
}
