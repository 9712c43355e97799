use std::path::PathBuf;

use super::common::*;
use crate::config::ScoringConfig;
use crate::scoring::catalog::{builtin_rule_sets, PRIVATE_SCHOOL};
use crate::scoring::registry::{RegistryError, RuleSetRegistry};
use crate::scoring::rules::{CategoryRuleSet, Rule, RulePredicate, RuleSetError, ScoringGroup};

fn single_group(rules: Vec<Rule>) -> CategoryRuleSet {
    CategoryRuleSet::new(
        "test-category",
        "Test",
        vec![ScoringGroup::new("trust", "Trust", rules)],
    )
}

#[test]
fn builtin_catalog_is_valid_and_resolvable() {
    let registry = RuleSetRegistry::builtin().expect("builtin catalog is valid");

    assert_eq!(registry.len(), builtin_rule_sets().len());
    let rule_set = registry.resolve(PRIVATE_SCHOOL).expect("private school registered");
    let groups: Vec<&str> = rule_set.groups.iter().map(|group| group.key.as_str()).collect();
    assert_eq!(
        groups,
        vec!["trust", "curriculum", "communication", "digital", "admin"]
    );
    assert!(registry.resolve("unknown").is_none());
}

#[test]
fn rejects_negative_weight() {
    let err = single_group(vec![Rule::new(
        "claimed",
        "Claimed",
        -1.0,
        RulePredicate::Claimed,
    )])
    .validate()
    .expect_err("negative weight rejected");

    assert!(matches!(err, RuleSetError::InvalidWeight { weight, .. } if weight == -1.0));
}

#[test]
fn rejects_non_finite_weight() {
    let err = single_group(vec![Rule::new(
        "claimed",
        "Claimed",
        f64::NAN,
        RulePredicate::Claimed,
    )])
    .validate()
    .expect_err("nan weight rejected");

    assert!(matches!(err, RuleSetError::InvalidWeight { .. }));
}

#[test]
fn rejects_duplicate_rule_keys_within_group() {
    let err = single_group(vec![
        Rule::new("claimed", "Claimed", 1.0, RulePredicate::Claimed),
        Rule::new("claimed", "Claimed again", 1.0, RulePredicate::Verified),
    ])
    .validate()
    .expect_err("duplicate rule rejected");

    match err {
        RuleSetError::DuplicateRule(location) => {
            assert_eq!(location.to_string(), "test-category/trust/claimed");
        }
        other => panic!("expected duplicate rule, got {other:?}"),
    }
}

#[test]
fn allows_same_rule_key_in_different_groups() {
    let rule_set = CategoryRuleSet::new(
        "test-category",
        "Test",
        vec![
            ScoringGroup::new("trust", "Trust", vec![phone_rule()]),
            ScoringGroup::new("communication", "Communication", vec![phone_rule()]),
        ],
    );

    assert_eq!(rule_set.validate(), Ok(()));
}

#[test]
fn rejects_duplicate_group_keys() {
    let rule_set = CategoryRuleSet::new(
        "test-category",
        "Test",
        vec![
            ScoringGroup::new("trust", "Trust", Vec::new()),
            ScoringGroup::new("trust", "Trust again", Vec::new()),
        ],
    );

    assert!(matches!(
        rule_set.validate(),
        Err(RuleSetError::DuplicateGroup { .. })
    ));
}

#[test]
fn rejects_zero_count_targets_even_when_nested() {
    let err = single_group(vec![Rule::new(
        "reach",
        "Reach",
        5.0,
        RulePredicate::AnyOf {
            predicates: vec![
                RulePredicate::Claimed,
                RulePredicate::SocialLinkCount { target: 0 },
            ],
        },
    )])
    .validate()
    .expect_err("zero target rejected");

    assert!(matches!(err, RuleSetError::InvalidPredicate { .. }));
}

#[test]
fn rejects_empty_composites_even_when_nested() {
    let err = single_group(vec![Rule::new(
        "either",
        "Either",
        5.0,
        RulePredicate::AnyOf {
            predicates: vec![
                RulePredicate::Claimed,
                RulePredicate::AllOf {
                    predicates: Vec::new(),
                },
            ],
        },
    )])
    .validate()
    .expect_err("empty composite rejected");

    assert!(matches!(err, RuleSetError::InvalidPredicate { .. }));
}

#[test]
fn json_catalog_with_empty_composite_is_rejected() {
    let raw = r#"{
        "ruleSets": [{
            "category": "community-center",
            "label": "Community centre",
            "groups": [{
                "key": "admin",
                "label": "Administration",
                "rules": [{
                    "key": "never",
                    "label": "Never satisfiable",
                    "weight": 5,
                    "predicate": { "type": "all_of", "predicates": [] }
                }]
            }]
        }]
    }"#;

    let err = RuleSetRegistry::from_json(raw).expect_err("empty composite rejected");

    assert!(matches!(
        err,
        RegistryError::Invalid(RuleSetError::InvalidPredicate { .. })
    ));
}

#[test]
fn rejects_duplicate_categories_after_normalising() {
    let mut first = single_group(vec![phone_rule()]);
    first.category = "Private-School".to_string();
    let mut second = single_group(vec![phone_rule()]);
    second.category = " private-school".to_string();

    let err = RuleSetRegistry::new(vec![first, second]).expect_err("duplicate rejected");
    assert_eq!(err, RuleSetError::DuplicateCategory(PRIVATE_SCHOOL.to_string()));
}

#[test]
fn empty_group_is_allowed() {
    let rule_set = single_group(Vec::new());

    assert_eq!(rule_set.validate(), Ok(()));
    assert_eq!(rule_set.groups[0].max_score(), 0.0);
}

#[test]
fn loads_rule_sets_from_json() {
    let raw = r#"{
        "defaultCategory": "Community-Center",
        "ruleSets": [{
            "category": "community-center",
            "label": "Community centre",
            "groups": [{
                "key": "trust",
                "label": "Trust",
                "rules": [
                    {
                        "key": "has_primary_location_phone",
                        "label": "Primary phone",
                        "weight": 10,
                        "predicate": {
                            "type": "has_contact",
                            "contactType": "phone",
                            "scope": "primary",
                            "publicOnly": true
                        }
                    },
                    {
                        "key": "reach",
                        "label": "Social reach",
                        "weight": 2.5,
                        "predicate": { "type": "social_link_count", "target": 2 }
                    },
                    {
                        "key": "detail",
                        "label": "Program ages",
                        "weight": 1,
                        "predicate": { "type": "program_detail", "field": "ageRange" }
                    }
                ]
            }]
        }]
    }"#;

    let registry = RuleSetRegistry::from_json(raw).expect("catalog parses");

    assert_eq!(registry.default_category(), Some("community-center"));
    let rule_set = registry.resolve("community-center").expect("registered");
    assert_eq!(rule_set.rule_count(), 3);
    assert_eq!(rule_set.groups[0].max_score(), 13.5);
}

#[test]
fn json_catalog_round_trips_through_registry() {
    let registry = RuleSetRegistry::builtin().expect("builtin catalog is valid");
    let raw = serde_json::to_string(&registry.to_catalog()).expect("serializes");

    let reloaded = RuleSetRegistry::from_json(&raw).expect("reloads");
    assert_eq!(reloaded.to_catalog(), registry.to_catalog());
}

#[test]
fn invalid_json_catalog_is_reported() {
    let err = RuleSetRegistry::from_json("{\"ruleSets\": [").expect_err("parse fails");
    assert!(matches!(err, RegistryError::Parse(_)));

    let raw = r#"{"ruleSets":[{"category":"x","label":"X","groups":[{"key":"g","label":"G",
        "rules":[{"key":"r","label":"R","weight":-3,"predicate":{"type":"claimed"}}]}]}]}"#;
    let err = RuleSetRegistry::from_json(raw).expect_err("validation fails");
    assert!(matches!(
        err,
        RegistryError::Invalid(RuleSetError::InvalidWeight { .. })
    ));
}

#[test]
fn config_without_path_uses_builtin_catalog() {
    let config = ScoringConfig {
        rule_set_path: None,
        default_category: Some("Public-School".to_string()),
    };

    let registry = RuleSetRegistry::from_config(&config).expect("builtin loads");
    assert_eq!(registry.len(), builtin_rule_sets().len());
    assert_eq!(registry.default_category(), Some("public-school"));
}

#[test]
fn config_with_missing_file_reports_io_error() {
    let config = ScoringConfig {
        rule_set_path: Some(PathBuf::from("/nonexistent/org-scoring/rule-sets.json")),
        default_category: None,
    };

    let err = RuleSetRegistry::from_config(&config).expect_err("missing file");
    assert!(matches!(err, RegistryError::Io { .. }));
}
