use serde::{Deserialize, Serialize};

use super::domain::{is_present, ClaimStatus, Location, OrgSnapshot};
use super::rules::{LocationScope, ProfileField, ProgramField, Rule, RulePredicate};

/// Outcome of one rule against one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    pub group_key: String,
    pub rule_key: String,
    pub label: String,
    /// True only when the rule is fully satisfied.
    pub satisfied: bool,
    /// Degree of satisfaction in `[0, 1]`.
    pub satisfaction: f64,
    pub points_earned: f64,
    pub max_points: f64,
}

/// Score a single rule. Missing data counts as not satisfied.
pub fn evaluate(group_key: &str, rule: &Rule, org: &OrgSnapshot) -> RuleResult {
    let satisfaction = clamp_fraction(satisfaction(&rule.predicate, org));
    let max_points = rule.weight;

    RuleResult {
        group_key: group_key.to_string(),
        rule_key: rule.key.clone(),
        label: rule.label.clone(),
        satisfied: satisfaction >= 1.0,
        satisfaction,
        points_earned: max_points * satisfaction,
        max_points,
    }
}

/// Satisfaction fraction of a predicate, before clamping.
pub fn satisfaction(predicate: &RulePredicate, org: &OrgSnapshot) -> f64 {
    match predicate {
        RulePredicate::HasContact {
            contact_type,
            scope,
            public_only,
        } => {
            let matches =
                |location: &Location| location.has_contact(*contact_type, *public_only);
            match scope {
                LocationScope::Primary => flag(org.primary_location().is_some_and(matches)),
                LocationScope::Any => flag(org.locations.iter().any(matches)),
                LocationScope::All => {
                    let covered = org
                        .locations
                        .iter()
                        .filter(|location| matches(*location))
                        .count();
                    share(covered, org.locations.len())
                }
            }
        }
        RulePredicate::PrimaryLocationAddress => flag(
            org.primary_location()
                .is_some_and(|location| is_present(location.address_line.as_deref())),
        ),
        RulePredicate::HasLocation => flag(!org.locations.is_empty()),
        RulePredicate::Verified => flag(org.is_verified()),
        RulePredicate::Claimed => flag(org.claim_status == ClaimStatus::Claimed),
        RulePredicate::HasSocialLink { platform } => flag(org.social_links().iter().any(|link| {
            platform.map_or(true, |wanted| link.platform == wanted) && !link.url.trim().is_empty()
        })),
        RulePredicate::SocialLinkCount { target } => {
            let usable = org
                .social_links()
                .iter()
                .filter(|link| !link.url.trim().is_empty())
                .count();
            capped(usable, *target as usize)
        }
        RulePredicate::ProgramCount { minimum } => capped(org.programs.len(), *minimum as usize),
        RulePredicate::ProgramDetail { field } => {
            let detailed = org
                .programs
                .iter()
                .filter(|program| match field {
                    ProgramField::Description => is_present(program.description.as_deref()),
                    ProgramField::AgeRange => program.age_range.is_some(),
                    ProgramField::Tuition => program.tuition.is_some(),
                    ProgramField::Schedule => is_present(program.schedule.as_deref()),
                })
                .count();
            share(detailed, org.programs.len())
        }
        RulePredicate::ProfileField { field } => {
            let profile = &org.profile;
            flag(match field {
                ProfileField::Description => is_present(profile.description.as_deref()),
                ProfileField::Logo => is_present(profile.logo_url.as_deref()),
                ProfileField::Website => is_present(profile.website.as_deref()),
                ProfileField::Email => is_present(profile.email.as_deref()),
                ProfileField::FoundedYear => profile.founded_year.is_some(),
                ProfileField::Accreditation => is_present(profile.accreditation.as_deref()),
            })
        }
        RulePredicate::AllOf { predicates } => predicates
            .iter()
            .map(|child| clamp_fraction(satisfaction(child, org)))
            .reduce(f64::min)
            .unwrap_or(0.0),
        RulePredicate::AnyOf { predicates } => predicates
            .iter()
            .map(|child| clamp_fraction(satisfaction(child, org)))
            .reduce(f64::max)
            .unwrap_or(0.0),
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// `part / whole`, zero when there is nothing to measure.
fn share(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn capped(count: usize, target: usize) -> f64 {
    share(count.min(target), target)
}

fn clamp_fraction(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
