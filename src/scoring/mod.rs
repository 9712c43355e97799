//! Organization completeness and trust scoring.
//!
//! A [`RuleSetRegistry`] maps each organization category to a
//! [`CategoryRuleSet`] of weighted rules grouped into trust, curriculum,
//! communication, digital, and admin clusters. [`ScoringEngine`] resolves an
//! organization's category, evaluates every rule against the in-memory
//! [`OrgSnapshot`], and aggregates the results into a [`ScoringModule`].
//! Evaluation is pure: no I/O, no shared mutable state, and the same snapshot
//! always yields the same module.

pub mod aggregate;
pub mod builder;
pub mod catalog;
pub mod domain;
pub mod evaluator;
pub mod registry;
pub mod repository;
pub mod router;
pub mod rules;
pub mod service;
pub mod view;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate_all, aggregate_group, percent, GroupScore, ScoreSummary};
pub use builder::{score_with, ScoringEngine, ScoringModule, ScoringResult};
pub use domain::{
    AgeRange, ClaimStatus, ContactMethod, ContactType, Location, OrgId, OrgInstance, OrgProfile,
    OrgSnapshot, Program, SocialLink, SocialPlatform, Verification, VerificationStatus,
};
pub use evaluator::{evaluate, RuleResult};
pub use registry::{RegistryError, RuleSetCatalog, RuleSetRegistry};
pub use repository::{OrgRepository, RepositoryError};
pub use router::scoring_router;
pub use rules::{
    CategoryRuleSet, LocationScope, ProfileField, ProgramField, Rule, RuleLocation, RulePredicate,
    RuleSetError, ScoringGroup,
};
pub use service::{OrgScoringService, ScoringServiceError};
pub use view::{GroupScoreView, OrgScoreView};
