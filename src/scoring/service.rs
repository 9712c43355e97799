use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use super::builder::{score_with, ScoringEngine, ScoringModule};
use super::domain::{OrgId, OrgInstance, OrgSnapshot};
use super::repository::{OrgRepository, RepositoryError};
use super::rules::CategoryRuleSet;
use super::view::OrgScoreView;

/// Service composing the organization repository with the scoring engine.
pub struct OrgScoringService<R> {
    repository: Arc<R>,
    engine: Arc<ScoringEngine>,
}

impl<R> OrgScoringService<R>
where
    R: OrgRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: Arc<ScoringEngine>) -> Self {
        Self { repository, engine }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Score a snapshot supplied by the caller without touching the repository.
    pub fn evaluate(&self, org: &OrgSnapshot) -> Option<ScoringModule> {
        self.engine.compute_org_scoring(org)
    }

    /// Load an organization and attach its scoring module.
    pub fn score(&self, org_id: &OrgId) -> Result<OrgInstance, ScoringServiceError> {
        let org = self
            .repository
            .fetch(org_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(OrgInstance::attach(org, &self.engine))
    }

    /// Group-by-group breakdown, `None` when no rule set applies.
    pub fn breakdown(&self, org_id: &OrgId) -> Result<Option<OrgScoreView>, ScoringServiceError> {
        let org = self
            .repository
            .fetch(org_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(self.view(&org))
    }

    pub fn view(&self, org: &OrgSnapshot) -> Option<OrgScoreView> {
        let rule_set = self.engine.resolve_rule_set(org)?;
        let module = score_with(rule_set, org);
        Some(OrgScoreView::build(org.id.clone(), &org.name, rule_set, &module))
    }

    /// Highest scoring organizations first; unscored organizations are left out.
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<OrgScoreView>, ScoringServiceError> {
        let orgs = self.repository.list(usize::MAX)?;
        let mut views: Vec<OrgScoreView> = orgs.iter().filter_map(|org| self.view(org)).collect();
        debug!(
            candidates = orgs.len(),
            scored = views.len(),
            "ranking organizations"
        );

        views.sort_by(|left, right| {
            right
                .percent
                .partial_cmp(&left.percent)
                .unwrap_or(Ordering::Equal)
                .then_with(|| left.org_id.cmp(&right.org_id))
        });
        views.truncate(limit);
        Ok(views)
    }

    pub fn rule_set(&self, category: &str) -> Option<&CategoryRuleSet> {
        self.engine.registry().resolve(category)
    }

    pub fn categories(&self) -> Vec<String> {
        self.engine
            .registry()
            .categories()
            .map(str::to_string)
            .collect()
    }
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
