use super::domain::{OrgId, OrgSnapshot};

/// Source of organization snapshots; the directory data layer implements this.
pub trait OrgRepository: Send + Sync {
    fn fetch(&self, id: &OrgId) -> Result<Option<OrgSnapshot>, RepositoryError>;
    fn list(&self, limit: usize) -> Result<Vec<OrgSnapshot>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("organization not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
