//! Candidate repository port (read side).
//!
//! Supplies eligible content items for playlist selection. The catalog
//! is owned elsewhere; this engine only reads it.

use crate::domain::foundation::{DomainError, VideoAssetId};
use crate::domain::selection::CandidateItem;
use async_trait::async_trait;

/// Filter applied when listing active candidates.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    /// Restrict to this difficulty level when set.
    pub level: Option<String>,

    /// Asset ids to leave out of the listing entirely.
    pub exclude_ids: Vec<VideoAssetId>,
}

/// Read port for eligible content items.
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// List ACTIVE content items matching the filter, ordered by
    /// creation timestamp ascending.
    ///
    /// Selection order depends on that ordering contract; implementations
    /// must keep it stable across calls.
    async fn list_active(&self, filter: &CandidateFilter) -> Result<Vec<CandidateItem>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn candidate_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CandidateRepository) {}
    }

    #[test]
    fn default_filter_is_unrestricted() {
        let filter = CandidateFilter::default();
        assert!(filter.level.is_none());
        assert!(filter.exclude_ids.is_empty());
    }
}
