//! In-memory candidate catalog.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::selection::CandidateItem;
use crate::ports::{CandidateFilter, CandidateRepository};

struct CatalogEntry {
    candidate: CandidateItem,
    active: bool,
}

/// In-memory implementation of `CandidateRepository`.
///
/// Insertion order stands in for the creation-timestamp ordering the
/// port contract requires.
#[derive(Default)]
pub struct InMemoryCandidateRepository {
    entries: RwLock<Vec<CatalogEntry>>,
}

impl InMemoryCandidateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an ACTIVE candidate at the end of the catalog.
    pub async fn push(&self, candidate: CandidateItem) {
        self.entries.write().await.push(CatalogEntry {
            candidate,
            active: true,
        });
    }

    /// Adds a retired candidate that `list_active` must never return.
    pub async fn push_inactive(&self, candidate: CandidateItem) {
        self.entries.write().await.push(CatalogEntry {
            candidate,
            active: false,
        });
    }
}

#[async_trait]
impl CandidateRepository for InMemoryCandidateRepository {
    async fn list_active(&self, filter: &CandidateFilter) -> Result<Vec<CandidateItem>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|entry| entry.active)
            .filter(|entry| match &filter.level {
                Some(level) => entry.candidate.level.as_deref() == Some(level.as_str()),
                None => true,
            })
            .filter(|entry| !filter.exclude_ids.contains(&entry.candidate.id))
            .map(|entry| entry.candidate.clone())
            .collect())
    }
}
