//! In-memory enrollment reader.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ProgramId, UserId};
use crate::ports::EnrollmentReader;

/// In-memory implementation of `EnrollmentReader`.
#[derive(Default)]
pub struct InMemoryEnrollmentReader {
    active: RwLock<HashSet<(UserId, ProgramId)>>,
}

impl InMemoryEnrollmentReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an ACTIVE enrollment for the pair.
    pub async fn enroll(&self, user_id: UserId, program_id: ProgramId) {
        self.active.write().await.insert((user_id, program_id));
    }

    /// Removes an enrollment.
    pub async fn withdraw(&self, user_id: &UserId, program_id: &ProgramId) {
        self.active.write().await.remove(&(*user_id, *program_id));
    }
}

#[async_trait]
impl EnrollmentReader for InMemoryEnrollmentReader {
    async fn has_active(
        &self,
        user_id: &UserId,
        program_id: &ProgramId,
    ) -> Result<bool, DomainError> {
        Ok(self.active.read().await.contains(&(*user_id, *program_id)))
    }

    async fn count_active(&self, user_id: &UserId) -> Result<u32, DomainError> {
        Ok(self
            .active
            .read()
            .await
            .iter()
            .filter(|(u, _)| u == user_id)
            .count() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn enrollment_is_tracked_per_pair() {
        let reader = InMemoryEnrollmentReader::new();
        let user_id = UserId::new();
        let program_id = ProgramId::new();

        assert!(!reader.has_active(&user_id, &program_id).await.unwrap());

        reader.enroll(user_id, program_id).await;
        assert!(reader.has_active(&user_id, &program_id).await.unwrap());
        assert!(!reader.has_active(&user_id, &ProgramId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn count_active_spans_programs() {
        let reader = InMemoryEnrollmentReader::new();
        let user_id = UserId::new();
        let first = ProgramId::new();
        reader.enroll(user_id, first).await;
        reader.enroll(user_id, ProgramId::new()).await;
        reader.enroll(UserId::new(), ProgramId::new()).await;

        assert_eq!(reader.count_active(&user_id).await.unwrap(), 2);

        reader.withdraw(&user_id, &first).await;
        assert_eq!(reader.count_active(&user_id).await.unwrap(), 1);
    }
}
