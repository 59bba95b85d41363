//! PostgreSQL implementation of CandidateRepository.
//!
//! Reads the video asset catalog. Ordering is creation timestamp
//! ascending, the stable order selection depends on.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, VideoAssetId};
use crate::domain::selection::CandidateItem;
use crate::ports::{CandidateFilter, CandidateRepository};

use super::parse_sequence_role;

/// PostgreSQL implementation of the CandidateRepository port.
pub struct PostgresCandidateRepository {
    pool: PgPool,
}

impl PostgresCandidateRepository {
    /// Creates a new PostgresCandidateRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a video asset.
#[derive(Debug, sqlx::FromRow)]
struct VideoAssetRow {
    id: Uuid,
    sequence_role: String,
    duration_secs: i32,
    category_tags: Vec<String>,
    contraindication_tags: Vec<String>,
    level: Option<String>,
}

impl TryFrom<VideoAssetRow> for CandidateItem {
    type Error = DomainError;

    fn try_from(row: VideoAssetRow) -> Result<Self, Self::Error> {
        let sequence_role = parse_sequence_role(&row.sequence_role)?;
        Ok(CandidateItem {
            id: VideoAssetId::from_uuid(row.id),
            sequence_role,
            duration_secs: row.duration_secs.max(0) as u32,
            category_tags: row.category_tags,
            contraindication_tags: row.contraindication_tags,
            level: row.level,
        })
    }
}

#[async_trait]
impl CandidateRepository for PostgresCandidateRepository {
    async fn list_active(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<CandidateItem>, DomainError> {
        let exclude: Vec<Uuid> = filter.exclude_ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query_as::<_, VideoAssetRow>(
            r#"
            SELECT id, sequence_role, duration_secs, category_tags,
                   contraindication_tags, level
            FROM video_assets
            WHERE status = 'active'
              AND ($1::text IS NULL OR level = $1)
              AND NOT (id = ANY($2))
            ORDER BY created_at ASC
            "#,
        )
        .bind(&filter.level)
        .bind(&exclude)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list candidates: {}", e)))?;

        rows.into_iter().map(CandidateItem::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::selection::SequenceRole;

    #[test]
    fn video_asset_row_converts_to_domain() {
        let row = VideoAssetRow {
            id: Uuid::new_v4(),
            sequence_role: "adjustable".to_string(),
            duration_secs: 420,
            category_tags: vec!["hips".to_string()],
            contraindication_tags: vec!["knee_injury".to_string()],
            level: Some("beginner".to_string()),
        };
        let candidate = CandidateItem::try_from(row).unwrap();
        assert_eq!(candidate.sequence_role, SequenceRole::Adjustable);
        assert_eq!(candidate.duration_secs, 420);
        assert_eq!(candidate.level.as_deref(), Some("beginner"));
    }
}
