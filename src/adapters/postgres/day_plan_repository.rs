//! PostgreSQL implementation of DayPlanRepository.
//!
//! The replace-items operation is the engine's regeneration transaction:
//! delete, insert, and total update commit together or not at all.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::cycle::{DayPlan, DayType, PlaylistItem};
use crate::domain::foundation::{
    CycleId, DayPlanId, DomainError, ErrorCode, PlaylistItemId, VideoAssetId,
};
use crate::domain::selection::SequenceRole;
use crate::ports::DayPlanRepository;

use super::{parse_sequence_role, sequence_role_to_str};

/// PostgreSQL implementation of the DayPlanRepository port.
pub struct PostgresDayPlanRepository {
    pool: PgPool,
}

impl PostgresDayPlanRepository {
    /// Creates a new PostgresDayPlanRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a day plan.
#[derive(Debug, sqlx::FromRow)]
struct DayPlanRow {
    id: Uuid,
    cycle_id: Uuid,
    day_number: i32,
    day_type: Option<String>,
    total_duration_secs: i32,
}

impl From<DayPlanRow> for DayPlan {
    fn from(row: DayPlanRow) -> Self {
        DayPlan {
            id: DayPlanId::from_uuid(row.id),
            cycle_id: CycleId::from_uuid(row.cycle_id),
            day_number: row.day_number.max(0) as u32,
            // Unrecognized stored names resolve to None rather than
            // failing the read; generation re-derives the type.
            day_type: row.day_type.as_deref().and_then(DayType::parse),
            total_duration_secs: row.total_duration_secs.max(0) as u32,
        }
    }
}

/// Database row representation of a playlist item.
#[derive(Debug, sqlx::FromRow)]
struct PlaylistItemRow {
    id: Uuid,
    day_plan_id: Uuid,
    video_asset_id: Uuid,
    sequence_role: String,
    duration_secs: i32,
    category_tags: Vec<String>,
    display_order: i32,
}

impl TryFrom<PlaylistItemRow> for PlaylistItem {
    type Error = DomainError;

    fn try_from(row: PlaylistItemRow) -> Result<Self, Self::Error> {
        let sequence_role = parse_sequence_role(&row.sequence_role)?;
        Ok(PlaylistItem {
            id: PlaylistItemId::from_uuid(row.id),
            day_plan_id: DayPlanId::from_uuid(row.day_plan_id),
            video_asset_id: VideoAssetId::from_uuid(row.video_asset_id),
            sequence_role,
            duration_secs: row.duration_secs.max(0) as u32,
            category_tags: row.category_tags,
            display_order: row.display_order.max(0) as u32,
        })
    }
}

#[async_trait]
impl DayPlanRepository for PostgresDayPlanRepository {
    async fn find_day(
        &self,
        cycle_id: &CycleId,
        day_number: u32,
    ) -> Result<Option<DayPlan>, DomainError> {
        let row = sqlx::query_as::<_, DayPlanRow>(
            r#"
            SELECT id, cycle_id, day_number, day_type, total_duration_secs
            FROM day_plans
            WHERE cycle_id = $1 AND day_number = $2
            "#,
        )
        .bind(cycle_id.as_uuid())
        .bind(day_number as i32)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to query day plan: {}", e)))?;

        Ok(row.map(DayPlan::from))
    }

    async fn list_days(&self, cycle_id: &CycleId) -> Result<Vec<DayPlan>, DomainError> {
        let rows = sqlx::query_as::<_, DayPlanRow>(
            r#"
            SELECT id, cycle_id, day_number, day_type, total_duration_secs
            FROM day_plans
            WHERE cycle_id = $1
            ORDER BY day_number ASC
            "#,
        )
        .bind(cycle_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list day plans: {}", e)))?;

        Ok(rows.into_iter().map(DayPlan::from).collect())
    }

    async fn list_items(&self, day_plan_id: &DayPlanId) -> Result<Vec<PlaylistItem>, DomainError> {
        let rows = sqlx::query_as::<_, PlaylistItemRow>(
            r#"
            SELECT id, day_plan_id, video_asset_id, sequence_role,
                   duration_secs, category_tags, display_order
            FROM playlist_items
            WHERE day_plan_id = $1
            ORDER BY display_order ASC
            "#,
        )
        .bind(day_plan_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list playlist items: {}", e)))?;

        rows.into_iter().map(PlaylistItem::try_from).collect()
    }

    async fn item_counts(&self, cycle_id: &CycleId) -> Result<HashMap<u32, u32>, DomainError> {
        let rows: Vec<(i32, i64)> = sqlx::query_as(
            r#"
            SELECT dp.day_number, COUNT(pi.id)
            FROM day_plans dp
            JOIN playlist_items pi ON pi.day_plan_id = dp.id
            WHERE dp.cycle_id = $1
            GROUP BY dp.day_number
            "#,
        )
        .bind(cycle_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count playlist items: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|(day, count)| (day.max(0) as u32, count.max(0) as u32))
            .collect())
    }

    async fn asset_ids_in_range(
        &self,
        cycle_id: &CycleId,
        from_day: u32,
        to_day: u32,
    ) -> Result<HashSet<VideoAssetId>, DomainError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT pi.video_asset_id
            FROM playlist_items pi
            JOIN day_plans dp ON dp.id = pi.day_plan_id
            WHERE dp.cycle_id = $1 AND dp.day_number BETWEEN $2 AND $3
            "#,
        )
        .bind(cycle_id.as_uuid())
        .bind(from_day as i32)
        .bind(to_day as i32)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to query used assets: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|(id,)| VideoAssetId::from_uuid(id))
            .collect())
    }

    async fn days_with_items(
        &self,
        cycle_id: &CycleId,
        from_day: u32,
        to_day: u32,
    ) -> Result<Vec<u32>, DomainError> {
        let rows: Vec<(i32,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT dp.day_number
            FROM day_plans dp
            JOIN playlist_items pi ON pi.day_plan_id = dp.id
            WHERE dp.cycle_id = $1 AND dp.day_number BETWEEN $2 AND $3
            ORDER BY dp.day_number ASC
            "#,
        )
        .bind(cycle_id.as_uuid())
        .bind(from_day as i32)
        .bind(to_day as i32)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to query generated days: {}", e)))?;

        Ok(rows.into_iter().map(|(day,)| day.max(0) as u32).collect())
    }

    async fn replace_items(
        &self,
        day_plan_id: &DayPlanId,
        items: &[PlaylistItem],
        total_duration_secs: u32,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::database(format!("Failed to begin transaction: {}", e))
        })?;

        let updated = sqlx::query(
            r#"
            UPDATE day_plans SET total_duration_secs = $2 WHERE id = $1
            "#,
        )
        .bind(day_plan_id.as_uuid())
        .bind(total_duration_secs as i32)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update day plan: {}", e)))?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DayPlanNotFound,
                format!("Day plan not found: {}", day_plan_id),
            ));
        }

        sqlx::query("DELETE FROM playlist_items WHERE day_plan_id = $1")
            .bind(day_plan_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::database(format!("Failed to delete playlist items: {}", e))
            })?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO playlist_items (
                    id, day_plan_id, video_asset_id, sequence_role,
                    duration_secs, category_tags, display_order
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(item.id.as_uuid())
            .bind(item.day_plan_id.as_uuid())
            .bind(item.video_asset_id.as_uuid())
            .bind(sequence_role_to_str(item.sequence_role))
            .bind(item.duration_secs as i32)
            .bind(&item.category_tags)
            .bind(item.display_order as i32)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::database(format!("Failed to insert playlist item: {}", e))
            })?;
        }

        tx.commit().await.map_err(|e| {
            DomainError::database(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_plan_row_converts_with_unrecognized_type_as_none() {
        let row = DayPlanRow {
            id: Uuid::new_v4(),
            cycle_id: Uuid::new_v4(),
            day_number: 4,
            day_type: Some("inferno".to_string()),
            total_duration_secs: 1200,
        };
        let plan = DayPlan::from(row);
        assert_eq!(plan.day_number, 4);
        assert_eq!(plan.day_type, None);
        assert_eq!(plan.total_duration_secs, 1200);
    }

    #[test]
    fn playlist_item_row_rejects_unknown_role() {
        let row = PlaylistItemRow {
            id: Uuid::new_v4(),
            day_plan_id: Uuid::new_v4(),
            video_asset_id: Uuid::new_v4(),
            sequence_role: "bonus".to_string(),
            duration_secs: 300,
            category_tags: Vec::new(),
            display_order: 1,
        };
        let err = PlaylistItem::try_from(row).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn playlist_item_row_converts_to_domain() {
        let row = PlaylistItemRow {
            id: Uuid::new_v4(),
            day_plan_id: Uuid::new_v4(),
            video_asset_id: Uuid::new_v4(),
            sequence_role: "mandatory".to_string(),
            duration_secs: 300,
            category_tags: vec!["breath".to_string()],
            display_order: 1,
        };
        let item = PlaylistItem::try_from(row).unwrap();
        assert_eq!(item.sequence_role, SequenceRole::Mandatory);
        assert_eq!(item.duration_secs, 300);
        assert_eq!(item.display_order, 1);
    }
}
