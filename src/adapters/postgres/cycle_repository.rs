//! PostgreSQL implementation of CycleRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::cycle::{Cycle, DayPlan};
use crate::domain::foundation::{CycleId, DomainError, ProgramId, Timestamp, UserId};
use crate::ports::CycleRepository;

use super::day_type_to_str;

/// PostgreSQL implementation of the CycleRepository port.
pub struct PostgresCycleRepository {
    pool: PgPool,
}

impl PostgresCycleRepository {
    /// Creates a new PostgresCycleRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a cycle.
#[derive(Debug, sqlx::FromRow)]
struct CycleRow {
    id: Uuid,
    user_id: Uuid,
    program_id: Uuid,
    start_date: Option<DateTime<Utc>>,
    cycle_length_days: i32,
    minutes_preference: i32,
    created_at: DateTime<Utc>,
}

impl From<CycleRow> for Cycle {
    fn from(row: CycleRow) -> Self {
        Cycle {
            id: CycleId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            program_id: ProgramId::from_uuid(row.program_id),
            start_date: row.start_date.map(Timestamp::from_datetime),
            cycle_length_days: row.cycle_length_days.max(0) as u32,
            minutes_preference: row.minutes_preference.max(0) as u32,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

const SELECT_CYCLE: &str = r#"
    SELECT id, user_id, program_id, start_date, cycle_length_days,
           minutes_preference, created_at
    FROM cycles
    WHERE user_id = $1 AND program_id = $2
"#;

#[async_trait]
impl CycleRepository for PostgresCycleRepository {
    async fn find_by_user_and_program(
        &self,
        user_id: &UserId,
        program_id: &ProgramId,
    ) -> Result<Option<Cycle>, DomainError> {
        let row = sqlx::query_as::<_, CycleRow>(SELECT_CYCLE)
            .bind(user_id.as_uuid())
            .bind(program_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::database(format!("Failed to query cycle: {}", e))
            })?;

        Ok(row.map(Cycle::from))
    }

    async fn find_or_create(
        &self,
        cycle: Cycle,
        skeleton: Vec<DayPlan>,
    ) -> Result<Cycle, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::database(format!("Failed to begin transaction: {}", e))
        })?;

        // Re-check inside the transaction; concurrent double-submission
        // must converge on one cycle.
        let existing = sqlx::query_as::<_, CycleRow>(SELECT_CYCLE)
            .bind(cycle.user_id.as_uuid())
            .bind(cycle.program_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::database(format!("Failed to query cycle: {}", e))
            })?;
        if let Some(row) = existing {
            return Ok(Cycle::from(row));
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO cycles (
                id, user_id, program_id, start_date, cycle_length_days,
                minutes_preference, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, program_id) DO NOTHING
            "#,
        )
        .bind(cycle.id.as_uuid())
        .bind(cycle.user_id.as_uuid())
        .bind(cycle.program_id.as_uuid())
        .bind(cycle.start_date.map(|t| *t.as_datetime()))
        .bind(cycle.cycle_length_days as i32)
        .bind(cycle.minutes_preference as i32)
        .bind(cycle.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to insert cycle: {}", e))
        })?;

        // A concurrent transaction won the insert; surface its cycle.
        if inserted.rows_affected() == 0 {
            let row = sqlx::query_as::<_, CycleRow>(SELECT_CYCLE)
                .bind(cycle.user_id.as_uuid())
                .bind(cycle.program_id.as_uuid())
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::database(format!("Failed to re-read cycle: {}", e))
                })?;
            return Ok(Cycle::from(row));
        }

        for plan in &skeleton {
            sqlx::query(
                r#"
                INSERT INTO day_plans (
                    id, cycle_id, day_number, day_type, total_duration_secs
                ) VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(plan.id.as_uuid())
            .bind(plan.cycle_id.as_uuid())
            .bind(plan.day_number as i32)
            .bind(plan.day_type.map(day_type_to_str))
            .bind(plan.total_duration_secs as i32)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::database(format!("Failed to insert day plan: {}", e))
            })?;
        }

        tx.commit().await.map_err(|e| {
            DomainError::database(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(cycle)
    }
}
