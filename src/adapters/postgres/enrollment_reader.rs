//! PostgreSQL implementation of EnrollmentReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ProgramId, UserId};
use crate::ports::EnrollmentReader;

/// PostgreSQL implementation of the EnrollmentReader port.
pub struct PostgresEnrollmentReader {
    pool: PgPool,
}

impl PostgresEnrollmentReader {
    /// Creates a new PostgresEnrollmentReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentReader for PostgresEnrollmentReader {
    async fn has_active(
        &self,
        user_id: &UserId,
        program_id: &ProgramId,
    ) -> Result<bool, DomainError> {
        let row: Option<(bool,)> = sqlx::query_as(
            r#"
            SELECT TRUE
            FROM enrollments
            WHERE user_id = $1 AND program_id = $2 AND status = 'active'
            LIMIT 1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(program_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to query enrollment: {}", e)))?;

        Ok(row.is_some())
    }

    async fn count_active(&self, user_id: &UserId) -> Result<u32, DomainError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM enrollments
            WHERE user_id = $1 AND status = 'active'
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count enrollments: {}", e)))?;

        Ok(count.max(0) as u32)
    }
}
