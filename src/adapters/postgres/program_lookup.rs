//! PostgreSQL implementation of ProgramLookup.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::cycle::RhythmPattern;
use crate::domain::foundation::{DomainError, ErrorCode, ProgramId};
use crate::ports::{ProgramDefaults, ProgramLookup};

/// PostgreSQL implementation of the ProgramLookup port.
pub struct PostgresProgramLookup {
    pool: PgPool,
}

impl PostgresProgramLookup {
    /// Creates a new PostgresProgramLookup.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a program's defaults.
///
/// The rhythm pattern is stored as parallel array columns; both must be
/// present for a pattern to exist. Malformed contents are left to the
/// resolver's fallback rather than rejected here.
#[derive(Debug, sqlx::FromRow)]
struct ProgramRow {
    minutes_per_day: Option<i32>,
    rhythm_counts: Option<Vec<i64>>,
    rhythm_types: Option<Vec<String>>,
}

impl From<ProgramRow> for ProgramDefaults {
    fn from(row: ProgramRow) -> Self {
        let rhythm_pattern = match (row.rhythm_counts, row.rhythm_types) {
            (Some(counts), Some(types)) => Some(RhythmPattern { counts, types }),
            _ => None,
        };
        ProgramDefaults {
            minutes_per_day: row.minutes_per_day.map(|m| m.max(0) as u32),
            rhythm_pattern,
        }
    }
}

#[async_trait]
impl ProgramLookup for PostgresProgramLookup {
    async fn get_defaults(&self, program_id: &ProgramId) -> Result<ProgramDefaults, DomainError> {
        let row = sqlx::query_as::<_, ProgramRow>(
            r#"
            SELECT minutes_per_day, rhythm_counts, rhythm_types
            FROM programs
            WHERE id = $1
            "#,
        )
        .bind(program_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to query program: {}", e)))?;

        row.map(ProgramDefaults::from).ok_or_else(|| {
            DomainError::new(ErrorCode::ProgramNotFound, "Program does not exist")
                .with_detail("program_id", program_id.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_row_with_both_arrays_yields_pattern() {
        let row = ProgramRow {
            minutes_per_day: Some(30),
            rhythm_counts: Some(vec![2, 1]),
            rhythm_types: Some(vec!["gentle".to_string(), "build".to_string()]),
        };
        let defaults = ProgramDefaults::from(row);
        assert_eq!(defaults.minutes_per_day, Some(30));
        assert!(defaults.rhythm_pattern.is_some());
    }

    #[test]
    fn program_row_with_partial_arrays_yields_no_pattern() {
        let row = ProgramRow {
            minutes_per_day: None,
            rhythm_counts: Some(vec![2, 1]),
            rhythm_types: None,
        };
        let defaults = ProgramDefaults::from(row);
        assert!(defaults.rhythm_pattern.is_none());
        assert!(defaults.minutes_per_day.is_none());
    }
}
