//! PreviewDayHandler - runs selection for one day without persisting.
//!
//! Used to show a playlist before committing it. The entitlement lock
//! check is the caller's responsibility; enrollment is still required.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::domain::cycle::DayType;
use crate::domain::foundation::{DomainError, ErrorCode, ProgramId, UserId};
use crate::domain::selection::CandidateItem;
use crate::ports::{
    CandidateRepository, CycleRepository, DayPlanRepository, EnrollmentReader, ProgramLookup,
};

use super::candidate_pool::{run_selection, SelectionRequest};

/// Query for a non-persisting selection run.
#[derive(Debug, Clone)]
pub struct PreviewDayQuery {
    pub user_id: UserId,
    pub program_id: ProgramId,
    pub day_number: u32,
    pub minutes_preference: Option<u32>,
    pub preferred_level: Option<String>,
}

/// A playlist preview; nothing was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPreview {
    pub day_number: u32,
    pub day_type: DayType,
    /// Selected candidates in selection order.
    pub items: Vec<CandidateItem>,
    pub total_duration_secs: u32,
    /// The duration budget the selection ran against.
    pub target_duration_secs: u32,
}

/// Handler for previewing one day's playlist.
pub struct PreviewDayHandler {
    cycles: Arc<dyn CycleRepository>,
    day_plans: Arc<dyn DayPlanRepository>,
    candidates: Arc<dyn CandidateRepository>,
    programs: Arc<dyn ProgramLookup>,
    enrollments: Arc<dyn EnrollmentReader>,
    config: EngineConfig,
}

impl PreviewDayHandler {
    pub fn new(
        cycles: Arc<dyn CycleRepository>,
        day_plans: Arc<dyn DayPlanRepository>,
        candidates: Arc<dyn CandidateRepository>,
        programs: Arc<dyn ProgramLookup>,
        enrollments: Arc<dyn EnrollmentReader>,
        config: EngineConfig,
    ) -> Self {
        Self {
            cycles,
            day_plans,
            candidates,
            programs,
            enrollments,
            config,
        }
    }

    pub async fn handle(&self, query: PreviewDayQuery) -> Result<DayPreview, DomainError> {
        if !self
            .enrollments
            .has_active(&query.user_id, &query.program_id)
            .await?
        {
            return Err(DomainError::not_enrolled(
                "User has no active enrollment in this program",
            ));
        }

        let cycle = self
            .cycles
            .find_by_user_and_program(&query.user_id, &query.program_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::CycleNotFound, "No cycle provisioned for this program")
            })?;

        if !cycle.contains_day(query.day_number) {
            return Err(DomainError::out_of_range(
                "day_number",
                format!(
                    "Day {} is outside the cycle (1..={})",
                    query.day_number, cycle.cycle_length_days
                ),
            ));
        }

        let outcome = run_selection(
            self.day_plans.as_ref(),
            self.candidates.as_ref(),
            self.programs.as_ref(),
            &self.config,
            SelectionRequest {
                cycle: &cycle,
                day_number: query.day_number,
                minutes_preference: query.minutes_preference,
                preferred_level: query.preferred_level.clone(),
            },
        )
        .await?;

        Ok(DayPreview {
            day_number: query.day_number,
            day_type: outcome.day_type,
            items: outcome.selection.items,
            total_duration_secs: outcome.selection.total_duration_secs,
            target_duration_secs: outcome.target_duration_secs,
        })
    }
}
