//! GenerateDayHandler - builds or idempotently reuses one day's playlist.
//!
//! Per-day state machine, evaluated in order:
//!
//! 1. Entitlement lock check - a pure read-time gate, returns a
//!    `Locked` outcome without touching persisted state.
//! 2. Existing-result short circuit - a day that already has items is
//!    returned as-is unless regeneration was requested.
//! 3. (Re)generation - candidate pool + selection engine, persisted as
//!    one atomic delete+insert+update through the repository.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::domain::cycle::{DayType, PlaylistItem};
use crate::domain::foundation::{DomainError, ErrorCode, ProgramId, UserId};
use crate::ports::{
    CandidateRepository, CycleRepository, DayPlanRepository, EnrollmentReader,
    EntitlementProvider, ProgramLookup,
};

use super::candidate_pool::{run_selection, SelectionRequest};

/// Command to generate (or regenerate) one day's playlist.
#[derive(Debug, Clone)]
pub struct GenerateDayCommand {
    pub user_id: UserId,
    pub program_id: ProgramId,
    pub day_number: u32,
    /// Replace an existing playlist instead of returning it.
    pub regenerate: bool,
    /// The user's own minutes preference, when known.
    pub minutes_preference: Option<u32>,
    /// Restrict candidates to this difficulty level.
    pub preferred_level: Option<String>,
}

/// Why a day is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockReason {
    /// The day lies beyond the free unlock window.
    SubscriptionRequiredAfterFreeDays,
}

/// A day gated behind the subscription lock. Not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockedDay {
    pub day_number: u32,
    pub reason: LockReason,
    /// First day number that requires a paid subscription.
    pub locked_from_day: u32,
}

/// A successfully generated (or reused) day playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDay {
    pub day_number: u32,
    pub day_type: Option<DayType>,
    /// Items in display order.
    pub items: Vec<PlaylistItem>,
    pub total_duration_secs: u32,
    /// True when an existing playlist was returned unchanged.
    pub reused: bool,
}

/// Tagged outcome of a single-day generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOutcome {
    Generated(GeneratedDay),
    Locked(LockedDay),
}

/// Handler for single-day playlist generation.
pub struct GenerateDayHandler {
    cycles: Arc<dyn CycleRepository>,
    day_plans: Arc<dyn DayPlanRepository>,
    candidates: Arc<dyn CandidateRepository>,
    entitlements: Arc<dyn EntitlementProvider>,
    programs: Arc<dyn ProgramLookup>,
    enrollments: Arc<dyn EnrollmentReader>,
    config: EngineConfig,
}

impl GenerateDayHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cycles: Arc<dyn CycleRepository>,
        day_plans: Arc<dyn DayPlanRepository>,
        candidates: Arc<dyn CandidateRepository>,
        entitlements: Arc<dyn EntitlementProvider>,
        programs: Arc<dyn ProgramLookup>,
        enrollments: Arc<dyn EnrollmentReader>,
        config: EngineConfig,
    ) -> Self {
        Self {
            cycles,
            day_plans,
            candidates,
            entitlements,
            programs,
            enrollments,
            config,
        }
    }

    pub async fn handle(&self, command: GenerateDayCommand) -> Result<DayOutcome, DomainError> {
        if !self
            .enrollments
            .has_active(&command.user_id, &command.program_id)
            .await?
        {
            return Err(DomainError::not_enrolled(
                "User has no active enrollment in this program",
            )
            .with_detail("program_id", command.program_id.to_string()));
        }

        let cycle = self
            .cycles
            .find_by_user_and_program(&command.user_id, &command.program_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::CycleNotFound, "No cycle provisioned for this program")
                    .with_detail("program_id", command.program_id.to_string())
            })?;

        if !cycle.contains_day(command.day_number) {
            return Err(DomainError::out_of_range(
                "day_number",
                format!(
                    "Day {} is outside the cycle (1..={})",
                    command.day_number, cycle.cycle_length_days
                ),
            ));
        }

        let policy = self.entitlements.policy_for(&command.user_id).await?;
        if policy.is_day_locked(command.day_number) {
            tracing::info!(
                user_id = %command.user_id,
                day_number = command.day_number,
                locked_from_day = policy.locked_from_day(),
                "day is behind the subscription lock"
            );
            return Ok(DayOutcome::Locked(LockedDay {
                day_number: command.day_number,
                reason: LockReason::SubscriptionRequiredAfterFreeDays,
                locked_from_day: policy.locked_from_day(),
            }));
        }

        let plan = self
            .day_plans
            .find_day(&cycle.id, command.day_number)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::DayPlanNotFound, "Cycle has no plan for this day")
                    .with_detail("day_number", command.day_number.to_string())
            })?;

        if !command.regenerate {
            let existing = self.day_plans.list_items(&plan.id).await?;
            if !existing.is_empty() {
                return Ok(DayOutcome::Generated(GeneratedDay {
                    day_number: plan.day_number,
                    day_type: plan.day_type,
                    items: existing,
                    total_duration_secs: plan.total_duration_secs,
                    reused: true,
                }));
            }
        }

        let outcome = run_selection(
            self.day_plans.as_ref(),
            self.candidates.as_ref(),
            self.programs.as_ref(),
            &self.config,
            SelectionRequest {
                cycle: &cycle,
                day_number: command.day_number,
                minutes_preference: command.minutes_preference,
                preferred_level: command.preferred_level.clone(),
            },
        )
        .await?;

        let items: Vec<PlaylistItem> = outcome
            .selection
            .items
            .iter()
            .enumerate()
            .map(|(index, candidate)| {
                PlaylistItem::from_candidate(plan.id, candidate, index as u32 + 1)
            })
            .collect();
        let total_duration_secs = outcome.selection.total_duration_secs;

        self.day_plans
            .replace_items(&plan.id, &items, total_duration_secs)
            .await?;

        tracing::info!(
            user_id = %command.user_id,
            cycle_id = %cycle.id,
            day_number = command.day_number,
            item_count = items.len(),
            total_duration_secs,
            regenerate = command.regenerate,
            "day playlist generated"
        );

        Ok(DayOutcome::Generated(GeneratedDay {
            day_number: command.day_number,
            day_type: Some(outcome.day_type),
            items,
            total_duration_secs,
            reused: false,
        }))
    }
}
