//! GetCycleOverviewHandler - read model for a cycle's progress.

use std::sync::Arc;

use crate::domain::cycle::DayType;
use crate::domain::foundation::{CycleId, DomainError, ErrorCode, ProgramId, Timestamp, UserId};
use crate::ports::{CycleRepository, DayPlanRepository, EntitlementProvider};

/// Query for a cycle overview.
#[derive(Debug, Clone)]
pub struct GetCycleOverviewQuery {
    pub user_id: UserId,
    pub program_id: ProgramId,
}

/// One day's summary within the overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub day_number: u32,
    pub day_type: Option<DayType>,
    pub item_count: u32,
    pub total_duration_secs: u32,
    pub is_locked: bool,
}

/// Read model of a cycle and its days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOverview {
    pub cycle_id: CycleId,
    pub program_id: ProgramId,
    pub start_date: Option<Timestamp>,
    pub cycle_length_days: u32,
    /// First locked day, or None when the whole cycle is unlocked.
    pub locked_from_day: Option<u32>,
    pub days: Vec<DaySummary>,
}

/// Handler assembling the cycle overview.
pub struct GetCycleOverviewHandler {
    cycles: Arc<dyn CycleRepository>,
    day_plans: Arc<dyn DayPlanRepository>,
    entitlements: Arc<dyn EntitlementProvider>,
}

impl GetCycleOverviewHandler {
    pub fn new(
        cycles: Arc<dyn CycleRepository>,
        day_plans: Arc<dyn DayPlanRepository>,
        entitlements: Arc<dyn EntitlementProvider>,
    ) -> Self {
        Self {
            cycles,
            day_plans,
            entitlements,
        }
    }

    pub async fn handle(&self, query: GetCycleOverviewQuery) -> Result<CycleOverview, DomainError> {
        let cycle = self
            .cycles
            .find_by_user_and_program(&query.user_id, &query.program_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::CycleNotFound, "No cycle provisioned for this program")
                    .with_detail("program_id", query.program_id.to_string())
            })?;

        let policy = self.entitlements.policy_for(&query.user_id).await?;
        let plans = self.day_plans.list_days(&cycle.id).await?;
        let counts = self.day_plans.item_counts(&cycle.id).await?;

        let days = plans
            .iter()
            .map(|plan| DaySummary {
                day_number: plan.day_number,
                day_type: plan.day_type,
                item_count: counts.get(&plan.day_number).copied().unwrap_or(0),
                total_duration_secs: plan.total_duration_secs,
                is_locked: policy.is_day_locked(plan.day_number),
            })
            .collect();

        let locked_from_day = (policy.locked_from_day() <= cycle.cycle_length_days)
            .then(|| policy.locked_from_day());

        Ok(CycleOverview {
            cycle_id: cycle.id,
            program_id: cycle.program_id,
            start_date: cycle.start_date,
            cycle_length_days: cycle.cycle_length_days,
            locked_from_day,
            days,
        })
    }
}
