//! Candidate pool construction and selection for one day.
//!
//! Shared by the generate and preview handlers: both resolve the day
//! type, build the recency exclusion set from the preceding lookback
//! window, assemble the candidate pool, and run the selection engine.
//! Only the generate path persists the result.

use crate::config::EngineConfig;
use crate::domain::cycle::day_type::{self, ScheduledDayType};
use crate::domain::cycle::{Cycle, DayType};
use crate::domain::foundation::DomainError;
use crate::domain::selection::{self, Selection};
use crate::ports::{CandidateFilter, CandidateRepository, DayPlanRepository, ProgramLookup};

/// Per-request inputs for one day's selection run.
pub(super) struct SelectionRequest<'a> {
    pub cycle: &'a Cycle,
    pub day_number: u32,
    /// The user's own minutes preference, when supplied with the request.
    pub minutes_preference: Option<u32>,
    /// Restrict candidates to this difficulty level when set.
    pub preferred_level: Option<String>,
}

/// A completed selection run, ready to persist or to return as a preview.
pub(super) struct SelectionOutcome {
    pub day_type: DayType,
    pub selection: Selection,
    pub target_duration_secs: u32,
}

/// Resolves the day type, builds the candidate pool, and runs selection.
pub(super) async fn run_selection(
    day_plans: &dyn DayPlanRepository,
    candidates: &dyn CandidateRepository,
    programs: &dyn ProgramLookup,
    config: &EngineConfig,
    request: SelectionRequest<'_>,
) -> Result<SelectionOutcome, DomainError> {
    let defaults = programs.get_defaults(&request.cycle.program_id).await?;

    // The provisioned skeleton is the stored schedule; its day types
    // take precedence over re-deriving from the rhythm pattern.
    let schedule: Vec<ScheduledDayType> = day_plans
        .list_days(&request.cycle.id)
        .await?
        .iter()
        .map(|plan| ScheduledDayType {
            day_number: plan.day_number,
            day_type: plan.day_type,
        })
        .collect();
    let resolved = day_type::resolve_scheduled(
        &schedule,
        defaults.rhythm_pattern.as_ref(),
        request.day_number,
    );

    let minutes = effective_minutes(request.minutes_preference, request.cycle, config);
    let target_duration_secs = minutes * 60;

    let excluded = if request.day_number > 1 {
        let lookback_from = request
            .day_number
            .saturating_sub(config.recency_lookback_days)
            .max(1);
        day_plans
            .asset_ids_in_range(&request.cycle.id, lookback_from, request.day_number - 1)
            .await?
    } else {
        Default::default()
    };

    let filter = CandidateFilter {
        level: request.preferred_level,
        ..CandidateFilter::default()
    };
    let pool = candidates.list_active(&filter).await?;
    // No upstream source records user contraindications yet, so the
    // filter currently runs with an empty list.
    let pool = selection::filter_contraindicated(pool, &[]);

    let selection = selection::select(pool, target_duration_secs, &excluded);

    Ok(SelectionOutcome {
        day_type: resolved,
        selection,
        target_duration_secs,
    })
}

/// Minutes preference fallback chain: the request's own preference,
/// then the cycle's stored preference, then the configured default.
fn effective_minutes(requested: Option<u32>, cycle: &Cycle, config: &EngineConfig) -> u32 {
    requested
        .filter(|minutes| *minutes > 0)
        .unwrap_or(if cycle.minutes_preference > 0 {
            cycle.minutes_preference
        } else {
            config.default_minutes_per_day
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ProgramId, UserId};

    fn cycle_with_minutes(minutes: u32) -> Cycle {
        Cycle::provision(UserId::new(), ProgramId::new(), 21, minutes)
    }

    #[test]
    fn requested_minutes_win() {
        let config = EngineConfig::default();
        assert_eq!(effective_minutes(Some(45), &cycle_with_minutes(30), &config), 45);
    }

    #[test]
    fn cycle_preference_is_the_first_fallback() {
        let config = EngineConfig::default();
        assert_eq!(effective_minutes(None, &cycle_with_minutes(30), &config), 30);
        assert_eq!(effective_minutes(Some(0), &cycle_with_minutes(30), &config), 30);
    }

    #[test]
    fn configured_default_is_the_last_resort() {
        let config = EngineConfig::default();
        assert_eq!(effective_minutes(None, &cycle_with_minutes(0), &config), 20);
    }
}
