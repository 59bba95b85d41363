//! GenerateRangeHandler - drives single-day generation across a span.
//!
//! Days are processed strictly in ascending order, one at a time,
//! because the recency exclusion for day N reads the items already
//! committed for days N-7..N-1. One day's failure is recorded and never
//! stops the rest of the batch; partial progress committed before an
//! error is retained.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::domain::foundation::{DomainError, ErrorCode, ProgramId, UserId};
use crate::ports::{CycleRepository, DayPlanRepository, EnrollmentReader, EntitlementProvider};

use super::generate_day::{DayOutcome, GenerateDayCommand, GenerateDayHandler};

/// Command to generate playlists for a span of days.
#[derive(Debug, Clone)]
pub struct GenerateRangeCommand {
    pub user_id: UserId,
    pub program_id: ProgramId,
    /// First day of the span; defaults to 1.
    pub from_day: Option<u32>,
    /// Last day of the span; defaults to the cycle length.
    pub to_day: Option<u32>,
    pub regenerate: bool,
    pub minutes_preference: Option<u32>,
    pub preferred_level: Option<String>,
}

/// A day-scoped failure captured during range iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayError {
    pub day_number: u32,
    pub code: String,
    pub message: String,
}

/// Aggregated outcome of a range generation request.
///
/// Every requested day lands in exactly one of the four buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeResult {
    pub from_day: u32,
    pub to_day_requested: u32,
    /// Upper bound actually attempted after entitlement shrinking.
    pub to_day_effective: u32,
    pub regenerate: bool,
    pub generated_days: Vec<u32>,
    pub skipped_days: Vec<u32>,
    pub locked_days: Vec<u32>,
    pub errors: Vec<DayError>,
}

/// Handler orchestrating generation across a day span.
pub struct GenerateRangeHandler {
    generator: Arc<GenerateDayHandler>,
    cycles: Arc<dyn CycleRepository>,
    day_plans: Arc<dyn DayPlanRepository>,
    entitlements: Arc<dyn EntitlementProvider>,
    enrollments: Arc<dyn EnrollmentReader>,
    config: EngineConfig,
}

impl GenerateRangeHandler {
    pub fn new(
        generator: Arc<GenerateDayHandler>,
        cycles: Arc<dyn CycleRepository>,
        day_plans: Arc<dyn DayPlanRepository>,
        entitlements: Arc<dyn EntitlementProvider>,
        enrollments: Arc<dyn EnrollmentReader>,
        config: EngineConfig,
    ) -> Self {
        Self {
            generator,
            cycles,
            day_plans,
            entitlements,
            enrollments,
            config,
        }
    }

    pub async fn handle(&self, command: GenerateRangeCommand) -> Result<RangeResult, DomainError> {
        let from_day = command.from_day.unwrap_or(1);
        let to_day = command.to_day.unwrap_or(self.config.cycle_length_days);
        self.validate_bounds(from_day, to_day)?;

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

        let policy = self.entitlements.policy_for(&command.user_id).await?;
        let to_day_effective = if policy.is_paid_active {
            to_day
        } else {
            to_day.min(policy.free_unlock_days)
        };

        // Days requested beyond the effective bound are locked outright,
        // never attempted.
        let mut locked_days: Vec<u32> =
            ((to_day_effective + 1).max(from_day)..=to_day).collect();

        let skipped_days: Vec<u32> = if !command.regenerate && from_day <= to_day_effective {
            self.day_plans
                .days_with_items(&cycle.id, from_day, to_day_effective)
                .await?
        } else {
            Vec::new()
        };

        let mut generated_days = Vec::new();
        let mut errors = Vec::new();

        for day_number in from_day..=to_day_effective {
            if skipped_days.contains(&day_number) {
                continue;
            }
            let outcome = self
                .generator
                .handle(GenerateDayCommand {
                    user_id: command.user_id,
                    program_id: command.program_id,
                    day_number,
                    regenerate: command.regenerate,
                    minutes_preference: command.minutes_preference,
                    preferred_level: command.preferred_level.clone(),
                })
                .await;
            match outcome {
                Ok(DayOutcome::Generated(_)) => generated_days.push(day_number),
                // The effective-range shrink should already exclude
                // locked days; classify anyway if the per-day check
                // still reports one.
                Ok(DayOutcome::Locked(_)) => locked_days.push(day_number),
                Err(err) => {
                    tracing::warn!(
                        user_id = %command.user_id,
                        day_number,
                        code = %err.code,
                        "day generation failed, continuing range"
                    );
                    errors.push(DayError {
                        day_number,
                        code: err.code.to_string(),
                        message: err.message,
                    });
                }
            }
        }

        locked_days.sort_unstable();
        locked_days.dedup();

        tracing::info!(
            user_id = %command.user_id,
            cycle_id = %cycle.id,
            from_day,
            to_day_requested = to_day,
            to_day_effective,
            generated = generated_days.len(),
            skipped = skipped_days.len(),
            locked = locked_days.len(),
            errored = errors.len(),
            "range generation finished"
        );

        Ok(RangeResult {
            from_day,
            to_day_requested: to_day,
            to_day_effective,
            regenerate: command.regenerate,
            generated_days,
            skipped_days,
            locked_days,
            errors,
        })
    }

    /// Rejects malformed bounds before any storage is touched.
    fn validate_bounds(&self, from_day: u32, to_day: u32) -> Result<(), DomainError> {
        let max = self.config.cycle_length_days;
        if from_day < 1 || from_day > max {
            return Err(DomainError::out_of_range(
                "from_day",
                format!("from_day must be in 1..={}", max),
            ));
        }
        if to_day < 1 || to_day > max {
            return Err(DomainError::out_of_range(
                "to_day",
                format!("to_day must be in 1..={}", max),
            ));
        }
        if from_day > to_day {
            return Err(DomainError::validation(
                "from_day",
                "from_day must not exceed to_day",
            ));
        }
        if to_day - from_day + 1 > max {
            return Err(DomainError::validation(
                "to_day",
                format!("Span must not exceed {} days", max),
            ));
        }
        Ok(())
    }
}
