//! ProvisionCycleHandler - creates a cycle exactly once per (user, program).
//!
//! Provisioning builds the cycle and its full day-plan skeleton (one
//! empty plan per day, day types resolved from the program's rhythm
//! pattern) and hands both to the repository's find-or-create, which is
//! the transaction that guards against concurrent double-submission.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::domain::cycle::Cycle;
use crate::domain::foundation::{DomainError, ErrorCode, ProgramId, UserId};
use crate::ports::{CycleRepository, EnrollmentReader, EntitlementProvider, ProgramLookup};

/// Command to provision a cycle for an enrolled user.
#[derive(Debug, Clone)]
pub struct ProvisionCycleCommand {
    pub user_id: UserId,
    pub program_id: ProgramId,
}

/// Result of provisioning.
#[derive(Debug, Clone)]
pub struct ProvisionedCycle {
    pub cycle: Cycle,
    /// False when an existing cycle was returned untouched.
    pub created: bool,
}

/// Handler for cycle provisioning.
pub struct ProvisionCycleHandler {
    cycles: Arc<dyn CycleRepository>,
    enrollments: Arc<dyn EnrollmentReader>,
    entitlements: Arc<dyn EntitlementProvider>,
    programs: Arc<dyn ProgramLookup>,
    config: EngineConfig,
}

impl ProvisionCycleHandler {
    pub fn new(
        cycles: Arc<dyn CycleRepository>,
        enrollments: Arc<dyn EnrollmentReader>,
        entitlements: Arc<dyn EntitlementProvider>,
        programs: Arc<dyn ProgramLookup>,
        config: EngineConfig,
    ) -> Self {
        Self {
            cycles,
            enrollments,
            entitlements,
            programs,
            config,
        }
    }

    pub async fn handle(
        &self,
        command: ProvisionCycleCommand,
    ) -> Result<ProvisionedCycle, DomainError> {
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

        // An existing cycle short-circuits before the enrollment cap:
        // re-provisioning what the user already has is always allowed.
        if let Some(existing) = self
            .cycles
            .find_by_user_and_program(&command.user_id, &command.program_id)
            .await?
        {
            return Ok(ProvisionedCycle {
                cycle: existing,
                created: false,
            });
        }

        let policy = self.entitlements.policy_for(&command.user_id).await?;
        let active = self.enrollments.count_active(&command.user_id).await?;
        if active > policy.max_active_programs {
            return Err(DomainError::new(
                ErrorCode::EnrollmentLimitReached,
                format!(
                    "Tier allows at most {} concurrent programs",
                    policy.max_active_programs
                ),
            ));
        }

        let defaults = self.programs.get_defaults(&command.program_id).await?;
        let minutes = defaults
            .minutes_per_day
            .filter(|m| *m > 0)
            .unwrap_or(self.config.default_minutes_per_day);

        let cycle = Cycle::provision(
            command.user_id,
            command.program_id,
            self.config.cycle_length_days,
            minutes,
        );
        let skeleton = cycle.skeleton(defaults.rhythm_pattern.as_ref());

        let candidate_id = cycle.id;
        let winner = self.cycles.find_or_create(cycle, skeleton).await?;
        let created = winner.id == candidate_id;

        if created {
            tracing::info!(
                user_id = %command.user_id,
                program_id = %command.program_id,
                cycle_id = %winner.id,
                cycle_length_days = winner.cycle_length_days,
                minutes_preference = winner.minutes_preference,
                "cycle provisioned"
            );
        }

        Ok(ProvisionedCycle {
            cycle: winner,
            created,
        })
    }
}
