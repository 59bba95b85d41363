//! Cycle repository port (write side).
//!
//! Defines the contract for persisting and retrieving Cycle aggregates.
//!
//! # Design
//!
//! - **Find-or-create provisioning**: The only guarded race in the
//!   engine. `find_or_create` re-checks for an existing (user, program)
//!   cycle inside one transaction before inserting the cycle and its
//!   day-plan skeleton, so concurrent double-submission yields the same
//!   cycle instead of a duplicate or a uniqueness error.

use crate::domain::cycle::{Cycle, DayPlan};
use crate::domain::foundation::{DomainError, ProgramId, UserId};
use async_trait::async_trait;

/// Repository port for Cycle aggregate persistence.
#[async_trait]
pub trait CycleRepository: Send + Sync {
    /// Find the cycle for a (user, program) pair.
    ///
    /// Returns `None` if the user has never provisioned this program.
    async fn find_by_user_and_program(
        &self,
        user_id: &UserId,
        program_id: &ProgramId,
    ) -> Result<Option<Cycle>, DomainError>;

    /// Atomically find the existing cycle for the pair or create the
    /// given one together with its day-plan skeleton.
    ///
    /// Returns the existing cycle untouched when one is found; the
    /// candidate cycle and skeleton are discarded in that case.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure; nothing is written.
    async fn find_or_create(
        &self,
        cycle: Cycle,
        skeleton: Vec<DayPlan>,
    ) -> Result<Cycle, DomainError>;
}
