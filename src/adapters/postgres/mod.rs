//! PostgreSQL adapters.
//!
//! sqlx-backed implementations of the persistence and collaborator
//! ports. Schema lives under `migrations/`.

mod candidate_repository;
mod cycle_repository;
mod day_plan_repository;
mod enrollment_reader;
mod entitlement_provider;
mod program_lookup;

pub use candidate_repository::PostgresCandidateRepository;
pub use cycle_repository::PostgresCycleRepository;
pub use day_plan_repository::PostgresDayPlanRepository;
pub use enrollment_reader::PostgresEnrollmentReader;
pub use entitlement_provider::PostgresEntitlementProvider;
pub use program_lookup::PostgresProgramLookup;

use crate::domain::cycle::DayType;
use crate::domain::foundation::DomainError;
use crate::domain::selection::SequenceRole;

pub(crate) fn day_type_to_str(day_type: DayType) -> &'static str {
    day_type.as_str()
}

pub(crate) fn sequence_role_to_str(role: SequenceRole) -> &'static str {
    role.as_str()
}

pub(crate) fn parse_sequence_role(s: &str) -> Result<SequenceRole, DomainError> {
    SequenceRole::parse(s)
        .ok_or_else(|| DomainError::database(format!("Invalid sequence_role value: {}", s)))
}
