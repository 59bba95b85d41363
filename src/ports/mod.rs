//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `CycleRepository` - Cycle aggregate persistence, find-or-create provisioning
//! - `DayPlanRepository` - Day plans and playlist items, atomic regeneration
//!
//! ## Collaborator Ports
//!
//! - `CandidateRepository` - Eligible content items from the catalog
//! - `EntitlementProvider` - Subscription policy derivation
//! - `ProgramLookup` - Program defaults (minutes, rhythm pattern)
//! - `EnrollmentReader` - Active enrollment checks

mod candidate_repository;
mod cycle_repository;
mod day_plan_repository;
mod enrollment_reader;
mod entitlement_provider;
mod program_lookup;

pub use candidate_repository::{CandidateFilter, CandidateRepository};
pub use cycle_repository::CycleRepository;
pub use day_plan_repository::DayPlanRepository;
pub use enrollment_reader::EnrollmentReader;
pub use entitlement_provider::EntitlementProvider;
pub use program_lookup::{ProgramDefaults, ProgramLookup};
