//! In-memory adapters.
//!
//! Lock-guarded implementations of every port, used by integration
//! tests and local wiring without a database.

mod candidates;
mod enrollments;
mod entitlement;
mod programs;
mod store;

pub use candidates::InMemoryCandidateRepository;
pub use enrollments::InMemoryEnrollmentReader;
pub use entitlement::InMemoryEntitlementProvider;
pub use programs::InMemoryProgramLookup;
pub use store::InMemoryCycleStore;
