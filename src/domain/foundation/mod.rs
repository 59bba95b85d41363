//! Foundation layer - shared value objects and error types.
//!
//! These are the building blocks used by every other domain module:
//! strongly-typed identifiers, an immutable UTC timestamp, and the
//! standard domain error taxonomy.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CycleId, DayPlanId, PlaylistItemId, ProgramId, UserId, VideoAssetId};
pub use timestamp::Timestamp;
