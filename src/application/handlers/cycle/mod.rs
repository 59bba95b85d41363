//! Cycle handlers - provisioning, day generation, previews, ranges.

mod candidate_pool;
mod generate_day;
mod generate_range;
mod get_cycle_overview;
mod preview_day;
mod provision_cycle;

pub use generate_day::{
    DayOutcome, GenerateDayCommand, GenerateDayHandler, GeneratedDay, LockReason, LockedDay,
};
pub use generate_range::{DayError, GenerateRangeCommand, GenerateRangeHandler, RangeResult};
pub use get_cycle_overview::{
    CycleOverview, DaySummary, GetCycleOverviewHandler, GetCycleOverviewQuery,
};
pub use preview_day::{DayPreview, PreviewDayHandler, PreviewDayQuery};
pub use provision_cycle::{ProvisionCycleCommand, ProvisionCycleHandler, ProvisionedCycle};
