//! Cycle domain - cycles, day plans, playlist items, and day typing.

mod cycle;
mod day_plan;
pub mod day_type;

pub use cycle::Cycle;
pub use day_plan::{total_duration_secs, DayPlan, PlaylistItem};
pub use day_type::{DayType, RhythmPattern, ScheduledDayType};
