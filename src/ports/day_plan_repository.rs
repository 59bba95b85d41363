//! Day plan repository port.
//!
//! Persistence contract for day plans and their playlist items.
//!
//! # Design
//!
//! - **Atomic replacement**: `replace_items` is the delete+insert+update
//!   sequence of a (re)generation as one all-or-nothing unit, so readers
//!   never observe an empty-then-partial playlist and a failure leaves
//!   the prior playlist intact.
//! - **Stored order**: items are listed by their persisted 1-based
//!   `display_order`, which is the generation-time selection order.

use std::collections::{HashMap, HashSet};

use crate::domain::cycle::{DayPlan, PlaylistItem};
use crate::domain::foundation::{CycleId, DayPlanId, DomainError, VideoAssetId};
use async_trait::async_trait;

/// Repository port for day plans and playlist items.
#[async_trait]
pub trait DayPlanRepository: Send + Sync {
    /// Find one day's plan within a cycle.
    ///
    /// Returns `None` if the cycle has no plan for that day number.
    async fn find_day(
        &self,
        cycle_id: &CycleId,
        day_number: u32,
    ) -> Result<Option<DayPlan>, DomainError>;

    /// List every day plan of a cycle, ordered by day number ascending.
    async fn list_days(&self, cycle_id: &CycleId) -> Result<Vec<DayPlan>, DomainError>;

    /// List a day's playlist items in stored display order.
    async fn list_items(&self, day_plan_id: &DayPlanId) -> Result<Vec<PlaylistItem>, DomainError>;

    /// Count playlist items per day for a whole cycle.
    ///
    /// Days without items are absent from the map.
    async fn item_counts(&self, cycle_id: &CycleId) -> Result<HashMap<u32, u32>, DomainError>;

    /// Collect the video asset ids used on days `from_day..=to_day` of
    /// a cycle. Feeds the recency exclusion set.
    async fn asset_ids_in_range(
        &self,
        cycle_id: &CycleId,
        from_day: u32,
        to_day: u32,
    ) -> Result<HashSet<VideoAssetId>, DomainError>;

    /// List the day numbers in `from_day..=to_day` that already have at
    /// least one playlist item, ascending.
    async fn days_with_items(
        &self,
        cycle_id: &CycleId,
        from_day: u32,
        to_day: u32,
    ) -> Result<Vec<u32>, DomainError>;

    /// Atomically replace a day's playlist: delete existing items,
    /// insert the given ones, and update the plan's cached total.
    ///
    /// # Errors
    ///
    /// - `DayPlanNotFound` if the plan does not exist
    /// - `DatabaseError` on persistence failure; prior items are kept
    async fn replace_items(
        &self,
        day_plan_id: &DayPlanId,
        items: &[PlaylistItem],
        total_duration_secs: u32,
    ) -> Result<(), DomainError>;
}
