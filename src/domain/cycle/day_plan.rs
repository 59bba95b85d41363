//! Day plan and playlist item entities.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CycleId, DayPlanId, PlaylistItemId, VideoAssetId};
use crate::domain::selection::{CandidateItem, SequenceRole};

use super::DayType;

/// One day's playlist container within a cycle.
///
/// # Invariants
///
/// - `day_number` is unique within its cycle and bounded by the cycle length
/// - `total_duration_secs` equals the summed duration of its playlist items
///   after every successful generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Unique identifier for this day plan.
    pub id: DayPlanId,

    /// Cycle this plan belongs to.
    pub cycle_id: CycleId,

    /// Position within the cycle, 1-based.
    pub day_number: u32,

    /// Derived category for the day; None until resolved.
    pub day_type: Option<DayType>,

    /// Denormalized sum of the attached items' durations, in seconds.
    pub total_duration_secs: u32,
}

impl DayPlan {
    /// Creates an empty skeleton plan for one day of a cycle.
    pub fn skeleton(cycle_id: CycleId, day_number: u32, day_type: DayType) -> Self {
        Self {
            id: DayPlanId::new(),
            cycle_id,
            day_number,
            day_type: Some(day_type),
            total_duration_secs: 0,
        }
    }
}

/// A single selected content entry attached to a day plan.
///
/// Playlist items are exclusively owned by their day plan: regeneration
/// deletes and recreates them wholesale, never patches them in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// Unique identifier for this playlist entry.
    pub id: PlaylistItemId,

    /// Day plan the entry belongs to.
    pub day_plan_id: DayPlanId,

    /// The selected video asset.
    pub video_asset_id: VideoAssetId,

    /// Role the asset plays in the day's sequence.
    pub sequence_role: SequenceRole,

    /// Duration of the asset, in seconds.
    pub duration_secs: u32,

    /// Category tags copied from the candidate at selection time.
    pub category_tags: Vec<String>,

    /// 1-based position within the day's playlist.
    pub display_order: u32,
}

impl PlaylistItem {
    /// Materializes a selected candidate as a playlist entry at the
    /// given 1-based position.
    pub fn from_candidate(day_plan_id: DayPlanId, candidate: &CandidateItem, display_order: u32) -> Self {
        Self {
            id: PlaylistItemId::new(),
            day_plan_id,
            video_asset_id: candidate.id,
            sequence_role: candidate.sequence_role,
            duration_secs: candidate.duration_secs,
            category_tags: candidate.category_tags.clone(),
            display_order,
        }
    }
}

/// Sums the durations of a set of playlist items.
///
/// Used to restore the `total_duration_secs` invariant on the owning
/// day plan after a successful generation.
pub fn total_duration_secs(items: &[PlaylistItem]) -> u32 {
    items.iter().map(|item| item.duration_secs).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(duration_secs: u32) -> CandidateItem {
        CandidateItem {
            id: VideoAssetId::new(),
            sequence_role: SequenceRole::Adjustable,
            duration_secs,
            category_tags: vec!["hips".to_string()],
            contraindication_tags: Vec::new(),
            level: None,
        }
    }

    #[test]
    fn skeleton_starts_empty() {
        let plan = DayPlan::skeleton(CycleId::new(), 3, DayType::Build);
        assert_eq!(plan.day_number, 3);
        assert_eq!(plan.total_duration_secs, 0);
        assert_eq!(plan.day_type, Some(DayType::Build));
    }

    #[test]
    fn from_candidate_copies_selection_time_fields() {
        let plan_id = DayPlanId::new();
        let source = candidate(420);
        let item = PlaylistItem::from_candidate(plan_id, &source, 2);
        assert_eq!(item.day_plan_id, plan_id);
        assert_eq!(item.video_asset_id, source.id);
        assert_eq!(item.duration_secs, 420);
        assert_eq!(item.category_tags, source.category_tags);
        assert_eq!(item.display_order, 2);
    }

    #[test]
    fn total_duration_sums_all_items() {
        let plan_id = DayPlanId::new();
        let items: Vec<PlaylistItem> = [300, 400, 200]
            .iter()
            .enumerate()
            .map(|(i, d)| PlaylistItem::from_candidate(plan_id, &candidate(*d), i as u32 + 1))
            .collect();
        assert_eq!(total_duration_secs(&items), 900);
        assert_eq!(total_duration_secs(&[]), 0);
    }
}
