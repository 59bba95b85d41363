//! In-memory cycle and day-plan store.
//!
//! Backs both persistence ports with a single `RwLock`-guarded state so
//! the atomicity contracts (find-or-create, replace-items) hold the same
//! way they do in the PostgreSQL adapters. Used by integration tests and
//! local wiring; not intended for production.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::cycle::{Cycle, DayPlan, PlaylistItem};
use crate::domain::foundation::{
    CycleId, DayPlanId, DomainError, ErrorCode, ProgramId, UserId, VideoAssetId,
};
use crate::ports::{CycleRepository, DayPlanRepository};

#[derive(Default)]
struct StoreState {
    cycles: Vec<Cycle>,
    day_plans: Vec<DayPlan>,
    items: Vec<PlaylistItem>,
}

/// In-memory implementation of `CycleRepository` and `DayPlanRepository`.
#[derive(Default)]
pub struct InMemoryCycleStore {
    state: RwLock<StoreState>,
}

impl InMemoryCycleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all playlist items for assertions in tests.
    pub async fn all_items(&self) -> Vec<PlaylistItem> {
        self.state.read().await.items.clone()
    }
}

#[async_trait]
impl CycleRepository for InMemoryCycleStore {
    async fn find_by_user_and_program(
        &self,
        user_id: &UserId,
        program_id: &ProgramId,
    ) -> Result<Option<Cycle>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .cycles
            .iter()
            .find(|c| c.user_id == *user_id && c.program_id == *program_id)
            .cloned())
    }

    async fn find_or_create(
        &self,
        cycle: Cycle,
        skeleton: Vec<DayPlan>,
    ) -> Result<Cycle, DomainError> {
        // Single write lock spans the re-check and the insert, the
        // in-memory equivalent of the provisioning transaction.
        let mut state = self.state.write().await;
        if let Some(existing) = state
            .cycles
            .iter()
            .find(|c| c.user_id == cycle.user_id && c.program_id == cycle.program_id)
        {
            return Ok(existing.clone());
        }
        state.cycles.push(cycle.clone());
        state.day_plans.extend(skeleton);
        Ok(cycle)
    }
}

#[async_trait]
impl DayPlanRepository for InMemoryCycleStore {
    async fn find_day(
        &self,
        cycle_id: &CycleId,
        day_number: u32,
    ) -> Result<Option<DayPlan>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .day_plans
            .iter()
            .find(|p| p.cycle_id == *cycle_id && p.day_number == day_number)
            .cloned())
    }

    async fn list_days(&self, cycle_id: &CycleId) -> Result<Vec<DayPlan>, DomainError> {
        let state = self.state.read().await;
        let mut days: Vec<DayPlan> = state
            .day_plans
            .iter()
            .filter(|p| p.cycle_id == *cycle_id)
            .cloned()
            .collect();
        days.sort_by_key(|p| p.day_number);
        Ok(days)
    }

    async fn list_items(&self, day_plan_id: &DayPlanId) -> Result<Vec<PlaylistItem>, DomainError> {
        let state = self.state.read().await;
        let mut items: Vec<PlaylistItem> = state
            .items
            .iter()
            .filter(|i| i.day_plan_id == *day_plan_id)
            .cloned()
            .collect();
        items.sort_by_key(|i| i.display_order);
        Ok(items)
    }

    async fn item_counts(&self, cycle_id: &CycleId) -> Result<HashMap<u32, u32>, DomainError> {
        let state = self.state.read().await;
        let mut counts = HashMap::new();
        for plan in state.day_plans.iter().filter(|p| p.cycle_id == *cycle_id) {
            let count = state.items.iter().filter(|i| i.day_plan_id == plan.id).count() as u32;
            if count > 0 {
                counts.insert(plan.day_number, count);
            }
        }
        Ok(counts)
    }

    async fn asset_ids_in_range(
        &self,
        cycle_id: &CycleId,
        from_day: u32,
        to_day: u32,
    ) -> Result<HashSet<VideoAssetId>, DomainError> {
        let state = self.state.read().await;
        let plan_ids: HashSet<DayPlanId> = state
            .day_plans
            .iter()
            .filter(|p| {
                p.cycle_id == *cycle_id && p.day_number >= from_day && p.day_number <= to_day
            })
            .map(|p| p.id)
            .collect();
        Ok(state
            .items
            .iter()
            .filter(|i| plan_ids.contains(&i.day_plan_id))
            .map(|i| i.video_asset_id)
            .collect())
    }

    async fn days_with_items(
        &self,
        cycle_id: &CycleId,
        from_day: u32,
        to_day: u32,
    ) -> Result<Vec<u32>, DomainError> {
        let state = self.state.read().await;
        let mut days: Vec<u32> = state
            .day_plans
            .iter()
            .filter(|p| {
                p.cycle_id == *cycle_id
                    && p.day_number >= from_day
                    && p.day_number <= to_day
                    && state.items.iter().any(|i| i.day_plan_id == p.id)
            })
            .map(|p| p.day_number)
            .collect();
        days.sort_unstable();
        Ok(days)
    }

    async fn replace_items(
        &self,
        day_plan_id: &DayPlanId,
        items: &[PlaylistItem],
        total_duration_secs: u32,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let plan_index = state
            .day_plans
            .iter()
            .position(|p| p.id == *day_plan_id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::DayPlanNotFound, "Day plan does not exist")
                    .with_detail("day_plan_id", day_plan_id.to_string())
            })?;
        state.items.retain(|i| i.day_plan_id != *day_plan_id);
        state.items.extend_from_slice(items);
        state.day_plans[plan_index].total_duration_secs = total_duration_secs;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cycle::DayType;
    use crate::domain::selection::{CandidateItem, SequenceRole};

    fn ids() -> (UserId, ProgramId) {
        (UserId::new(), ProgramId::new())
    }

    fn candidate(duration_secs: u32) -> CandidateItem {
        CandidateItem {
            id: VideoAssetId::new(),
            sequence_role: SequenceRole::Adjustable,
            duration_secs,
            category_tags: Vec::new(),
            contraindication_tags: Vec::new(),
            level: None,
        }
    }

    #[tokio::test]
    async fn find_or_create_is_idempotent() {
        let store = InMemoryCycleStore::new();
        let (user_id, program_id) = ids();

        let first = Cycle::provision(user_id, program_id, 21, 20);
        let skeleton = first.skeleton(None);
        let created = store.find_or_create(first.clone(), skeleton).await.unwrap();
        assert_eq!(created.id, first.id);

        let second = Cycle::provision(user_id, program_id, 21, 20);
        let winner = store
            .find_or_create(second.clone(), second.skeleton(None))
            .await
            .unwrap();
        assert_eq!(winner.id, first.id);
        assert_eq!(store.list_days(&first.id).await.unwrap().len(), 21);
        assert!(store.list_days(&second.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_items_swaps_wholesale_and_updates_total() {
        let store = InMemoryCycleStore::new();
        let (user_id, program_id) = ids();
        let cycle = Cycle::provision(user_id, program_id, 21, 20);
        let skeleton = cycle.skeleton(None);
        let plan_id = skeleton[0].id;
        store.find_or_create(cycle.clone(), skeleton).await.unwrap();

        let old = vec![PlaylistItem::from_candidate(plan_id, &candidate(300), 1)];
        store.replace_items(&plan_id, &old, 300).await.unwrap();

        let new = vec![
            PlaylistItem::from_candidate(plan_id, &candidate(200), 1),
            PlaylistItem::from_candidate(plan_id, &candidate(400), 2),
        ];
        store.replace_items(&plan_id, &new, 600).await.unwrap();

        let stored = store.list_items(&plan_id).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored, new);
        let plan = store.find_day(&cycle.id, 1).await.unwrap().unwrap();
        assert_eq!(plan.total_duration_secs, 600);
    }

    #[tokio::test]
    async fn replace_items_rejects_unknown_plan() {
        let store = InMemoryCycleStore::new();
        let err = store
            .replace_items(&DayPlanId::new(), &[], 0)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DayPlanNotFound);
    }

    #[tokio::test]
    async fn range_queries_report_committed_days() {
        let store = InMemoryCycleStore::new();
        let (user_id, program_id) = ids();
        let cycle = Cycle::provision(user_id, program_id, 21, 20);
        let skeleton = cycle.skeleton(None);
        let day2 = skeleton[1].id;
        store.find_or_create(cycle.clone(), skeleton).await.unwrap();

        let item = PlaylistItem::from_candidate(day2, &candidate(300), 1);
        store.replace_items(&day2, &[item.clone()], 300).await.unwrap();

        assert_eq!(store.days_with_items(&cycle.id, 1, 7).await.unwrap(), vec![2]);
        assert!(store.days_with_items(&cycle.id, 3, 7).await.unwrap().is_empty());

        let used = store.asset_ids_in_range(&cycle.id, 1, 7).await.unwrap();
        assert!(used.contains(&item.video_asset_id));
        assert!(store.asset_ids_in_range(&cycle.id, 3, 7).await.unwrap().is_empty());

        let counts = store.item_counts(&cycle.id).await.unwrap();
        assert_eq!(counts.get(&2), Some(&1));
        assert_eq!(counts.get(&1), None);
    }
}
