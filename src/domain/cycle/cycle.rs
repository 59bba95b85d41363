//! Cycle aggregate entity.
//!
//! A Cycle is one user's run of a program: a fixed-length span of days,
//! each with its own plan and playlist. Provisioning creates at most one
//! cycle per (user, program) pair; the find-or-create transaction in the
//! repository is what enforces that, not a uniqueness error path.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CycleId, ProgramId, Timestamp, UserId};

use super::day_type::{self, RhythmPattern};
use super::DayPlan;

/// Cycle aggregate - a user's multi-day run of a program.
///
/// # Invariants
///
/// - At most one cycle exists per (user_id, program_id)
/// - `cycle_length_days` is fixed at provisioning time
/// - Immutable after creation except through its day plans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    /// Unique identifier for this cycle.
    pub id: CycleId,

    /// User the cycle belongs to.
    pub user_id: UserId,

    /// Program the cycle runs through.
    pub program_id: ProgramId,

    /// When the cycle was activated; None until activation.
    pub start_date: Option<Timestamp>,

    /// Number of days in the cycle.
    pub cycle_length_days: u32,

    /// Fallback daily duration target, in minutes.
    pub minutes_preference: u32,

    /// When the cycle was created.
    pub created_at: Timestamp,
}

impl Cycle {
    /// Creates a freshly provisioned cycle, activated immediately.
    pub fn provision(
        user_id: UserId,
        program_id: ProgramId,
        cycle_length_days: u32,
        minutes_preference: u32,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: CycleId::new(),
            user_id,
            program_id,
            start_date: Some(now),
            cycle_length_days,
            minutes_preference,
            created_at: now,
        }
    }

    /// Builds the day-plan skeleton for this cycle: one empty plan per
    /// day with its day type resolved from the program's rhythm pattern.
    pub fn skeleton(&self, pattern: Option<&RhythmPattern>) -> Vec<DayPlan> {
        (1..=self.cycle_length_days)
            .map(|day_number| {
                DayPlan::skeleton(self.id, day_number, day_type::resolve(pattern, day_number))
            })
            .collect()
    }

    /// Checks whether a day number falls inside this cycle.
    pub fn contains_day(&self, day_number: u32) -> bool {
        (1..=self.cycle_length_days).contains(&day_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cycle::DayType;

    fn cycle() -> Cycle {
        Cycle::provision(UserId::new(), ProgramId::new(), 21, 20)
    }

    #[test]
    fn provisioned_cycle_is_activated() {
        let cycle = cycle();
        assert!(cycle.start_date.is_some());
        assert_eq!(cycle.cycle_length_days, 21);
        assert_eq!(cycle.minutes_preference, 20);
    }

    #[test]
    fn skeleton_covers_every_day_with_zero_duration() {
        let cycle = cycle();
        let plans = cycle.skeleton(None);
        assert_eq!(plans.len(), 21);
        for (i, plan) in plans.iter().enumerate() {
            assert_eq!(plan.day_number, i as u32 + 1);
            assert_eq!(plan.total_duration_secs, 0);
            assert_eq!(plan.day_type, Some(DayType::Gentle));
            assert_eq!(plan.cycle_id, cycle.id);
        }
    }

    #[test]
    fn skeleton_applies_rhythm_pattern() {
        let cycle = cycle();
        let pattern = RhythmPattern::new(vec![2, 1], vec!["gentle", "build"]);
        let plans = cycle.skeleton(Some(&pattern));
        assert_eq!(plans[0].day_type, Some(DayType::Gentle));
        assert_eq!(plans[1].day_type, Some(DayType::Gentle));
        assert_eq!(plans[2].day_type, Some(DayType::Build));
        assert_eq!(plans[3].day_type, Some(DayType::Gentle));
    }

    #[test]
    fn contains_day_respects_bounds() {
        let cycle = cycle();
        assert!(cycle.contains_day(1));
        assert!(cycle.contains_day(21));
        assert!(!cycle.contains_day(0));
        assert!(!cycle.contains_day(22));
    }
}
