//! Subscription policy derivation and per-day lock gating.
//!
//! The policy is computed fresh per request from subscription state and
//! never persisted by this engine. Locking is a pure read-time gate on
//! day number, not a stored flag.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// Subscription tier determining how much of a cycle is unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    /// No subscription, or no active paid subscription.
    Free,
    /// An active paid subscription.
    Paid,
}

impl SubscriptionTier {
    /// Returns true for the paid tier.
    pub fn is_paid(&self) -> bool {
        matches!(self, SubscriptionTier::Paid)
    }
}

/// Derived entitlement policy for one user.
///
/// Governs two independent gates: the per-day content lock
/// (`day_number > free_unlock_days`) and the concurrent-enrollment cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPolicy {
    /// Tier the policy was derived from.
    pub tier: SubscriptionTier,

    /// Whether the user holds an active paid subscription.
    pub is_paid_active: bool,

    /// Highest day number accessible without payment.
    pub free_unlock_days: u32,

    /// Maximum number of concurrently active program enrollments.
    pub max_active_programs: u32,
}

impl SubscriptionPolicy {
    /// Policy for users without an active paid subscription.
    pub fn free(config: &EngineConfig) -> Self {
        Self {
            tier: SubscriptionTier::Free,
            is_paid_active: false,
            free_unlock_days: config.free_unlock_days,
            max_active_programs: config.free_max_active_programs,
        }
    }

    /// Policy for users with an active paid subscription.
    ///
    /// The unlock window spans the whole cycle, so no day is ever locked.
    pub fn paid(config: &EngineConfig) -> Self {
        Self {
            tier: SubscriptionTier::Paid,
            is_paid_active: true,
            free_unlock_days: config.cycle_length_days,
            max_active_programs: config.paid_max_active_programs,
        }
    }

    /// Checks whether the given day is behind the subscription lock.
    pub fn is_day_locked(&self, day_number: u32) -> bool {
        day_number > self.free_unlock_days
    }

    /// First day number that requires a paid subscription.
    pub fn locked_from_day(&self) -> u32 {
        self.free_unlock_days + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_policy_unlocks_five_days() {
        let policy = SubscriptionPolicy::free(&EngineConfig::default());
        assert_eq!(policy.free_unlock_days, 5);
        assert_eq!(policy.max_active_programs, 1);
        assert!(!policy.is_paid_active);
        assert_eq!(policy.tier, SubscriptionTier::Free);
    }

    #[test]
    fn paid_policy_unlocks_whole_cycle() {
        let policy = SubscriptionPolicy::paid(&EngineConfig::default());
        assert_eq!(policy.free_unlock_days, 21);
        assert_eq!(policy.max_active_programs, 5);
        assert!(policy.is_paid_active);
    }

    #[test]
    fn lock_gate_opens_at_free_unlock_boundary() {
        let policy = SubscriptionPolicy::free(&EngineConfig::default());
        assert!(!policy.is_day_locked(5));
        assert!(policy.is_day_locked(6));
        assert_eq!(policy.locked_from_day(), 6);
    }

    #[test]
    fn paid_policy_never_locks_a_cycle_day() {
        let policy = SubscriptionPolicy::paid(&EngineConfig::default());
        for day in 1..=21 {
            assert!(!policy.is_day_locked(day));
        }
    }
}
