//! Engine configuration.
//!
//! Every policy constant the engine uses flows from this struct so the
//! generation pipeline stays deterministic and testable; nothing reads
//! the environment at decision time.

use serde::Deserialize;

use super::error::ValidationError;

/// Tunable constants for cycle provisioning and playlist generation.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Number of days in a provisioned cycle.
    #[serde(default = "default_cycle_length_days")]
    pub cycle_length_days: u32,

    /// Days unlocked without a paid subscription.
    #[serde(default = "default_free_unlock_days")]
    pub free_unlock_days: u32,

    /// Fallback daily duration target, in minutes.
    #[serde(default = "default_minutes_per_day")]
    pub default_minutes_per_day: u32,

    /// Recency exclusion window, in days.
    #[serde(default = "default_recency_lookback_days")]
    pub recency_lookback_days: u32,

    /// Concurrent enrollment cap for free-tier users.
    #[serde(default = "default_free_max_active_programs")]
    pub free_max_active_programs: u32,

    /// Concurrent enrollment cap for paid-tier users.
    #[serde(default = "default_paid_max_active_programs")]
    pub paid_max_active_programs: u32,
}

impl EngineConfig {
    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cycle_length_days == 0 {
            return Err(ValidationError::InvalidCycleLength);
        }
        if self.free_unlock_days > self.cycle_length_days {
            return Err(ValidationError::FreeUnlockExceedsCycle);
        }
        if self.default_minutes_per_day == 0 {
            return Err(ValidationError::InvalidMinutesPerDay);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cycle_length_days: default_cycle_length_days(),
            free_unlock_days: default_free_unlock_days(),
            default_minutes_per_day: default_minutes_per_day(),
            recency_lookback_days: default_recency_lookback_days(),
            free_max_active_programs: default_free_max_active_programs(),
            paid_max_active_programs: default_paid_max_active_programs(),
        }
    }
}

fn default_cycle_length_days() -> u32 {
    21
}

fn default_free_unlock_days() -> u32 {
    5
}

fn default_minutes_per_day() -> u32 {
    20
}

fn default_recency_lookback_days() -> u32 {
    7
}

fn default_free_max_active_programs() -> u32 {
    1
}

fn default_paid_max_active_programs() -> u32 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_current_policy() {
        let config = EngineConfig::default();
        assert_eq!(config.cycle_length_days, 21);
        assert_eq!(config.free_unlock_days, 5);
        assert_eq!(config.default_minutes_per_day, 20);
        assert_eq!(config.recency_lookback_days, 7);
        assert_eq!(config.free_max_active_programs, 1);
        assert_eq!(config.paid_max_active_programs, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn free_unlock_cannot_exceed_cycle_length() {
        let config = EngineConfig {
            free_unlock_days: 30,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::FreeUnlockExceedsCycle)
        ));
    }

    #[test]
    fn zero_cycle_length_is_rejected() {
        let config = EngineConfig {
            cycle_length_days: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
