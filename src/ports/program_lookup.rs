//! Program lookup port.
//!
//! Read access to a program's provisioning defaults.

use crate::domain::cycle::RhythmPattern;
use crate::domain::foundation::{DomainError, ProgramId};
use async_trait::async_trait;

/// Defaults a program ships for cycle provisioning and generation.
#[derive(Debug, Clone, Default)]
pub struct ProgramDefaults {
    /// Default daily duration target, in minutes.
    pub minutes_per_day: Option<u32>,

    /// Repeating day-type rhythm, if the program defines one.
    pub rhythm_pattern: Option<RhythmPattern>,
}

/// Read port for program defaults.
#[async_trait]
pub trait ProgramLookup: Send + Sync {
    /// Fetch a program's defaults.
    ///
    /// # Errors
    ///
    /// - `ProgramNotFound` if no such program exists
    async fn get_defaults(&self, program_id: &ProgramId) -> Result<ProgramDefaults, DomainError>;
}
