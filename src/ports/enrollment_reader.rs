//! Enrollment reader port.
//!
//! Read access to program enrollments. Enrollment lifecycle is owned
//! elsewhere; the engine only needs to know whether a user is actively
//! enrolled and how many programs they are running.

use crate::domain::foundation::{DomainError, ProgramId, UserId};
use async_trait::async_trait;

/// Read port for enrollment state.
#[async_trait]
pub trait EnrollmentReader: Send + Sync {
    /// Check whether the user has an ACTIVE enrollment in the program.
    async fn has_active(&self, user_id: &UserId, program_id: &ProgramId)
        -> Result<bool, DomainError>;

    /// Count the user's ACTIVE enrollments across all programs.
    async fn count_active(&self, user_id: &UserId) -> Result<u32, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn enrollment_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn EnrollmentReader) {}
    }
}
