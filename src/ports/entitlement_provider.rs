//! Entitlement provider port.
//!
//! Derives the subscription policy governing day locks and enrollment
//! caps. Computed fresh per request from subscription state; nothing is
//! cached or persisted by this engine.

use crate::domain::entitlement::SubscriptionPolicy;
use crate::domain::foundation::{DomainError, UserId};
use async_trait::async_trait;

/// Port for deriving a user's subscription policy.
#[async_trait]
pub trait EntitlementProvider: Send + Sync {
    /// Compute the policy for a user.
    ///
    /// An unknown user or one without an active paid subscription maps
    /// to the free-tier policy, never an error.
    async fn policy_for(&self, user_id: &UserId) -> Result<SubscriptionPolicy, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn entitlement_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn EntitlementProvider) {}
    }
}
