//! In-memory entitlement provider.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::config::EngineConfig;
use crate::domain::entitlement::SubscriptionPolicy;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::EntitlementProvider;

/// In-memory implementation of `EntitlementProvider`.
///
/// Users registered as paid get the paid policy; everyone else, known
/// or not, gets the free policy.
pub struct InMemoryEntitlementProvider {
    config: EngineConfig,
    paid_users: RwLock<HashSet<UserId>>,
}

impl InMemoryEntitlementProvider {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            paid_users: RwLock::new(HashSet::new()),
        }
    }

    /// Marks a user as holding an active paid subscription.
    pub async fn grant_paid(&self, user_id: UserId) {
        self.paid_users.write().await.insert(user_id);
    }

    /// Reverts a user to the free tier.
    pub async fn revoke_paid(&self, user_id: &UserId) {
        self.paid_users.write().await.remove(user_id);
    }
}

#[async_trait]
impl EntitlementProvider for InMemoryEntitlementProvider {
    async fn policy_for(&self, user_id: &UserId) -> Result<SubscriptionPolicy, DomainError> {
        let paid = self.paid_users.read().await.contains(user_id);
        Ok(if paid {
            SubscriptionPolicy::paid(&self.config)
        } else {
            SubscriptionPolicy::free(&self.config)
        })
    }
}
