//! PostgreSQL implementation of EntitlementProvider.
//!
//! Derives the policy from the subscriptions table on every call. An
//! absent or lapsed subscription maps to the free tier; only a row that
//! is active and inside its paid period yields the paid policy.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::config::EngineConfig;
use crate::domain::entitlement::SubscriptionPolicy;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::EntitlementProvider;

/// PostgreSQL implementation of the EntitlementProvider port.
pub struct PostgresEntitlementProvider {
    pool: PgPool,
    config: EngineConfig,
}

impl PostgresEntitlementProvider {
    /// Creates a new PostgresEntitlementProvider.
    pub fn new(pool: PgPool, config: EngineConfig) -> Self {
        Self { pool, config }
    }
}

#[async_trait]
impl EntitlementProvider for PostgresEntitlementProvider {
    async fn policy_for(&self, user_id: &UserId) -> Result<SubscriptionPolicy, DomainError> {
        let paid: Option<(bool,)> = sqlx::query_as(
            r#"
            SELECT TRUE
            FROM subscriptions
            WHERE user_id = $1
              AND status = 'active'
              AND current_period_end > NOW()
            LIMIT 1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to query subscription: {}", e)))?;

        Ok(if paid.is_some() {
            SubscriptionPolicy::paid(&self.config)
        } else {
            SubscriptionPolicy::free(&self.config)
        })
    }
}
