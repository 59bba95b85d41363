//! Entitlement domain - subscription tiers and day locking.

mod policy;

pub use policy::{SubscriptionPolicy, SubscriptionTier};
