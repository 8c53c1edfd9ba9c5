//! Subscription plans, admin overrides, and the gating resolver.

pub mod domain;
pub mod plans;
pub mod resolver;
pub mod router;
pub mod service;
pub mod store;

pub use domain::{
    BillingInterval, ContentType, Feature, PlanLimits, Quota, SubscriptionPlan,
    SubscriptionStatus, UserSubscription,
};
pub use plans::PlanCatalog;
pub use resolver::{CreditAllowance, CreditOutcome, EntitlementResolver};
pub use router::entitlement_router;
pub use service::{EntitlementService, EntitlementSummary};
pub use store::{StoreError, SubscriptionStore};
