use serde::Serialize;

use super::domain::{ContentType, Feature, UserSubscription};
use super::plans::PlanCatalog;
use crate::identity::RequestContext;

/// AI design credits available to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditAllowance {
    Unlimited,
    Remaining(u32),
}

impl CreditAllowance {
    pub fn is_available(self) -> bool {
        match self {
            CreditAllowance::Unlimited => true,
            CreditAllowance::Remaining(count) => count > 0,
        }
    }
}

/// Result of a credit debit attempt. `accepted == false` leaves the
/// subscription exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditOutcome {
    pub subscription: UserSubscription,
    pub accepted: bool,
}

/// Answers every plan-gating question, always consulting the admin override
/// before any plan logic.
pub struct EntitlementResolver {
    catalog: PlanCatalog,
}

impl EntitlementResolver {
    pub fn new(catalog: PlanCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    /// Whether the caller may use a gated feature.
    pub fn has_feature(
        &self,
        context: &RequestContext,
        subscription: &UserSubscription,
        feature: Feature,
    ) -> bool {
        if context.overrides_plan() {
            return true;
        }

        let plan = self.catalog.plan_for(subscription);
        match feature {
            Feature::AiDesigner => plan.limits.ai_designer,
        }
    }

    /// Whether one more item of `content` fits under the caller's quota.
    pub fn may_add(
        &self,
        context: &RequestContext,
        subscription: &UserSubscription,
        content: ContentType,
        current_count: u32,
    ) -> bool {
        if context.overrides_plan() {
            return true;
        }

        let limits = self.catalog.plan_for(subscription).limits;
        let quota = match content {
            ContentType::Tasks => limits.tasks,
            ContentType::Articles => limits.articles,
            ContentType::RoomTransforms => limits.room_transforms,
        };
        quota.allows(current_count)
    }

    pub fn credit_allowance(
        &self,
        context: &RequestContext,
        subscription: &UserSubscription,
    ) -> CreditAllowance {
        if context.overrides_plan() {
            CreditAllowance::Unlimited
        } else {
            CreditAllowance::Remaining(subscription.credits_remaining)
        }
    }

    /// Attempt to consume one AI design credit.
    ///
    /// A single transition: overriding callers are accepted without touching
    /// the counters; otherwise the debit either moves exactly one credit from
    /// remaining to used or is rejected with the record unchanged.
    pub fn use_credit(
        &self,
        context: &RequestContext,
        subscription: &UserSubscription,
    ) -> CreditOutcome {
        if context.overrides_plan() {
            return CreditOutcome {
                subscription: subscription.clone(),
                accepted: true,
            };
        }

        if subscription.credits_remaining == 0 {
            return CreditOutcome {
                subscription: subscription.clone(),
                accepted: false,
            };
        }

        let mut updated = subscription.clone();
        updated.credits_remaining -= 1;
        updated.credits_used += 1;
        CreditOutcome {
            subscription: updated,
            accepted: true,
        }
    }
}

impl Default for EntitlementResolver {
    fn default() -> Self {
        Self::new(PlanCatalog::standard())
    }
}
