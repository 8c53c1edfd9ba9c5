use super::domain::{
    BillingInterval, PlanLimits, Quota, SubscriptionPlan, UserSubscription,
};

/// The static subscription plan catalog.
pub struct PlanCatalog {
    plans: Vec<SubscriptionPlan>,
}

impl PlanCatalog {
    pub fn standard() -> Self {
        Self {
            plans: standard_plans(),
        }
    }

    pub fn plans(&self) -> &[SubscriptionPlan] {
        &self.plans
    }

    pub fn get(&self, id: &str) -> Option<&SubscriptionPlan> {
        self.plans.iter().find(|plan| plan.id == id)
    }

    pub fn free(&self) -> &SubscriptionPlan {
        self.get("free").expect("catalog always carries the free plan")
    }

    /// Plan backing a subscription record. Lapsed subscriptions and unknown
    /// plan ids resolve to the free plan rather than failing.
    pub fn plan_for(&self, subscription: &UserSubscription) -> &SubscriptionPlan {
        if !subscription.status.is_active() {
            return self.free();
        }
        self.get(&subscription.plan_id).unwrap_or_else(|| self.free())
    }
}

fn standard_plans() -> Vec<SubscriptionPlan> {
    vec![
        SubscriptionPlan {
            id: "free",
            name: "Free",
            price_cents: 0,
            billing_interval: BillingInterval::Monthly,
            cycle_credits: 0,
            limits: PlanLimits {
                tasks: Quota::Limited(10),
                articles: Quota::Limited(5),
                ai_designer: false,
                room_transforms: Quota::Limited(0),
            },
        },
        SubscriptionPlan {
            id: "premium",
            name: "Premium",
            price_cents: 999,
            billing_interval: BillingInterval::Monthly,
            cycle_credits: 5,
            limits: PlanLimits {
                tasks: Quota::Unlimited,
                articles: Quota::Unlimited,
                ai_designer: true,
                room_transforms: Quota::Limited(5),
            },
        },
        SubscriptionPlan {
            id: "complete",
            name: "Complete",
            price_cents: 4999,
            billing_interval: BillingInterval::Lifetime,
            cycle_credits: 20,
            limits: PlanLimits {
                tasks: Quota::Unlimited,
                articles: Quota::Unlimited,
                ai_designer: true,
                room_transforms: Quota::Unlimited,
            },
        },
    ]
}
