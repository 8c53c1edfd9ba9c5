use serde::{Deserialize, Serialize};

/// Billing cadence of a subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    Monthly,
    Yearly,
    Lifetime,
}

impl BillingInterval {
    pub const fn label(self) -> &'static str {
        match self {
            BillingInterval::Monthly => "monthly",
            BillingInterval::Yearly => "yearly",
            BillingInterval::Lifetime => "lifetime",
        }
    }
}

/// Content allowance carried by a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quota {
    Limited(u32),
    Unlimited,
}

impl Quota {
    /// Whether one more item fits under this allowance.
    pub fn allows(self, current_count: u32) -> bool {
        match self {
            Quota::Limited(limit) => current_count < limit,
            Quota::Unlimited => true,
        }
    }

    pub fn limit(self) -> Option<u32> {
        match self {
            Quota::Limited(limit) => Some(limit),
            Quota::Unlimited => None,
        }
    }
}

/// Per-plan access limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    pub tasks: Quota,
    pub articles: Quota,
    pub ai_designer: bool,
    pub room_transforms: Quota,
}

/// One entry of the static plan catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionPlan {
    pub id: &'static str,
    pub name: &'static str,
    pub price_cents: u32,
    pub billing_interval: BillingInterval,
    /// AI design credits granted per billing cycle.
    pub cycle_credits: u32,
    pub limits: PlanLimits,
}

/// Billing state of a member's subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    PastDue,
    Canceled,
}

impl SubscriptionStatus {
    pub const fn is_active(self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }

    pub const fn label(self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Canceled => "canceled",
        }
    }
}

/// A member's subscription record, owned by the billing collaborator.
///
/// `credits_used + credits_remaining` is conserved by every operation here;
/// only a billing-cycle replenishment (out of scope) changes the sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSubscription {
    pub plan_id: String,
    pub status: SubscriptionStatus,
    pub credits_remaining: u32,
    pub credits_used: u32,
}

impl UserSubscription {
    /// Default record for members who never purchased a plan.
    pub fn free() -> Self {
        Self {
            plan_id: "free".to_string(),
            status: SubscriptionStatus::Active,
            credits_remaining: 0,
            credits_used: 0,
        }
    }
}

/// Gated capabilities a plan may switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    AiDesigner,
}

impl Feature {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ai_designer" => Some(Feature::AiDesigner),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Feature::AiDesigner => "ai_designer",
        }
    }
}

/// Countable content kinds gated by plan quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Tasks,
    Articles,
    RoomTransforms,
}

impl ContentType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "tasks" => Some(ContentType::Tasks),
            "articles" => Some(ContentType::Articles),
            "room_transforms" => Some(ContentType::RoomTransforms),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ContentType::Tasks => "tasks",
            ContentType::Articles => "articles",
            ContentType::RoomTransforms => "room_transforms",
        }
    }
}
