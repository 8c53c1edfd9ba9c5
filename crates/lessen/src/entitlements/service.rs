use std::sync::Arc;

use serde::Serialize;

use super::domain::{ContentType, Feature, Quota, UserSubscription};
use super::resolver::{CreditAllowance, CreditOutcome, EntitlementResolver};
use super::store::{StoreError, SubscriptionStore};
use crate::identity::{IdentityProvider, UserId};
use crate::sync::UserLocks;

/// Serialized summary of everything a caller's plan entitles them to.
#[derive(Debug, Clone, Serialize)]
pub struct EntitlementSummary {
    pub plan_id: &'static str,
    pub plan_name: &'static str,
    pub billing_interval: &'static str,
    pub status: &'static str,
    pub admin_override: bool,
    pub ai_designer: bool,
    /// Quota limits; `None` means unlimited.
    pub task_limit: Option<u32>,
    pub article_limit: Option<u32>,
    pub room_transform_limit: Option<u32>,
    pub credits_remaining: u32,
    pub credits_used: u32,
}

/// Service answering entitlement questions and persisting credit debits.
///
/// Credit consumption runs under the user's serialization lock so the
/// load-transition-save cycle is atomic with respect to other debits: two
/// simultaneous uses can never spend the same credit.
pub struct EntitlementService<S, I> {
    store: Arc<S>,
    identity: Arc<I>,
    resolver: EntitlementResolver,
    locks: UserLocks,
}

impl<S, I> EntitlementService<S, I>
where
    S: SubscriptionStore + 'static,
    I: IdentityProvider + 'static,
{
    pub fn new(store: Arc<S>, identity: Arc<I>, resolver: EntitlementResolver) -> Self {
        Self {
            store,
            identity,
            resolver,
            locks: UserLocks::new(),
        }
    }

    pub fn has_feature(&self, user_id: &UserId, feature: Feature) -> Result<bool, StoreError> {
        let context = self.identity.context_for(user_id);
        let subscription = self.subscription_for(user_id)?;
        Ok(self.resolver.has_feature(&context, &subscription, feature))
    }

    pub fn may_add(
        &self,
        user_id: &UserId,
        content: ContentType,
        current_count: u32,
    ) -> Result<bool, StoreError> {
        let context = self.identity.context_for(user_id);
        let subscription = self.subscription_for(user_id)?;
        Ok(self
            .resolver
            .may_add(&context, &subscription, content, current_count))
    }

    pub fn credit_allowance(&self, user_id: &UserId) -> Result<CreditAllowance, StoreError> {
        let context = self.identity.context_for(user_id);
        let subscription = self.subscription_for(user_id)?;
        Ok(self.resolver.credit_allowance(&context, &subscription))
    }

    /// Consume one AI design credit, persisting the debit when it sticks.
    pub fn use_credit(&self, user_id: &UserId) -> Result<CreditOutcome, StoreError> {
        let entry = self.locks.entry(user_id);
        let _guard = entry.lock().expect("user serialization lock poisoned");

        let context = self.identity.context_for(user_id);
        let subscription = self.subscription_for(user_id)?;
        let outcome = self.resolver.use_credit(&context, &subscription);

        if outcome.accepted && outcome.subscription != subscription {
            self.store.save(user_id, outcome.subscription.clone())?;
        }

        Ok(outcome)
    }

    pub fn summary(&self, user_id: &UserId) -> Result<EntitlementSummary, StoreError> {
        let context = self.identity.context_for(user_id);
        let subscription = self.subscription_for(user_id)?;
        let plan = self.resolver.catalog().plan_for(&subscription);

        let limit = |quota: Quota| quota.limit();

        Ok(EntitlementSummary {
            plan_id: plan.id,
            plan_name: plan.name,
            billing_interval: plan.billing_interval.label(),
            status: subscription.status.label(),
            admin_override: context.overrides_plan(),
            ai_designer: self
                .resolver
                .has_feature(&context, &subscription, Feature::AiDesigner),
            task_limit: if context.overrides_plan() {
                None
            } else {
                limit(plan.limits.tasks)
            },
            article_limit: if context.overrides_plan() {
                None
            } else {
                limit(plan.limits.articles)
            },
            room_transform_limit: if context.overrides_plan() {
                None
            } else {
                limit(plan.limits.room_transforms)
            },
            credits_remaining: subscription.credits_remaining,
            credits_used: subscription.credits_used,
        })
    }

    /// Members without a stored record resolve as the free plan.
    fn subscription_for(&self, user_id: &UserId) -> Result<UserSubscription, StoreError> {
        Ok(self
            .store
            .load(user_id)?
            .unwrap_or_else(UserSubscription::free))
    }
}
