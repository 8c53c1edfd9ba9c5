use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use lessen::entitlements::{StoreError, SubscriptionStore, UserSubscription};
use lessen::identity::{IdentityProvider, RequestContext, UserId};
use lessen::progress::{ProgressRecord, ProgressRepository, RepositoryError, ScoringConfig};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProgressRepository {
    records: Arc<Mutex<HashMap<UserId, ProgressRecord>>>,
}

impl ProgressRepository for InMemoryProgressRepository {
    fn load(&self, user_id: &UserId) -> Result<Option<ProgressRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }

    fn save(&self, user_id: &UserId, record: ProgressRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(user_id.clone(), record);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySubscriptionStore {
    records: Arc<Mutex<HashMap<UserId, UserSubscription>>>,
}

impl SubscriptionStore for InMemorySubscriptionStore {
    fn load(&self, user_id: &UserId) -> Result<Option<UserSubscription>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }

    fn save(&self, user_id: &UserId, subscription: UserSubscription) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(user_id.clone(), subscription);
        Ok(())
    }
}

/// Identity resolution backed by a fixed admin allowlist; the real deployment
/// substitutes the hosted auth provider here.
pub(crate) struct StaticIdentityProvider {
    admins: HashSet<String>,
}

impl StaticIdentityProvider {
    pub(crate) fn new(admins: impl IntoIterator<Item = String>) -> Self {
        Self {
            admins: admins.into_iter().collect(),
        }
    }

    pub(crate) fn from_env() -> Self {
        let admins: HashSet<String> = std::env::var("APP_ADMIN_USERS")
            .map(|raw| {
                raw.split(',')
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self { admins }
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn context_for(&self, user_id: &UserId) -> RequestContext {
        if self.admins.contains(&user_id.0) {
            RequestContext::admin(user_id.clone())
        } else {
            RequestContext::member(user_id.clone())
        }
    }
}

pub(crate) fn default_scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}
