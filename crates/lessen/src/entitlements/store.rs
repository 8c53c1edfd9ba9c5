use super::domain::UserSubscription;
use crate::identity::UserId;

/// Storage abstraction over the billing collaborator's subscription records.
pub trait SubscriptionStore: Send + Sync {
    fn load(&self, user_id: &UserId) -> Result<Option<UserSubscription>, StoreError>;
    fn save(&self, user_id: &UserId, subscription: UserSubscription) -> Result<(), StoreError>;
}

/// Error enumeration for subscription storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("subscription storage unavailable: {0}")]
    Unavailable(String),
}
