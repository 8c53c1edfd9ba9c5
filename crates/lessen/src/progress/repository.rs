use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AwardRecord, UserStats};
use crate::identity::UserId;

/// Persisted progress state for one member: the cumulative stats plus the
/// point-award ledger that makes reversals exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub stats: UserStats,
    pub ledger: Vec<AwardRecord>,
}

impl ProgressRecord {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            stats: UserStats::new(at),
            ledger: Vec::new(),
        }
    }
}

/// Storage abstraction so the orchestrator can be exercised in isolation.
pub trait ProgressRepository: Send + Sync {
    fn load(&self, user_id: &UserId) -> Result<Option<ProgressRecord>, RepositoryError>;
    fn save(&self, user_id: &UserId, record: ProgressRecord) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("progress storage unavailable: {0}")]
    Unavailable(String),
}
