use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::identity::UserId;
use crate::progress::domain::{ArticleSnapshot, TaskDifficulty, TaskSnapshot};
use crate::progress::repository::{ProgressRecord, ProgressRepository, RepositoryError};
use crate::progress::scoring::{ScoringConfig, ScoringEngine};
use crate::progress::service::ProgressService;

pub(super) fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(scoring_config())
}

pub(super) fn task(id: &str, difficulty: TaskDifficulty, category: &str) -> TaskSnapshot {
    TaskSnapshot {
        id: id.to_string(),
        title: format!("Task {id}"),
        difficulty,
        category: category.to_string(),
    }
}

pub(super) fn article(id: &str, read_time: &str) -> ArticleSnapshot {
    ArticleSnapshot {
        id: id.to_string(),
        title: format!("Article {id}"),
        read_time: read_time.to_string(),
    }
}

pub(super) fn user() -> UserId {
    UserId::new("ava")
}

pub(super) fn build_service() -> (ProgressService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ProgressService::new(repository.clone(), scoring_config());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<UserId, ProgressRecord>>>,
    fail_saves: Arc<AtomicBool>,
}

impl MemoryRepository {
    pub(super) fn seed(&self, user_id: &UserId, record: ProgressRecord) {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(user_id.clone(), record);
    }

    pub(super) fn stored(&self, user_id: &UserId) -> Option<ProgressRecord> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(user_id)
            .cloned()
    }

    pub(super) fn fail_next_saves(&self) {
        self.fail_saves.store(true, Ordering::SeqCst);
    }
}

impl ProgressRepository for MemoryRepository {
    fn load(&self, user_id: &UserId) -> Result<Option<ProgressRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("repository mutex poisoned")
            .get(user_id)
            .cloned())
    }

    fn save(&self, user_id: &UserId, record: ProgressRecord) -> Result<(), RepositoryError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("write quota exhausted".to_string()));
        }
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(user_id.clone(), record);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl ProgressRepository for UnavailableRepository {
    fn load(&self, _user_id: &UserId) -> Result<Option<ProgressRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save(&self, _user_id: &UserId, _record: ProgressRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
