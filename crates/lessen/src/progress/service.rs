use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use super::badges::{BadgeCatalog, BadgeView};
use super::domain::{
    ArticleSnapshot, AwardRecord, AwardSource, BadgeId, TaskSnapshot, TimeContext, UserStats,
};
use super::levels::{LevelLadder, LevelProgress, LevelView};
use super::repository::{ProgressRecord, ProgressRepository, RepositoryError};
use super::scoring::{ActiveMultiplier, ScoringConfig, ScoringEngine};
use crate::identity::UserId;
use crate::sync::UserLocks;

/// Upper bound on badge-cascade passes for one logical operation. The
/// standard catalog settles in two; the cap guards against a misconfigured
/// catalog whose rewards chain thresholds indefinitely.
const BADGE_CASCADE_LIMIT: usize = 8;

/// Result of one award operation, with every cascade effect included.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressOutcome {
    pub stats: UserStats,
    /// Points from the action itself.
    pub action_points: u64,
    /// Points paid out by badges unlocked in the same operation.
    pub bonus_points: u64,
    pub newly_earned: Vec<BadgeView>,
}

/// Result of reversing a completion; badges always survive the reversal.
#[derive(Debug, Clone, Serialize)]
pub struct ReversalOutcome {
    pub stats: UserStats,
    pub points_reversed: u64,
}

/// Read-only progress view for profile screens and breakdown displays.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    pub stats: UserStats,
    pub level: LevelView,
    pub next_level: Option<LevelView>,
    pub level_progress: LevelProgress,
    pub badges: Vec<BadgeView>,
    pub active_multipliers: Vec<ActiveMultiplier>,
}

/// Error raised by the progress orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum ProgressServiceError {
    #[error("no completion on record for {label} '{id}'")]
    AwardNotFound { label: &'static str, id: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Orchestrator for member progress: scores actions, maintains the stats and
/// ledger, and runs the badge cascade.
///
/// Every mutation for a user happens under that user's serialization lock and
/// ends in a single repository save, so the state reported to callers is
/// always the state that was persisted.
pub struct ProgressService<R> {
    repository: Arc<R>,
    scoring: ScoringEngine,
    ladder: LevelLadder,
    catalog: BadgeCatalog,
    locks: UserLocks,
}

impl<R> ProgressService<R>
where
    R: ProgressRepository + 'static,
{
    pub fn new(repository: Arc<R>, scoring_config: ScoringConfig) -> Self {
        Self::with_catalogs(
            repository,
            ScoringEngine::new(scoring_config),
            LevelLadder::standard(),
            BadgeCatalog::standard(),
        )
    }

    pub fn with_catalogs(
        repository: Arc<R>,
        scoring: ScoringEngine,
        ladder: LevelLadder,
        catalog: BadgeCatalog,
    ) -> Self {
        Self {
            repository,
            scoring,
            ladder,
            catalog,
            locks: UserLocks::new(),
        }
    }

    /// Award a completed task and run the badge cascade.
    pub fn complete_task(
        &self,
        user_id: &UserId,
        task: &TaskSnapshot,
        at: DateTime<Utc>,
        time_context: Option<TimeContext>,
    ) -> Result<ProgressOutcome, ProgressServiceError> {
        let entry = self.locks.entry(user_id);
        let _guard = entry.lock().expect("user serialization lock poisoned");

        let mut record = self.load_or_create(user_id, at)?;
        record.stats.roll_streak(at);

        let points = self
            .scoring
            .task_points(task, record.stats.streak_days, time_context);
        let category = task.category.to_ascii_lowercase();

        record.ledger.push(AwardRecord {
            source: AwardSource::TaskCompleted {
                task_id: task.id.clone(),
                category: category.clone(),
            },
            points,
            awarded_at: at,
        });
        record.stats.tasks_completed += 1;
        *record.stats.category_completions.entry(category).or_insert(0) += 1;

        self.finish_award(user_id, record, points, at)
    }

    /// Reverse a task completion exactly, without revoking badges.
    pub fn uncomplete_task(
        &self,
        user_id: &UserId,
        task_id: &str,
        at: DateTime<Utc>,
    ) -> Result<ReversalOutcome, ProgressServiceError> {
        let entry = self.locks.entry(user_id);
        let _guard = entry.lock().expect("user serialization lock poisoned");

        let mut record = self
            .repository
            .load(user_id)?
            .ok_or_else(|| ProgressServiceError::AwardNotFound {
                label: "task",
                id: task_id.to_string(),
            })?;

        let position = record
            .ledger
            .iter()
            .rposition(|award| {
                matches!(&award.source, AwardSource::TaskCompleted { task_id: id, .. } if id.as_str() == task_id)
            })
            .ok_or_else(|| ProgressServiceError::AwardNotFound {
                label: "task",
                id: task_id.to_string(),
            })?;

        let award = record.ledger.remove(position);
        if let AwardSource::TaskCompleted { category, .. } = &award.source {
            if let Some(count) = record.stats.category_completions.get_mut(category) {
                *count = count.saturating_sub(1);
            }
        }
        record.stats.tasks_completed = record.stats.tasks_completed.saturating_sub(1);

        self.finish_reversal(user_id, record, award.points, at)
    }

    /// Award a read article and run the badge cascade.
    pub fn read_article(
        &self,
        user_id: &UserId,
        article: &ArticleSnapshot,
        at: DateTime<Utc>,
    ) -> Result<ProgressOutcome, ProgressServiceError> {
        let entry = self.locks.entry(user_id);
        let _guard = entry.lock().expect("user serialization lock poisoned");

        let mut record = self.load_or_create(user_id, at)?;
        record.stats.roll_streak(at);

        let points = self.scoring.article_points(article, record.stats.streak_days);

        record.ledger.push(AwardRecord {
            source: AwardSource::ArticleRead {
                article_id: article.id.clone(),
            },
            points,
            awarded_at: at,
        });
        record.stats.articles_read += 1;

        self.finish_award(user_id, record, points, at)
    }

    /// Reverse an article read exactly, without revoking badges.
    pub fn unread_article(
        &self,
        user_id: &UserId,
        article_id: &str,
        at: DateTime<Utc>,
    ) -> Result<ReversalOutcome, ProgressServiceError> {
        let entry = self.locks.entry(user_id);
        let _guard = entry.lock().expect("user serialization lock poisoned");

        let mut record = self
            .repository
            .load(user_id)?
            .ok_or_else(|| ProgressServiceError::AwardNotFound {
                label: "article",
                id: article_id.to_string(),
            })?;

        let position = record
            .ledger
            .iter()
            .rposition(|award| {
                matches!(&award.source, AwardSource::ArticleRead { article_id: id } if id.as_str() == article_id)
            })
            .ok_or_else(|| ProgressServiceError::AwardNotFound {
                label: "article",
                id: article_id.to_string(),
            })?;

        let award = record.ledger.remove(position);
        record.stats.articles_read = record.stats.articles_read.saturating_sub(1);

        self.finish_reversal(user_id, record, award.points, at)
    }

    /// Award a successful AI room transformation. Callers must have debited a
    /// design credit first; a failed debit never reaches this method.
    pub fn transform_room(
        &self,
        user_id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<ProgressOutcome, ProgressServiceError> {
        let entry = self.locks.entry(user_id);
        let _guard = entry.lock().expect("user serialization lock poisoned");

        let mut record = self.load_or_create(user_id, at)?;
        record.stats.roll_streak(at);

        let points = self.scoring.room_points();
        record.ledger.push(AwardRecord {
            source: AwardSource::RoomTransformed,
            points,
            awarded_at: at,
        });
        record.stats.rooms_transformed += 1;

        self.finish_award(user_id, record, points, at)
    }

    /// Read-only snapshot; members without a record see the all-zero view.
    pub fn snapshot(&self, user_id: &UserId, at: DateTime<Utc>) -> Result<ProgressSnapshot, ProgressServiceError> {
        let stats = match self.repository.load(user_id)? {
            Some(record) => record.stats,
            None => UserStats::new(at),
        };

        let level = LevelView::from(self.ladder.level_for(stats.total_points));
        let next_level = self.ladder.next_level(stats.total_points).map(LevelView::from);
        let level_progress = self.ladder.progress_to_next(stats.total_points);
        let badges = self.catalog.earned_views(&stats.badges_earned);
        let active_multipliers = self.scoring.breakdown(stats.streak_days, None, None);

        Ok(ProgressSnapshot {
            stats,
            level,
            next_level,
            level_progress,
            badges,
            active_multipliers,
        })
    }

    fn load_or_create(
        &self,
        user_id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<ProgressRecord, ProgressServiceError> {
        Ok(self
            .repository
            .load(user_id)?
            .unwrap_or_else(|| ProgressRecord::new(at)))
    }

    /// Apply the action's points, run the cascade, and persist once.
    fn finish_award(
        &self,
        user_id: &UserId,
        mut record: ProgressRecord,
        action_points: u64,
        at: DateTime<Utc>,
    ) -> Result<ProgressOutcome, ProgressServiceError> {
        record.stats.total_points += action_points;
        record.stats.last_activity = at;
        record.stats.level = self.ladder.level_for(record.stats.total_points).level;

        let newly_earned = self.run_badge_cascade(&mut record, at);
        let bonus_points = newly_earned.iter().map(|badge| badge.points_reward).sum();

        self.repository.save(user_id, record.clone())?;

        Ok(ProgressOutcome {
            stats: record.stats,
            action_points,
            bonus_points,
            newly_earned,
        })
    }

    fn finish_reversal(
        &self,
        user_id: &UserId,
        mut record: ProgressRecord,
        points: u64,
        _at: DateTime<Utc>,
    ) -> Result<ReversalOutcome, ProgressServiceError> {
        record.stats.total_points = record.stats.total_points.saturating_sub(points);
        record.stats.level = self.ladder.level_for(record.stats.total_points).level;

        self.repository.save(user_id, record.clone())?;

        Ok(ReversalOutcome {
            stats: record.stats,
            points_reversed: points,
        })
    }

    /// Re-run the evaluator until no further badge qualifies, paying each
    /// badge's bonus through the same award path so unlocks can chain.
    fn run_badge_cascade(&self, record: &mut ProgressRecord, at: DateTime<Utc>) -> Vec<BadgeView> {
        let mut unlocked = Vec::new();

        for _ in 0..BADGE_CASCADE_LIMIT {
            let newly: Vec<BadgeView> = self
                .catalog
                .newly_earned(&record.stats, &record.stats.badges_earned)
                .into_iter()
                .map(BadgeView::from)
                .collect();
            if newly.is_empty() {
                return unlocked;
            }

            for badge in &newly {
                record.stats.badges_earned.insert(BadgeId::new(badge.id));
                if badge.points_reward > 0 {
                    record.ledger.push(AwardRecord {
                        source: AwardSource::BadgeBonus {
                            badge_id: BadgeId::new(badge.id),
                        },
                        points: badge.points_reward,
                        awarded_at: at,
                    });
                    record.stats.total_points += badge.points_reward;
                    record.stats.level = self.ladder.level_for(record.stats.total_points).level;
                }
            }
            unlocked.extend(newly);
        }

        warn!(
            user_badges = record.stats.badges_earned.len(),
            "badge cascade hit its iteration cap; catalog may chain rewards"
        );
        unlocked
    }
}
