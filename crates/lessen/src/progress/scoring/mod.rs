mod config;
mod multipliers;
mod rules;

pub use config::{ScoringConfig, StreakTier};
pub use multipliers::{ActiveMultiplier, MultiplierKind};

use crate::progress::domain::{ArticleSnapshot, TaskSnapshot, TimeContext};

/// Stateless scorer applying one [`ScoringConfig`] to member actions.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn task_points(
        &self,
        task: &TaskSnapshot,
        streak_days: u32,
        time_context: Option<TimeContext>,
    ) -> u64 {
        rules::points_for_task(task, streak_days, time_context, &self.config)
    }

    pub fn article_points(&self, article: &ArticleSnapshot, streak_days: u32) -> u64 {
        rules::points_for_article(article, streak_days, &self.config)
    }

    pub fn room_points(&self) -> u64 {
        rules::room_transform_points(&self.config)
    }

    /// Breakdown of the bonus ratios the engine would apply in this context.
    pub fn breakdown(
        &self,
        streak_days: u32,
        time_context: Option<TimeContext>,
        category: Option<&str>,
    ) -> Vec<ActiveMultiplier> {
        multipliers::active_multipliers(&self.config, streak_days, time_context, category)
    }
}
