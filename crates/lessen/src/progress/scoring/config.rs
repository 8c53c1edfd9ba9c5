use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::progress::domain::TaskDifficulty;

/// One rung of the streak bonus table: the multiplier applies from `min_days`
/// up to the next rung's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreakTier {
    pub min_days: u32,
    pub multiplier: f64,
}

/// Scoring constants applied by the rules engine.
///
/// The per-difficulty base values are already the effective product of the
/// legacy base-plus-difficulty-multiplier pair (medium keeps 100 x 1.5), so a
/// task's points come from exactly one base lookup and one rounding step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub easy_task_points: u64,
    pub medium_task_points: u64,
    pub hard_task_points: u64,
    /// Category bonus ratios keyed by lowercase category name; anything
    /// missing scores at 1.0.
    pub category_bonuses: BTreeMap<String, f64>,
    pub streak_tiers: Vec<StreakTier>,
    pub early_morning_multiplier: f64,
    pub late_night_multiplier: f64,
    pub weekend_multiplier: f64,
    pub article_base_points: u64,
    pub article_reference_minutes: f64,
    pub article_max_scale: f64,
    pub room_transform_points: u64,
}

impl ScoringConfig {
    pub fn task_base_points(&self, difficulty: TaskDifficulty) -> u64 {
        match difficulty {
            TaskDifficulty::Easy => self.easy_task_points,
            TaskDifficulty::Medium => self.medium_task_points,
            TaskDifficulty::Hard => self.hard_task_points,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let category_bonuses = BTreeMap::from([
            ("finance".to_string(), 1.3),
            ("relationships".to_string(), 1.2),
            ("digital".to_string(), 1.15),
            ("mindset".to_string(), 1.1),
            ("wardrobe".to_string(), 1.05),
        ]);

        Self {
            easy_task_points: 60,
            medium_task_points: 150,
            hard_task_points: 300,
            category_bonuses,
            streak_tiers: vec![
                StreakTier { min_days: 0, multiplier: 1.0 },
                StreakTier { min_days: 3, multiplier: 1.05 },
                StreakTier { min_days: 7, multiplier: 1.2 },
                StreakTier { min_days: 14, multiplier: 1.3 },
                StreakTier { min_days: 21, multiplier: 1.4 },
                StreakTier { min_days: 30, multiplier: 1.5 },
            ],
            early_morning_multiplier: 1.15,
            late_night_multiplier: 1.1,
            weekend_multiplier: 1.25,
            article_base_points: 25,
            article_reference_minutes: 2.0,
            article_max_scale: 3.0,
            room_transform_points: 150,
        }
    }
}
