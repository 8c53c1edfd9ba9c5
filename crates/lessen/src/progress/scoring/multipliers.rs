use serde::Serialize;

use super::config::ScoringConfig;
use crate::progress::domain::TimeContext;

/// Bonus dimension an [`ActiveMultiplier`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplierKind {
    Streak,
    TimeOfDay,
    Category,
}

/// One bonus ratio in effect for an action, suitable for UI breakdowns.
///
/// The ratios reported here are read from the same tables the rules engine
/// multiplies with, so the product of the active ratios and the base value
/// always reproduces the awarded points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveMultiplier {
    pub kind: MultiplierKind,
    pub ratio: f64,
    pub description: String,
}

/// Multiplier of the highest streak tier not exceeding `streak_days`.
pub fn streak_multiplier(config: &ScoringConfig, streak_days: u32) -> f64 {
    config
        .streak_tiers
        .iter()
        .filter(|tier| tier.min_days <= streak_days)
        .max_by_key(|tier| tier.min_days)
        .map(|tier| tier.multiplier)
        .unwrap_or(1.0)
}

pub fn time_multiplier(config: &ScoringConfig, context: TimeContext) -> f64 {
    match context {
        TimeContext::EarlyMorning => config.early_morning_multiplier,
        TimeContext::LateNight => config.late_night_multiplier,
        TimeContext::Weekend => config.weekend_multiplier,
    }
}

/// Category bonus ratio; unlisted categories score neutrally.
pub fn category_multiplier(config: &ScoringConfig, category: &str) -> f64 {
    config
        .category_bonuses
        .get(&category.to_ascii_lowercase())
        .copied()
        .unwrap_or(1.0)
}

/// Reporting view of every non-neutral bonus in effect for the given context.
pub fn active_multipliers(
    config: &ScoringConfig,
    streak_days: u32,
    time_context: Option<TimeContext>,
    category: Option<&str>,
) -> Vec<ActiveMultiplier> {
    let mut active = Vec::new();

    let streak = streak_multiplier(config, streak_days);
    if streak > 1.0 {
        active.push(ActiveMultiplier {
            kind: MultiplierKind::Streak,
            ratio: streak,
            description: format!("{streak_days}-day streak"),
        });
    }

    if let Some(context) = time_context {
        active.push(ActiveMultiplier {
            kind: MultiplierKind::TimeOfDay,
            ratio: time_multiplier(config, context),
            description: context.label().replace('_', " "),
        });
    }

    if let Some(category) = category {
        let ratio = category_multiplier(config, category);
        if ratio != 1.0 {
            active.push(ActiveMultiplier {
                kind: MultiplierKind::Category,
                ratio,
                description: format!("{} focus", category.to_ascii_lowercase()),
            });
        }
    }

    active
}
