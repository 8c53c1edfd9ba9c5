use super::config::ScoringConfig;
use super::multipliers::{category_multiplier, streak_multiplier, time_multiplier};
use crate::progress::domain::{ArticleSnapshot, TaskSnapshot, TimeContext};

/// Points awarded for completing a task.
///
/// Base value by difficulty, scaled by the category, streak, and (when one
/// applies) time-of-day ratios. The product is rounded exactly once so the
/// award is reproducible from the inputs alone.
pub fn points_for_task(
    task: &TaskSnapshot,
    streak_days: u32,
    time_context: Option<TimeContext>,
    config: &ScoringConfig,
) -> u64 {
    let base = config.task_base_points(task.difficulty) as f64;
    let time_bonus = time_context
        .map(|context| time_multiplier(config, context))
        .unwrap_or(1.0);

    let raw = base
        * category_multiplier(config, &task.category)
        * streak_multiplier(config, streak_days)
        * time_bonus;

    raw.round() as u64
}

/// Points awarded for reading an article.
///
/// The base value scales with reading time relative to the reference
/// duration, capped so very long content cannot grow without bound. Articles
/// with an unparsable read-time label score as reference-length reads.
pub fn points_for_article(
    article: &ArticleSnapshot,
    streak_days: u32,
    config: &ScoringConfig,
) -> u64 {
    let minutes = article
        .read_minutes()
        .map(f64::from)
        .unwrap_or(config.article_reference_minutes);
    let scale = (minutes / config.article_reference_minutes).min(config.article_max_scale);

    let raw = config.article_base_points as f64 * scale * streak_multiplier(config, streak_days);
    raw.round() as u64
}

/// Fixed award for a completed room transformation; no multipliers apply.
pub fn room_transform_points(config: &ScoringConfig) -> u64 {
    config.room_transform_points
}
