use super::common::*;
use crate::progress::domain::{TaskDifficulty, TimeContext};
use crate::progress::scoring::MultiplierKind;

#[test]
fn medium_finance_task_at_streak_zero_scores_195() {
    let engine = engine();
    let finance = task("t-1", TaskDifficulty::Medium, "Finance");
    assert_eq!(engine.task_points(&finance, 0, None), 195);
}

#[test]
fn medium_finance_task_at_streak_seven_scores_234() {
    let engine = engine();
    let finance = task("t-1", TaskDifficulty::Medium, "Finance");
    assert_eq!(engine.task_points(&finance, 7, None), 234);
}

#[test]
fn six_minute_article_at_streak_zero_scores_75() {
    let engine = engine();
    assert_eq!(engine.article_points(&article("a-1", "6 min"), 0), 75);
}

#[test]
fn article_scale_is_capped_for_long_reads() {
    let engine = engine();
    // 40 minutes caps at the same scale as 6 minutes.
    assert_eq!(
        engine.article_points(&article("a-long", "40 min"), 0),
        engine.article_points(&article("a-six", "6 min"), 0)
    );
}

#[test]
fn unlabeled_read_time_scores_as_a_reference_read() {
    let engine = engine();
    assert_eq!(engine.article_points(&article("a-odd", "quick read"), 0), 25);
}

#[test]
fn task_points_are_positive_and_monotonic_in_streak() {
    let engine = engine();
    for difficulty in [TaskDifficulty::Easy, TaskDifficulty::Medium, TaskDifficulty::Hard] {
        let snapshot = task("t-m", difficulty, "declutter");
        let mut previous = 0;
        for streak in 0..60 {
            let points = engine.task_points(&snapshot, streak, None);
            assert!(points > 0);
            assert!(
                points >= previous,
                "points dropped at streak {streak} for {difficulty:?}"
            );
            previous = points;
        }
    }
}

#[test]
fn unknown_categories_score_neutrally() {
    let engine = engine();
    let labeled = task("t-1", TaskDifficulty::Hard, "taxidermy");
    let unlabeled = task("t-2", TaskDifficulty::Hard, "declutter");
    assert_eq!(
        engine.task_points(&labeled, 0, None),
        engine.task_points(&unlabeled, 0, None)
    );
}

#[test]
fn category_lookup_is_case_insensitive() {
    let engine = engine();
    let upper = task("t-1", TaskDifficulty::Medium, "FINANCE");
    let lower = task("t-2", TaskDifficulty::Medium, "finance");
    assert_eq!(
        engine.task_points(&upper, 0, None),
        engine.task_points(&lower, 0, None)
    );
}

#[test]
fn rounding_happens_once_at_the_end() {
    let engine = engine();
    // digital (1.15) at a 3-day streak (1.05): 150 * 1.15 * 1.05 = 181.125.
    // Rounding per step would give round(round(172.5) * 1.05) = 182.
    let digital = task("t-1", TaskDifficulty::Medium, "digital");
    assert_eq!(engine.task_points(&digital, 3, None), 181);
}

#[test]
fn at_most_one_time_window_applies() {
    let engine = engine();
    let snapshot = task("t-1", TaskDifficulty::Easy, "declutter");
    let weekend = engine.task_points(&snapshot, 0, Some(TimeContext::Weekend));
    assert_eq!(weekend, 75); // 60 * 1.25
    let morning = engine.task_points(&snapshot, 0, Some(TimeContext::EarlyMorning));
    assert_eq!(morning, 69); // 60 * 1.15, never stacked with the weekend bonus
}

#[test]
fn breakdown_reproduces_the_points_the_engine_awards() {
    let engine = engine();
    let cases = [
        (0, None, "declutter"),
        (7, None, "Finance"),
        (14, Some(TimeContext::EarlyMorning), "digital"),
        (30, Some(TimeContext::Weekend), "relationships"),
    ];

    for (streak, context, category) in cases {
        let snapshot = task("t-b", TaskDifficulty::Medium, category);
        let points = engine.task_points(&snapshot, streak, context);

        let product: f64 = engine
            .breakdown(streak, context, Some(category))
            .iter()
            .map(|active| active.ratio)
            .product();
        let expected = (engine.config().task_base_points(TaskDifficulty::Medium) as f64
            * product)
            .round() as u64;

        assert_eq!(points, expected, "breakdown drifted for streak {streak}");
    }
}

#[test]
fn breakdown_omits_neutral_ratios() {
    let engine = engine();
    let active = engine.breakdown(0, None, Some("declutter"));
    assert!(active.is_empty());

    let active = engine.breakdown(7, None, Some("finance"));
    assert_eq!(active.len(), 2);
    assert!(active.iter().any(|entry| entry.kind == MultiplierKind::Streak));
    assert!(active.iter().any(|entry| entry.kind == MultiplierKind::Category));
}
