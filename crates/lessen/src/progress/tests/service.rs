use std::collections::BTreeSet;
use std::sync::Arc;

use super::common::*;
use crate::progress::domain::{AwardSource, BadgeId, TaskDifficulty, UserStats};
use crate::progress::repository::ProgressRecord;
use crate::progress::service::{ProgressService, ProgressServiceError};

#[test]
fn completing_a_task_awards_points_and_persists_the_result() {
    let (service, repository) = build_service();
    let moment = at(2025, 3, 3, 12);

    let outcome = service
        .complete_task(&user(), &task("t-1", TaskDifficulty::Medium, "Finance"), moment, None)
        .expect("award succeeds");

    assert_eq!(outcome.action_points, 195);
    assert_eq!(outcome.stats.tasks_completed, 1);
    assert_eq!(outcome.stats.streak_days, 1);

    let stored = repository.stored(&user()).expect("record persisted");
    assert_eq!(stored.stats, outcome.stats);
    assert!(stored
        .ledger
        .iter()
        .any(|award| matches!(&award.source, AwardSource::TaskCompleted { task_id, .. } if task_id == "t-1")));
}

#[test]
fn level_always_tracks_total_points() {
    let (service, _) = build_service();
    let moment = at(2025, 3, 3, 12);

    let outcome = service
        .complete_task(&user(), &task("t-1", TaskDifficulty::Hard, "Finance"), moment, None)
        .expect("award succeeds");

    // 300 * 1.3 = 390 points plus badge bonuses; the stored level must match
    // the ladder at the final total, bonuses included.
    assert!(outcome.stats.total_points >= 390);
    assert_eq!(outcome.stats.level, 3);
}

#[test]
fn crossing_a_points_threshold_unlocks_its_badge_exactly_once() {
    let (service, repository) = build_service();
    let creation = at(2025, 3, 3, 9);

    // Member sitting at 240 points with the earlier unlocks already recorded.
    let mut stats = UserStats::new(creation);
    stats.total_points = 240;
    stats.level = 2;
    stats.streak_days = 1;
    stats.longest_streak = 1;
    stats.tasks_completed = 5;
    stats
        .category_completions
        .insert("declutter".to_string(), 5);
    stats.badges_earned =
        BTreeSet::from([BadgeId::new("first_steps"), BadgeId::new("first_clear")]);
    repository.seed(
        &user(),
        ProgressRecord {
            stats,
            ledger: Vec::new(),
        },
    );

    let outcome = service
        .complete_task(
            &user(),
            &task("t-6", TaskDifficulty::Easy, "declutter"),
            at(2025, 3, 3, 12),
            None,
        )
        .expect("award succeeds");

    // 240 + 60 crosses the 250 threshold: getting_started pays its 50-point
    // reward and the level is recomputed on the new total.
    assert_eq!(outcome.action_points, 60);
    assert_eq!(outcome.bonus_points, 50);
    assert_eq!(outcome.newly_earned.len(), 1);
    assert_eq!(outcome.newly_earned[0].id, "getting_started");
    assert_eq!(outcome.stats.total_points, 350);
    assert_eq!(outcome.stats.level, 3);

    // A further task must not re-trigger either milestone badge.
    let outcome = service
        .complete_task(
            &user(),
            &task("t-7", TaskDifficulty::Easy, "declutter"),
            at(2025, 3, 3, 13),
            None,
        )
        .expect("award succeeds");
    assert!(outcome.newly_earned.is_empty());
    assert_eq!(outcome.stats.total_points, 410);
}

#[test]
fn badge_bonuses_cascade_through_later_thresholds() {
    let (service, repository) = build_service();
    let creation = at(2025, 3, 3, 9);

    // At 890 points and 49 tasks, the 50th task lands on 950 points: below
    // the 1,000-point badge until clutter_crusher's 75-point reward pushes
    // the total across it on the next evaluator pass.
    let mut stats = UserStats::new(creation);
    stats.total_points = 890;
    stats.level = 4;
    stats.streak_days = 1;
    stats.longest_streak = 1;
    stats.tasks_completed = 49;
    stats.badges_earned = BTreeSet::from([
        BadgeId::new("first_steps"),
        BadgeId::new("getting_started"),
        BadgeId::new("first_clear"),
        BadgeId::new("steady_hands"),
    ]);
    repository.seed(
        &user(),
        ProgressRecord {
            stats,
            ledger: Vec::new(),
        },
    );

    let outcome = service
        .complete_task(
            &user(),
            &task("t-50", TaskDifficulty::Easy, "declutter"),
            at(2025, 3, 3, 12),
            None,
        )
        .expect("award succeeds");

    // 890 + 60 = 950, +75 (clutter_crusher) = 1,025, +100 (point_collector).
    let unlock_ids: Vec<&str> = outcome.newly_earned.iter().map(|badge| badge.id).collect();
    assert_eq!(unlock_ids, vec!["clutter_crusher", "point_collector"]);
    assert_eq!(outcome.bonus_points, 175);
    assert_eq!(outcome.stats.total_points, 1_125);
    assert_eq!(outcome.stats.level, 5);
}

#[test]
fn uncompleting_reverses_exactly_and_keeps_badges() {
    let (service, _) = build_service();
    let moment = at(2025, 3, 3, 12);

    let awarded = service
        .complete_task(&user(), &task("t-1", TaskDifficulty::Easy, "declutter"), moment, None)
        .expect("award succeeds");
    let badges_after_award = awarded.stats.badges_earned.clone();
    assert!(!badges_after_award.is_empty());

    let reversed = service
        .uncomplete_task(&user(), "t-1", at(2025, 3, 3, 13))
        .expect("reversal succeeds");

    assert_eq!(reversed.points_reversed, awarded.action_points);
    assert_eq!(
        reversed.stats.total_points,
        awarded.stats.total_points - awarded.action_points
    );
    assert_eq!(reversed.stats.tasks_completed, 0);
    assert_eq!(reversed.stats.completions_in("declutter"), 0);
    // Badges are milestones reached, not current state.
    assert_eq!(reversed.stats.badges_earned, badges_after_award);
}

#[test]
fn unreading_an_article_mirrors_the_read() {
    let (service, _) = build_service();
    let moment = at(2025, 3, 3, 12);

    let awarded = service
        .read_article(&user(), &article("a-1", "6 min"), moment)
        .expect("award succeeds");
    assert_eq!(awarded.action_points, 75);
    assert_eq!(awarded.stats.articles_read, 1);

    let reversed = service
        .unread_article(&user(), "a-1", at(2025, 3, 3, 13))
        .expect("reversal succeeds");
    assert_eq!(reversed.points_reversed, 75);
    assert_eq!(reversed.stats.articles_read, 0);
}

#[test]
fn reversing_an_unknown_completion_is_a_not_found_answer() {
    let (service, _) = build_service();

    match service.uncomplete_task(&user(), "t-never", at(2025, 3, 3, 12)) {
        Err(ProgressServiceError::AwardNotFound { label, id }) => {
            assert_eq!(label, "task");
            assert_eq!(id, "t-never");
        }
        other => panic!("expected AwardNotFound, got {other:?}"),
    }
}

#[test]
fn room_transforms_award_fixed_points_through_the_cascade_path() {
    let (service, _) = build_service();

    let outcome = service
        .transform_room(&user(), at(2025, 3, 3, 12))
        .expect("award succeeds");

    assert_eq!(outcome.action_points, 150);
    assert_eq!(outcome.stats.rooms_transformed, 1);
    assert!(outcome
        .newly_earned
        .iter()
        .any(|badge| badge.id == "room_reborn"));
}

#[test]
fn daily_actions_grow_the_streak_and_its_multiplier() {
    let (service, _) = build_service();

    let mut last = None;
    for day in 3..10 {
        let outcome = service
            .complete_task(
                &user(),
                &task(&format!("t-{day}"), TaskDifficulty::Medium, "Finance"),
                at(2025, 3, day, 12),
                None,
            )
            .expect("award succeeds");
        last = Some(outcome);
    }

    let outcome = last.expect("seven awards ran");
    assert_eq!(outcome.stats.streak_days, 7);
    assert_eq!(outcome.stats.longest_streak, 7);
    // Day seven scores with the 7-day tier: round(150 * 1.3 * 1.2).
    assert_eq!(outcome.action_points, 234);
    assert!(outcome
        .stats
        .badges_earned
        .contains(&BadgeId::new("week_of_less")));
}

#[test]
fn failed_saves_leave_the_persisted_state_untouched() {
    let (service, repository) = build_service();
    let moment = at(2025, 3, 3, 12);

    service
        .complete_task(&user(), &task("t-1", TaskDifficulty::Easy, "declutter"), moment, None)
        .expect("first award succeeds");
    let before = repository.stored(&user()).expect("record persisted");

    repository.fail_next_saves();
    let result = service.complete_task(
        &user(),
        &task("t-2", TaskDifficulty::Easy, "declutter"),
        at(2025, 3, 3, 13),
        None,
    );

    assert!(matches!(result, Err(ProgressServiceError::Repository(_))));
    let after = repository.stored(&user()).expect("record still present");
    assert_eq!(before, after);
}

#[test]
fn snapshot_reports_zeroed_stats_for_unknown_members() {
    let repository = Arc::new(UnavailableRepository);
    let service = ProgressService::new(repository, scoring_config());
    assert!(service.snapshot(&user(), at(2025, 3, 3, 12)).is_err());

    let (service, _) = build_service();
    let snapshot = service
        .snapshot(&user(), at(2025, 3, 3, 12))
        .expect("snapshot builds");
    assert_eq!(snapshot.stats.total_points, 0);
    assert_eq!(snapshot.level.level, 1);
    assert_eq!(snapshot.level_progress.needed, 100);
    assert!(snapshot.badges.is_empty());
}
