use crate::infra::{
    default_scoring_config, InMemoryProgressRepository, InMemorySubscriptionStore,
    StaticIdentityProvider,
};
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use clap::Args;
use std::sync::Arc;

use lessen::entitlements::{
    EntitlementResolver, EntitlementService, SubscriptionStatus, SubscriptionStore,
    UserSubscription,
};
use lessen::error::AppError;
use lessen::identity::UserId;
use lessen::progress::{ProgressService, TaskDifficulty, TaskSnapshot};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Member name used for the scripted week
    #[arg(long, default_value = "ava")]
    pub(crate) user: String,
    /// First day of the scripted week (YYYY-MM-DD). Defaults to six days ago.
    #[arg(long, value_parser = parse_date)]
    pub(crate) start_date: Option<NaiveDate>,
    /// Also demonstrate the admin override path
    #[arg(long)]
    pub(crate) show_admin: bool,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn noon(day: NaiveDate) -> DateTime<Utc> {
    day.and_hms_opt(12, 0, 0)
        .expect("noon exists on every day")
        .and_utc()
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let start = args
        .start_date
        .unwrap_or_else(|| Local::now().date_naive() - Duration::days(6));
    let member = UserId::new(args.user.clone());

    let repository = Arc::new(InMemoryProgressRepository::default());
    let progress = ProgressService::new(repository, default_scoring_config());

    let store = Arc::new(InMemorySubscriptionStore::default());
    if let Err(err) = store.save(
        &member,
        UserSubscription {
            plan_id: "premium".to_string(),
            status: SubscriptionStatus::Active,
            credits_remaining: 2,
            credits_used: 0,
        },
    ) {
        println!("Subscription store unavailable: {err}");
        return Ok(());
    }
    let identity = Arc::new(StaticIdentityProvider::new(
        args.show_admin.then(|| "ops".to_string()),
    ));
    let entitlements = EntitlementService::new(store, identity, EntitlementResolver::default());

    println!("Lessen progress demo: one scripted week for '{}'", member.0);

    let week: [(&str, TaskDifficulty, &str); 7] = [
        ("clear-junk-drawer", TaskDifficulty::Easy, "declutter"),
        ("unsubscribe-sweep", TaskDifficulty::Easy, "digital"),
        ("cancel-unused-subscriptions", TaskDifficulty::Medium, "finance"),
        ("donate-clothes-box", TaskDifficulty::Medium, "wardrobe"),
        ("photo-library-cleanup", TaskDifficulty::Medium, "digital"),
        ("budget-reset", TaskDifficulty::Hard, "finance"),
        ("garage-corner-clearout", TaskDifficulty::Hard, "declutter"),
    ];

    for (offset, (slug, difficulty, category)) in week.iter().enumerate() {
        let day = start + Duration::days(offset as i64);
        let task = TaskSnapshot {
            id: slug.to_string(),
            title: slug.replace('-', " "),
            difficulty: *difficulty,
            category: category.to_string(),
        };

        let outcome = match progress.complete_task(&member, &task, noon(day), None) {
            Ok(outcome) => outcome,
            Err(err) => {
                println!("  Award unavailable: {err}");
                return Ok(());
            }
        };

        print!(
            "Day {} ({day}): +{} pts for '{}' [{} {}]",
            offset + 1,
            outcome.action_points,
            task.title,
            task.difficulty.label(),
            category
        );
        if outcome.bonus_points > 0 {
            print!(" | +{} bonus", outcome.bonus_points);
        }
        println!(" | total {}", outcome.stats.total_points);
        for badge in &outcome.newly_earned {
            println!(
                "    Unlocked {} ({}) +{} pts",
                badge.name,
                badge.rarity.label(),
                badge.points_reward
            );
        }
    }

    println!("\nAI room designer (credit-gated)");
    for room in ["bedroom", "home office", "spare room"] {
        match entitlements.use_credit(&member) {
            Ok(outcome) if outcome.accepted => {
                match progress.transform_room(&member, noon(start + Duration::days(6))) {
                    Ok(award) => {
                        println!(
                            "- {room}: transformed (+{} pts, {} credits left)",
                            award.action_points, outcome.subscription.credits_remaining
                        );
                        for badge in &award.newly_earned {
                            println!(
                                "    Unlocked {} ({}) +{} pts",
                                badge.name,
                                badge.rarity.label(),
                                badge.points_reward
                            );
                        }
                    }
                    Err(err) => println!("- {room}: award unavailable: {err}"),
                }
            }
            Ok(_) => println!("- {room}: out of credits, upgrade prompt shown, no transform"),
            Err(err) => println!("- {room}: entitlement check unavailable: {err}"),
        }
    }

    let snapshot = match progress.snapshot(&member, noon(start + Duration::days(6))) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            println!("Snapshot unavailable: {err}");
            return Ok(());
        }
    };
    println!("\nWeek summary");
    println!(
        "- Level {} '{}' | {} pts | streak {} (best {})",
        snapshot.level.level,
        snapshot.level.title,
        snapshot.stats.total_points,
        snapshot.stats.streak_days,
        snapshot.stats.longest_streak
    );
    match &snapshot.next_level {
        Some(next) => println!(
            "- {} pts to '{}' ({}% there)",
            snapshot.level_progress.needed, next.title, snapshot.level_progress.percentage
        ),
        None => println!("- Max level reached"),
    }
    println!("- Badges ({}):", snapshot.badges.len());
    for badge in &snapshot.badges {
        println!("    {} ({})", badge.name, badge.rarity.label());
    }
    if !snapshot.active_multipliers.is_empty() {
        println!("- Active bonuses:");
        for bonus in &snapshot.active_multipliers {
            println!("    x{:.2} {}", bonus.ratio, bonus.description);
        }
    }

    if args.show_admin {
        let ops = UserId::new("ops");
        match entitlements.summary(&ops) {
            Ok(summary) => {
                println!("\nAdmin override ('ops')");
                println!(
                    "- plan {} | override {} | ai designer {} | task limit {:?}",
                    summary.plan_id, summary.admin_override, summary.ai_designer, summary.task_limit
                );
            }
            Err(err) => println!("Admin summary unavailable: {err}"),
        }
    }

    Ok(())
}
