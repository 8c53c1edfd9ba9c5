use std::collections::BTreeSet;

use serde::Serialize;

use super::domain::{BadgeId, UserStats};

/// Grouping used for gallery presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    Milestone,
    Streak,
    Mastery,
    Special,
    Seasonal,
}

/// Presentational weight; evaluation order never depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl BadgeRarity {
    pub const fn label(self) -> &'static str {
        match self {
            BadgeRarity::Common => "common",
            BadgeRarity::Rare => "rare",
            BadgeRarity::Epic => "epic",
            BadgeRarity::Legendary => "legendary",
        }
    }
}

/// Threshold a badge watches. Every variant reads a counter that only grows,
/// so earned status never needs to be revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeRequirement {
    Points(u64),
    Tasks(u32),
    Articles(u32),
    Streak(u32),
    Rooms(u32),
    CategoryTasks { category: &'static str, count: u32 },
}

/// One entry of the static badge catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: BadgeCategory,
    pub rarity: BadgeRarity,
    pub requirement: BadgeRequirement,
    pub points_reward: u64,
}

impl Badge {
    pub fn badge_id(&self) -> BadgeId {
        BadgeId::new(self.id)
    }

    fn satisfied_by(&self, stats: &UserStats) -> bool {
        match self.requirement {
            BadgeRequirement::Points(threshold) => stats.total_points >= threshold,
            BadgeRequirement::Tasks(threshold) => stats.tasks_completed >= threshold,
            BadgeRequirement::Articles(threshold) => stats.articles_read >= threshold,
            BadgeRequirement::Streak(threshold) => stats.streak_days >= threshold,
            BadgeRequirement::Rooms(threshold) => stats.rooms_transformed >= threshold,
            BadgeRequirement::CategoryTasks { category, count } => {
                stats.completions_in(category) >= count
            }
        }
    }
}

/// Serialized shape of a badge for API responses and unlock notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeView {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: BadgeCategory,
    pub rarity: BadgeRarity,
    pub points_reward: u64,
}

impl From<&Badge> for BadgeView {
    fn from(badge: &Badge) -> Self {
        Self {
            id: badge.id,
            name: badge.name,
            description: badge.description,
            icon: badge.icon,
            category: badge.category,
            rarity: badge.rarity,
            points_reward: badge.points_reward,
        }
    }
}

/// The static badge catalog.
pub struct BadgeCatalog {
    badges: Vec<Badge>,
}

impl BadgeCatalog {
    pub fn standard() -> Self {
        Self {
            badges: standard_badges(),
        }
    }

    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    /// Badges whose thresholds the stats now satisfy and that are not yet in
    /// `already_earned`, in catalog order.
    ///
    /// Pure and idempotent: the same stats and earned set always produce the
    /// same answer, and nothing already earned is ever returned again. Ids in
    /// `already_earned` that no longer exist in the catalog are ignored.
    pub fn newly_earned<'a>(
        &'a self,
        stats: &UserStats,
        already_earned: &BTreeSet<BadgeId>,
    ) -> Vec<&'a Badge> {
        self.badges
            .iter()
            .filter(|badge| !already_earned.contains(&badge.badge_id()))
            .filter(|badge| badge.satisfied_by(stats))
            .collect()
    }

    /// Earned badges resolved against the catalog, in catalog order; unknown
    /// ids from older catalog versions are skipped.
    pub fn earned_views(&self, earned: &BTreeSet<BadgeId>) -> Vec<BadgeView> {
        self.badges
            .iter()
            .filter(|badge| earned.contains(&badge.badge_id()))
            .map(BadgeView::from)
            .collect()
    }
}

fn standard_badges() -> Vec<Badge> {
    vec![
        Badge {
            id: "first_steps",
            name: "First Steps",
            description: "Earn your first 50 points.",
            icon: "badges/first_steps",
            category: BadgeCategory::Milestone,
            rarity: BadgeRarity::Common,
            requirement: BadgeRequirement::Points(50),
            points_reward: 10,
        },
        Badge {
            id: "getting_started",
            name: "Getting Started",
            description: "Reach 250 points.",
            icon: "badges/getting_started",
            category: BadgeCategory::Milestone,
            rarity: BadgeRarity::Common,
            requirement: BadgeRequirement::Points(250),
            points_reward: 50,
        },
        Badge {
            id: "point_collector",
            name: "Point Collector",
            description: "Reach 1,000 points.",
            icon: "badges/point_collector",
            category: BadgeCategory::Milestone,
            rarity: BadgeRarity::Rare,
            requirement: BadgeRequirement::Points(1_000),
            points_reward: 100,
        },
        Badge {
            id: "momentum",
            name: "Momentum",
            description: "Reach 2,500 points.",
            icon: "badges/momentum",
            category: BadgeCategory::Milestone,
            rarity: BadgeRarity::Epic,
            requirement: BadgeRequirement::Points(2_500),
            points_reward: 250,
        },
        Badge {
            id: "first_clear",
            name: "First Clear",
            description: "Complete your first decluttering task.",
            icon: "badges/first_clear",
            category: BadgeCategory::Milestone,
            rarity: BadgeRarity::Common,
            requirement: BadgeRequirement::Tasks(1),
            points_reward: 10,
        },
        Badge {
            id: "steady_hands",
            name: "Steady Hands",
            description: "Complete 10 tasks.",
            icon: "badges/steady_hands",
            category: BadgeCategory::Mastery,
            rarity: BadgeRarity::Common,
            requirement: BadgeRequirement::Tasks(10),
            points_reward: 25,
        },
        Badge {
            id: "clutter_crusher",
            name: "Clutter Crusher",
            description: "Complete 50 tasks.",
            icon: "badges/clutter_crusher",
            category: BadgeCategory::Mastery,
            rarity: BadgeRarity::Rare,
            requirement: BadgeRequirement::Tasks(50),
            points_reward: 75,
        },
        Badge {
            id: "letting_go_legend",
            name: "Letting Go Legend",
            description: "Complete 100 tasks.",
            icon: "badges/letting_go_legend",
            category: BadgeCategory::Mastery,
            rarity: BadgeRarity::Epic,
            requirement: BadgeRequirement::Tasks(100),
            points_reward: 150,
        },
        Badge {
            id: "curious_reader",
            name: "Curious Reader",
            description: "Read 5 coaching articles.",
            icon: "badges/curious_reader",
            category: BadgeCategory::Mastery,
            rarity: BadgeRarity::Common,
            requirement: BadgeRequirement::Articles(5),
            points_reward: 15,
        },
        Badge {
            id: "well_read",
            name: "Well Read",
            description: "Read 25 coaching articles.",
            icon: "badges/well_read",
            category: BadgeCategory::Mastery,
            rarity: BadgeRarity::Rare,
            requirement: BadgeRequirement::Articles(25),
            points_reward: 60,
        },
        Badge {
            id: "three_day_spark",
            name: "Three-Day Spark",
            description: "Keep a 3-day streak alive.",
            icon: "badges/three_day_spark",
            category: BadgeCategory::Streak,
            rarity: BadgeRarity::Common,
            requirement: BadgeRequirement::Streak(3),
            points_reward: 15,
        },
        Badge {
            id: "week_of_less",
            name: "Week of Less",
            description: "Keep a 7-day streak alive.",
            icon: "badges/week_of_less",
            category: BadgeCategory::Streak,
            rarity: BadgeRarity::Rare,
            requirement: BadgeRequirement::Streak(7),
            points_reward: 40,
        },
        Badge {
            id: "habit_formed",
            name: "Habit Formed",
            description: "Keep a 21-day streak alive.",
            icon: "badges/habit_formed",
            category: BadgeCategory::Streak,
            rarity: BadgeRarity::Epic,
            requirement: BadgeRequirement::Streak(21),
            points_reward: 100,
        },
        Badge {
            id: "iron_month",
            name: "Iron Month",
            description: "Keep a 30-day streak alive.",
            icon: "badges/iron_month",
            category: BadgeCategory::Streak,
            rarity: BadgeRarity::Legendary,
            requirement: BadgeRequirement::Streak(30),
            points_reward: 200,
        },
        Badge {
            id: "room_reborn",
            name: "Room Reborn",
            description: "Transform your first room with the AI designer.",
            icon: "badges/room_reborn",
            category: BadgeCategory::Special,
            rarity: BadgeRarity::Rare,
            requirement: BadgeRequirement::Rooms(1),
            points_reward: 30,
        },
        Badge {
            id: "home_transformed",
            name: "Home Transformed",
            description: "Transform 5 rooms with the AI designer.",
            icon: "badges/home_transformed",
            category: BadgeCategory::Special,
            rarity: BadgeRarity::Epic,
            requirement: BadgeRequirement::Rooms(5),
            points_reward: 120,
        },
        Badge {
            id: "money_minimalist",
            name: "Money Minimalist",
            description: "Complete 10 finance tasks.",
            icon: "badges/money_minimalist",
            category: BadgeCategory::Mastery,
            rarity: BadgeRarity::Rare,
            requirement: BadgeRequirement::CategoryTasks {
                category: "finance",
                count: 10,
            },
            points_reward: 50,
        },
        Badge {
            id: "digital_detox",
            name: "Digital Detox",
            description: "Complete 10 digital decluttering tasks.",
            icon: "badges/digital_detox",
            category: BadgeCategory::Mastery,
            rarity: BadgeRarity::Rare,
            requirement: BadgeRequirement::CategoryTasks {
                category: "digital",
                count: 10,
            },
            points_reward: 50,
        },
    ]
}
