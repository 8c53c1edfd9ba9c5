use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for badge catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BadgeId(pub String);

impl BadgeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

/// Difficulty tier of a decluttering task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskDifficulty {
    Easy,
    Medium,
    Hard,
}

impl TaskDifficulty {
    pub const fn label(self) -> &'static str {
        match self {
            TaskDifficulty::Easy => "easy",
            TaskDifficulty::Medium => "medium",
            TaskDifficulty::Hard => "hard",
        }
    }
}

/// Minimal description of a coaching task at the moment it is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub id: String,
    pub title: String,
    pub difficulty: TaskDifficulty,
    pub category: String,
}

/// Minimal description of a coaching article at the moment it is read.
///
/// `read_time` keeps the catalog's display form (e.g. "6 min"); scoring parses
/// the leading minute count and falls back to the reference duration when the
/// label is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSnapshot {
    pub id: String,
    pub title: String,
    pub read_time: String,
}

impl ArticleSnapshot {
    pub fn read_minutes(&self) -> Option<u32> {
        let digits: String = self
            .read_time
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

/// Bonus window an action landed in. At most one applies per action; the hour
/// windows take precedence over the weekend so the variants stay mutually
/// exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeContext {
    EarlyMorning,
    LateNight,
    Weekend,
}

impl TimeContext {
    pub fn from_local(moment: NaiveDateTime) -> Option<Self> {
        let hour = moment.hour();
        if (5..9).contains(&hour) {
            return Some(TimeContext::EarlyMorning);
        }
        if !(5..22).contains(&hour) {
            return Some(TimeContext::LateNight);
        }
        match moment.weekday() {
            Weekday::Sat | Weekday::Sun => Some(TimeContext::Weekend),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TimeContext::EarlyMorning => "early_morning",
            TimeContext::LateNight => "late_night",
            TimeContext::Weekend => "weekend",
        }
    }
}

/// Cumulative progress counters for one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_points: u64,
    pub level: u32,
    pub streak_days: u32,
    pub longest_streak: u32,
    pub tasks_completed: u32,
    pub articles_read: u32,
    pub rooms_transformed: u32,
    pub category_completions: BTreeMap<String, u32>,
    pub badges_earned: BTreeSet<BadgeId>,
    pub last_activity: DateTime<Utc>,
}

impl UserStats {
    /// Fresh record for a member's first tracked action.
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            total_points: 0,
            level: 1,
            streak_days: 0,
            longest_streak: 0,
            tasks_completed: 0,
            articles_read: 0,
            rooms_transformed: 0,
            category_completions: BTreeMap::new(),
            badges_earned: BTreeSet::new(),
            last_activity: at,
        }
    }

    pub fn completions_in(&self, category: &str) -> u32 {
        self.category_completions
            .get(&category.to_ascii_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// Advance the streak counters for a qualifying action at `at`.
    ///
    /// Same day as the last activity leaves the streak untouched; the next
    /// calendar day extends it; a gap resets it to one. Invariant:
    /// `longest_streak >= streak_days`.
    pub(crate) fn roll_streak(&mut self, at: DateTime<Utc>) {
        let today = at.date_naive();
        let previous = self.last_activity.date_naive();

        if self.streak_days == 0 {
            self.streak_days = 1;
        } else if today > previous {
            if previous.succ_opt() == Some(today) {
                self.streak_days += 1;
            } else {
                self.streak_days = 1;
            }
        }

        self.longest_streak = self.longest_streak.max(self.streak_days);
    }
}

/// Origin of one point award in the per-user ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AwardSource {
    TaskCompleted { task_id: String, category: String },
    ArticleRead { article_id: String },
    RoomTransformed,
    BadgeBonus { badge_id: BadgeId },
}

/// One entry in the append-only point-award ledger. Reversal paths locate the
/// matching entry so an uncompleted task gives back exactly what it awarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardRecord {
    pub source: AwardSource,
    pub points: u64,
    pub awarded_at: DateTime<Utc>,
}
