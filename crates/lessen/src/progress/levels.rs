use serde::Serialize;

/// One rung of the level ladder. `points_cumulative` is strictly increasing
/// with `level`; `points_required` is the delta from the previous rung.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelInfo {
    pub level: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub points_required: u64,
    pub points_cumulative: u64,
    pub rewards: &'static [&'static str],
}

/// Serialized shape of a ladder rung for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelView {
    pub level: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub points_required: u64,
    pub points_cumulative: u64,
    pub rewards: &'static [&'static str],
}

impl From<&LevelInfo> for LevelView {
    fn from(info: &LevelInfo) -> Self {
        Self {
            level: info.level,
            title: info.title,
            description: info.description,
            points_required: info.points_required,
            points_cumulative: info.points_cumulative,
            rewards: info.rewards,
        }
    }
}

/// Progress toward the next rung; terminal at max level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    /// Points earned past the current rung's threshold.
    pub current: u64,
    /// Points still needed to reach the next rung; zero at max level.
    pub needed: u64,
    /// Completion percentage of the current rung, clamped to [0, 100].
    pub percentage: u8,
}

/// The static level ladder.
pub struct LevelLadder {
    levels: Vec<LevelInfo>,
}

impl LevelLadder {
    pub fn standard() -> Self {
        Self {
            levels: standard_levels(),
        }
    }

    pub fn levels(&self) -> &[LevelInfo] {
        &self.levels
    }

    /// Highest rung whose cumulative threshold is within `total_points`.
    /// Total over all non-negative inputs; the ladder starts at zero.
    pub fn level_for(&self, total_points: u64) -> &LevelInfo {
        self.levels
            .iter()
            .rev()
            .find(|info| info.points_cumulative <= total_points)
            .unwrap_or(&self.levels[0])
    }

    pub fn next_level(&self, total_points: u64) -> Option<&LevelInfo> {
        self.levels
            .iter()
            .find(|info| info.points_cumulative > total_points)
    }

    pub fn progress_to_next(&self, total_points: u64) -> LevelProgress {
        let current_info = self.level_for(total_points);
        match self.next_level(total_points) {
            Some(next) => {
                let span = next.points_cumulative - current_info.points_cumulative;
                let current = total_points - current_info.points_cumulative;
                let percentage = if span == 0 {
                    100
                } else {
                    ((current as f64 / span as f64) * 100.0).clamp(0.0, 100.0) as u8
                };
                LevelProgress {
                    current,
                    needed: next.points_cumulative - total_points,
                    percentage,
                }
            }
            None => LevelProgress {
                current: total_points - current_info.points_cumulative,
                needed: 0,
                percentage: 100,
            },
        }
    }
}

fn standard_levels() -> Vec<LevelInfo> {
    vec![
        LevelInfo {
            level: 1,
            title: "Clutter Curious",
            description: "Taking the first honest look at what fills your space.",
            points_required: 0,
            points_cumulative: 0,
            rewards: &["Starter checklist"],
        },
        LevelInfo {
            level: 2,
            title: "Declutter Novice",
            description: "The first drawers are empty and it feels good.",
            points_required: 100,
            points_cumulative: 100,
            rewards: &["Weekly focus suggestions"],
        },
        LevelInfo {
            level: 3,
            title: "Tidy Apprentice",
            description: "Letting go is becoming a habit instead of an event.",
            points_required: 150,
            points_cumulative: 250,
            rewards: &["Category deep-dive guides"],
        },
        LevelInfo {
            level: 4,
            title: "Mindful Organizer",
            description: "Every item that stays has a reason to.",
            points_required: 250,
            points_cumulative: 500,
            rewards: &["Custom home screen themes"],
        },
        LevelInfo {
            level: 5,
            title: "Space Maker",
            description: "Rooms are opening up, one surface at a time.",
            points_required: 500,
            points_cumulative: 1000,
            rewards: &["Seasonal reset planner"],
        },
        LevelInfo {
            level: 6,
            title: "Simplicity Seeker",
            description: "Shopping habits are catching up with the new space.",
            points_required: 750,
            points_cumulative: 1750,
            rewards: &["Mindful spending tracker"],
        },
        LevelInfo {
            level: 7,
            title: "Calm Curator",
            description: "Your home now reflects choices, not accumulation.",
            points_required: 1000,
            points_cumulative: 2750,
            rewards: &["Curated reading collection"],
        },
        LevelInfo {
            level: 8,
            title: "Intentional Minimalist",
            description: "Less is no longer a project; it is the default.",
            points_required: 1250,
            points_cumulative: 4000,
            rewards: &["Early access to new programs"],
        },
        LevelInfo {
            level: 9,
            title: "Essentialist",
            description: "Everything you own earns its place daily.",
            points_required: 1500,
            points_cumulative: 5500,
            rewards: &["Community mentor badge"],
        },
        LevelInfo {
            level: 10,
            title: "Zen Master",
            description: "The practice has become the lifestyle.",
            points_required: 2000,
            points_cumulative: 7500,
            rewards: &["Lifetime achievement gallery"],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_resolution_is_total_and_threshold_based() {
        let ladder = LevelLadder::standard();
        assert_eq!(ladder.level_for(0).level, 1);
        assert_eq!(ladder.level_for(99).level, 1);
        assert_eq!(ladder.level_for(100).level, 2);
        assert_eq!(ladder.level_for(250).level, 3);
        assert_eq!(ladder.level_for(7500).level, 10);
        assert_eq!(ladder.level_for(u64::MAX).level, 10);
    }

    #[test]
    fn levels_are_monotonic_in_points() {
        let ladder = LevelLadder::standard();
        let mut previous = 0;
        for points in (0..8000).step_by(37) {
            let level = ladder.level_for(points).level;
            assert!(level >= previous, "level dropped at {points} points");
            previous = level;
        }
    }

    #[test]
    fn cumulative_thresholds_strictly_increase() {
        let ladder = LevelLadder::standard();
        for pair in ladder.levels().windows(2) {
            assert!(pair[1].points_cumulative > pair[0].points_cumulative);
            assert_eq!(
                pair[1].points_cumulative,
                pair[0].points_cumulative + pair[1].points_required
            );
        }
    }

    #[test]
    fn progress_reports_remaining_points_and_percentage() {
        let ladder = LevelLadder::standard();
        let progress = ladder.progress_to_next(175);
        // Level 2 spans 100..250; 75 earned of 150.
        assert_eq!(progress.current, 75);
        assert_eq!(progress.needed, 75);
        assert_eq!(progress.percentage, 50);
    }

    #[test]
    fn progress_is_terminal_at_max_level() {
        let ladder = LevelLadder::standard();
        let progress = ladder.progress_to_next(9000);
        assert_eq!(progress.needed, 0);
        assert_eq!(progress.percentage, 100);
        assert!(ladder.next_level(9000).is_none());
    }
}
