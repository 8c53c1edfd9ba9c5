//! Member progress: scoring, levels, badges, and the award orchestrator.
//!
//! The scoring rules and catalog resolvers are pure; the orchestrator in
//! [`service`] owns all stat mutation and runs the badge cascade under a
//! per-user serialization lock.

pub mod badges;
pub mod domain;
pub mod levels;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use badges::{Badge, BadgeCatalog, BadgeCategory, BadgeRarity, BadgeRequirement, BadgeView};
pub use domain::{
    ArticleSnapshot, AwardRecord, AwardSource, BadgeId, TaskDifficulty, TaskSnapshot, TimeContext,
    UserStats,
};
pub use levels::{LevelInfo, LevelLadder, LevelProgress, LevelView};
pub use repository::{ProgressRecord, ProgressRepository, RepositoryError};
pub use router::progress_router;
pub use scoring::{ActiveMultiplier, MultiplierKind, ScoringConfig, ScoringEngine, StreakTier};
pub use service::{
    ProgressOutcome, ProgressService, ProgressServiceError, ProgressSnapshot, ReversalOutcome,
};
