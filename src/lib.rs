//! 3 of Spades tracker: player ratings and same-side stats from per-round scores.

pub mod config;
pub mod feed;
pub mod logic;
pub mod models;
pub mod report;

pub use config::{ConfigError, TrackerConfig};
pub use feed::{CsvDirectory, FeedError, RoundSource};
pub use logic::{
    pairwise_stats, replay_history, triple_stats, PlayerDelta, RatingEngine, RatingSettings,
    RoundEffect, SameSideRecord, TeamStats, TeamStatsAggregator,
};
pub use models::{
    PlayerName, PlayerProfile, ProfileSnapshot, RoundRecord, Side, StreakState, TournamentContext,
    TournamentData, TournamentKind, TournamentRef,
};
pub use report::{Report, TournamentReport};
