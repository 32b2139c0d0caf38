//! Tracker logic: rating engine, same-side stats, bid detection and history replay.

mod bid_detection;
mod career;
mod history;
mod player_stats;
mod rating;
mod team_stats;

pub use bid_detection::{
    heuristic_bid_and_won, heuristic_bidder, named_bidder_tally, BidAndWonCount, BidderTally,
};
pub use career::{all_time_pairwise, all_time_stats, core_players, AllTimeLine, AllTimePair};
pub use history::{load_history, replay_history};
pub use player_stats::{consistency, scoreboard, timeseries, Consistency, GamePoint, PlayerLine};
pub use rating::{
    PlayerDelta, RankingEntry, RatingEngine, RatingSettings, RoundEffect, Standings,
    TournamentSnapshot, MAX_ADJUSTMENT,
};
pub use team_stats::{
    pairwise_stats, same_side_stats, triple_stats, SameSideRecord, TeamStats, TeamStatsAggregator,
};
