//! Serializable output of a full run.

use crate::logic::{
    AllTimeLine, AllTimePair, BidAndWonCount, BidderTally, Consistency, GamePoint, PlayerLine,
    RankingEntry, SameSideRecord, TournamentSnapshot,
};
use crate::models::{CareerStats, PlayerName, TournamentKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything derived from one tournament.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentReport {
    pub id: String,
    pub kind: TournamentKind,
    pub number: u32,
    /// Position among loaded tournaments of the same kind, from 1.
    pub display_number: u32,
    pub display_name: String,
    pub weight: f64,
    pub players: Vec<PlayerName>,
    pub core_players: Vec<PlayerName>,
    pub guest_players: Vec<PlayerName>,
    pub total_games: u32,
    pub winner: Option<PlayerName>,
    pub player_stats: Vec<PlayerLine>,
    pub game_data: Vec<GamePoint>,
    pub pairwise_stats: Vec<SameSideRecord>,
    pub trio_stats: Vec<SameSideRecord>,
    pub bid_and_won: Vec<BidAndWonCount>,
    pub bid_stats_by_player: BTreeMap<PlayerName, BidderTally>,
    pub has_bidder_data: bool,
    pub consistency_stats: BTreeMap<PlayerName, Consistency>,
}

/// Ratings of every ranked player after the `tournament`-th tournament (0 = start).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub tournament: usize,
    #[serde(flatten)]
    pub ratings: BTreeMap<PlayerName, f64>,
}

/// Full run output.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    /// Ranked (core) players, most rounds played first.
    pub players: Vec<PlayerName>,
    pub total_tournaments: usize,
    pub tournaments: Vec<TournamentReport>,
    /// Tournament id → player → before/after record.
    pub tournament_snapshots: BTreeMap<String, TournamentSnapshot>,
    pub rankings: Vec<RankingEntry>,
    pub rating_history: Vec<HistoryPoint>,
    pub all_time_stats: Vec<AllTimeLine>,
    pub all_time_pairwise: Vec<AllTimePair>,
    pub career_stats: BTreeMap<PlayerName, CareerStats>,
}

impl Report {
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Regroup per-player rating series into one point per tournament.
pub fn history_points(series: &BTreeMap<PlayerName, Vec<f64>>) -> Vec<HistoryPoint> {
    let len = series.values().map(Vec::len).max().unwrap_or(0);
    (0..len)
        .map(|i| HistoryPoint {
            tournament: i,
            ratings: series
                .iter()
                .filter_map(|(p, values)| values.get(i).or(values.last()).map(|&r| (p.clone(), r)))
                .collect(),
        })
        .collect()
}
