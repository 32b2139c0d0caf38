//! Same-side statistics for pairs and triples of players within one tournament.
//!
//! Teams are not fixed: each round splits into a winning and a losing side by
//! the sign of each player's own score, and every group of players that ended
//! on the same side is tallied. Round order does not matter.

use crate::logic::bid_detection::{heuristic_bid_and_won, BidAndWonCount};
use crate::models::{round_to, PlayerName, RoundRecord, Side};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated record for one unordered group of players.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SameSideRecord {
    /// Group members in ascending name order.
    pub players: Vec<PlayerName>,
    pub wins: u32,
    pub losses: u32,
    pub total_games: u32,
    /// Mean of the lowest member score over the shared rounds (1 dp).
    pub avg_points: f64,
    pub win_percentage: f64,
}

#[derive(Default)]
struct Tally {
    wins: u32,
    losses: u32,
    points: i64,
}

/// All `k`-subsets of `members`, each in the order of `members`.
fn subsets<'a>(members: &[(&'a str, i64)], k: usize) -> Vec<Vec<(&'a str, i64)>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    let mut out = Vec::new();
    for (i, &first) in members.iter().enumerate() {
        if members.len() - i < k {
            break;
        }
        for mut rest in subsets(&members[i + 1..], k - 1) {
            rest.insert(0, first);
            out.push(rest);
        }
    }
    out
}

/// Same-side records for groups of `group_size` players with at least `min_games` shared rounds,
/// sorted by win percentage descending (ties in name order).
pub fn same_side_stats(rounds: &[RoundRecord], group_size: usize, min_games: u32) -> Vec<SameSideRecord> {
    let mut tallies: BTreeMap<Vec<&str>, Tally> = BTreeMap::new();

    for round in rounds {
        for side in [Side::Won, Side::Lost] {
            let mut members: Vec<(&str, i64)> = round.side(side).collect();
            // Name order makes each unordered group appear exactly once.
            members.sort_by(|a, b| a.0.cmp(b.0));
            members.dedup_by(|a, b| a.0 == b.0);

            for group in subsets(&members, group_size) {
                let lowest = group.iter().map(|&(_, score)| score).min().unwrap_or(0);
                let names = group.iter().map(|&(name, _)| name).collect();
                let tally = tallies.entry(names).or_default();
                match side {
                    Side::Won => tally.wins += 1,
                    Side::Lost => tally.losses += 1,
                }
                tally.points += lowest;
            }
        }
    }

    let mut records: Vec<SameSideRecord> = tallies
        .into_iter()
        .map(|(names, tally)| {
            let total_games = tally.wins + tally.losses;
            SameSideRecord {
                players: names.into_iter().map(str::to_string).collect(),
                wins: tally.wins,
                losses: tally.losses,
                total_games,
                avg_points: round_to(tally.points as f64 / f64::from(total_games), 1),
                win_percentage: round_to(100.0 * f64::from(tally.wins) / f64::from(total_games), 1),
            }
        })
        .collect();
    records.sort_by(|a, b| b.win_percentage.total_cmp(&a.win_percentage));
    records.retain(|r| r.total_games >= min_games);
    records
}

pub fn pairwise_stats(rounds: &[RoundRecord], min_games: u32) -> Vec<SameSideRecord> {
    same_side_stats(rounds, 2, min_games)
}

pub fn triple_stats(rounds: &[RoundRecord], min_games: u32) -> Vec<SameSideRecord> {
    same_side_stats(rounds, 3, min_games)
}

/// Everything the aggregator derives from one tournament.
#[derive(Clone, Debug, PartialEq)]
pub struct TeamStats {
    pub pairs: Vec<SameSideRecord>,
    pub triples: Vec<SameSideRecord>,
    pub heuristic_bids: Vec<BidAndWonCount>,
}

/// Computes same-side stats with fixed minimum-game thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeamStatsAggregator {
    pub pair_min_games: u32,
    pub triple_min_games: u32,
}

impl Default for TeamStatsAggregator {
    fn default() -> Self {
        Self {
            pair_min_games: 10,
            triple_min_games: 5,
        }
    }
}

impl TeamStatsAggregator {
    pub fn new(pair_min_games: u32, triple_min_games: u32) -> Self {
        Self {
            pair_min_games,
            triple_min_games,
        }
    }

    pub fn aggregate(&self, players: &[PlayerName], rounds: &[RoundRecord]) -> TeamStats {
        TeamStats {
            pairs: pairwise_stats(rounds, self.pair_min_games),
            triples: triple_stats(rounds, self.triple_min_games),
            heuristic_bids: heuristic_bid_and_won(players, rounds),
        }
    }
}
