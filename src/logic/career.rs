//! Cross-tournament summaries: core player selection, all-time stats and all-time pairs.

use crate::logic::player_stats::PlayerLine;
use crate::logic::team_stats::SameSideRecord;
use crate::models::{round_to, PlayerName, TournamentData};
use serde::Serialize;
use std::collections::BTreeMap;

/// Players whose summed tournament lengths exceed `threshold` rounds, most rounds first.
///
/// Each tournament adds its full round count to every player listed in it.
/// Ties keep the order of first appearance.
pub fn core_players<'a>(
    tournaments: impl IntoIterator<Item = &'a TournamentData>,
    threshold: u32,
) -> Vec<PlayerName> {
    let mut counts: Vec<(PlayerName, u32)> = Vec::new();
    for data in tournaments {
        let rounds = data.rounds.len() as u32;
        for player in &data.players {
            match counts.iter_mut().find(|(p, _)| p == player) {
                Some((_, n)) => *n += rounds,
                None => counts.push((player.clone(), rounds)),
            }
        }
    }
    counts.retain(|&(_, n)| n > threshold);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(p, _)| p).collect()
}

/// Summed scoreboard figures of one core player over the whole history.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllTimeLine {
    pub player: PlayerName,
    pub wins: u32,
    pub total_games: u32,
    pub total_points: i64,
    pub tournament_wins: u32,
    pub win_percentage: f64,
    pub avg_points: f64,
}

/// All-time lines for `core` players from each tournament's scoreboard, most tournament wins first.
///
/// The first line of a scoreboard is that tournament's winner.
pub fn all_time_stats(core: &[PlayerName], scoreboards: &[Vec<PlayerLine>]) -> Vec<AllTimeLine> {
    let mut lines: Vec<AllTimeLine> = core
        .iter()
        .map(|player| AllTimeLine {
            player: player.clone(),
            wins: 0,
            total_games: 0,
            total_points: 0,
            tournament_wins: 0,
            win_percentage: 0.0,
            avg_points: 0.0,
        })
        .collect();

    for board in scoreboards {
        for entry in board {
            if let Some(line) = lines.iter_mut().find(|l| l.player == entry.player) {
                line.wins += entry.wins;
                line.total_games += entry.total_games;
                line.total_points += entry.total_points;
            }
        }
        if let Some(winner) = board.first() {
            if let Some(line) = lines.iter_mut().find(|l| l.player == winner.player) {
                line.tournament_wins += 1;
            }
        }
    }

    for line in &mut lines {
        if line.total_games > 0 {
            let games = f64::from(line.total_games);
            line.win_percentage = round_to(100.0 * f64::from(line.wins) / games, 1);
            line.avg_points = round_to(line.total_points as f64 / games, 1);
        }
    }
    lines.sort_by(|a, b| b.tournament_wins.cmp(&a.tournament_wins));
    lines
}

/// Same-side figures of one pair summed over tournaments.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllTimePair {
    pub player1: PlayerName,
    pub player2: PlayerName,
    pub wins: u32,
    pub losses: u32,
    pub total_games: u32,
    pub win_pct: f64,
}

/// Sum of the (already threshold-filtered) pair records of every tournament.
pub fn all_time_pairwise(pair_records: &[Vec<SameSideRecord>]) -> Vec<AllTimePair> {
    let mut pairs: BTreeMap<(PlayerName, PlayerName), (u32, u32, u32)> = BTreeMap::new();
    for record in pair_records.iter().flatten() {
        let [a, b] = record.players.as_slice() else {
            continue;
        };
        let key = if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        };
        let entry = pairs.entry(key).or_default();
        entry.0 += record.wins;
        entry.1 += record.losses;
        entry.2 += record.total_games;
    }

    pairs
        .into_iter()
        .map(|((player1, player2), (wins, losses, total_games))| {
            let decided = wins + losses;
            let win_pct = if decided == 0 {
                0.0
            } else {
                round_to(100.0 * f64::from(wins) / f64::from(decided), 1)
            };
            AllTimePair {
                player1,
                player2,
                wins,
                losses,
                total_games,
                win_pct,
            }
        })
        .collect()
}
