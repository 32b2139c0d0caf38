//! Per-tournament scoreboard, round-by-round timeseries and scoring consistency.
//!
//! Every player is counted in every round of the tournament; rounds they lost
//! contribute zero (or negative) points.

use crate::models::{round_to, PlayerName, RoundRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// One scoreboard line.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLine {
    pub player: PlayerName,
    pub wins: u32,
    pub total_games: u32,
    pub avg_points: f64,
    pub total_points: i64,
    pub win_percentage: f64,
}

/// Scores of `player` in every round, 0 where the round has no entry.
fn scores_of<'a>(player: &'a str, rounds: &'a [RoundRecord]) -> impl Iterator<Item = i64> + 'a {
    rounds.iter().map(move |r| r.score_of(player).unwrap_or(0))
}

/// Scoreboard sorted by total points, then wins, both descending. Ties go by name.
pub fn scoreboard(players: &[PlayerName], rounds: &[RoundRecord]) -> Vec<PlayerLine> {
    let total_games = rounds.len() as u32;
    let mut lines: Vec<PlayerLine> = players
        .iter()
        .map(|player| {
            let (wins, total_points) = scores_of(player, rounds)
                .fold((0u32, 0i64), |(w, t), s| (w + u32::from(s > 0), t + s));
            let (avg_points, win_percentage) = if total_games == 0 {
                (0.0, 0.0)
            } else {
                (
                    round_to(total_points as f64 / f64::from(total_games), 1),
                    round_to(100.0 * f64::from(wins) / f64::from(total_games), 1),
                )
            };
            PlayerLine {
                player: player.clone(),
                wins,
                total_games,
                avg_points,
                total_points,
                win_percentage,
            }
        })
        .collect();
    lines.sort_by(|a, b| {
        (b.total_points, b.wins)
            .cmp(&(a.total_points, a.wins))
            .then_with(|| a.player.cmp(&b.player))
    });
    lines
}

/// Cumulative state after one round.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePoint {
    /// 1-based round number.
    pub game: u32,
    pub cumulative: BTreeMap<PlayerName, i64>,
    /// Rounds won so far divided by rounds played so far (4 dp).
    pub win_ratio: BTreeMap<PlayerName, f64>,
    pub won: BTreeMap<PlayerName, bool>,
}

pub fn timeseries(players: &[PlayerName], rounds: &[RoundRecord]) -> Vec<GamePoint> {
    let mut cumulative: BTreeMap<PlayerName, i64> = players.iter().map(|p| (p.clone(), 0)).collect();
    let mut wins: BTreeMap<PlayerName, u32> = players.iter().map(|p| (p.clone(), 0)).collect();

    rounds
        .iter()
        .enumerate()
        .map(|(i, round)| {
            let game = i as u32 + 1;
            let mut won = BTreeMap::new();
            for player in players {
                let score = round.score_of(player).unwrap_or(0);
                *cumulative.entry(player.clone()).or_default() += score;
                if score > 0 {
                    *wins.entry(player.clone()).or_default() += 1;
                }
                won.insert(player.clone(), score > 0);
            }
            let win_ratio = wins
                .iter()
                .map(|(p, &w)| (p.clone(), round_to(f64::from(w) / f64::from(game), 4)))
                .collect();
            GamePoint {
                game,
                cumulative: cumulative.clone(),
                win_ratio,
                won,
            }
        })
        .collect()
}

/// How evenly a player scored over a tournament.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Consistency {
    pub mean: f64,
    pub std: f64,
    /// Coefficient of variation, 0 when the mean is not positive.
    pub cv: f64,
    pub mean_wins: f64,
    pub std_wins: f64,
    pub scores: Vec<i64>,
}

fn mean(values: &[i64]) -> f64 {
    values.iter().sum::<i64>() as f64 / values.len() as f64
}

/// Sample standard deviation; callers ensure at least two values.
fn sample_std(values: &[i64]) -> f64 {
    let m = mean(values);
    let var = values.iter().map(|&v| (v as f64 - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

/// Consistency of each player over all rounds; empty for tournaments with fewer than two rounds.
pub fn consistency(players: &[PlayerName], rounds: &[RoundRecord]) -> BTreeMap<PlayerName, Consistency> {
    if rounds.len() < 2 {
        return BTreeMap::new();
    }
    players
        .iter()
        .map(|player| {
            let scores: Vec<i64> = scores_of(player, rounds).collect();
            let mean_all = mean(&scores);
            let std_all = sample_std(&scores);
            let cv = if mean_all > 0.0 {
                round_to(std_all / mean_all, 3)
            } else {
                0.0
            };
            let win_scores: Vec<i64> = scores.iter().copied().filter(|&s| s > 0).collect();
            let mean_wins = if win_scores.is_empty() {
                0.0
            } else {
                round_to(mean(&win_scores), 1)
            };
            let std_wins = if win_scores.len() > 1 {
                round_to(sample_std(&win_scores), 1)
            } else {
                0.0
            };
            (
                player.clone(),
                Consistency {
                    mean: round_to(mean_all, 1),
                    std: round_to(std_all, 1),
                    cv,
                    mean_wins,
                    std_wins,
                    scores,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_std_matches_hand_computation() {
        // mean 5, squared deviations 9+1+1+9 = 20, / 3
        let std = sample_std(&[2, 4, 6, 8]);
        assert!((std - (20.0f64 / 3.0).sqrt()).abs() < 1e-9);
    }
}
