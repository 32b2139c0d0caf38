//! RoundRecord and Side: one round of raw scores.

use crate::models::player::PlayerName;
use serde::Serialize;

/// Which side of a round a player ended on.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Won,
    Lost,
}

impl Side {
    /// Positive scores win; zero and negative scores lose.
    pub fn of(score: i64) -> Self {
        if score > 0 {
            Side::Won
        } else {
            Side::Lost
        }
    }
}

/// Scores of every participant for one round, in column order, plus the
/// named bidder when the source records one.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoundRecord {
    pub scores: Vec<(PlayerName, i64)>,
    pub bidder: Option<PlayerName>,
}

impl RoundRecord {
    pub fn new(scores: Vec<(PlayerName, i64)>) -> Self {
        Self {
            scores,
            bidder: None,
        }
    }

    /// Build a round from `(name, score)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, score)| (name.to_string(), score))
                .collect(),
        )
    }

    pub fn with_bidder(mut self, bidder: impl Into<PlayerName>) -> Self {
        self.bidder = Some(bidder.into());
        self
    }

    /// Score of `player`, or `None` when they did not take part.
    pub fn score_of(&self, player: &str) -> Option<i64> {
        self.scores
            .iter()
            .find(|(name, _)| name == player)
            .map(|&(_, score)| score)
    }

    pub fn total(&self) -> i64 {
        self.scores.iter().map(|&(_, score)| score).sum()
    }

    /// First player holding the highest score, with that score.
    pub fn top_scorer(&self) -> Option<(&str, i64)> {
        let mut best: Option<(&str, i64)> = None;
        for (name, score) in &self.scores {
            if best.map_or(true, |(_, s)| *score > s) {
                best = Some((name.as_str(), *score));
            }
        }
        best
    }

    /// Participants on `side`, in column order.
    pub fn side(&self, side: Side) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.scores
            .iter()
            .filter(move |&&(_, score)| Side::of(score) == side)
            .map(|(name, score)| (name.as_str(), *score))
    }
}
