//! Two independent views of "who bid and won": the score divisibility heuristic
//! and the named-bidder column. They are not reconciled.

use crate::models::{round_to, PlayerName, RoundRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Heuristic bid-and-won count of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidAndWonCount {
    pub player: PlayerName,
    pub bid_and_won: u32,
}

/// Player credited by the divisibility heuristic for `round`, if any.
///
/// When the total is not a multiple of the top score the split was uneven,
/// and the top scorer is taken to have bid and won.
pub fn heuristic_bidder(round: &RoundRecord) -> Option<&str> {
    let (player, max_score) = round.top_scorer()?;
    if max_score > 0 && round.total().rem_euclid(max_score) != 0 {
        Some(player)
    } else {
        None
    }
}

/// Heuristic count for every player of the tournament (zeros included), highest first.
pub fn heuristic_bid_and_won(players: &[PlayerName], rounds: &[RoundRecord]) -> Vec<BidAndWonCount> {
    let mut counts: Vec<BidAndWonCount> = players
        .iter()
        .map(|p| BidAndWonCount {
            player: p.clone(),
            bid_and_won: 0,
        })
        .collect();

    for round in rounds {
        let Some(bidder) = heuristic_bidder(round) else {
            continue;
        };
        match counts.iter_mut().find(|c| c.player == bidder) {
            Some(count) => count.bid_and_won += 1,
            None => counts.push(BidAndWonCount {
                player: bidder.to_string(),
                bid_and_won: 1,
            }),
        }
    }

    counts.sort_by(|a, b| b.bid_and_won.cmp(&a.bid_and_won));
    counts
}

/// Named-bidder record of one player within a tournament.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidderTally {
    pub bid_attempts: u32,
    pub bid_wins: u32,
    /// Percentage (1 dp); null without attempts.
    pub bid_win_rate: Option<f64>,
}

/// Named-bidder tallies over every round, degenerate ones included.
pub fn named_bidder_tally(players: &[PlayerName], rounds: &[RoundRecord]) -> BTreeMap<PlayerName, BidderTally> {
    players
        .iter()
        .map(|player| {
            let mut attempts = 0;
            let mut wins = 0;
            for round in rounds.iter().filter(|r| r.bidder.as_deref() == Some(player.as_str())) {
                attempts += 1;
                if round.score_of(player).unwrap_or(0) > 0 {
                    wins += 1;
                }
            }
            let bid_win_rate = (attempts > 0)
                .then(|| round_to(100.0 * f64::from(wins) / f64::from(attempts), 1));
            (
                player.clone(),
                BidderTally {
                    bid_attempts: attempts,
                    bid_wins: wins,
                    bid_win_rate,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_split_is_not_a_bid() {
        let round = RoundRecord::from_pairs([("A", 150), ("B", 150), ("C", 0)]);
        assert_eq!(heuristic_bidder(&round), None);
    }

    #[test]
    fn all_losers_credit_nobody() {
        let round = RoundRecord::from_pairs([("A", 0), ("B", -20)]);
        assert_eq!(heuristic_bidder(&round), None);
    }

    #[test]
    fn negative_total_uses_floored_remainder() {
        // -250 mod 100 is 50, not -50; either way it is not a multiple.
        let round = RoundRecord::from_pairs([("A", 100), ("B", -350)]);
        assert_eq!(heuristic_bidder(&round), Some("A"));
        let even = RoundRecord::from_pairs([("A", 100), ("B", -300)]);
        assert_eq!(heuristic_bidder(&even), None);
    }
}
