//! Integration tests for same-side pair/triple stats and bid detection.

use spades_tracker::logic::{heuristic_bid_and_won, heuristic_bidder, named_bidder_tally};
use spades_tracker::{pairwise_stats, triple_stats, RoundRecord, TeamStatsAggregator};

fn players(names: &[&str]) -> Vec<String> {
    names.iter().map(|p| p.to_string()).collect()
}

#[test]
fn pair_counts_both_sides() {
    let rounds = vec![
        RoundRecord::from_pairs([("A", 100), ("B", 60), ("C", 0), ("D", 0)]),
        RoundRecord::from_pairs([("A", 0), ("B", 0), ("C", 80), ("D", 80)]),
        RoundRecord::from_pairs([("A", 90), ("B", 0), ("C", 90), ("D", 0)]),
    ];
    let pairs = pairwise_stats(&rounds, 0);
    let ab = pairs
        .iter()
        .find(|r| r.players == ["A", "B"])
        .expect("A and B shared rounds");
    assert_eq!(ab.wins, 1);
    assert_eq!(ab.losses, 1);
    assert_eq!(ab.total_games, 2);
    // min(100, 60) = 60 and min(0, 0) = 0.
    assert_eq!(ab.avg_points, 30.0);
    assert_eq!(ab.win_percentage, 50.0);
}

#[test]
fn every_unordered_group_appears_once() {
    let rounds = vec![RoundRecord::from_pairs([
        ("D", 50),
        ("B", 50),
        ("C", 50),
        ("A", 0),
    ])];
    let pairs = pairwise_stats(&rounds, 0);
    let winners: Vec<_> = pairs.iter().filter(|r| r.wins == 1).collect();
    assert_eq!(winners.len(), 3);
    for r in &winners {
        assert!(r.players[0] < r.players[1]);
    }
    // A lost alone, so there is no losing pair.
    assert_eq!(pairs.len(), 3);

    let triples = triple_stats(&rounds, 0);
    assert_eq!(triples.len(), 1);
    assert_eq!(triples[0].players, ["B", "C", "D"]);
    assert_eq!(triples[0].avg_points, 50.0);
}

#[test]
fn thresholds_filter_and_order_by_win_percentage() {
    let mut rounds = Vec::new();
    for i in 0..10 {
        // A and B always together; they win 7 of 10.
        let ab = if i < 7 { 60 } else { 0 };
        let cd = if i < 7 { 0 } else { 60 };
        rounds.push(RoundRecord::from_pairs([("A", ab), ("B", ab), ("C", cd), ("D", cd)]));
    }
    let pairs = pairwise_stats(&rounds, 10);
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].players, ["A", "B"]);
    assert_eq!(pairs[0].win_percentage, 70.0);
    assert_eq!(pairs[1].players, ["C", "D"]);
    assert_eq!(pairs[1].win_percentage, 30.0);
    assert_eq!(pairs[0].avg_points, 42.0);

    assert!(pairwise_stats(&rounds, 11).is_empty());
}

#[test]
fn uneven_total_credits_top_scorer() {
    let round = RoundRecord::from_pairs([("A", 0), ("B", 0), ("C", 300), ("D", 200)]);
    assert_eq!(heuristic_bidder(&round), Some("C"));

    let counts = heuristic_bid_and_won(&players(&["A", "B", "C", "D"]), &[round]);
    assert_eq!(counts[0].player, "C");
    assert_eq!(counts[0].bid_and_won, 1);
    assert_eq!(counts.len(), 4);
    assert!(counts[1..].iter().all(|c| c.bid_and_won == 0));
}

#[test]
fn aggregator_uses_its_thresholds() {
    let rounds: Vec<RoundRecord> = (0..5)
        .map(|_| RoundRecord::from_pairs([("A", 40), ("B", 40), ("C", 40), ("D", 0)]))
        .collect();
    let stats = TeamStatsAggregator::default().aggregate(&players(&["A", "B", "C", "D"]), &rounds);
    // Three pairs with 5 games each miss the pair threshold of 10.
    assert!(stats.pairs.is_empty());
    assert_eq!(stats.triples.len(), 1);
    assert_eq!(stats.triples[0].total_games, 5);
    assert_eq!(stats.triples[0].win_percentage, 100.0);
    // 120 is a multiple of 40, so no heuristic bids.
    assert!(stats.heuristic_bids.iter().all(|c| c.bid_and_won == 0));

    let loose = TeamStatsAggregator::new(5, 5).aggregate(&players(&["A", "B", "C", "D"]), &rounds);
    assert_eq!(loose.pairs.len(), 3);
}

#[test]
fn named_bidder_tally_ignores_other_columns() {
    let rounds = vec![
        RoundRecord::from_pairs([("A", 120), ("B", 0)]).with_bidder("A"),
        RoundRecord::from_pairs([("A", 0), ("B", 0)]).with_bidder("A"),
        RoundRecord::from_pairs([("A", 0), ("B", 90)]),
    ];
    let tally = named_bidder_tally(&players(&["A", "B"]), &rounds);
    assert_eq!(tally["A"].bid_attempts, 2);
    assert_eq!(tally["A"].bid_wins, 1);
    assert_eq!(tally["A"].bid_win_rate, Some(50.0));
    assert_eq!(tally["B"].bid_attempts, 0);
    assert_eq!(tally["B"].bid_win_rate, None);
}
