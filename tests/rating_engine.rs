//! Integration tests for the rating engine: round updates, streaks and per-tournament snapshots.

use spades_tracker::{
    RatingEngine, RatingSettings, RoundEffect, RoundRecord, TournamentContext,
};

fn engine(ranked: &[&str]) -> RatingEngine {
    RatingEngine::new(
        RatingSettings::default(),
        ranked.iter().map(|p| p.to_string()).collect(),
    )
}

fn context(key: &str, players: &[&str]) -> TournamentContext {
    TournamentContext::new(key, 1.0, players.iter().map(|p| p.to_string()).collect())
}

fn rating(engine: &RatingEngine, player: &str) -> f64 {
    engine.profile(player).unwrap().rating
}

#[test]
fn equal_ratings_use_plain_multiplier() {
    let mut e = engine(&[]);
    let ctx = context("Championship #1", &["A", "B", "C"]);
    let effect = e.process_round(&ctx, &RoundRecord::from_pairs([("A", 120), ("B", 80), ("C", 0)]));

    match effect {
        RoundEffect::Applied { bid, multiplier } => {
            assert_eq!(bid, 80);
            assert!((multiplier - 0.005).abs() < 1e-12);
        }
        RoundEffect::Skipped => panic!("round should apply"),
    }
    assert_eq!(rating(&e, "A"), 1000.6);
    assert_eq!(rating(&e, "B"), 1000.4);
    assert_eq!(rating(&e, "C"), 999.6);

    let a = e.profile("A").unwrap();
    assert_eq!(a.bid_and_won, 1);
    assert_eq!((a.career_games, a.career_wins), (1, 1));
    let b = e.profile("B").unwrap();
    assert_eq!(b.bid_and_won, 0);
    let c = e.profile("C").unwrap();
    assert_eq!((c.career_games, c.career_wins), (1, 0));
}

#[test]
fn gains_and_losses_are_not_zero_sum() {
    let mut e = engine(&[]);
    let ctx = context("T", &["A", "B", "C", "D"]);
    e.process_round(
        &ctx,
        &RoundRecord::from_pairs([("A", 200), ("B", 100), ("C", 0), ("D", 0)]),
    );
    let gained = (rating(&e, "A") - 1000.0) + (rating(&e, "B") - 1000.0);
    let lost = (1000.0 - rating(&e, "C")) + (1000.0 - rating(&e, "D"));
    // Winners gain 300 points' worth, losers each lose the 100-point bid.
    assert!((gained - 1.5).abs() < 1e-9);
    assert!((lost - 1.0).abs() < 1e-9);
}

#[test]
fn underdog_winners_gain_more() {
    let mut e = engine(&[]);
    let ctx = context("T", &["Strong", "Weak"]);
    // Build a 10-point gap: Strong wins ten 200-point rounds.
    for _ in 0..10 {
        e.process_round(&ctx, &RoundRecord::from_pairs([("Strong", 200), ("Weak", 0)]));
    }
    let strong_before = rating(&e, "Strong");
    let weak_before = rating(&e, "Weak");
    assert!(strong_before > weak_before);

    e.process_round(&ctx, &RoundRecord::from_pairs([("Strong", 0), ("Weak", 200)]));
    let weak_gain = rating(&e, "Weak") - weak_before;
    assert!(weak_gain > 1.0, "underdog gain {weak_gain} should exceed the even-match 1.0");
}

#[test]
fn degenerate_rounds_change_nothing() {
    let mut e = engine(&[]);
    let ctx = context("T", &["A", "B"]);
    assert_eq!(
        e.process_round(&ctx, &RoundRecord::from_pairs([("A", 0), ("B", 0)])),
        RoundEffect::Skipped
    );
    assert_eq!(
        e.process_round(&ctx, &RoundRecord::from_pairs([("A", 50), ("B", 50)])),
        RoundEffect::Skipped
    );
    for p in ["A", "B"] {
        let profile = e.profile(p).unwrap();
        assert_eq!(profile.career_games, 0);
        assert_eq!(profile.rating, 1000.0);
        assert_eq!(profile.win_streak(), 0);
    }
}

#[test]
fn processed_round_counts_every_participant_once() {
    let mut e = engine(&[]);
    let ctx = context("T", &["A", "B", "C", "D", "E"]);
    let round = RoundRecord::from_pairs([("A", 90), ("B", 0), ("C", 90), ("D", 0), ("E", 0)]);
    e.process_round(&ctx, &round);
    for p in ["A", "B", "C", "D", "E"] {
        assert_eq!(e.profile(p).unwrap().career_games, 1, "{p}");
    }
}

#[test]
fn milestones_fire_only_when_reached() {
    let mut e = engine(&[]);
    let ctx = context("T", &["A", "B"]);
    for _ in 0..12 {
        e.process_round(&ctx, &RoundRecord::from_pairs([("A", 100), ("B", 0)]));
    }
    let a = e.profile("A").unwrap();
    assert_eq!(a.win_streak(), 12);
    assert_eq!(a.best_win_streak, 12);
    assert_eq!(a.num_fivles, 1);
    assert_eq!(a.num_tenples, 1);

    let b = e.profile("B").unwrap();
    assert_eq!(b.loss_streak(), 12);
    assert_eq!(b.worst_loss_streak, 12);
    assert_eq!(b.five_mottes, 1);
}

#[test]
fn new_tournament_resets_streaks() {
    let mut e = engine(&[]);
    let first = context("Championship #1", &["A", "B"]);
    for _ in 0..4 {
        e.process_round(&first, &RoundRecord::from_pairs([("A", 100), ("B", 0)]));
    }
    assert_eq!(e.profile("A").unwrap().win_streak(), 4);

    let second = context("Championship #2", &["A", "B"]);
    e.process_round(&second, &RoundRecord::from_pairs([("A", 100), ("B", 0)]));
    let a = e.profile("A").unwrap();
    assert_eq!(a.win_streak(), 1);
    // Streak of 4 + 1 across the boundary never reaches a fivle.
    assert_eq!(a.num_fivles, 0);
    assert_eq!(a.best_win_streak, 4);
    assert_eq!(a.current_tournament.as_deref(), Some("Championship #2"));
}

#[test]
fn named_bidder_counts_attempts_and_wins() {
    let mut e = engine(&[]);
    let ctx = context("T", &["A", "B", "C"]);
    e.process_round(
        &ctx,
        &RoundRecord::from_pairs([("A", 150), ("B", 0), ("C", 0)]).with_bidder("A"),
    );
    e.process_round(
        &ctx,
        &RoundRecord::from_pairs([("A", 0), ("B", 150), ("C", 0)]).with_bidder("A"),
    );
    e.process_round(
        &ctx,
        &RoundRecord::from_pairs([("A", 0), ("B", 150), ("C", 0)]).with_bidder("Nobody"),
    );
    let a = e.profile("A").unwrap();
    assert_eq!(a.bid_attempts, 2);
    assert_eq!(a.bid_wins, 1);
    assert_eq!(a.bid_win_rate(), Some(50.0));
    assert_eq!(e.profile("C").unwrap().bid_win_rate(), None);
}

#[test]
fn tournament_snapshot_reports_deltas_and_ranks() {
    let mut e = engine(&["A", "B"]);
    let t1 = context("Championship #1", &["A", "B"]);
    let snap1 = e.process_tournament(
        &t1,
        &[RoundRecord::from_pairs([("A", 200), ("B", 0)])],
    );
    let a1 = &snap1["A"];
    assert_eq!(a1.rating_before, 1000);
    assert_eq!(a1.rating_after, 1001);
    assert_eq!(a1.rating_change, 1);
    // Nobody was known before the first tournament.
    assert_eq!(a1.rank_before, None);
    assert_eq!(a1.rank_after, Some(1));
    assert_eq!(snap1["B"].rank_after, Some(2));
    assert_eq!(snap1["B"].rating_after, 999);

    // B overtakes A, and a guest joins.
    let t2 = context("Championship #2", &["A", "B", "Guest"]);
    let rounds: Vec<RoundRecord> = (0..5)
        .map(|_| RoundRecord::from_pairs([("A", 0), ("B", 200), ("Guest", 0)]))
        .collect();
    let snap2 = e.process_tournament(&t2, &rounds);

    let b2 = &snap2["B"];
    assert_eq!(b2.rank_before, Some(2));
    assert_eq!(b2.rank_after, Some(1));
    assert_eq!(b2.rank_change, 1);
    assert_eq!(b2.fivles_gained, 1);
    assert_eq!(b2.career.num_fivles, 1);
    assert!(!b2.is_guest);

    let guest = &snap2["Guest"];
    assert!(guest.is_guest);
    assert_eq!(guest.rank_before, None);
    assert_eq!(guest.rank_after, None);
    assert_eq!(guest.rank_change, 0);
    assert_eq!(guest.rating_before, 1000);
    assert_eq!(guest.five_mottes_gained, 1);

    let rankings = e.rankings();
    assert_eq!(rankings[0].player, "B");
    assert_eq!(rankings[0].rank, 1);
    assert_eq!(e.rating_history()["A"].len(), 3);
    assert_eq!(e.rating_history()["A"][0], 1000.0);
    assert!(!e.career_stats().contains_key("Guest"));
}

#[test]
fn snapshots_are_value_copies() {
    let mut e = engine(&["A", "B"]);
    let ctx = context("T", &["A", "B"]);
    e.process_round(&ctx, &RoundRecord::from_pairs([("A", 100), ("B", 0)]));
    let standings = e.standings();
    e.process_round(&ctx, &RoundRecord::from_pairs([("A", 100), ("B", 0)]));
    assert_eq!(standings["A"].career_games, 1);
    assert_eq!(e.profile("A").unwrap().career_games, 2);
}
