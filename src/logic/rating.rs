//! Incremental Elo-style rating: one update per round, replayed in chronological order.
//!
//! Winners gain their own score scaled by a multiplier, losers lose the winning
//! side's minimum score (the bid) scaled by the same multiplier. The multiplier
//! shrinks when the winners were already rated higher and grows when they were
//! the underdogs. The system is not zero-sum.

use crate::models::{
    round_to, CareerStats, PlayerName, PlayerProfile, ProfileSnapshot, RoundRecord, Side,
    TournamentContext,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Bound on `rating_diff / base_rating` before it becomes the adjustment.
pub const MAX_ADJUSTMENT: f64 = 0.5;

/// Rating constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatingSettings {
    /// Starting rating of every new profile, also the scale of rating differences.
    pub base_rating: f64,
    /// Divides every score; larger values mean slower moving ratings.
    pub denominator: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            base_rating: 1000.0,
            denominator: 200.0,
        }
    }
}

impl RatingSettings {
    /// Per-point rating multiplier for a round.
    ///
    /// `rating_diff` is the average winner rating minus the average loser rating.
    pub fn multiplier(&self, rating_diff: f64, weight: f64) -> f64 {
        let winsorized = (rating_diff / self.base_rating).clamp(-MAX_ADJUSTMENT, MAX_ADJUSTMENT);
        (weight / self.denominator) * (1.0 - winsorized)
    }
}

/// What a single round did to the ratings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RoundEffect {
    /// Nobody won or nobody lost; nothing changed.
    Skipped,
    Applied { bid: i64, multiplier: f64 },
}

/// Frozen view of every known profile, keyed by name.
pub type Standings = HashMap<PlayerName, ProfileSnapshot>;

/// Per-player before/after record for one tournament.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDelta {
    pub rating_before: i64,
    pub rating_after: i64,
    pub rating_change: i64,
    pub rank_before: Option<u32>,
    pub rank_after: Option<u32>,
    pub rank_change: i64,
    pub fivles_gained: u32,
    pub tenples_gained: u32,
    pub five_mottes_gained: u32,
    #[serde(flatten)]
    pub career: CareerStats,
    pub is_guest: bool,
}

/// Player → delta for one tournament.
pub type TournamentSnapshot = BTreeMap<PlayerName, PlayerDelta>;

/// Entry of the final leaderboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankingEntry {
    pub player: PlayerName,
    pub rating: f64,
    pub rank: u32,
}

/// Owns every player profile for the duration of a run.
#[derive(Clone, Debug)]
pub struct RatingEngine {
    settings: RatingSettings,
    /// Players that take part in ranks; everyone else is a guest.
    ranked: Vec<PlayerName>,
    /// Profiles in registration order.
    profiles: Vec<PlayerProfile>,
    index: HashMap<PlayerName, usize>,
    history: BTreeMap<PlayerName, Vec<f64>>,
}

impl RatingEngine {
    pub fn new(settings: RatingSettings, ranked: Vec<PlayerName>) -> Self {
        let history = ranked
            .iter()
            .map(|p| (p.clone(), vec![settings.base_rating]))
            .collect();
        Self {
            settings,
            ranked,
            profiles: Vec::new(),
            index: HashMap::new(),
            history,
        }
    }

    pub fn is_ranked(&self, player: &str) -> bool {
        self.ranked.iter().any(|p| p == player)
    }

    pub fn profile(&self, player: &str) -> Option<&PlayerProfile> {
        self.index.get(player).map(|&i| &self.profiles[i])
    }

    /// All profiles in the order players first appeared.
    pub fn profiles(&self) -> &[PlayerProfile] {
        &self.profiles
    }

    /// Index of `player`'s profile, creating it at the base rating if needed.
    fn register(&mut self, player: &str) -> usize {
        if let Some(&i) = self.index.get(player) {
            return i;
        }
        log::debug!("Registering {}", player);
        let i = self.profiles.len();
        self.profiles
            .push(PlayerProfile::new(player, self.settings.base_rating));
        self.index.insert(player.to_string(), i);
        i
    }

    fn average_rating(&self, members: &[usize]) -> f64 {
        members.iter().map(|&i| self.profiles[i].rating).sum::<f64>() / members.len() as f64
    }

    /// Apply one round. Degenerate rounds (no winner or no loser) are skipped.
    pub fn process_round(&mut self, context: &TournamentContext, round: &RoundRecord) -> RoundEffect {
        let mut winners: Vec<(usize, i64)> = Vec::new();
        let mut losers: Vec<usize> = Vec::new();
        for (name, score) in &round.scores {
            let i = self.register(name);
            match Side::of(*score) {
                Side::Won => winners.push((i, *score)),
                Side::Lost => losers.push(i),
            }
        }

        let Some(bid) = winners.iter().map(|&(_, s)| s).min() else {
            log::debug!("Skipping round without winners in {}", context.key);
            return RoundEffect::Skipped;
        };
        if losers.is_empty() {
            log::debug!("Skipping round without losers in {}", context.key);
            return RoundEffect::Skipped;
        }

        let winner_ids: Vec<usize> = winners.iter().map(|&(i, _)| i).collect();
        let rating_diff = self.average_rating(&winner_ids) - self.average_rating(&losers);
        let multiplier = self.settings.multiplier(rating_diff, context.weight);

        for &(i, score) in &winners {
            self.profiles[i].register_win(&context.key, score as f64 * multiplier, score > bid);
        }
        for &i in &losers {
            self.profiles[i].register_loss(&context.key, bid as f64 * multiplier);
        }

        if let Some(bidder) = &round.bidder {
            if let (Some(score), Some(&i)) = (round.score_of(bidder), self.index.get(bidder)) {
                self.profiles[i].register_named_bid(score > 0);
            }
        }

        RoundEffect::Applied { bid, multiplier }
    }

    /// Frozen copy of every known profile.
    pub fn standings(&self) -> Standings {
        self.profiles
            .iter()
            .map(|p| (p.name.clone(), p.snapshot()))
            .collect()
    }

    /// Rank (1-based) of each ranked player present in `standings`, by rating descending.
    /// Ties keep registration order.
    pub fn ranks(&self, standings: &Standings) -> HashMap<PlayerName, u32> {
        let mut rated: Vec<(&str, f64)> = self
            .profiles
            .iter()
            .filter(|p| self.is_ranked(&p.name))
            .filter_map(|p| standings.get(&p.name).map(|s| (p.name.as_str(), s.rating)))
            .collect();
        rated.sort_by(|a, b| b.1.total_cmp(&a.1));
        rated
            .into_iter()
            .enumerate()
            .map(|(i, (name, _))| (name.to_string(), i as u32 + 1))
            .collect()
    }

    /// Replay every round of a tournament in order and report what changed.
    pub fn process_tournament(
        &mut self,
        context: &TournamentContext,
        rounds: &[RoundRecord],
    ) -> TournamentSnapshot {
        let before = self.standings();
        for player in &context.players {
            self.register(player);
        }

        let mut skipped = 0;
        for round in rounds {
            if self.process_round(context, round) == RoundEffect::Skipped {
                skipped += 1;
            }
        }
        if skipped > 0 {
            log::debug!("{}: skipped {} degenerate round(s)", context.key, skipped);
        }

        let after = self.standings();
        let snapshot = self.diff(context, &before, &after);

        for (player, ratings) in self.history.iter_mut() {
            let rating = after
                .get(player)
                .map_or(self.settings.base_rating, |s| s.rating);
            ratings.push(round_to(rating, 1));
        }

        snapshot
    }

    fn diff(&self, context: &TournamentContext, before: &Standings, after: &Standings) -> TournamentSnapshot {
        let before_ranks = self.ranks(before);
        let after_ranks = self.ranks(after);
        let guests = context.players.iter().filter(|p| !self.is_ranked(p));

        let mut snapshot = TournamentSnapshot::new();
        for player in self.ranked.iter().chain(guests) {
            let Some(now) = after.get(player) else {
                continue;
            };
            let was = before.get(player);
            let is_guest = !self.is_ranked(player);

            let rating_before = was.map_or(self.settings.base_rating, |s| s.rating).trunc() as i64;
            let rating_after = now.rating.trunc() as i64;
            let (rank_before, rank_after) = if is_guest {
                (None, None)
            } else {
                (before_ranks.get(player).copied(), after_ranks.get(player).copied())
            };
            let rank_change = match (rank_before, rank_after) {
                (Some(b), Some(a)) => i64::from(b) - i64::from(a),
                _ => 0,
            };
            let gained = |f: fn(&ProfileSnapshot) -> u32| f(now) - was.map_or(0, f);

            snapshot.insert(
                player.clone(),
                PlayerDelta {
                    rating_before,
                    rating_after,
                    rating_change: rating_after - rating_before,
                    rank_before,
                    rank_after,
                    rank_change,
                    fivles_gained: gained(|s| s.num_fivles),
                    tenples_gained: gained(|s| s.num_tenples),
                    five_mottes_gained: gained(|s| s.five_mottes),
                    career: now.career(),
                    is_guest,
                },
            );
        }
        snapshot
    }

    /// Rating of every ranked player after each tournament, starting from the base rating.
    pub fn rating_history(&self) -> &BTreeMap<PlayerName, Vec<f64>> {
        &self.history
    }

    /// Final leaderboard of ranked players.
    pub fn rankings(&self) -> Vec<RankingEntry> {
        let mut rated: Vec<(&PlayerName, f64)> = self
            .ranked
            .iter()
            .map(|p| {
                let rating = self.profile(p).map_or(self.settings.base_rating, |prof| prof.rating);
                (p, rating)
            })
            .collect();
        rated.sort_by(|a, b| b.1.total_cmp(&a.1));
        rated
            .into_iter()
            .enumerate()
            .map(|(i, (player, rating))| RankingEntry {
                player: player.clone(),
                rating: round_to(rating, 1),
                rank: i as u32 + 1,
            })
            .collect()
    }

    /// Career aggregates of every ranked player that has a profile.
    pub fn career_stats(&self) -> BTreeMap<PlayerName, CareerStats> {
        self.ranked
            .iter()
            .filter_map(|p| self.profile(p).map(|prof| (p.clone(), prof.snapshot().career())))
            .collect()
    }
}
