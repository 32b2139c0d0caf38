//! PlayerProfile, its streak state, and immutable snapshots of it.

use serde::Serialize;

/// Players are identified by their bare name, with no aliasing.
pub type PlayerName = String;

/// Win streak length that counts as a "fivle".
pub const FIVLE_LENGTH: u32 = 5;
/// Win streak length that counts as a "tenple".
pub const TENPLE_LENGTH: u32 = 10;
/// Loss streak length that counts as a "five motte".
pub const FIVE_MOTTE_LENGTH: u32 = 5;

/// Current run of a player. Win and loss streaks are mutually exclusive.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StreakState {
    #[default]
    None,
    Winning(u32),
    Losing(u32),
}

impl StreakState {
    pub fn win_streak(self) -> u32 {
        match self {
            StreakState::Winning(n) => n,
            _ => 0,
        }
    }

    pub fn loss_streak(self) -> u32 {
        match self {
            StreakState::Losing(n) => n,
            _ => 0,
        }
    }
}

/// Percentage rounded to the nearest integer, 0 when there is nothing to divide by.
fn whole_percentage(numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    (100.0 * f64::from(numerator) / f64::from(denominator)).round() as u32
}

/// Percentage with one decimal, `None` when there were no attempts.
fn rate(numerator: u32, denominator: u32) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some(round_to(100.0 * f64::from(numerator) / f64::from(denominator), 1))
}

/// Round `value` to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Live rating and career state of one player.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerProfile {
    pub name: PlayerName,
    pub rating: f64,
    pub career_games: u32,
    pub career_wins: u32,
    /// Rounds won with more than the team's minimum winning score.
    pub bid_and_won: u32,
    /// Rounds where this player was the named bidder.
    pub bid_attempts: u32,
    /// Named-bidder rounds this player won.
    pub bid_wins: u32,
    pub streak: StreakState,
    pub best_win_streak: u32,
    pub worst_loss_streak: u32,
    pub num_fivles: u32,
    pub num_tenples: u32,
    pub five_mottes: u32,
    /// Key of the last tournament this profile was updated in.
    pub current_tournament: Option<String>,
}

impl PlayerProfile {
    /// Create a new profile at `rating`. Counters start at zero.
    pub fn new(name: impl Into<PlayerName>, rating: f64) -> Self {
        Self {
            name: name.into(),
            rating,
            career_games: 0,
            career_wins: 0,
            bid_and_won: 0,
            bid_attempts: 0,
            bid_wins: 0,
            streak: StreakState::None,
            best_win_streak: 0,
            worst_loss_streak: 0,
            num_fivles: 0,
            num_tenples: 0,
            five_mottes: 0,
            current_tournament: None,
        }
    }

    pub fn win_streak(&self) -> u32 {
        self.streak.win_streak()
    }

    pub fn loss_streak(&self) -> u32 {
        self.streak.loss_streak()
    }

    pub fn career_losses(&self) -> u32 {
        self.career_games - self.career_wins
    }

    pub fn win_percentage(&self) -> u32 {
        whole_percentage(self.career_wins, self.career_games)
    }

    pub fn bid_and_won_percentage(&self) -> u32 {
        whole_percentage(self.bid_and_won, self.career_games)
    }

    /// Win rate as named bidder, `None` without any named bids.
    pub fn bid_win_rate(&self) -> Option<f64> {
        rate(self.bid_wins, self.bid_attempts)
    }

    /// Record a won round worth `points` rating in tournament `tournament_key`.
    pub fn register_win(&mut self, tournament_key: &str, points: f64, bid_and_won: bool) {
        self.enter_tournament(tournament_key);
        self.career_games += 1;
        self.career_wins += 1;
        self.rating = round_to(self.rating + points, 2);
        if bid_and_won {
            self.bid_and_won += 1;
        }
        self.record_streak(true);
    }

    /// Record a lost round costing `points` rating in tournament `tournament_key`.
    pub fn register_loss(&mut self, tournament_key: &str, points: f64) {
        self.enter_tournament(tournament_key);
        self.career_games += 1;
        self.rating = round_to(self.rating - points, 2);
        self.record_streak(false);
    }

    /// Record a round in which this player was the named bidder.
    pub fn register_named_bid(&mut self, won: bool) {
        self.bid_attempts += 1;
        if won {
            self.bid_wins += 1;
        }
    }

    /// Streaks never carry across tournaments.
    fn enter_tournament(&mut self, tournament_key: &str) {
        if self.current_tournament.as_deref() != Some(tournament_key) {
            self.current_tournament = Some(tournament_key.to_string());
            self.streak = StreakState::None;
        }
    }

    fn record_streak(&mut self, won: bool) {
        if won {
            let run = self.win_streak() + 1;
            self.streak = StreakState::Winning(run);
            self.best_win_streak = self.best_win_streak.max(run);
            if run == FIVLE_LENGTH {
                self.num_fivles += 1;
            }
            if run == TENPLE_LENGTH {
                self.num_tenples += 1;
            }
        } else {
            let run = self.loss_streak() + 1;
            self.streak = StreakState::Losing(run);
            self.worst_loss_streak = self.worst_loss_streak.max(run);
            if run == FIVE_MOTTE_LENGTH {
                self.five_mottes += 1;
            }
        }
    }

    /// Value copy of the rating, career, streak and bid fields.
    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            rating: self.rating,
            career_games: self.career_games,
            career_wins: self.career_wins,
            bid_and_won: self.bid_and_won,
            bid_attempts: self.bid_attempts,
            bid_wins: self.bid_wins,
            win_streak: self.win_streak(),
            loss_streak: self.loss_streak(),
            best_win_streak: self.best_win_streak,
            worst_loss_streak: self.worst_loss_streak,
            num_fivles: self.num_fivles,
            num_tenples: self.num_tenples,
            five_mottes: self.five_mottes,
        }
    }
}

/// Frozen copy of a profile at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileSnapshot {
    pub rating: f64,
    pub career_games: u32,
    pub career_wins: u32,
    pub bid_and_won: u32,
    pub bid_attempts: u32,
    pub bid_wins: u32,
    pub win_streak: u32,
    pub loss_streak: u32,
    pub best_win_streak: u32,
    pub worst_loss_streak: u32,
    pub num_fivles: u32,
    pub num_tenples: u32,
    pub five_mottes: u32,
}

impl ProfileSnapshot {
    pub fn win_percentage(&self) -> u32 {
        whole_percentage(self.career_wins, self.career_games)
    }

    pub fn bid_and_won_percentage(&self) -> u32 {
        whole_percentage(self.bid_and_won, self.career_games)
    }

    pub fn bid_win_rate(&self) -> Option<f64> {
        rate(self.bid_wins, self.bid_attempts)
    }

    /// Career aggregate block for output.
    pub fn career(&self) -> CareerStats {
        CareerStats {
            career_games: self.career_games,
            career_wins: self.career_wins,
            win_pct: self.win_percentage(),
            bid_and_won: self.bid_and_won,
            bid_and_won_pct: self.bid_and_won_percentage(),
            bid_attempts: self.bid_attempts,
            bid_wins: self.bid_wins,
            bid_win_rate: self.bid_win_rate(),
            best_win_streak: self.best_win_streak,
            worst_loss_streak: self.worst_loss_streak,
            num_fivles: self.num_fivles,
            num_tenples: self.num_tenples,
            five_mottes: self.five_mottes,
        }
    }
}

/// Career aggregates of a player (for reports).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerStats {
    pub career_games: u32,
    pub career_wins: u32,
    pub win_pct: u32,
    pub bid_and_won: u32,
    pub bid_and_won_pct: u32,
    pub bid_attempts: u32,
    pub bid_wins: u32,
    pub bid_win_rate: Option<f64>,
    pub best_win_streak: u32,
    pub worst_loss_streak: u32,
    pub num_fivles: u32,
    pub num_tenples: u32,
    pub five_mottes: u32,
}
