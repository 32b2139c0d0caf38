//! Data structures for the tracker: players, rounds, tournaments.

mod player;
mod round;
mod tournament;

pub use player::{
    round_to, CareerStats, PlayerName, PlayerProfile, ProfileSnapshot, StreakState,
    FIVE_MOTTE_LENGTH, FIVLE_LENGTH, TENPLE_LENGTH,
};
pub use round::{RoundRecord, Side};
pub use tournament::{TournamentContext, TournamentData, TournamentKind, TournamentRef};
