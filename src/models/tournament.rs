//! Tournament kinds, references into the chronological list, and per-tournament context.

use crate::models::player::PlayerName;
use crate::models::round::RoundRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format of a tournament. Determines its default weight and display name.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentKind {
    Championship,
    MiniChampionship,
    TinyChampionship,
    InternationalFriendly,
}

impl TournamentKind {
    pub const ALL: [TournamentKind; 4] = [
        TournamentKind::Championship,
        TournamentKind::MiniChampionship,
        TournamentKind::TinyChampionship,
        TournamentKind::InternationalFriendly,
    ];

    /// File and id prefix, e.g. `mini_championship`.
    pub fn slug(self) -> &'static str {
        match self {
            TournamentKind::Championship => "championship",
            TournamentKind::MiniChampionship => "mini_championship",
            TournamentKind::TinyChampionship => "tiny_championship",
            TournamentKind::InternationalFriendly => "international_friendly",
        }
    }

    /// Human readable name, e.g. `Mini Championship`.
    pub fn display(self) -> &'static str {
        match self {
            TournamentKind::Championship => "Championship",
            TournamentKind::MiniChampionship => "Mini Championship",
            TournamentKind::TinyChampionship => "Tiny Championship",
            TournamentKind::InternationalFriendly => "International Friendly",
        }
    }

    pub fn default_weight(self) -> f64 {
        match self {
            TournamentKind::Championship | TournamentKind::InternationalFriendly => 1.0,
            TournamentKind::MiniChampionship | TournamentKind::TinyChampionship => 0.75,
        }
    }
}

impl fmt::Display for TournamentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// Entry of the chronological tournament list: a kind and its number.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TournamentRef {
    pub kind: TournamentKind,
    pub number: u32,
}

impl TournamentRef {
    pub fn new(kind: TournamentKind, number: u32) -> Self {
        Self { kind, number }
    }

    /// Stable id, e.g. `championship_3`.
    pub fn id(&self) -> String {
        format!("{}_{}", self.kind.slug(), self.number)
    }
}

/// Read-only descriptor shared by the rating engine and the aggregator.
#[derive(Clone, Debug, PartialEq)]
pub struct TournamentContext {
    pub id: String,
    /// Display key; a change of key marks a tournament boundary for streaks.
    pub key: String,
    pub weight: f64,
    pub players: Vec<PlayerName>,
}

impl TournamentContext {
    pub fn new(key: impl Into<String>, weight: f64, players: Vec<PlayerName>) -> Self {
        let key = key.into();
        Self {
            id: key.clone(),
            key,
            weight,
            players,
        }
    }
}

/// Everything the round feed supplies for one tournament.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TournamentData {
    /// Participants in column order.
    pub players: Vec<PlayerName>,
    /// Rounds in chronological order.
    pub rounds: Vec<RoundRecord>,
    /// Whether the source carried a named-bidder column.
    pub has_bidder_data: bool,
}
