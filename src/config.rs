//! Tracker configuration: rating constants, thresholds and the tournament history.

use crate::logic::{RatingSettings, TeamStatsAggregator};
use crate::models::{TournamentKind, TournamentRef};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Errors while loading or validating configuration.
#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => write!(f, "Failed to read config {}: {}", path.display(), source),
            ConfigError::Parse { path, source } => write!(f, "Invalid config {}: {}", path.display(), source),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid config value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::InvalidValue(_) => None,
        }
    }
}

/// Everything a run needs besides the round data itself.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub base_rating: f64,
    pub denominator: f64,
    /// Players with more rounds than this across the history are ranked.
    pub core_player_threshold: u32,
    pub pair_min_games: u32,
    pub triple_min_games: u32,
    /// Importance of each tournament kind by slug; missing kinds use their default weight.
    pub weights: HashMap<String, f64>,
    /// Tournaments in chronological order.
    pub tournaments: Vec<TournamentRef>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let rating = RatingSettings::default();
        let aggregator = TeamStatsAggregator::default();
        Self {
            base_rating: rating.base_rating,
            denominator: rating.denominator,
            core_player_threshold: 200,
            pair_min_games: aggregator.pair_min_games,
            triple_min_games: aggregator.triple_min_games,
            weights: TournamentKind::ALL
                .iter()
                .map(|&kind| (kind.slug().to_string(), kind.default_weight()))
                .collect(),
            tournaments: default_history(),
        }
    }
}

/// The recorded tournament history, oldest first.
pub fn default_history() -> Vec<TournamentRef> {
    use TournamentKind::*;
    [
        (Championship, 1),
        (Championship, 2),
        (Championship, 3),
        (Championship, 4),
        (Championship, 5),
        (MiniChampionship, 1),
        (Championship, 6),
        (Championship, 7),
        (InternationalFriendly, 1),
        (MiniChampionship, 2),
        (Championship, 8),
        (MiniChampionship, 3),
        (InternationalFriendly, 2),
        (TinyChampionship, 1),
        (MiniChampionship, 4),
        (TinyChampionship, 2),
        (TinyChampionship, 3),
        (TinyChampionship, 4),
        (TinyChampionship, 5),
        (MiniChampionship, 5),
        (MiniChampionship, 6),
        (InternationalFriendly, 3),
        (TinyChampionship, 6),
        (TinyChampionship, 7),
        (TinyChampionship, 8),
        (MiniChampionship, 7),
        (TinyChampionship, 9),
        (InternationalFriendly, 4),
    ]
    .into_iter()
    .map(|(kind, number)| TournamentRef::new(kind, number))
    .collect()
}

impl TrackerConfig {
    /// Load from a TOML file; unspecified keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_rating > 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "base_rating must be positive, got {}",
                self.base_rating
            )));
        }
        if !(self.denominator > 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "denominator must be positive, got {}",
                self.denominator
            )));
        }
        for (slug, w) in &self.weights {
            if !TournamentKind::ALL.iter().any(|k| k.slug() == slug.as_str()) {
                return Err(ConfigError::InvalidValue(format!("unknown tournament kind {:?} in weights", slug)));
            }
            if !(*w >= 0.0) {
                return Err(ConfigError::InvalidValue(format!(
                    "weight of {} must not be negative, got {}",
                    slug, w
                )));
            }
        }
        Ok(())
    }

    pub fn weight(&self, kind: TournamentKind) -> f64 {
        self.weights
            .get(kind.slug())
            .copied()
            .unwrap_or_else(|| kind.default_weight())
    }

    pub fn rating_settings(&self) -> RatingSettings {
        RatingSettings {
            base_rating: self.base_rating,
            denominator: self.denominator,
        }
    }

    pub fn aggregator(&self) -> TeamStatsAggregator {
        TeamStatsAggregator::new(self.pair_min_games, self.triple_min_games)
    }
}
