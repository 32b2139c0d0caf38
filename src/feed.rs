//! Round feed: where tournament score rows come from.
//!
//! A CSV file holds one tournament, one row per round. Every column is a
//! player except the metadata columns in [`NON_PLAYER_COLUMNS`].

use crate::models::{PlayerName, RoundRecord, TournamentData, TournamentRef};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Column naming the declared bidder of a round.
pub const BIDDER_COLUMN: &str = "Bidder";

/// Columns that never hold player scores.
pub const NON_PLAYER_COLUMNS: [&str; 4] = [BIDDER_COLUMN, "Discard", "Margin", "Game ID"];

/// Errors while reading round data.
#[derive(Debug)]
pub enum FeedError {
    Io { path: PathBuf, source: std::io::Error },
    Csv { path: PathBuf, source: csv::Error },
    /// File has no header row.
    MissingHeader { path: PathBuf },
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Io { path, source } => write!(f, "Failed to read {}: {}", path.display(), source),
            FeedError::Csv { path, source } => write!(f, "Malformed CSV in {}: {}", path.display(), source),
            FeedError::MissingHeader { path } => write!(f, "No header row in {}", path.display()),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Io { source, .. } => Some(source),
            FeedError::Csv { source, .. } => Some(source),
            FeedError::MissingHeader { .. } => None,
        }
    }
}

/// Supplies the rounds of a tournament. `Ok(None)` means the tournament has no data.
pub trait RoundSource {
    fn load(&self, tournament: &TournamentRef) -> Result<Option<TournamentData>, FeedError>;
}

/// Reads `<kind>_<number>.csv` files from one directory.
#[derive(Clone, Debug)]
pub struct CsvDirectory {
    root: PathBuf,
}

impl CsvDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, tournament: &TournamentRef) -> PathBuf {
        self.root.join(format!("{}.csv", tournament.id()))
    }
}

impl RoundSource for CsvDirectory {
    fn load(&self, tournament: &TournamentRef) -> Result<Option<TournamentData>, FeedError> {
        let path = self.path_for(tournament);
        if !path.exists() {
            return Ok(None);
        }
        let file = std::fs::File::open(&path).map_err(|source| FeedError::Io {
            path: path.clone(),
            source,
        })?;
        parse_rounds(file, &path).map(Some)
    }
}

/// Score cell as an integer. Blank or unreadable cells count as 0.
fn parse_score(cell: &str, path: &Path, player: &str) -> i64 {
    let cell = cell.trim();
    if cell.is_empty() {
        return 0;
    }
    if let Ok(score) = cell.parse::<i64>() {
        return score;
    }
    match cell.parse::<f64>() {
        Ok(score) if score.is_finite() => score.trunc() as i64,
        _ => {
            log::warn!("{}: unreadable score {:?} for {}, using 0", path.display(), cell, player);
            0
        }
    }
}

/// Parse one tournament from CSV. `path` is only used in messages.
pub fn parse_rounds<R: Read>(reader: R, path: &Path) -> Result<TournamentData, FeedError> {
    let csv_error = |source: csv::Error| FeedError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(FeedError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    let columns: Vec<(usize, PlayerName)> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (i, h.trim().to_string()))
        .filter(|(_, h)| !h.is_empty() && !NON_PLAYER_COLUMNS.contains(&h.as_str()))
        .collect();
    let bidder_column = headers.iter().position(|h| h.trim() == BIDDER_COLUMN);

    let mut rounds = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let scores = columns
            .iter()
            .map(|(i, player)| {
                let score = parse_score(record.get(*i).unwrap_or(""), path, player);
                (player.clone(), score)
            })
            .collect();
        let bidder = bidder_column
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string);
        rounds.push(RoundRecord { scores, bidder });
    }

    Ok(TournamentData {
        players: columns.into_iter().map(|(_, p)| p).collect(),
        rounds,
        has_bidder_data: bidder_column.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_cells_are_coerced() {
        let path = Path::new("t.csv");
        assert_eq!(parse_score(" 120 ", path, "A"), 120);
        assert_eq!(parse_score("80.0", path, "A"), 80);
        assert_eq!(parse_score("", path, "A"), 0);
        assert_eq!(parse_score("n/a", path, "A"), 0);
        assert_eq!(parse_score("-40", path, "A"), -40);
    }
}
