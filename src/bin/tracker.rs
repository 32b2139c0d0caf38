//! Command line entry point: replay every tournament and write the report as JSON.
//! Run with: cargo run --bin tracker -- --data-dir tourney_data/raw_scores
//! Log level comes from RUST_LOG (default: info).

use anyhow::{Context, Result};
use clap::Parser;
use spades_tracker::{replay_history, CsvDirectory, TrackerConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Ratings and same-side stats for 3 of Spades tournaments")]
struct Args {
    /// Directory holding `<kind>_<number>.csv` score files
    #[arg(long, env = "TRACKER_DATA_DIR")]
    data_dir: PathBuf,

    /// TOML file overriding rating constants, thresholds or the tournament list
    #[arg(long, env = "TRACKER_CONFIG")]
    config: Option<PathBuf>,

    /// Where to write the JSON report (stdout if omitted)
    #[arg(short, long, env = "TRACKER_OUTPUT")]
    output: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => TrackerConfig::load(path)?,
        None => TrackerConfig::default(),
    };
    log::info!(
        "Replaying {} tournament(s) from {}",
        config.tournaments.len(),
        args.data_dir.display()
    );

    let source = CsvDirectory::new(&args.data_dir);
    let report = replay_history(&config, &source)
        .with_context(|| format!("Failed to load rounds from {}", args.data_dir.display()))?;
    let json = report.to_json(args.pretty).context("Failed to serialize report")?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    log::info!("Total tournaments: {}", report.total_tournaments);
    for entry in &report.rankings {
        log::info!("  #{} {}: {}", entry.rank, entry.player, entry.rating);
    }
    for line in &report.all_time_stats {
        log::info!(
            "  {}: {} tourney wins, {}% win rate",
            line.player,
            line.tournament_wins,
            line.win_percentage
        );
    }
    Ok(())
}
