//! Replays the whole tournament history through the rating engine and the aggregator.

use crate::config::TrackerConfig;
use crate::feed::{FeedError, RoundSource};
use crate::logic::bid_detection::named_bidder_tally;
use crate::logic::career::{all_time_pairwise, all_time_stats, core_players};
use crate::logic::player_stats::{consistency, scoreboard, timeseries};
use crate::logic::rating::RatingEngine;
use crate::models::{TournamentContext, TournamentData, TournamentKind, TournamentRef};
use crate::report::{history_points, Report, TournamentReport};
use std::collections::{BTreeMap, HashMap};

/// Load every tournament in `config` that `source` has data for, in chronological order.
pub fn load_history(
    config: &TrackerConfig,
    source: &dyn RoundSource,
) -> Result<Vec<(TournamentRef, TournamentData)>, FeedError> {
    let mut loaded = Vec::new();
    for tournament in &config.tournaments {
        match source.load(tournament)? {
            Some(data) => loaded.push((*tournament, data)),
            None => log::warn!("Skipping {}: no data found", tournament.id()),
        }
    }
    Ok(loaded)
}

/// Process the full history and assemble the report.
pub fn replay_history(config: &TrackerConfig, source: &dyn RoundSource) -> Result<Report, FeedError> {
    let loaded = load_history(config, source)?;

    let core = core_players(loaded.iter().map(|(_, data)| data), config.core_player_threshold);
    log::info!("{} core player(s) over {} tournament(s): {:?}", core.len(), loaded.len(), core);

    let mut engine = RatingEngine::new(config.rating_settings(), core.clone());
    let aggregator = config.aggregator();
    let mut seen_of_kind: HashMap<TournamentKind, u32> = HashMap::new();
    let mut tournaments = Vec::with_capacity(loaded.len());
    let mut snapshots = BTreeMap::new();

    for (tournament, data) in &loaded {
        let display_number = {
            let n = seen_of_kind.entry(tournament.kind).or_insert(0);
            *n += 1;
            *n
        };
        let id = tournament.id();
        let display_name = format!("{} #{}", tournament.kind.display(), display_number);
        let weight = config.weight(tournament.kind);

        let context = TournamentContext {
            id: id.clone(),
            key: display_name.clone(),
            weight,
            players: data.players.clone(),
        };
        snapshots.insert(id.clone(), engine.process_tournament(&context, &data.rounds));

        let team = aggregator.aggregate(&data.players, &data.rounds);
        let player_stats = scoreboard(&data.players, &data.rounds);
        let winner = player_stats.first().map(|line| line.player.clone());
        let (core_players, guest_players): (Vec<_>, Vec<_>) = data
            .players
            .iter()
            .cloned()
            .partition(|p| core.contains(p));

        log::info!(
            "Processed {}: {} players, {} games, winner: {}",
            id,
            data.players.len(),
            data.rounds.len(),
            winner.as_deref().unwrap_or("-")
        );

        tournaments.push(TournamentReport {
            id,
            kind: tournament.kind,
            number: tournament.number,
            display_number,
            display_name,
            weight,
            players: data.players.clone(),
            core_players,
            guest_players,
            total_games: data.rounds.len() as u32,
            winner,
            player_stats,
            game_data: timeseries(&data.players, &data.rounds),
            pairwise_stats: team.pairs,
            trio_stats: team.triples,
            bid_and_won: team.heuristic_bids,
            bid_stats_by_player: if data.has_bidder_data {
                named_bidder_tally(&data.players, &data.rounds)
            } else {
                BTreeMap::new()
            },
            has_bidder_data: data.has_bidder_data,
            consistency_stats: consistency(&data.players, &data.rounds),
        });
    }

    let scoreboards: Vec<_> = tournaments.iter().map(|t| t.player_stats.clone()).collect();
    let pair_records: Vec<_> = tournaments.iter().map(|t| t.pairwise_stats.clone()).collect();

    Ok(Report {
        generated_at: chrono::Utc::now(),
        total_tournaments: tournaments.len(),
        rankings: engine.rankings(),
        rating_history: history_points(engine.rating_history()),
        all_time_stats: all_time_stats(&core, &scoreboards),
        all_time_pairwise: all_time_pairwise(&pair_records),
        career_stats: engine.career_stats(),
        tournament_snapshots: snapshots,
        tournaments,
        players: core,
    })
}
