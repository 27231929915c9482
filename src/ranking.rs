use chrono::{DateTime, Utc};
use serde::*;
use std::cmp::Ordering;
use tracing::{debug, info};

use crate::data_loader::*;
use crate::error::RankingError;
use crate::teams::{TeamId, TeamRegistry};
use crate::util::*;

// Cumulative record as of the cutoff week. Rebuilt from the game log on every run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl TeamRecord {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    pub fn win_pct(&self) -> f64 {
        win_percentage(self.wins, self.losses, self.ties)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Weights {
    pub weighted_wins: f64,
    pub weighted_losses: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeamRanking {
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_pct: f64,
    pub weighted_wins: f64,
    pub weighted_losses: f64,
    pub total: f64,
}

/// One run's output. `generated_at` is stamped by the caller; everything else is a pure function
/// of the game log, the cutoff week and the registry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Snapshot {
    #[serde(rename = "timestamp")]
    pub generated_at: DateTime<Utc>,
    pub week: u32,
    pub season: u32,
    pub rankings: Vec<TeamRanking>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub fn build_snapshot(
    games: &[Game],
    week: u32,
    season: u32,
    generated_at: DateTime<Utc>,
    registry: &TeamRegistry,
) -> Result<Snapshot, RankingError> {
    let rankings = gen_rankings(games, week, registry)?;

    info!("Ranked {} teams through week {} of {}", rankings.len(), week, season);

    Ok(Snapshot {
        generated_at,
        week,
        season,
        rankings,
    })
}

pub fn gen_rankings(games: &[Game], cutoff: u32, registry: &TeamRegistry) -> Result<Vec<TeamRanking>, RankingError> {
    let completed = completed_games(games, cutoff, registry)?;
    let records = aggregate_records(&completed, registry.len());
    let weights = weigh_results(&completed, &records);

    Ok(assemble_rankings(&records, &weights, registry))
}

// Order-independent: a pure sum over the game list. Teams without a game keep a 0-0-0 record.
pub fn aggregate_records(games: &[CompletedGame], team_count: usize) -> Vec<TeamRecord> {
    let mut records = vec![TeamRecord::default(); team_count];

    for g in games {
        match (g.winner(), g.loser()) {
            (Some(winner), Some(loser)) => {
                records[winner].wins += 1;
                records[loser].losses += 1;
            }
            _ => {
                records[g.home_team].ties += 1;
                records[g.away_team].ties += 1;
            }
        }
    }

    records
}

// Every past game is re-scored against the opponent's current record, so a team's weighted
// numbers keep moving as its old opponents win or lose. Ties count for nothing either way.
pub fn weigh_results(games: &[CompletedGame], records: &[TeamRecord]) -> Vec<Weights> {
    let mut weights = vec![Weights::default(); records.len()];

    for (idx, w) in weights.iter_mut().enumerate() {
        for g in games {
            if !g.is_in_game(idx) { continue; }

            let opponent = &records[g.other_team(idx)];

            if g.winner() == Some(idx) {
                w.weighted_wins += opponent.wins as f64;
            } else if g.loser() == Some(idx) {
                w.weighted_losses -= opponent.losses as f64;
            }
        }
    }

    weights
}

pub fn assemble_rankings(records: &[TeamRecord], weights: &[Weights], registry: &TeamRegistry) -> Vec<TeamRanking> {
    debug_assert_eq!(records.len(), registry.len());
    debug_assert_eq!(weights.len(), registry.len());

    let mut rankings: Vec<TeamRanking> = registry
        .iter()
        .map(|(idx, info)| team_ranking(idx, &info.abbr, &records[idx], &weights[idx]))
        .collect();

    rankings.sort_by(compare_rankings);
    rankings
}

fn team_ranking(idx: TeamId, abbr: &str, record: &TeamRecord, w: &Weights) -> TeamRanking {
    let total = w.weighted_wins + w.weighted_losses;

    debug!(
        "{} ({}): {}-{}-{} WW {} WL {} total {}",
        abbr, idx, record.wins, record.losses, record.ties, w.weighted_wins, w.weighted_losses, total
    );

    TeamRanking {
        team: abbr.to_string(),
        wins: record.wins,
        losses: record.losses,
        ties: record.ties,
        win_pct: record.win_pct(),
        weighted_wins: w.weighted_wins,
        weighted_losses: w.weighted_losses,
        total,
    }
}

// Total descending, then win percentage descending, then team abbreviation ascending.
pub fn compare_rankings(a: &TeamRanking, b: &TeamRanking) -> Ordering {
    descending(a.total, b.total)
        .then_with(|| descending(a.win_pct, b.win_pct))
        .then_with(|| a.team.cmp(&b.team))
}
