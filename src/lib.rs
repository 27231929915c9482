//! Strength-of-schedule rankings for a round-robin league.
//!
//! Each run rebuilds every team's record from the season's game log, then re-weighs every
//! result against the opponent's current record: a win adds the opponent's wins, a loss
//! subtracts the opponent's losses. The output is a [`ranking::Snapshot`] for one week.

pub mod archive;
pub mod audit;
pub mod data_loader;
pub mod error;
pub mod ranking;
pub mod ranking_context;
pub mod report;
pub mod teams;
pub mod util;

#[cfg(test)]
mod fixtures;

pub use data_loader::{Game, MIN_CUTOFF_WEEK};
pub use error::{InsufficientData, InvalidGame, RankingError};
pub use ranking::{build_snapshot, gen_rankings, Snapshot, TeamRanking};
pub use ranking_context::RankingContext;
pub use teams::{TeamInfo, TeamRegistry};
