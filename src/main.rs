use anyhow::Context;
use chrono::Utc;
use std::path::PathBuf;
use tracing::{info, warn};

use weighted_wins::archive::*;
use weighted_wins::data_loader::*;
use weighted_wins::ranking::*;
use weighted_wins::ranking_context::*;
use weighted_wins::report::*;
use weighted_wins::RankingError;

/*
    Meant to be run by a scheduler after each batch of games. Pass a TOML config path as the
    first argument to change the season, cutoff week, schedule file or output directory;
    without one the defaults in RankingContext apply.
*/

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let ranking_context = match std::env::args().nth(1) {
        Some(path) => load_context(&PathBuf::from(path)).context("failed to load configuration")?,
        None => RankingContext::default(),
    };
    let registry = ranking_context.registry().context("invalid team registry")?;

    let games = read_schedule(&ranking_context.schedule_path).context("failed to read schedule")?;
    let games = filter_season(games, ranking_context.season);
    let games = filter_game_types(games, &ranking_context.game_types);

    let Some(week) = ranking_context.week.or_else(|| current_week(&games)) else {
        info!("No completed games for {} yet, nothing to rank", ranking_context.season);
        return Ok(());
    };

    let snapshot = match build_snapshot(&games, week, ranking_context.season, Utc::now(), &registry) {
        Ok(snapshot) => snapshot,
        Err(RankingError::InsufficientData(reason)) => {
            info!("Rankings not meaningful yet: {reason}");
            return Ok(());
        }
        Err(e) => return Err(e).context(format!("failed to rank week {week}")),
    };

    output_report(&snapshot, &registry, ranking_context.report_rows);

    match write_snapshot(&ranking_context.output_dir, &snapshot, &registry) {
        Ok(WriteOutcome::Written(path)) => info!("Saved {}", path.display()),
        Ok(WriteOutcome::Unchanged(path)) => info!("{} already up to date", path.display()),
        Err(ArchiveError::AlreadyWritten { path }) => {
            warn!("{} was written by an earlier run and is left as is", path.display());
        }
        Err(e) => return Err(e).context("failed to save snapshot"),
    }

    Ok(())
}

// Logs go to stderr so the ranking table on stdout stays clean.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("weighted_wins=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
