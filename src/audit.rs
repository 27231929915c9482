// Integrity checks on a snapshot before it's allowed anywhere near the archive.

use std::cmp::Ordering;
use thiserror::Error;

use crate::ranking::*;
use crate::teams::TeamRegistry;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuditError {
    #[error("expected {expected} teams, found {found}")]
    WrongTeamCount { expected: usize, found: usize },

    #[error("team `{0}` is not in the registry")]
    UnknownTeam(String),

    #[error("team `{0}` appears more than once")]
    DuplicateTeam(String),

    #[error("rows {0} and {1} are out of order")]
    OutOfOrder(usize, usize),

    #[error("team `{team}`: {problem}")]
    BadRow { team: String, problem: &'static str },
}

pub fn audit_snapshot(snapshot: &Snapshot, registry: &TeamRegistry) -> Result<(), AuditError> {
    let rankings = &snapshot.rankings;

    if rankings.len() != registry.len() {
        return Err(AuditError::WrongTeamCount {
            expected: registry.len(),
            found: rankings.len(),
        });
    }

    let mut seen = vec![false; registry.len()];
    for r in rankings {
        let idx = registry
            .resolve(&r.team)
            .filter(|idx| registry.abbr(*idx) == r.team)
            .ok_or_else(|| AuditError::UnknownTeam(r.team.clone()))?;

        if seen[idx] {
            return Err(AuditError::DuplicateTeam(r.team.clone()));
        }
        seen[idx] = true;

        audit_row(r)?;
    }

    for (i, pair) in rankings.windows(2).enumerate() {
        if compare_rankings(&pair[0], &pair[1]) == Ordering::Greater {
            return Err(AuditError::OutOfOrder(i, i + 1));
        }
    }

    Ok(())
}

fn audit_row(r: &TeamRanking) -> Result<(), AuditError> {
    let bad = |problem| AuditError::BadRow {
        team: r.team.clone(),
        problem,
    };

    if ![r.win_pct, r.weighted_wins, r.weighted_losses, r.total].iter().all(|v| v.is_finite()) {
        return Err(bad("non-finite value"));
    }
    if !(0.0..=1.0).contains(&r.win_pct) {
        return Err(bad("win percentage outside 0..1"));
    }
    if r.weighted_wins < 0.0 {
        return Err(bad("negative weighted wins"));
    }
    if r.weighted_losses > 0.0 {
        return Err(bad("positive weighted losses"));
    }
    if r.total != r.weighted_wins + r.weighted_losses {
        return Err(bad("total is not weighted wins plus weighted losses"));
    }

    Ok(())
}
