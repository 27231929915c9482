use std::fmt::Write;

use crate::ranking::Snapshot;
use crate::teams::TeamRegistry;

pub fn output_report(snapshot: &Snapshot, registry: &TeamRegistry, rows: usize) {
    print!("{}", format_report(snapshot, registry, rows));
}

// Rounding happens here and only here.
pub fn format_report(snapshot: &Snapshot, registry: &TeamRegistry, rows: usize) -> String {
    let mut out = String::new();
    let rule = "=".repeat(84);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Weighted Wins Rankings - {} Week {}", snapshot.season, snapshot.week);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "|{0:>4} | {1:24} | {2:8} | {3:>6} | {4:>8} | {5:>8} | {6:>8}",
        "Rank", "Team", "W-L-T", "Win%", "WW", "WL", "Total");
    let _ = writeln!(out, "{}", "-".repeat(84));

    for (i, t) in snapshot.rankings.iter().take(rows).enumerate() {
        let name = registry
            .resolve(&t.team)
            .map(|idx| registry.get(idx).name.as_str())
            .unwrap_or(t.team.as_str());

        let _ = writeln!(out, "|{0:>3}. | {1:24} | {2:8} | {3:6.3} | {4:8.2} | {5:8.2} | {6:8.2}",
            i + 1,
            name,
            format!("{}-{}-{}", t.wins, t.losses, t.ties),
            t.win_pct,
            t.weighted_wins,
            t.weighted_losses,
            t.total,
        );
    }

    let _ = writeln!(out, "{rule}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use crate::ranking::build_snapshot;
    use chrono::Utc;

    #[test]
    fn report_lists_top_rows_with_names() {
        let registry = TeamRegistry::nfl();
        let snapshot = build_snapshot(&ties_schedule(), 2, 2025, Utc::now(), &registry).unwrap();
        let report = format_report(&snapshot, &registry, 3);

        assert!(report.contains("2025 Week 2"));
        assert!(report.contains("Kansas City Chiefs"));
        assert!(report.contains("1-0-1"));
        assert!(report.contains(" 0.750 "));
        assert!(report.contains("    1.00"));
        // Five heading lines, three teams, closing rule
        assert_eq!(report.lines().count(), 5 + 3 + 1);
    }
}
