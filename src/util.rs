use std::cmp::Ordering;

// Ties count as half a win. A team that hasn't played sits at 0.0, not NaN.
pub fn win_percentage(wins: u32, losses: u32, ties: u32) -> f64 {
    let games = wins + losses + ties;
    if games == 0 {
        return 0.0;
    }

    (wins as f64 + 0.5 * ties as f64) / games as f64
}

// Larger values first. total_cmp keeps the order total even if a NaN ever slips through.
pub fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
