// Mock schedules shared by the unit tests.

use crate::data_loader::Game;
use crate::teams::{TeamInfo, TeamRegistry};

pub fn game(week: u32, home: &str, away: &str, home_score: Option<i32>, away_score: Option<i32>) -> Game {
    Game {
        season: None,
        game_type: None,
        week,
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_score,
        away_score,
    }
}

fn played(week: u32, home: &str, away: &str, home_score: i32, away_score: i32) -> Game {
    game(week, home, away, Some(home_score), Some(away_score))
}

// Four-team league for hand-checked scenarios.
pub fn abcd_registry() -> TeamRegistry {
    let teams = ["A", "B", "C", "D"]
        .iter()
        .map(|abbr| TeamInfo::new(abbr, &format!("Team {abbr}"), "", ""))
        .collect();
    TeamRegistry::new(teams).unwrap()
}

// Week 1: KC beats BAL, BUF beats NYJ. Week 2: KC beats BUF, BAL beats NYJ.
// KC 2-0, BUF 1-1, BAL 1-1, NYJ 0-2.
pub fn week_2_schedule() -> Vec<Game> {
    vec![
        played(1, "KC", "BAL", 27, 20),
        played(1, "BUF", "NYJ", 24, 17),
        played(2, "KC", "BUF", 28, 21),
        played(2, "BAL", "NYJ", 21, 14),
    ]
}

// Sixteen games over four weeks; PHI, KC, DAL unbeaten, SF and LAR tie in week 2.
pub fn week_4_schedule() -> Vec<Game> {
    vec![
        played(1, "PHI", "NE", 25, 20),
        played(1, "KC", "LAC", 44, 21),
        played(1, "DAL", "NYG", 40, 0),
        played(1, "SF", "ARI", 30, 10),
        played(2, "PHI", "BUF", 34, 28),
        played(2, "KC", "CHI", 41, 10),
        played(2, "DAL", "NYJ", 30, 10),
        played(2, "SF", "LAR", 30, 30),
        played(3, "PHI", "WAS", 25, 11),
        played(3, "KC", "MIN", 28, 20),
        played(3, "DAL", "MIA", 20, 17),
        played(3, "SF", "SEA", 42, 27),
        played(4, "PHI", "TB", 25, 11),
        played(4, "KC", "DEN", 19, 8),
        played(4, "DAL", "CLE", 20, 17),
        played(4, "SF", "LV", 35, 14),
    ]
}

// Week 1: KC ties BAL, BUF beats NYJ. Week 2: KC beats BUF, BAL beats NYJ.
// KC 1-0-1, BAL 1-0-1, BUF 1-1-0, NYJ 0-2-0.
pub fn ties_schedule() -> Vec<Game> {
    vec![
        played(1, "KC", "BAL", 24, 24),
        played(1, "BUF", "NYJ", 24, 17),
        played(2, "KC", "BUF", 28, 21),
        played(2, "BAL", "NYJ", 21, 14),
    ]
}

// Week 2 still to be played.
pub fn incomplete_schedule() -> Vec<Game> {
    vec![
        played(1, "KC", "BAL", 27, 20),
        played(1, "BUF", "NYJ", 24, 17),
        game(2, "KC", "BUF", None, None),
        game(2, "BAL", "NYJ", None, None),
    ]
}

// NYJ loses to KC and BAL.
pub fn no_wins_schedule() -> Vec<Game> {
    vec![played(1, "KC", "NYJ", 27, 20), played(2, "BAL", "NYJ", 21, 14)]
}

// KC beats NYJ and BAL.
pub fn no_losses_schedule() -> Vec<Game> {
    vec![played(1, "KC", "NYJ", 27, 20), played(2, "KC", "BAL", 28, 21)]
}
