use serde::*;
use serde_aux::field_attributes::deserialize_option_number_from_string;
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{InsufficientData, InvalidGame, RankingError};
use crate::teams::{TeamId, TeamRegistry};

// Through week 1 alone no opponent has a record worth weighting against.
pub const MIN_CUTOFF_WEEK: u32 = 2;

const REQUIRED_COLUMNS: [&str; 5] = ["week", "home_team", "away_team", "home_score", "away_score"];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read schedule {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("schedule {path} is missing required columns: {missing:?}")]
    MissingColumns { path: String, missing: Vec<String> },
}

// One row of the season's schedule as the feed delivers it. Scores are absent until the game
// is played. Extra feed columns (gameday, spread_line, ...) are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Game {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub season: Option<u32>,
    // REG, WC, DIV, CON, SB in nflverse feeds.
    #[serde(default)]
    pub game_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_week")]
    pub week: u32,
    #[serde(default)]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub home_score: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub away_score: Option<i32>,
}

impl Game {
    pub fn is_played(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Tie,
}

// A validated, scored game. Teams are registry indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletedGame {
    pub week: u32,
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub home_score: u32,
    pub away_score: u32,
}

impl CompletedGame {
    // Derived from the scores. The feed's own result column is never consulted.
    pub fn outcome(&self) -> Outcome {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Outcome::HomeWin,
            std::cmp::Ordering::Less => Outcome::AwayWin,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    pub fn winner(&self) -> Option<TeamId> {
        match self.outcome() {
            Outcome::HomeWin => Some(self.home_team),
            Outcome::AwayWin => Some(self.away_team),
            Outcome::Tie => None,
        }
    }

    pub fn loser(&self) -> Option<TeamId> {
        match self.outcome() {
            Outcome::HomeWin => Some(self.away_team),
            Outcome::AwayWin => Some(self.home_team),
            Outcome::Tie => None,
        }
    }

    pub fn is_in_game(&self, id: TeamId) -> bool {
        self.home_team == id || self.away_team == id
    }

    pub fn other_team(&self, id: TeamId) -> TeamId {
        debug_assert!(self.is_in_game(id));

        if self.home_team == id { self.away_team } else { self.home_team }
    }
}

// Reads a schedule file. `.json` holds an array of games, anything else is treated as CSV with a header row.
pub fn read_schedule(path: &Path) -> Result<Vec<Game>, LoadError> {
    let path_str = path.display().to_string();
    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let games = if is_json {
        let data = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path_str.clone(),
            source,
        })?;
        games_from_json(&data, &path_str)?
    } else {
        let file = fs::File::open(path).map_err(|source| LoadError::Io {
            path: path_str.clone(),
            source,
        })?;
        games_from_csv(file, &path_str)?
    };

    info!("Read {} schedule rows from {}", games.len(), path_str);
    Ok(games)
}

pub fn games_from_csv<R: Read>(rdr: R, source_name: &str) -> Result<Vec<Game>, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: source_name.to_string(),
        source,
    };

    // Header names are trimmed before serde matches them against field names
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(rdr);

    let headers = reader.headers().map_err(csv_err)?;
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            path: source_name.to_string(),
            missing,
        });
    }

    let mut games = Vec::new();
    for row in reader.deserialize::<Game>() {
        games.push(row.map_err(csv_err)?);
    }

    Ok(games)
}

pub fn games_from_json(data: &str, source_name: &str) -> Result<Vec<Game>, LoadError> {
    serde_json::from_str(data).map_err(|source| LoadError::Json {
        path: source_name.to_string(),
        source,
    })
}

// Feeds may carry several seasons. Rows without a season column are kept.
pub fn filter_season(games: Vec<Game>, season: u32) -> Vec<Game> {
    let before = games.len();
    let kept: Vec<Game> = games
        .into_iter()
        .filter(|g| g.season.map_or(true, |s| s == season))
        .collect();

    if kept.len() != before {
        debug!("Dropped {} rows from other seasons", before - kept.len());
    }
    kept
}

// Keeps rows whose game type is listed, e.g. only "REG" to leave the playoffs out. Matching
// ignores case. Rows without a game type are kept, and an empty list keeps everything.
pub fn filter_game_types(games: Vec<Game>, game_types: &[String]) -> Vec<Game> {
    if game_types.is_empty() {
        return games;
    }

    let before = games.len();
    let kept: Vec<Game> = games
        .into_iter()
        .filter(|g| {
            g.game_type
                .as_deref()
                .map_or(true, |t| game_types.iter().any(|wanted| wanted.eq_ignore_ascii_case(t.trim())))
        })
        .collect();

    if kept.len() != before {
        debug!("Dropped {} rows outside game types {:?}", before - kept.len(), game_types);
    }
    kept
}

// Latest week with at least one played game.
pub fn current_week(games: &[Game]) -> Option<u32> {
    games.iter().filter(|g| g.is_played()).map(|g| g.week).max()
}

// The schedule loader stage: validates every record, then keeps games played on or before `cutoff`.
// Unplayed and partially scored games are expected and dropped silently.
pub fn completed_games(games: &[Game], cutoff: u32, registry: &TeamRegistry) -> Result<Vec<CompletedGame>, RankingError> {
    if cutoff < MIN_CUTOFF_WEEK {
        return Err(InsufficientData::CutoffTooEarly {
            cutoff,
            minimum: MIN_CUTOFF_WEEK,
        }
        .into());
    }

    let mut completed = Vec::new();
    for (row, g) in games.iter().enumerate() {
        let (home_team, away_team) = validate_game(row, g, registry)?;

        if g.week > cutoff { continue; }

        let (Some(home_score), Some(away_score)) = (g.home_score, g.away_score) else { continue; };

        completed.push(CompletedGame {
            week: g.week,
            home_team,
            away_team,
            // validate_game rejected negatives
            home_score: home_score.unsigned_abs(),
            away_score: away_score.unsigned_abs(),
        });
    }

    debug!("{} of {} rows completed through week {}", completed.len(), games.len(), cutoff);

    for (week, team) in double_booked(&completed) {
        warn!("{} has more than one game in week {}", registry.abbr(team), week);
    }

    if completed.is_empty() {
        return Err(InsufficientData::NoCompletedGames { cutoff }.into());
    }

    Ok(completed)
}

// (week, team) pairs where a team shows up in more than one game, sorted by week then team.
// A team plays at most once a week, so these usually mean a duplicated feed row.
pub fn double_booked(games: &[CompletedGame]) -> Vec<(u32, TeamId)> {
    let mut appearances: HashMap<(u32, TeamId), u32> = HashMap::new();
    for g in games {
        for team in [g.home_team, g.away_team] {
            *appearances.entry((g.week, team)).or_default() += 1;
        }
    }

    let mut doubled: Vec<(u32, TeamId)> = appearances
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(slot, _)| slot)
        .collect();
    doubled.sort_unstable();
    doubled
}

fn validate_game(row: usize, g: &Game, registry: &TeamRegistry) -> Result<(TeamId, TeamId), InvalidGame> {
    if g.week == 0 {
        return Err(InvalidGame::InvalidWeek { row });
    }

    let home = resolve_team(row, &g.home_team, "home_team", registry)?;
    let away = resolve_team(row, &g.away_team, "away_team", registry)?;

    if home == away {
        return Err(InvalidGame::SameTeam {
            row,
            team: registry.abbr(home).to_string(),
        });
    }

    for (team, score) in [(&g.home_team, g.home_score), (&g.away_team, g.away_score)] {
        if let Some(score) = score.filter(|s| *s < 0) {
            return Err(InvalidGame::NegativeScore {
                row,
                team: team.clone(),
                score,
            });
        }
    }

    Ok((home, away))
}

fn resolve_team(row: usize, abbr: &str, field: &'static str, registry: &TeamRegistry) -> Result<TeamId, InvalidGame> {
    if abbr.trim().is_empty() {
        return Err(InvalidGame::MissingField { row, field });
    }

    registry.resolve(abbr).ok_or_else(|| InvalidGame::UnknownTeam {
        row,
        team: abbr.to_string(),
    })
}

// Feeds exported from dataframes write integer columns holding missing values as floats,
// so a week or score may arrive as `28.0`. Anything with a fractional part is rejected.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberField {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl NumberField {
    // None for an empty cell or "NA".
    fn whole<E: de::Error>(self) -> Result<Option<i64>, E> {
        match self {
            NumberField::Integer(n) => Ok(Some(n)),
            NumberField::Float(f) => whole_float(f).map(Some),
            NumberField::Text(s) => {
                let s = s.trim();
                if s.is_empty() || s.eq_ignore_ascii_case("na") {
                    return Ok(None);
                }
                match s.parse::<i64>() {
                    Ok(n) => Ok(Some(n)),
                    Err(_) => s
                        .parse::<f64>()
                        .map_err(|_| E::custom(format!("`{s}` is not a number")))
                        .and_then(whole_float)
                        .map(Some),
                }
            }
        }
    }
}

fn whole_float<E: de::Error>(f: f64) -> Result<i64, E> {
    // NaN and infinities have a NaN fractional part
    if f.fract() == 0.0 && f.abs() <= i32::MAX as f64 {
        Ok(f as i64)
    } else {
        Err(E::custom(format!("expected a whole number, got {f}")))
    }
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberField>::deserialize(deserializer)? {
        None => Ok(None),
        Some(field) => match field.whole::<D::Error>()? {
            None => Ok(None),
            Some(n) => i32::try_from(n)
                .map(Some)
                .map_err(|_| de::Error::custom(format!("score {n} is out of range"))),
        },
    }
}

// A missing or blank week becomes 0, which validation reports as an invalid week.
fn deserialize_week<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberField::deserialize(deserializer)?.whole::<D::Error>()? {
        None => Ok(0),
        Some(n) => u32::try_from(n).map_err(|_| de::Error::custom(format!("week {n} is out of range"))),
    }
}
