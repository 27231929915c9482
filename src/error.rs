use thiserror::Error;

// Errors raised by the ranking pipeline itself. Everything here is deterministic:
// running again on the same game log gives the same error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RankingError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidGame),

    #[error("insufficient data: {0}")]
    InsufficientData(#[from] InsufficientData),
}

impl RankingError {
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, RankingError::InsufficientData(_))
    }
}

/// A game record that cannot be ranked. `row` is the record's position in the input log.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvalidGame {
    #[error("row {row}: missing required field `{field}`")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: unknown team `{team}`")]
    UnknownTeam { row: usize, team: String },

    #[error("row {row}: `{team}` listed as both home and away team")]
    SameTeam { row: usize, team: String },

    #[error("row {row}: negative score {score} for `{team}`")]
    NegativeScore { row: usize, team: String, score: i32 },

    #[error("row {row}: week must be 1 or later")]
    InvalidWeek { row: usize },
}

// Rankings are not meaningful yet. Callers treat this as a normal state and write nothing.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InsufficientData {
    #[error("cutoff week {cutoff} is before week {minimum}")]
    CutoffTooEarly { cutoff: u32, minimum: u32 },

    #[error("no completed games through week {cutoff}")]
    NoCompletedGames { cutoff: u32 },
}
