use serde::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::teams::{RegistryError, TeamInfo, TeamRegistry};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// Everything a weekly run needs to know. Every field has a default, so a config file
// only has to name what it changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RankingContext {
    pub season: u32,
    // Cutoff week. When unset the latest week with a played game is used.
    pub week: Option<u32>,

    pub schedule_path: PathBuf,
    pub output_dir: PathBuf,

    pub report_rows: usize,

    // Game types to rank. Empty ranks every row.
    pub game_types: Vec<String>,

    // Replaces the built-in NFL registry when present.
    pub teams: Option<Vec<TeamInfo>>,
}

impl Default for RankingContext {
    fn default() -> Self {
        Self {
            season: 2025,
            week: None,

            schedule_path: PathBuf::from("data/schedule.csv"),
            output_dir: PathBuf::from("data"),

            report_rows: 10,

            game_types: vec!["REG".to_string()],

            teams: None,
        }
    }
}

impl RankingContext {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let context: RankingContext = toml::from_str(text).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;

        context.validate()?;
        Ok(context)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.season == 0 {
            return Err(validation("season", "must be a calendar year"));
        }
        if self.week == Some(0) {
            return Err(validation("week", "weeks start at 1"));
        }
        if self.report_rows == 0 {
            return Err(validation("report_rows", "must be at least 1"));
        }
        if self.game_types.iter().any(|t| t.trim().is_empty()) {
            return Err(validation("game_types", "entries must not be blank"));
        }
        if let Some(teams) = &self.teams {
            TeamRegistry::new(teams.clone()).map_err(|e: RegistryError| validation("teams", &e.to_string()))?;
        }
        Ok(())
    }

    pub fn registry(&self) -> Result<TeamRegistry, RegistryError> {
        match &self.teams {
            Some(teams) => TeamRegistry::new(teams.clone()),
            None => Ok(TeamRegistry::nfl()),
        }
    }
}

pub fn load_context(path: &Path) -> Result<RankingContext, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound { path: path.to_path_buf() });
    }

    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    RankingContext::from_toml(&text, path)
}

fn validation(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<RankingContext, ConfigError> {
        RankingContext::from_toml(text, Path::new("inline.toml"))
    }

    #[test]
    fn empty_file_gives_defaults() {
        let context = parse("").unwrap();
        assert_eq!(context.season, 2025);
        assert_eq!(context.week, None);
        assert_eq!(context.report_rows, 10);
        assert_eq!(context.game_types, vec!["REG".to_string()]);
        assert_eq!(context.registry().unwrap().len(), 32);
    }

    #[test]
    fn overrides_and_custom_registry() {
        let context = parse(
            r#"
            season = 2024
            week = 6
            schedule_path = "feeds/2024.json"
            game_types = ["REG", "WC"]

            [[teams]]
            abbr = "A"
            name = "Alpha"

            [[teams]]
            abbr = "B"
            name = "Bravo"
            "#,
        )
        .unwrap();

        assert_eq!(context.season, 2024);
        assert_eq!(context.week, Some(6));
        assert_eq!(context.schedule_path, PathBuf::from("feeds/2024.json"));
        assert_eq!(context.game_types.len(), 2);

        let registry = context.registry().unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1).name, "Bravo");
    }

    #[test]
    fn rejects_invalid_values() {
        for text in ["week = 0", "report_rows = 0", "season = 0", "game_types = [\"\"]"] {
            assert!(matches!(parse(text), Err(ConfigError::ValidationError { .. })), "{text}");
        }

        let dup = "[[teams]]\nabbr = \"A\"\nname = \"x\"\n[[teams]]\nabbr = \"A\"\nname = \"y\"\n";
        assert!(matches!(parse(dup), Err(ConfigError::ValidationError { field, .. }) if field == "teams"));
    }

    #[test]
    fn bad_toml_and_missing_file() {
        assert!(matches!(parse("season = \"soon\""), Err(ConfigError::ParseError { .. })));

        let missing = std::env::temp_dir().join("weighted_wins_no_such_config.toml");
        assert!(matches!(load_context(&missing), Err(ConfigError::FileNotFound { .. })));
    }
}
