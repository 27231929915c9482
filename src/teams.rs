use serde::*;
use std::collections::HashMap;

// Index into the registry. Every stage after the loader refers to teams this way, so the
// registry must not be reordered once a run has started.
pub type TeamId = usize;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeamInfo {
    pub abbr: String,
    pub name: String,
    #[serde(default)]
    pub conference: String,
    #[serde(default)]
    pub division: String,
}

impl TeamInfo {
    pub fn new(abbr: &str, name: &str, conference: &str, division: &str) -> Self {
        Self {
            abbr: abbr.to_string(),
            name: name.to_string(),
            conference: conference.to_string(),
            division: division.to_string(),
        }
    }
}

/// Read-only lookup table of the league's teams. Passed into the ranking pipeline
/// rather than living in a global, so tests can run against tiny leagues.
#[derive(Debug, Clone)]
pub struct TeamRegistry {
    teams: Vec<TeamInfo>,
    index: HashMap<String, TeamId>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RegistryError {
    #[error("team registry is empty")]
    Empty,

    #[error("duplicate team abbreviation `{0}`")]
    Duplicate(String),
}

// Abbreviations public schedule feeds still use for relocated or renamed clubs.
const ALIASES: [(&str, &str); 6] = [
    ("LA", "LAR"),
    ("STL", "LAR"),
    ("OAK", "LV"),
    ("SD", "LAC"),
    ("WSH", "WAS"),
    ("JAC", "JAX"),
];

impl TeamRegistry {
    pub fn new(teams: Vec<TeamInfo>) -> Result<Self, RegistryError> {
        if teams.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut index = HashMap::new();
        for (idx, t) in teams.iter().enumerate() {
            if index.insert(t.abbr.to_uppercase(), idx).is_some() {
                return Err(RegistryError::Duplicate(t.abbr.clone()));
            }
        }

        Ok(Self { teams, index })
    }

    pub fn nfl() -> Self {
        let teams: Vec<TeamInfo> = NFL_TEAMS
            .iter()
            .map(|(abbr, name, conf, div)| TeamInfo::new(abbr, name, conf, div))
            .collect();
        let index = teams.iter().enumerate().map(|(idx, t)| (t.abbr.clone(), idx)).collect();

        Self { teams, index }
    }

    // Resolves an abbreviation from a feed, case-insensitively, falling back on known aliases.
    pub fn resolve(&self, abbr: &str) -> Option<TeamId> {
        let key = abbr.trim().to_uppercase();
        if let Some(idx) = self.index.get(&key) {
            return Some(*idx);
        }

        ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .and_then(|(_, canonical)| self.index.get(*canonical).copied())
    }

    pub fn get(&self, id: TeamId) -> &TeamInfo {
        &self.teams[id]
    }

    pub fn abbr(&self, id: TeamId) -> &str {
        &self.teams[id].abbr
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TeamId, &TeamInfo)> {
        self.teams.iter().enumerate()
    }
}

const NFL_TEAMS: [(&str, &str, &str, &str); 32] = [
    ("ARI", "Arizona Cardinals", "NFC", "West"),
    ("ATL", "Atlanta Falcons", "NFC", "South"),
    ("BAL", "Baltimore Ravens", "AFC", "North"),
    ("BUF", "Buffalo Bills", "AFC", "East"),
    ("CAR", "Carolina Panthers", "NFC", "South"),
    ("CHI", "Chicago Bears", "NFC", "North"),
    ("CIN", "Cincinnati Bengals", "AFC", "North"),
    ("CLE", "Cleveland Browns", "AFC", "North"),
    ("DAL", "Dallas Cowboys", "NFC", "East"),
    ("DEN", "Denver Broncos", "AFC", "West"),
    ("DET", "Detroit Lions", "NFC", "North"),
    ("GB", "Green Bay Packers", "NFC", "North"),
    ("HOU", "Houston Texans", "AFC", "South"),
    ("IND", "Indianapolis Colts", "AFC", "South"),
    ("JAX", "Jacksonville Jaguars", "AFC", "South"),
    ("KC", "Kansas City Chiefs", "AFC", "West"),
    ("LAC", "Los Angeles Chargers", "AFC", "West"),
    ("LAR", "Los Angeles Rams", "NFC", "West"),
    ("LV", "Las Vegas Raiders", "AFC", "West"),
    ("MIA", "Miami Dolphins", "AFC", "East"),
    ("MIN", "Minnesota Vikings", "NFC", "North"),
    ("NE", "New England Patriots", "AFC", "East"),
    ("NO", "New Orleans Saints", "NFC", "South"),
    ("NYG", "New York Giants", "NFC", "East"),
    ("NYJ", "New York Jets", "AFC", "East"),
    ("PHI", "Philadelphia Eagles", "NFC", "East"),
    ("PIT", "Pittsburgh Steelers", "AFC", "North"),
    ("SEA", "Seattle Seahawks", "NFC", "West"),
    ("SF", "San Francisco 49ers", "NFC", "West"),
    ("TB", "Tampa Bay Buccaneers", "NFC", "South"),
    ("TEN", "Tennessee Titans", "AFC", "South"),
    ("WAS", "Washington Commanders", "NFC", "East"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nfl_registry_has_32_unique_teams() {
        let registry = TeamRegistry::nfl();
        assert_eq!(registry.len(), 32);
        assert_eq!(registry.abbr(registry.resolve("kc").unwrap()), "KC");
    }

    #[test]
    fn aliases_resolve_to_canonical_abbreviation() {
        let registry = TeamRegistry::nfl();
        assert_eq!(registry.abbr(registry.resolve("LA").unwrap()), "LAR");
        assert_eq!(registry.abbr(registry.resolve("OAK").unwrap()), "LV");
        assert_eq!(registry.resolve("XYZ"), None);
    }

    #[test]
    fn aliases_only_apply_when_target_is_registered() {
        let registry = TeamRegistry::new(vec![TeamInfo::new("A", "Alpha", "", "")]).unwrap();
        assert_eq!(registry.resolve("LA"), None);
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        let dup = vec![TeamInfo::new("A", "Alpha", "", ""), TeamInfo::new("a", "Again", "", "")];
        assert_eq!(TeamRegistry::new(dup).unwrap_err(), RegistryError::Duplicate("a".to_string()));
        assert_eq!(TeamRegistry::new(Vec::new()).unwrap_err(), RegistryError::Empty);
    }
}
