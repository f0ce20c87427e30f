//! Team descriptions used as the domain-context block of every prompt.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDescription {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub main_activities: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TeamFile {
    #[serde(default)]
    teams: BTreeMap<String, TeamDescription>,
}

/// Immutable team registry, loaded once at startup and shared by `Arc`.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    teams: BTreeMap<String, TeamDescription>,
}

impl TeamDirectory {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses `{"teams": {"<name>": {"description", "mainActivities"}}}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: TeamFile = serde_json::from_str(json)?;
        Ok(Self { teams: file.teams })
    }

    /// Loads the directory from disk. A missing or unreadable file yields an empty
    /// directory; prompts then carry the "no description" line instead.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    "Team descriptions not loaded from {}: {e}",
                    path.display()
                );
                return Self::empty();
            }
        };

        match Self::from_json(&raw) {
            Ok(directory) => {
                info!(
                    "Loaded descriptions for {} teams from {}",
                    directory.len(),
                    path.display()
                );
                directory
            }
            Err(e) => {
                warn!("Team descriptions in {} are malformed: {e}", path.display());
                Self::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn team_names(&self) -> Vec<&str> {
        self.teams.keys().map(String::as_str).collect()
    }

    /// Exact match, then case-insensitive, then substring in either direction.
    pub fn lookup(&self, team: &str) -> Option<&TeamDescription> {
        let team = team.trim();
        if team.is_empty() {
            return None;
        }

        if let Some(found) = self.teams.get(team) {
            return Some(found);
        }

        let wanted = team.to_lowercase();
        if let Some((_, found)) = self
            .teams
            .iter()
            .find(|(name, _)| name.to_lowercase() == wanted)
        {
            return Some(found);
        }

        let partial = self.teams.iter().find(|(name, _)| {
            let name = name.to_lowercase();
            name.contains(&wanted) || wanted.contains(&name)
        });
        if let Some((name, found)) = partial {
            debug!("Partial team match for '{team}': '{name}'");
            return Some(found);
        }

        debug!("No description for team '{team}'");
        None
    }

    /// Plain-text context block for the prompt.
    pub fn describe(&self, team: &str) -> String {
        let Some(found) = self.lookup(team) else {
            return format!("Zespół: {team} (brak szczegółowego opisu)");
        };

        let mut text = format!("Zespół: {team}\nOpis: {}\n", found.description);
        if !found.main_activities.is_empty() {
            text.push_str("Główne działania zespołu:\n");
            for (i, activity) in found.main_activities.iter().enumerate() {
                text.push_str(&format!("{}. {activity}\n", i + 1));
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "teams": {
            "Marketing Masters": {
                "description": "Komunikacja i media społecznościowe.",
                "mainActivities": ["Kampanie", "TikTok"]
            },
            "Graphic Masters": {
                "description": "Materiały wizualne."
            }
        }
    }"#;

    fn directory() -> TeamDirectory {
        TeamDirectory::from_json(SAMPLE).unwrap()
    }

    #[test]
    fn test_lookup_exact_then_case_insensitive_then_partial() {
        let dir = directory();
        assert!(dir.lookup("Marketing Masters").is_some());
        assert_eq!(
            dir.lookup("graphic masters").map(|d| d.description.as_str()),
            Some("Materiały wizualne.")
        );
        assert_eq!(
            dir.lookup("Marketing").map(|d| d.description.as_str()),
            Some("Komunikacja i media społecznościowe.")
        );
        assert!(dir.lookup("Finance").is_none());
        assert!(dir.lookup("  ").is_none());
    }

    #[test]
    fn test_describe_lists_numbered_activities() {
        let text = directory().describe("Marketing Masters");
        assert!(text.starts_with("Zespół: Marketing Masters\nOpis: Komunikacja"));
        assert!(text.contains("Główne działania zespołu:\n1. Kampanie\n2. TikTok\n"));
    }

    #[test]
    fn test_describe_unknown_team() {
        assert_eq!(
            directory().describe("Finance"),
            "Zespół: Finance (brak szczegółowego opisu)"
        );
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TeamDirectory::load(Path::new("/nonexistent/opisy-zespoly.json"));
        assert!(dir.is_empty());
    }

    #[test]
    fn test_load_from_disk() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), SAMPLE).unwrap();
        let dir = TeamDirectory::load(file.path());
        assert_eq!(dir.team_names(), vec!["Graphic Masters", "Marketing Masters"]);
    }
}
