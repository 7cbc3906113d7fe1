//! Roster files.
//!
//! A roster file is TOML with a title, the two major regions, and one
//! `[[teams]]` table per team:
//!
//! ```toml
//! name = "Worlds 2020"
//! major_regions = ["China", "Europe"]
//!
//! [[teams]]
//! name = "TES"
//! pool = 1
//! region = "China"
//! ```
//!
//! Teams keep file order within their pool.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DrawError, DrawResult};
use crate::roster::Roster;
use crate::team::Team;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosterFile {
    pub name: String,
    pub major_regions: [String; 2],
    #[serde(default)]
    pub teams: Vec<Team>,
}

impl RosterFile {
    pub fn load(path: &Path) -> DrawResult<Roster> {
        let content = std::fs::read_to_string(path).map_err(|e| DrawError::RosterParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let file = Self::parse(&content, &path.display().to_string())?;
        debug!(path = %path.display(), teams = file.teams.len(), "loaded roster file");
        file.into_roster()
    }

    /// Parses and validates a roster from a TOML string.
    pub fn from_toml(toml_str: &str) -> DrawResult<Roster> {
        Self::parse(toml_str, "<string>")?.into_roster()
    }

    fn parse(toml_str: &str, path: &str) -> DrawResult<Self> {
        toml::from_str(toml_str).map_err(|e| DrawError::RosterParse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    pub fn into_roster(self) -> DrawResult<Roster> {
        Roster::from_teams(self.name, self.major_regions, self.teams)
    }

    pub fn from_roster(roster: &Roster) -> Self {
        RosterFile {
            name: roster.name.clone(),
            major_regions: roster.major_regions.clone(),
            teams: roster.teams().cloned().collect(),
        }
    }

    pub fn to_toml(&self) -> DrawResult<String> {
        toml::to_string_pretty(self).map_err(|e| DrawError::RosterParse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }
}
