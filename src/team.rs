use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of pools, groups, and teams per pool.
pub const POOL_COUNT: usize = 4;
pub const GROUP_COUNT: usize = 4;
pub const GROUP_CAPACITY: usize = 4;

/// A seeded team. Immutable once built and shared by reference across
/// every simulated outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub pool: u8,
    pub region: String,
}

impl Team {
    pub fn new(name: impl Into<String>, pool: u8, region: impl Into<String>) -> Self {
        Team {
            name: name.into(),
            pool,
            region: region.into(),
        }
    }

    pub fn is_from(&self, region: &str) -> bool {
        self.region == region
    }

    /// True if the team belongs to either of the given regions.
    pub fn is_from_any(&self, regions: &[String]) -> bool {
        regions.iter().any(|r| self.is_from(r))
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Renders teams as `(A, B, C)`, the format used by every report.
pub fn format_teams<'a>(teams: impl IntoIterator<Item = &'a Team>) -> String {
    let names: Vec<&str> = teams.into_iter().map(|t| t.name.as_str()).collect();
    format!("({})", names.join(", "))
}
