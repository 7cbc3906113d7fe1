use std::fmt;

use crate::error::Conflict;
use crate::team::{format_teams, Team, GROUP_CAPACITY};

/// One of the four draw groups. Holds at most one team per pool, no two of
/// them from the same region. Groups only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Group<'a> {
    teams: Vec<&'a Team>,
}

impl<'a> Group<'a> {
    pub fn new() -> Self {
        Group {
            teams: Vec::with_capacity(GROUP_CAPACITY),
        }
    }

    /// Checks `team` against current members only, ignoring other groups.
    /// A team clashing on both region and pool reports `SameRegion`.
    pub fn validate(&self, team: &Team) -> Result<(), Conflict> {
        if self.teams.iter().any(|t| t.region == team.region) {
            return Err(Conflict::SameRegion);
        }
        if self.has_pool(team.pool) {
            return Err(Conflict::SamePool);
        }
        Ok(())
    }

    /// Validates, then inserts `team`. Members stay sorted by pool.
    pub fn add(&mut self, team: &'a Team) -> Result<(), Conflict> {
        self.validate(team)?;
        self.teams.push(team);
        self.teams.sort_by_key(|t| t.pool);
        Ok(())
    }

    pub fn has_pool(&self, pool: u8) -> bool {
        self.teams.iter().any(|t| t.pool == pool)
    }

    /// True if some member comes from one of `regions`.
    pub fn has_region_in(&self, regions: &[String]) -> bool {
        self.teams.iter().any(|t| t.is_from_any(regions))
    }

    pub fn teams(&self) -> &[&'a Team] {
        &self.teams
    }

    /// The group's pool 1 team, which identifies it after canonicalization.
    pub fn seed(&self) -> Option<&'a Team> {
        self.teams.iter().copied().find(|t| t.pool == 1)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.teams.len() == GROUP_CAPACITY
    }
}

impl fmt::Display for Group<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_teams(self.teams.iter().copied()))
    }
}
