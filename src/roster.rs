use std::collections::HashSet;

use crate::error::{DrawError, DrawResult};
use crate::team::{Team, POOL_COUNT};

/// Builds a roster from a literal table, one `pool N: [...]` row per pool.
macro_rules! define_roster {
    (
        $title:literal,
        majors: [$major_a:literal, $major_b:literal],
        $(
            pool $pool:literal: [ $( $name:literal => $region:literal ),* $(,)? ]
        ),* $(,)?
    ) => {
        Roster::assemble(
            $title,
            [$major_a.to_string(), $major_b.to_string()],
            vec![$($(Team::new($name, $pool, $region),)*)*],
        )
    };
}

/// The sixteen teams of a draw, four per pool, plus the two major regions
/// that the pool 3 balance rule spreads across groups.
///
/// Roster order matters: the roster order of pool 1 is the reference order
/// for canonicalized outcomes, and the enumeration driver permutes each pool
/// starting from its roster order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub name: String,
    pub major_regions: [String; 2],
    pools: Vec<Vec<Team>>,
}

impl Roster {
    /// Validates and builds a roster from an unordered team list.
    /// Within a pool, teams keep the order they appear in `teams`.
    pub fn from_teams(
        name: impl Into<String>,
        major_regions: [String; 2],
        teams: Vec<Team>,
    ) -> DrawResult<Self> {
        validate_teams(&teams, &major_regions)?;
        Ok(Self::assemble(name, major_regions, teams))
    }

    fn assemble(name: impl Into<String>, major_regions: [String; 2], teams: Vec<Team>) -> Self {
        let mut pools: Vec<Vec<Team>> = vec![Vec::new(); POOL_COUNT];
        for team in teams {
            let slot = usize::from(team.pool).saturating_sub(1);
            if let Some(pool) = pools.get_mut(slot) {
                pool.push(team);
            }
        }
        Roster {
            name: name.into(),
            major_regions,
            pools,
        }
    }

    // Worlds 2020 main stage, assuming no play-in upsets
    pub fn worlds_2020() -> Self {
        define_roster! {
            "Worlds 2020",
            majors: ["China", "Europe"],
            pool 1: ["TES" => "China", "G2" => "Europe", "DWG" => "Korea", "TSM" => "North America"],
            pool 2: ["JDG" => "China", "SN" => "China", "FNC" => "Europe", "DRX" => "Korea"],
            pool 3: ["RGE" => "Europe", "GEN" => "Korea", "FLY" => "North America", "MCX" => "Pacific"],
            pool 4: ["LGD" => "China", "MAD" => "Europe", "TL" => "North America", "PSG" => "Pacific"],
        }
    }

    // Worlds 2020 with pool 4 replaced by the hardest possible set of play-in
    // winners. Minor-region winners never invalidate a group, so only the four
    // major-league seeds that could come through play-ins are modelled.
    pub fn worlds_2020_play_in() -> Self {
        define_roster! {
            "Worlds 2020 (worst-case play-ins)",
            majors: ["China", "Europe"],
            pool 1: ["TES" => "China", "G2" => "Europe", "DWG" => "Korea", "TSM" => "North America"],
            pool 2: ["JDG" => "China", "SN" => "China", "FNC" => "Europe", "DRX" => "Korea"],
            pool 3: ["RGE" => "Europe", "GEN" => "Korea", "FLY" => "North America", "MCX" => "Pacific"],
            pool 4: ["CN" => "China", "EU" => "Europe", "NA" => "North America", "PCS" => "Pacific"],
        }
    }

    pub fn preset(name: &str) -> DrawResult<Self> {
        match name.to_lowercase().replace(&[' ', '-', '_'][..], "").as_str() {
            "worlds2020" | "default" => Ok(Roster::worlds_2020()),
            "worlds2020playin" | "playin" => Ok(Roster::worlds_2020_play_in()),
            _ => Err(DrawError::UnknownPreset(name.to_string())),
        }
    }

    /// Teams of `pool` (1-based) in roster order.
    pub fn pool(&self, pool: u8) -> &[Team] {
        usize::from(pool)
            .checked_sub(1)
            .and_then(|i| self.pools.get(i))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn pools(&self) -> impl Iterator<Item = &[Team]> {
        self.pools.iter().map(Vec::as_slice)
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.pools.iter().flatten()
    }

    /// Position of `team` within pool 1, which fixes canonical group order.
    pub fn seed_index(&self, team: &Team) -> Option<usize> {
        self.pool(1).iter().position(|t| t == team)
    }

    pub fn find_team(&self, name: &str) -> DrawResult<&Team> {
        let teams: Vec<&Team> = self.teams().collect();
        find_by_name(&teams, name)
    }

    pub fn find_in_pool(&self, pool: u8, name: &str) -> DrawResult<&Team> {
        let teams: Vec<&Team> = self.pool(pool).iter().collect();
        find_by_name(&teams, name)
    }
}

fn validate_teams(teams: &[Team], major_regions: &[String; 2]) -> DrawResult<()> {
    if major_regions[0] == major_regions[1] {
        return Err(DrawError::InvalidRoster(format!(
            "major regions must differ, got '{}' twice",
            major_regions[0]
        )));
    }

    let mut names = HashSet::new();
    for team in teams {
        if team.name.trim().is_empty() {
            return Err(DrawError::InvalidRoster("team with an empty name".to_string()));
        }
        if !(1..=POOL_COUNT as u8).contains(&team.pool) {
            return Err(DrawError::InvalidRoster(format!(
                "{} is in pool {}, pools run from 1 to {}",
                team.name, team.pool, POOL_COUNT
            )));
        }
        if !names.insert(team.name.to_lowercase()) {
            return Err(DrawError::InvalidRoster(format!(
                "duplicate team name '{}'",
                team.name
            )));
        }
    }

    for pool in 1..=POOL_COUNT as u8 {
        let count = teams.iter().filter(|t| t.pool == pool).count();
        if count != POOL_COUNT {
            return Err(DrawError::InvalidRoster(format!(
                "pool {} has {} teams, expected {}",
                pool, count, POOL_COUNT
            )));
        }
    }

    // Pool 1 seeds one team per group with no checks, so its regions must
    // already be distinct.
    let mut seed_regions = HashSet::new();
    for team in teams.iter().filter(|t| t.pool == 1) {
        if !seed_regions.insert(team.region.as_str()) {
            return Err(DrawError::InvalidRoster(format!(
                "pool 1 has two teams from {}",
                team.region
            )));
        }
    }

    Ok(())
}

fn find_by_name<'a>(candidates: &[&'a Team], name: &str) -> DrawResult<&'a Team> {
    let normalized_input = name.trim().to_lowercase();

    if let Some(team) = candidates
        .iter()
        .find(|t| t.name.to_lowercase() == normalized_input)
    {
        return Ok(*team);
    }

    // No exact match - find close suggestions using Jaro-Winkler similarity
    let mut suggestions: Vec<(&Team, f64)> = candidates
        .iter()
        .map(|&team| {
            let similarity = strsim::jaro_winkler(&normalized_input, &team.name.to_lowercase());
            (team, similarity)
        })
        .filter(|(_, sim)| *sim >= 0.7)
        .collect();

    suggestions.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    let suggestion = match suggestions.first() {
        Some((closest, similarity)) if *similarity >= 0.85 => {
            format!("\n  Did you mean: {}?", closest.name)
        }
        Some(_) => {
            let names: Vec<&str> = suggestions
                .iter()
                .take(3)
                .map(|(t, _)| t.name.as_str())
                .collect();
            format!("\n  Did you mean one of: {}?", names.join(", "))
        }
        None => String::new(),
    };

    Err(DrawError::UnknownTeam {
        name: name.to_string(),
        suggestion,
    })
}
