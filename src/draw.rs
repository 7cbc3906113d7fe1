use std::fmt;

use crate::error::{DrawError, DrawResult};
use crate::roster::Roster;
use crate::team::{format_teams, Team, GROUP_COUNT, POOL_COUNT};

/// The order in which one pool's teams come out of the pot.
pub type PoolOrder<'a> = [&'a Team; GROUP_COUNT];

/// One full draw ordering: a reveal order for each of the four pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Draw<'a> {
    pools: [PoolOrder<'a>; POOL_COUNT],
}

impl<'a> Draw<'a> {
    /// Checks that every pool order is a permutation of that pool's teams.
    pub fn new(roster: &Roster, pools: [PoolOrder<'a>; POOL_COUNT]) -> DrawResult<Self> {
        for (i, order) in pools.iter().enumerate() {
            let pool = i as u8 + 1;
            let expected = roster.pool(pool);
            for team in order {
                if team.pool != pool || !expected.contains(team) {
                    return Err(DrawError::InvalidDraw {
                        pool,
                        message: format!("{} is not a pool {} team", team.name, pool),
                    });
                }
            }
            for team in expected {
                if !order.contains(&team) {
                    return Err(DrawError::InvalidDraw {
                        pool,
                        message: format!("{} is missing from the draw", team.name),
                    });
                }
            }
        }
        Ok(Draw { pools })
    }

    /// Orders already known to be permutations of the roster pools.
    pub(crate) fn from_orders(pools: [PoolOrder<'a>; POOL_COUNT]) -> Self {
        Draw { pools }
    }

    /// Every pool drawn in roster order.
    pub fn identity(roster: &'a Roster) -> DrawResult<Self> {
        Self::from_names(roster, [None; POOL_COUNT])
    }

    /// Builds a draw from comma-separated team names per pool, e.g.
    /// `"TES, G2, DWG, TSM"`. A `None` pool is drawn in roster order.
    pub fn from_names(roster: &'a Roster, names: [Option<&str>; POOL_COUNT]) -> DrawResult<Self> {
        let mut pools = Vec::with_capacity(POOL_COUNT);
        for (i, list) in names.iter().enumerate() {
            let pool = i as u8 + 1;
            let teams: Vec<&Team> = match list {
                Some(list) => list
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|s| !s.is_empty())
                    .map(|name| roster.find_in_pool(pool, name))
                    .collect::<DrawResult<_>>()?,
                None => roster.pool(pool).iter().collect(),
            };
            pools.push(to_order(pool, teams)?);
        }

        let pools: [PoolOrder<'a>; POOL_COUNT] = pools
            .try_into()
            .map_err(|_| DrawError::InvalidRoster(format!("expected {} pools", POOL_COUNT)))?;
        Draw::new(roster, pools)
    }

    /// Reveal order of `pool` (1-based).
    ///
    /// # Panics
    ///
    /// If `pool` is outside `1..=4`.
    pub fn pool(&self, pool: u8) -> &PoolOrder<'a> {
        assert!(
            (1..=POOL_COUNT as u8).contains(&pool),
            "pool {} is out of range 1..={}",
            pool,
            POOL_COUNT
        );
        &self.pools[usize::from(pool) - 1]
    }

    pub fn pools(&self) -> &[PoolOrder<'a>; POOL_COUNT] {
        &self.pools
    }
}

pub(crate) fn to_order<'a>(pool: u8, teams: Vec<&'a Team>) -> DrawResult<PoolOrder<'a>> {
    let count = teams.len();
    teams.try_into().map_err(|_| DrawError::InvalidDraw {
        pool,
        message: format!("expected {} teams, got {}", GROUP_COUNT, count),
    })
}

impl fmt::Display for Draw<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pools: Vec<String> = self
            .pools
            .iter()
            .map(|order| format_teams(order.iter().copied()))
            .collect();
        write!(f, "({})", pools.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_follows_roster() {
        let roster = Roster::worlds_2020();
        let draw = Draw::identity(&roster).unwrap();
        assert_eq!(
            draw.to_string(),
            "((TES, G2, DWG, TSM), (JDG, SN, FNC, DRX), (RGE, GEN, FLY, MCX), (LGD, MAD, TL, PSG))"
        );
    }

    #[test]
    fn test_from_names() {
        let roster = Roster::worlds_2020();
        let draw = Draw::from_names(&roster, [Some("tsm,dwg g2, tes"), None, None, Some("PSG TL MAD LGD")])
            .unwrap();
        assert_eq!(format_teams(draw.pool(1).iter().copied()), "(TSM, DWG, G2, TES)");
        assert_eq!(format_teams(draw.pool(2).iter().copied()), "(JDG, SN, FNC, DRX)");
        assert_eq!(format_teams(draw.pool(4).iter().copied()), "(PSG, TL, MAD, LGD)");
    }

    #[test]
    fn test_from_names_rejects_short_pool() {
        let roster = Roster::worlds_2020();
        let err = Draw::from_names(&roster, [Some("TES,G2,DWG"), None, None, None]).unwrap_err();
        assert!(err.to_string().contains("expected 4 teams, got 3"));
    }

    #[test]
    fn test_from_names_rejects_team_from_other_pool() {
        let roster = Roster::worlds_2020();
        let err = Draw::from_names(&roster, [None, Some("JDG,SN,FNC,RGE"), None, None]).unwrap_err();
        assert!(matches!(err, DrawError::UnknownTeam { .. }));
    }

    #[test]
    #[should_panic(expected = "pool 0 is out of range")]
    fn test_pool_zero_panics() {
        let roster = Roster::worlds_2020();
        Draw::identity(&roster).unwrap().pool(0);
    }

    #[test]
    #[should_panic(expected = "pool 5 is out of range")]
    fn test_pool_past_last_panics() {
        let roster = Roster::worlds_2020();
        Draw::identity(&roster).unwrap().pool(5);
    }

    fn roster_order(roster: &Roster, pool: u8) -> PoolOrder<'_> {
        to_order(pool, roster.pool(pool).iter().collect()).unwrap()
    }

    #[test]
    fn test_new_rejects_repeated_team() {
        let roster = Roster::worlds_2020();
        let mut pool1 = roster_order(&roster, 1);
        pool1[3] = pool1[0];
        let pools = [
            pool1,
            roster_order(&roster, 2),
            roster_order(&roster, 3),
            roster_order(&roster, 4),
        ];
        let err = Draw::new(&roster, pools).unwrap_err();
        assert!(err.to_string().contains("TSM is missing from the draw"));
    }
}
