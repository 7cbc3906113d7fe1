//! Team-by-team placement for one draw ordering.
//!
//! Every team scans the four groups in a fixed order and goes into the first
//! one that passes its pool's checks. Pools 2 and 4 use the general policy:
//! local validation plus a lookahead over the rest of the pool. Pool 3 uses the
//! strict policy, which adds a `BalanceRule` guarding what pool 4 will need.
//! A team no group admits is left out and marks the outcome invalid; the
//! remaining teams are still placed.

use tracing::{debug, trace};

use crate::error::Conflict;
use crate::group::Group;
use crate::lookahead::feasible;
use crate::team::{Team, GROUP_COUNT};

/// What happened when a team was tried against one candidate group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Placed,
    SkippedSamePool,
    SkippedSameRegion,
    SkippedFutureConflict,
}

impl From<Conflict> for Placement {
    fn from(conflict: Conflict) -> Self {
        match conflict {
            Conflict::SamePool => Placement::SkippedSamePool,
            Conflict::SameRegion => Placement::SkippedSameRegion,
            Conflict::FutureRegion => Placement::SkippedFutureConflict,
        }
    }
}

/// One candidate-group attempt, recorded when a simulation is explained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision<'a> {
    pub team: &'a Team,
    pub group: usize,
    pub placement: Placement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Pools 2 and 4.
    General,
    /// Pool 3.
    Strict,
}

impl Policy {
    // Whether a skipped candidate counts as the team needing a swap.
    fn marks_swap(self, placement: Placement) -> bool {
        match (self, placement) {
            (_, Placement::Placed | Placement::SkippedSamePool) => false,
            (_, Placement::SkippedSameRegion) => true,
            (Policy::General, Placement::SkippedFutureConflict) => true,
            (Policy::Strict, Placement::SkippedFutureConflict) => false,
        }
    }
}

/// Tournament-specific restriction on pool 3 placements, protecting the
/// pool 4 draw that follows.
pub trait BalanceRule: Send + Sync {
    /// `remaining` holds the pool 3 teams still to be placed after `team`.
    fn check(
        &self,
        team: &Team,
        candidate: usize,
        groups: &[Group<'_>],
        remaining: &[&Team],
    ) -> Result<(), Conflict>;
}

/// Pool 4 holds only teams of the two major regions (plus minor regions that
/// never clash), so by the end of pool 3 every group needs exactly one major
/// team.
#[derive(Debug, Clone, Copy)]
pub struct MajorRegionBalance<'r> {
    majors: &'r [String],
}

impl<'r> MajorRegionBalance<'r> {
    pub fn new(majors: &'r [String]) -> Self {
        MajorRegionBalance { majors }
    }
}

impl BalanceRule for MajorRegionBalance<'_> {
    fn check(
        &self,
        team: &Team,
        candidate: usize,
        groups: &[Group<'_>],
        remaining: &[&Team],
    ) -> Result<(), Conflict> {
        if team.is_from_any(self.majors) {
            let is_last = !remaining.iter().any(|t| t.is_from_any(self.majors));
            let other_group_lacks_major = groups
                .iter()
                .enumerate()
                .any(|(i, g)| i != candidate && !g.has_region_in(self.majors));
            if is_last && other_group_lacks_major {
                return Err(Conflict::FutureRegion);
            }
        } else if !groups[candidate].has_region_in(self.majors) {
            return Err(Conflict::FutureRegion);
        }
        Ok(())
    }
}

/// Disables the pool 3 balance rule, for formats without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBalance;

impl BalanceRule for NoBalance {
    fn check(&self, _: &Team, _: usize, _: &[Group<'_>], _: &[&Team]) -> Result<(), Conflict> {
        Ok(())
    }
}

/// Mutable state of a single simulation.
#[derive(Debug)]
pub struct Placer<'a> {
    groups: [Group<'a>; GROUP_COUNT],
    needed_swap: bool,
    invalid: bool,
    decisions: Option<Vec<Decision<'a>>>,
}

impl<'a> Placer<'a> {
    pub fn new() -> Self {
        Placer {
            groups: std::array::from_fn(|_| Group::new()),
            needed_swap: false,
            invalid: false,
            decisions: None,
        }
    }

    /// Like `new`, but keeps a log of every candidate tried.
    pub fn explained() -> Self {
        Placer {
            decisions: Some(Vec::new()),
            ..Placer::new()
        }
    }

    pub fn groups(&self) -> &[Group<'a>; GROUP_COUNT] {
        &self.groups
    }

    pub fn needed_swap(&self) -> bool {
        self.needed_swap
    }

    pub fn invalid(&self) -> bool {
        self.invalid
    }

    pub fn into_parts(self) -> ([Group<'a>; GROUP_COUNT], bool, bool, Vec<Decision<'a>>) {
        (
            self.groups,
            self.needed_swap,
            self.invalid,
            self.decisions.unwrap_or_default(),
        )
    }

    /// Pool 1: the i-th drawn team opens group i.
    pub fn seed(&mut self, draw: &[&'a Team; GROUP_COUNT]) {
        for (slot, &team) in draw.iter().enumerate() {
            match self.groups[slot].add(team) {
                Ok(()) => self.record(team, slot, Placement::Placed),
                Err(conflict) => {
                    debug!(team = %team, slot, %conflict, "seed team rejected");
                    self.record(team, slot, conflict.into());
                    self.invalid = true;
                }
            }
        }
    }

    /// Places every team of one pool in draw order.
    pub fn place_pool(
        &mut self,
        draw: &[&'a Team; GROUP_COUNT],
        policy: Policy,
        rule: &dyn BalanceRule,
    ) {
        let mut unplaced: Vec<&'a Team> = Vec::new();

        for (i, &team) in draw.iter().enumerate() {
            // Teams of this pool still waiting for a group: the rest of the
            // draw plus any earlier team that found none. The last team drawn
            // looks ahead at nothing, even if earlier teams were left out.
            let rest = &draw[i + 1..];
            let remaining: Vec<&Team> = if rest.is_empty() {
                Vec::new()
            } else {
                rest.iter().copied().chain(unplaced.iter().copied()).collect()
            };

            if self.place_team(team, &remaining, policy, rule).is_none() {
                debug!(team = %team, pool = team.pool, "no group admits team");
                self.invalid = true;
                unplaced.push(team);
            }
        }
    }

    /// Scans the groups in fixed order; returns the group the team joined.
    fn place_team(
        &mut self,
        team: &'a Team,
        remaining: &[&Team],
        policy: Policy,
        rule: &dyn BalanceRule,
    ) -> Option<usize> {
        for candidate in 0..GROUP_COUNT {
            let result = match policy {
                Policy::General => self.check_general(team, candidate, remaining),
                Policy::Strict => self.check_strict(team, candidate, remaining, rule),
            }
            .and_then(|()| self.groups[candidate].add(team));

            let placement = match result {
                Ok(()) => Placement::Placed,
                Err(conflict) => Placement::from(conflict),
            };
            trace!(team = %team, candidate, ?placement, "candidate evaluated");
            self.record(team, candidate, placement);

            if placement == Placement::Placed {
                return Some(candidate);
            }
            if policy.marks_swap(placement) {
                self.needed_swap = true;
            }
        }
        None
    }

    fn check_general(&self, team: &Team, candidate: usize, remaining: &[&Team]) -> Result<(), Conflict> {
        self.groups[candidate].validate(team)?;
        let open = self.open_groups(team.pool, candidate);
        feasible(remaining, &open)
    }

    fn check_strict(
        &self,
        team: &Team,
        candidate: usize,
        remaining: &[&Team],
        rule: &dyn BalanceRule,
    ) -> Result<(), Conflict> {
        self.groups[candidate].validate(team)?;

        // The last team of the pool only needs a locally valid group.
        if remaining.is_empty() {
            return Ok(());
        }

        let open = self.open_groups(team.pool, candidate);
        feasible(remaining, &open)?;
        rule.check(team, candidate, &self.groups, remaining)
    }

    // Groups other than `candidate` still missing a team from `pool`.
    fn open_groups(&self, pool: u8, candidate: usize) -> Vec<&Group<'a>> {
        self.groups
            .iter()
            .enumerate()
            .filter(|&(i, g)| i != candidate && !g.has_pool(pool))
            .map(|(_, g)| g)
            .collect()
    }

    fn record(&mut self, team: &'a Team, group: usize, placement: Placement) {
        if let Some(decisions) = self.decisions.as_mut() {
            decisions.push(Decision {
                team,
                group,
                placement,
            });
        }
    }
}

impl Default for Placer<'_> {
    fn default() -> Self {
        Placer::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn majors() -> Vec<String> {
        vec!["China".to_string(), "Europe".to_string()]
    }

    struct Seeds {
        tes: Team,
        g2: Team,
        dwg: Team,
        tsm: Team,
    }

    fn seeds() -> Seeds {
        Seeds {
            tes: Team::new("TES", 1, "China"),
            g2: Team::new("G2", 1, "Europe"),
            dwg: Team::new("DWG", 1, "Korea"),
            tsm: Team::new("TSM", 1, "North America"),
        }
    }

    #[test]
    fn test_seed_fills_groups_in_draw_order() {
        let s = seeds();
        let mut placer = Placer::new();
        placer.seed(&[&s.dwg, &s.tes, &s.tsm, &s.g2]);

        let names: Vec<String> = placer.groups().iter().map(|g| g.to_string()).collect();
        assert_eq!(names, vec!["(DWG)", "(TES)", "(TSM)", "(G2)"]);
        assert!(!placer.invalid());
        assert!(!placer.needed_swap());
    }

    #[test]
    fn test_region_conflict_moves_team_to_next_group() {
        // Seeds from China, Europe, Korea, North America. A Chinese pool 2
        // team drawn first is turned away from group 0 and lands in group 1.
        let s = seeds();
        let jdg = Team::new("JDG", 2, "China");
        let fnc = Team::new("FNC", 2, "Europe");
        let drx = Team::new("DRX", 2, "Korea");
        let c9 = Team::new("C9", 2, "North America");

        let mut placer = Placer::explained();
        placer.seed(&[&s.tes, &s.g2, &s.dwg, &s.tsm]);
        placer.place_pool(&[&jdg, &fnc, &drx, &c9], Policy::General, &NoBalance);

        assert!(placer.needed_swap());
        assert!(!placer.invalid());
        assert_eq!(placer.groups()[1].to_string(), "(G2, JDG)");

        let (_, _, _, decisions) = placer.into_parts();
        let jdg_attempts: Vec<(usize, Placement)> = decisions
            .iter()
            .filter(|d| d.team.name == "JDG")
            .map(|d| (d.group, d.placement))
            .collect();
        assert_eq!(
            jdg_attempts,
            vec![(0, Placement::SkippedSameRegion), (1, Placement::Placed)]
        );
    }

    #[test]
    fn test_lookahead_rejects_locally_valid_group() {
        // C9 fits next to TES, but then three European teams would need
        // G2's group among the rest. The lookahead sends C9 to G2 instead.
        let s = seeds();
        let c9 = Team::new("C9", 2, "North America");
        let fnc = Team::new("FNC", 2, "Europe");
        let mad = Team::new("MAD", 2, "Europe");
        let rge = Team::new("RGE", 2, "Europe");

        let mut placer = Placer::explained();
        placer.seed(&[&s.tes, &s.g2, &s.dwg, &s.tsm]);
        placer.place_pool(&[&c9, &fnc, &mad, &rge], Policy::General, &NoBalance);

        assert!(!placer.invalid());
        assert!(placer.needed_swap());
        let rendered: Vec<String> = placer.groups().iter().map(|g| g.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["(TES, FNC)", "(G2, C9)", "(DWG, MAD)", "(TSM, RGE)"]
        );

        let (_, _, _, decisions) = placer.into_parts();
        assert_eq!(
            decisions
                .iter()
                .find(|d| d.team.name == "C9")
                .map(|d| (d.group, d.placement)),
            Some((0, Placement::SkippedFutureConflict))
        );
    }

    #[test]
    fn test_balance_rule_forces_last_major_into_open_group() {
        // Groups 0-2 already hold a major-region team, group 3 does not.
        // The last European pool 3 team must go to group 3.
        let tes = Team::new("TES", 1, "China");
        let g2 = Team::new("G2", 1, "Europe");
        let dwg = Team::new("DWG", 1, "Korea");
        let tsm = Team::new("TSM", 1, "North America");
        let fnc = Team::new("FNC", 2, "Europe");
        let jdg = Team::new("JDG", 2, "China");
        let sn = Team::new("SN", 2, "China");
        let drx = Team::new("DRX", 2, "Korea");
        let rge = Team::new("RGE", 3, "Europe");
        let gen = Team::new("GEN", 3, "Korea");
        let fly = Team::new("FLY", 3, "North America");
        let mcx = Team::new("MCX", 3, "Pacific");

        let majors = majors();
        let rule = MajorRegionBalance::new(&majors);

        let mut placer = Placer::explained();
        placer.seed(&[&tes, &g2, &dwg, &tsm]);
        placer.place_pool(&[&fnc, &jdg, &sn, &drx], Policy::General, &rule);
        assert_eq!(
            placer
                .groups()
                .iter()
                .map(|g| g.to_string())
                .collect::<Vec<_>>(),
            vec!["(TES, FNC)", "(G2, JDG)", "(DWG, SN)", "(TSM, DRX)"]
        );

        placer.place_pool(&[&rge, &gen, &fly, &mcx], Policy::Strict, &rule);
        assert!(!placer.invalid());
        assert_eq!(placer.groups()[3].to_string(), "(TSM, DRX, RGE)");

        let (_, _, _, decisions) = placer.into_parts();
        let rge_attempts: Vec<(usize, Placement)> = decisions
            .iter()
            .filter(|d| d.team.name == "RGE")
            .map(|d| (d.group, d.placement))
            .collect();
        assert_eq!(
            rge_attempts,
            vec![
                (0, Placement::SkippedSameRegion),
                (1, Placement::SkippedSameRegion),
                (2, Placement::SkippedFutureConflict),
                (3, Placement::Placed),
            ]
        );
    }

    #[test]
    fn test_balance_rule_for_minor_team_needs_major_partner() {
        let majors = majors();
        let rule = MajorRegionBalance::new(&majors);
        let dwg = Team::new("DWG", 1, "Korea");
        let drx = Team::new("DRX", 2, "Pacific");
        let tes = Team::new("TES", 1, "China");
        let gen = Team::new("GEN", 3, "North America");
        let rge = Team::new("RGE", 3, "Europe");

        let mut plain = Group::new();
        plain.add(&dwg).unwrap();
        plain.add(&drx).unwrap();
        let mut major = Group::new();
        major.add(&tes).unwrap();

        let groups = [plain, major];
        assert_eq!(
            rule.check(&gen, 0, &groups, &[&rge]),
            Err(Conflict::FutureRegion)
        );
        assert_eq!(rule.check(&gen, 1, &groups, &[&rge]), Ok(()));
    }

    #[test]
    fn test_balance_rule_ignores_major_team_when_another_remains() {
        let majors = majors();
        let rule = MajorRegionBalance::new(&majors);
        let dwg = Team::new("DWG", 1, "Korea");
        let rge = Team::new("RGE", 3, "Europe");
        let mad = Team::new("MAD", 3, "Europe");

        let mut g = Group::new();
        g.add(&dwg).unwrap();
        let groups = [g.clone(), g];

        assert_eq!(rule.check(&rge, 0, &groups, &[&mad]), Ok(()));
        assert_eq!(rule.check(&rge, 0, &groups, &[]), Err(Conflict::FutureRegion));
    }

    #[test]
    fn test_no_group_admits_team_marks_invalid_and_continues() {
        // Four Chinese pool 2 teams can never avoid TES's group while the
        // rest of the pool is still to come, so the first three are left
        // out. The last one only needs a locally valid group. The next pool
        // is still drawn.
        let s = seeds();
        let pool2 = [
            Team::new("JDG", 2, "China"),
            Team::new("SN", 2, "China"),
            Team::new("LNG", 2, "China"),
            Team::new("WE", 2, "China"),
        ];
        let pool3 = [
            Team::new("MCX", 3, "Pacific"),
            Team::new("ITZ", 3, "Brazil"),
            Team::new("V3", 3, "Japan"),
            Team::new("LGC", 3, "Oceania"),
        ];

        let mut placer = Placer::new();
        placer.seed(&[&s.tes, &s.g2, &s.dwg, &s.tsm]);
        placer.place_pool(&[&pool2[0], &pool2[1], &pool2[2], &pool2[3]], Policy::General, &NoBalance);

        assert!(placer.invalid());
        assert!(placer.needed_swap());
        assert_eq!(placer.groups().iter().filter(|g| g.has_pool(2)).count(), 1);
        assert_eq!(placer.groups()[1].to_string(), "(G2, WE)");

        placer.place_pool(&[&pool3[0], &pool3[1], &pool3[2], &pool3[3]], Policy::General, &NoBalance);
        assert!(placer.invalid());
        assert!(placer.groups().iter().all(|g| g.has_pool(3)));
        assert_eq!(placer.groups()[0].to_string(), "(TES, MCX)");
        assert_eq!(placer.groups()[1].to_string(), "(G2, WE, ITZ)");
    }

    #[test]
    fn test_last_team_ignores_earlier_unplaced_team() {
        // A3 is drawn third and fits nowhere. In C1's group it would leave B3
        // only D1's North American group; in D1's group it would leave C1's
        // group without a major-region team. B3, drawn last, then takes the
        // first locally valid group without looking ahead at A3 or applying
        // the balance rule.
        let majors = majors();
        let rule = MajorRegionBalance::new(&majors);
        let a1 = Team::new("A1", 1, "China");
        let b1 = Team::new("B1", 1, "Europe");
        let c1 = Team::new("C1", 1, "Korea");
        let d1 = Team::new("D1", 1, "North America");
        let a2 = Team::new("A2", 2, "Europe");
        let b2 = Team::new("B2", 2, "Pacific");
        let c2 = Team::new("C2", 2, "China");
        let d2 = Team::new("D2", 2, "Korea");
        let a3 = Team::new("A3", 3, "China");
        let b3 = Team::new("B3", 3, "North America");
        let c3 = Team::new("C3", 3, "North America");
        let d3 = Team::new("D3", 3, "North America");

        let mut placer = Placer::explained();
        placer.seed(&[&a1, &b1, &c1, &d1]);
        placer.place_pool(&[&c2, &a2, &d2, &b2], Policy::General, &rule);
        placer.place_pool(&[&c3, &d3, &a3, &b3], Policy::Strict, &rule);

        assert!(placer.invalid());
        let rendered: Vec<String> = placer.groups().iter().map(|g| g.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["(A1, A2, C3)", "(B1, C2, D3)", "(C1, B2, B3)", "(D1, D2)"]
        );

        let (_, _, _, decisions) = placer.into_parts();
        let b3_attempts: Vec<(usize, Placement)> = decisions
            .iter()
            .filter(|d| d.team.name == "B3")
            .map(|d| (d.group, d.placement))
            .collect();
        assert_eq!(
            b3_attempts,
            vec![
                (0, Placement::SkippedSameRegion),
                (1, Placement::SkippedSameRegion),
                (2, Placement::Placed),
            ]
        );
    }

    #[test]
    fn test_strict_policy_future_conflict_does_not_mark_swap() {
        // Pool 3 team from a minor region, drawn first, tried against a group
        // without a major team: skipped without raising the swap flag.
        let majors = majors();
        let rule = MajorRegionBalance::new(&majors);
        let dwg = Team::new("DWG", 1, "Korea");
        let tsm = Team::new("TSM", 1, "North America");
        let tes = Team::new("TES", 1, "China");
        let g2 = Team::new("G2", 1, "Europe");
        let mcx = Team::new("MCX", 3, "Pacific");
        let rge = Team::new("RGE", 3, "Europe");
        let lgd = Team::new("LGD", 3, "China");
        let gen = Team::new("GEN", 3, "Brazil");

        let mut placer = Placer::new();
        placer.seed(&[&dwg, &tsm, &tes, &g2]);
        placer.place_pool(&[&mcx, &rge, &lgd, &gen], Policy::Strict, &rule);

        assert!(!placer.needed_swap());
        assert_eq!(placer.groups()[2].to_string(), "(TES, MCX)");
    }
}
