use std::fmt;

use crate::draw::Draw;
use crate::group::Group;
use crate::placement::{BalanceRule, Decision, MajorRegionBalance, Placer, Policy};
use crate::roster::Roster;
use crate::team::GROUP_COUNT;

/// The groups produced by one draw ordering.
///
/// `invalid` means at least one team found no admissible group and was left
/// out; such outcomes may hold incomplete groups. `needed_swap` means at least
/// one team was turned away from a group it was tried against.
#[derive(Debug, Clone)]
pub struct Outcome<'a> {
    roster: &'a Roster,
    draw: Draw<'a>,
    groups: [Group<'a>; GROUP_COUNT],
    needed_swap: bool,
    invalid: bool,
}

impl<'a> Outcome<'a> {
    /// Simulates `draw` using the roster's major regions for the pool 3
    /// balance rule.
    pub fn simulate(roster: &'a Roster, draw: Draw<'a>) -> Self {
        let rule = MajorRegionBalance::new(&roster.major_regions);
        Self::simulate_with(roster, draw, &rule)
    }

    pub fn simulate_with(roster: &'a Roster, draw: Draw<'a>, rule: &dyn BalanceRule) -> Self {
        let (outcome, _) = Self::run(roster, draw, rule, Placer::new());
        outcome
    }

    /// Simulates `draw` and also returns every candidate-group attempt.
    pub fn simulate_explained(roster: &'a Roster, draw: Draw<'a>) -> (Self, Vec<Decision<'a>>) {
        let rule = MajorRegionBalance::new(&roster.major_regions);
        Self::run(roster, draw, &rule, Placer::explained())
    }

    fn run(
        roster: &'a Roster,
        draw: Draw<'a>,
        rule: &dyn BalanceRule,
        mut placer: Placer<'a>,
    ) -> (Self, Vec<Decision<'a>>) {
        placer.seed(draw.pool(1));
        placer.place_pool(draw.pool(2), Policy::General, rule);
        placer.place_pool(draw.pool(3), Policy::Strict, rule);
        placer.place_pool(draw.pool(4), Policy::General, rule);

        let (groups, needed_swap, invalid, decisions) = placer.into_parts();
        let outcome = Outcome {
            roster,
            draw,
            groups,
            needed_swap,
            invalid,
        };
        (outcome, decisions)
    }

    /// Reorders the groups so the group seeded with the i-th pool 1 team of
    /// the roster comes i-th. Outcomes with the same group memberships then
    /// compare equal whatever slots the draw put them in.
    pub fn canonicalize(&mut self) {
        let roster = self.roster;
        self.groups.sort_by_key(|group| {
            group
                .seed()
                .and_then(|seed| roster.seed_index(seed))
                .unwrap_or(usize::MAX)
        });
    }

    pub fn groups(&self) -> &[Group<'a>; GROUP_COUNT] {
        &self.groups
    }

    pub fn draw(&self) -> &Draw<'a> {
        &self.draw
    }

    pub fn needed_swap(&self) -> bool {
        self.needed_swap
    }

    pub fn invalid(&self) -> bool {
        self.invalid
    }

    /// Rendering of the groups alone, e.g. `[(TES, FNC), (G2, JDG), ...]`.
    /// Used as the key when counting identical outcomes.
    pub fn groups_key(&self) -> String {
        let groups: Vec<String> = self.groups.iter().map(|g| g.to_string()).collect();
        format!("[{}]", groups.join(", "))
    }
}

impl fmt::Display for Outcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.invalid {
            f.write_str("invalid")?;
        }
        write!(f, "{} - draws: {}", self.groups_key(), self.draw)
    }
}
