//! Feasibility lookahead: can the not-yet-placed teams of a pool still be
//! spread over the groups that lack that pool?

use crate::combinatorics::permutations;
use crate::error::Conflict;
use crate::group::Group;
use crate::team::Team;

/// Succeeds if some bijection of `remaining_teams` onto `remaining_groups`
/// puts no team in a group holding a member of its region.
///
/// Every ordering of the teams is tried against the groups in the given
/// order. Groups are expected to lack the teams' pool already, so pool
/// clashes are not considered.
///
/// # Panics
///
/// If the two slices differ in length while `remaining_teams` is non-empty.
/// That means the caller selected the candidate groups wrongly.
pub fn feasible(remaining_teams: &[&Team], remaining_groups: &[&Group<'_>]) -> Result<(), Conflict> {
    if remaining_teams.is_empty() {
        return Ok(());
    }

    assert_eq!(
        remaining_teams.len(),
        remaining_groups.len(),
        "cannot fit {} teams into {} groups",
        remaining_teams.len(),
        remaining_groups.len()
    );

    let fits = permutations(remaining_teams).into_iter().any(|ordering| {
        ordering
            .iter()
            .zip(remaining_groups)
            .all(|(team, group)| !region_clash(group, team))
    });

    if fits {
        Ok(())
    } else {
        Err(Conflict::FutureRegion)
    }
}

fn region_clash(group: &Group<'_>, team: &Team) -> bool {
    group.teams().iter().any(|member| member.region == team.region)
}
