//! Group-stage draw simulation.
//!
//! Sixteen teams in four pools are drawn into four groups of four. No group
//! may hold two teams from the same region or the same pool, and teams are
//! placed one at a time into the first group that leaves the rest of the draw
//! solvable. This crate simulates single draw orderings and enumerates every
//! ordering of a roster to count how often each final grouping comes up.
//!
//! ```no_run
//! use group_draw::{Draw, Outcome, Roster};
//!
//! let roster = Roster::worlds_2020();
//! let draw = Draw::identity(&roster)?;
//! let mut outcome = Outcome::simulate(&roster, draw);
//! outcome.canonicalize();
//! println!("{}", outcome.groups_key());
//! # Ok::<(), group_draw::DrawError>(())
//! ```

pub mod combinatorics;
pub mod config;
pub mod draw;
pub mod enumerate;
pub mod error;
pub mod group;
pub mod logging;
pub mod lookahead;
pub mod outcome;
pub mod placement;
pub mod report;
pub mod roster;
pub mod tally;
pub mod team;

pub use config::RosterFile;
pub use draw::Draw;
pub use enumerate::{DrawSpace, Enumerator, OutcomeSink};
pub use error::{Conflict, DrawError, DrawResult};
pub use group::Group;
pub use outcome::Outcome;
pub use placement::{BalanceRule, Decision, MajorRegionBalance, NoBalance, Placement, Policy};
pub use report::ReportWriter;
pub use roster::Roster;
pub use tally::{Frequency, Tally};
pub use team::Team;
