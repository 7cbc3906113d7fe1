//! Enumeration of every draw ordering.
//!
//! The space of draws is the cartesian product of each pool's 24 reveal
//! orders. Draws are numbered in mixed radix with pool 4 varying fastest, so
//! index 0 is every pool in roster order.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::combinatorics::permutations;
use crate::draw::{to_order, Draw, PoolOrder};
use crate::error::DrawResult;
use crate::outcome::Outcome;
use crate::placement::{BalanceRule, MajorRegionBalance};
use crate::roster::Roster;
use crate::team::{Team, POOL_COUNT};

/// Receives outcomes in draw-index order. A sink may modify the outcome it
/// is handed; `Tally` canonicalizes it.
pub trait OutcomeSink {
    fn accept(&mut self, outcome: &mut Outcome<'_>) -> DrawResult<()>;
}

impl<S: OutcomeSink + ?Sized> OutcomeSink for &mut S {
    fn accept(&mut self, outcome: &mut Outcome<'_>) -> DrawResult<()> {
        (**self).accept(outcome)
    }
}

/// Both sinks see every outcome, the first one first. The second sees any
/// change the first made, so a sink that needs raw draw-order groups, such as
/// `ReportWriter`, must come before a `Tally`.
impl<A: OutcomeSink, B: OutcomeSink> OutcomeSink for (A, B) {
    fn accept(&mut self, outcome: &mut Outcome<'_>) -> DrawResult<()> {
        self.0.accept(outcome)?;
        self.1.accept(outcome)
    }
}

/// All reveal orders of every pool.
#[derive(Debug, Clone)]
pub struct DrawSpace<'a> {
    orders: Vec<Vec<PoolOrder<'a>>>,
}

impl<'a> DrawSpace<'a> {
    pub fn new(roster: &'a Roster) -> DrawResult<Self> {
        let mut orders = Vec::with_capacity(POOL_COUNT);
        for pool in 1..=POOL_COUNT as u8 {
            let teams: Vec<&Team> = roster.pool(pool).iter().collect();
            let pool_orders = permutations(&teams)
                .into_iter()
                .map(|ordering| to_order(pool, ordering))
                .collect::<DrawResult<Vec<_>>>()?;
            orders.push(pool_orders);
        }
        Ok(DrawSpace { orders })
    }

    pub fn len(&self) -> usize {
        self.orders.iter().map(Vec::len).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of consecutive draws sharing one pool 1 order.
    pub fn chunk_len(&self) -> usize {
        self.orders.iter().skip(1).map(Vec::len).product()
    }

    /// Decodes a draw index; `None` past the end of the space.
    pub fn draw(&self, index: usize) -> Option<Draw<'a>> {
        if index >= self.len() {
            return None;
        }

        let mut rest = index;
        let mut picked = [0usize; POOL_COUNT];
        for (slot, orders) in picked.iter_mut().zip(&self.orders).rev() {
            *slot = rest % orders.len();
            rest /= orders.len();
        }

        let pools: [PoolOrder<'a>; POOL_COUNT] =
            std::array::from_fn(|pool| self.orders[pool][picked[pool]]);
        Some(Draw::from_orders(pools))
    }
}

/// Simulates every draw of a roster, in parallel, feeding a sink in order.
pub struct Enumerator<'a> {
    roster: &'a Roster,
    space: DrawSpace<'a>,
    threads: usize,
}

impl<'a> Enumerator<'a> {
    pub fn new(roster: &'a Roster) -> DrawResult<Self> {
        Ok(Enumerator {
            roster,
            space: DrawSpace::new(roster)?,
            threads: 0,
        })
    }

    /// Worker thread count; 0 lets rayon decide.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn space(&self) -> &DrawSpace<'a> {
        &self.space
    }

    /// Runs with the roster's major-region balance rule.
    pub fn run(&self, sink: &mut dyn OutcomeSink) -> DrawResult<()> {
        let rule = MajorRegionBalance::new(&self.roster.major_regions);
        self.run_with(&rule, sink)
    }

    pub fn run_with(&self, rule: &dyn BalanceRule, sink: &mut dyn OutcomeSink) -> DrawResult<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()?;

        let total = self.space.len();
        let chunk = self.space.chunk_len().max(1);
        info!(
            roster = %self.roster.name,
            draws = total,
            threads = pool.current_num_threads(),
            "enumerating draws"
        );

        for start in (0..total).step_by(chunk) {
            let end = (start + chunk).min(total);
            let outcomes: Vec<Outcome<'a>> = pool.install(|| {
                (start..end)
                    .into_par_iter()
                    .filter_map(|index| self.space.draw(index))
                    .map(|draw| Outcome::simulate_with(self.roster, draw, rule))
                    .collect()
            });

            for mut outcome in outcomes {
                sink.accept(&mut outcome)?;
            }
            debug!(done = end, total, "chunk complete");
        }

        Ok(())
    }
}
