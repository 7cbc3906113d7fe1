use std::collections::HashMap;

use serde::Serialize;

use crate::enumerate::OutcomeSink;
use crate::error::DrawResult;
use crate::outcome::Outcome;

/// How often one distinct canonical outcome occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frequency {
    pub groups: String,
    pub count: u64,
}

/// Counts outcomes and distinct canonical groupings.
///
/// Every outcome is canonicalized on the way through. Invalid outcomes are
/// counted but kept out of the frequency table.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    total: u64,
    invalid: u64,
    needed_swap: u64,
    frequencies: Vec<Frequency>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn record(&mut self, outcome: &mut Outcome<'_>) {
        self.total += 1;
        if outcome.needed_swap() {
            self.needed_swap += 1;
        }
        outcome.canonicalize();
        if outcome.invalid() {
            self.invalid += 1;
            return;
        }

        let key = outcome.groups_key();
        match self.index.get(&key) {
            Some(&i) => self.frequencies[i].count += 1,
            None => {
                self.index.insert(key.clone(), self.frequencies.len());
                self.frequencies.push(Frequency {
                    groups: key,
                    count: 1,
                });
            }
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn valid(&self) -> u64 {
        self.total - self.invalid
    }

    pub fn invalid(&self) -> u64 {
        self.invalid
    }

    pub fn needed_swap(&self) -> u64 {
        self.needed_swap
    }

    /// Distinct valid outcomes, in the order first seen.
    pub fn frequencies(&self) -> &[Frequency] {
        &self.frequencies
    }

    /// Fraction of valid outcomes that ended in `frequency`'s groups.
    pub fn share(&self, frequency: &Frequency) -> f64 {
        match self.valid() {
            0 => 0.0,
            valid => frequency.count as f64 / valid as f64,
        }
    }

    /// The `n` most frequent outcomes; ties keep first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<&Frequency> {
        let mut sorted: Vec<&Frequency> = self.frequencies.iter().collect();
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        sorted.truncate(n);
        sorted
    }
}

impl OutcomeSink for Tally {
    fn accept(&mut self, outcome: &mut Outcome<'_>) -> DrawResult<()> {
        self.record(outcome);
        Ok(())
    }
}
