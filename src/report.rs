//! Report files for an enumeration run.
//!
//! * `output.txt`: every outcome with its draws, before canonicalization
//! * `raw_groups.txt`: every outcome's groups, before canonicalization
//! * `totals.txt`: each distinct canonical outcome with its count
//! * `summary.json`: counts and frequencies in machine-readable form

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::enumerate::OutcomeSink;
use crate::error::DrawResult;
use crate::outcome::Outcome;
use crate::roster::Roster;
use crate::tally::{Frequency, Tally};

pub const OUTPUT_FILE: &str = "output.txt";
pub const RAW_GROUPS_FILE: &str = "raw_groups.txt";
pub const TOTALS_FILE: &str = "totals.txt";
pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Serialize)]
pub struct Summary<'t> {
    pub roster: &'t str,
    pub total: u64,
    pub valid: u64,
    pub invalid: u64,
    pub needed_swap: u64,
    pub distinct: usize,
    pub outcomes: &'t [Frequency],
}

impl<'t> Summary<'t> {
    pub fn new(roster: &'t Roster, tally: &'t Tally) -> Self {
        Summary {
            roster: &roster.name,
            total: tally.total(),
            valid: tally.valid(),
            invalid: tally.invalid(),
            needed_swap: tally.needed_swap(),
            distinct: tally.frequencies().len(),
            outcomes: tally.frequencies(),
        }
    }
}

/// Streams raw outcomes to disk as they arrive.
pub struct ReportWriter {
    dir: PathBuf,
    output: BufWriter<File>,
    raw_groups: BufWriter<File>,
}

impl ReportWriter {
    pub fn create(dir: &Path) -> DrawResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(ReportWriter {
            dir: dir.to_path_buf(),
            output: BufWriter::new(File::create(dir.join(OUTPUT_FILE))?),
            raw_groups: BufWriter::new(File::create(dir.join(RAW_GROUPS_FILE))?),
        })
    }

    /// Flushes the raw reports and writes the totals and summary.
    pub fn finish(mut self, roster: &Roster, tally: &Tally) -> DrawResult<()> {
        self.output.flush()?;
        self.raw_groups.flush()?;

        let mut totals = BufWriter::new(File::create(self.dir.join(TOTALS_FILE))?);
        for frequency in tally.frequencies() {
            writeln!(totals, "{} - {}", frequency.groups, frequency.count)?;
        }
        totals.flush()?;

        let summary = BufWriter::new(File::create(self.dir.join(SUMMARY_FILE))?);
        serde_json::to_writer_pretty(summary, &Summary::new(roster, tally))?;

        info!(
            dir = %self.dir.display(),
            outcomes = tally.total(),
            distinct = tally.frequencies().len(),
            "reports written"
        );
        Ok(())
    }
}

impl OutcomeSink for ReportWriter {
    fn accept(&mut self, outcome: &mut Outcome<'_>) -> DrawResult<()> {
        writeln!(self.output, "{}", outcome)?;
        writeln!(self.raw_groups, "{}", outcome.groups_key())?;
        Ok(())
    }
}
