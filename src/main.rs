use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use group_draw::logging::init_tracing;
use group_draw::team::{format_teams, POOL_COUNT};
use group_draw::{Decision, Draw, Enumerator, Outcome, Placement, ReportWriter, Roster, RosterFile, Tally};

/// Group-stage draw simulator
#[derive(Parser, Debug)]
#[command(name = "group-draw")]
#[command(about = "Simulates and enumerates four-pool group-stage draws", long_about = None)]
struct Cli {
    /// Log level for the draw engine (RUST_LOG overrides)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// TOML roster file
    #[arg(short, long, global = true, conflicts_with = "preset")]
    roster: Option<PathBuf>,

    /// Built-in roster (e.g., "worlds-2020", "worlds-2020-play-in")
    #[arg(short, long, global = true)]
    preset: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate every draw ordering and count the distinct outcomes
    Enumerate {
        /// Directory for output.txt, raw_groups.txt, totals.txt and summary.json
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Worker threads (0 = one per core)
        #[arg(short, long, default_value_t = 0)]
        threads: usize,

        /// Print counts only, write no report files
        #[arg(long)]
        no_reports: bool,

        /// How many of the most frequent outcomes to print
        #[arg(long, default_value_t = 5)]
        top: usize,
    },

    /// Simulate a single draw ordering
    Simulate {
        /// Pool 1 reveal order: "TES,G2,DWG,TSM" (default: roster order)
        #[arg(long)]
        pool1: Option<String>,

        #[arg(long)]
        pool2: Option<String>,

        #[arg(long)]
        pool3: Option<String>,

        #[arg(long)]
        pool4: Option<String>,

        /// Print every group each team was tried against
        #[arg(short, long)]
        explain: bool,
    },

    /// Print the roster
    Roster {
        /// Print as a TOML roster file
        #[arg(long)]
        toml: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(Some(&cli.log_level));

    let roster = load_roster(cli.roster.as_deref(), cli.preset.as_deref())?;

    match cli.command {
        Some(Command::Enumerate {
            out,
            threads,
            no_reports,
            top,
        }) => enumerate_cmd(&roster, &out, threads, no_reports, top),
        Some(Command::Simulate {
            pool1,
            pool2,
            pool3,
            pool4,
            explain,
        }) => simulate_cmd(
            &roster,
            [pool1.as_deref(), pool2.as_deref(), pool3.as_deref(), pool4.as_deref()],
            explain,
        ),
        Some(Command::Roster { toml }) => roster_cmd(&roster, toml),
        None => {
            println!("=== Group Draw Simulator ===\n");
            println!("Roster: {}\n", roster.name);
            println!("Available commands:");
            println!("  enumerate [--out DIR] [--threads N] [--no-reports]");
            println!("  simulate [--pool1 A,B,C,D] ... [--explain]");
            println!("  roster [--toml]");
            Ok(())
        }
    }
}

fn load_roster(path: Option<&Path>, preset: Option<&str>) -> anyhow::Result<Roster> {
    let roster = match (path, preset) {
        (Some(path), _) => RosterFile::load(path)
            .with_context(|| format!("loading roster from {}", path.display()))?,
        (None, Some(name)) => Roster::preset(name)?,
        (None, None) => Roster::worlds_2020(),
    };
    info!(roster = %roster.name, "using roster");
    Ok(roster)
}

fn enumerate_cmd(
    roster: &Roster,
    out: &Path,
    threads: usize,
    no_reports: bool,
    top: usize,
) -> anyhow::Result<()> {
    let enumerator = Enumerator::new(roster)?.threads(threads);
    let mut tally = Tally::default();

    if no_reports {
        enumerator.run(&mut tally)?;
    } else {
        let mut writer = ReportWriter::create(out)
            .with_context(|| format!("creating reports in {}", out.display()))?;
        enumerator.run(&mut (&mut writer, &mut tally))?;
        writer.finish(roster, &tally)?;
    }

    println!("=== RESULT ===");
    println!("  Roster:          {}", roster.name);
    println!("  Draw orderings:  {}", tally.total());
    println!("  Valid:           {}", tally.valid());
    println!("  Invalid:         {}", tally.invalid());
    println!("  Needed a swap:   {}", tally.needed_swap());
    println!("  Distinct groups: {}", tally.frequencies().len());

    let most_common = tally.most_common(top);
    if !most_common.is_empty() {
        println!("\n  Most common outcomes:");
        for frequency in most_common {
            println!(
                "    {:>7} ({:5.2}%)  {}",
                frequency.count,
                tally.share(frequency) * 100.0,
                frequency.groups
            );
        }
    }
    if !no_reports {
        println!("\n  Reports written to {}", out.display());
    }
    Ok(())
}

fn simulate_cmd(
    roster: &Roster,
    pools: [Option<&str>; POOL_COUNT],
    explain: bool,
) -> anyhow::Result<()> {
    let draw = Draw::from_names(roster, pools)?;
    println!("Draw: {}", draw);

    let (mut outcome, decisions) = if explain {
        Outcome::simulate_explained(roster, draw)
    } else {
        (Outcome::simulate(roster, draw), Vec::new())
    };

    if explain {
        println!("\n  Placement decisions:");
        for decision in &decisions {
            println!("    {}", describe(decision));
        }
    }

    println!("\n=== RESULT ===");
    for (i, group) in outcome.groups().iter().enumerate() {
        println!("  Group {}: {}", i + 1, group);
    }
    outcome.canonicalize();
    println!("\n  Canonical:   {}", outcome.groups_key());
    println!("  Needed swap: {}", outcome.needed_swap());
    if outcome.invalid() {
        println!("  INVALID: at least one team found no group");
    }
    Ok(())
}

fn describe(decision: &Decision<'_>) -> String {
    let verdict = match decision.placement {
        Placement::Placed => "placed",
        Placement::SkippedSameRegion => "skipped, region already present",
        Placement::SkippedSamePool => "skipped, pool already present",
        Placement::SkippedFutureConflict => "skipped, would strand a later team",
    };
    format!(
        "{:<5} -> group {}: {}",
        decision.team.name,
        decision.group + 1,
        verdict
    )
}

fn roster_cmd(roster: &Roster, toml: bool) -> anyhow::Result<()> {
    if toml {
        print!("{}", RosterFile::from_roster(roster).to_toml()?);
        return Ok(());
    }

    println!("{}", roster.name);
    println!("  Major regions: {}", roster.major_regions.join(", "));
    for (i, pool) in roster.pools().enumerate() {
        println!("  Pool {}: {}", i + 1, format_teams(pool));
        for team in pool {
            println!("    - {} ({})", team.name, team.region);
        }
    }
    Ok(())
}
