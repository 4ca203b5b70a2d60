//! `specht-populate` — Computes Specht parities n by n and stores them.
//!
//! Resumes at the largest stored `n` (or at the minimum on an empty database
//! or with `--regen`) and walks upward, writing each 2-special conjugate pair
//! once. Without `--max-n` the loop runs until interrupted.
//!
//! **Usage:**
//! ```
//! specht-populate [--regen] [--verbose] [--strategy sequential|distributed]
//!                 [--max-n <n>] [--workers <k>] [--database <path>] [--config <path>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use specht::{Driver, Strategy};
use specht_clients::{init_tracing, load_settings};
use specht_store::SqliteStore;

/// Populate the Specht parity database.
#[derive(Parser)]
#[command(
    name = "specht-populate",
    about = "Compute and store Specht parities of 2-special partitions"
)]
struct Args {
    /// Recompute from the minimum n, overwriting stored parities.
    #[arg(long)]
    regen: bool,

    /// Log every persisted pair.
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Matrix assembly strategy.
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Stop after this n (default: run until interrupted).
    #[arg(long)]
    max_n: Option<usize>,

    /// First n to visit on an empty database or with --regen.
    #[arg(long)]
    min_n: Option<usize>,

    /// Worker threads for the distributed strategy.
    #[arg(long)]
    workers: Option<usize>,

    /// Build every matrix, even for partitions with a closed form.
    #[arg(long)]
    no_shortcuts: bool,

    /// SQLite database (overrides the settings file and SPECHT_DB).
    #[arg(long)]
    database: Option<PathBuf>,

    /// Settings file (default: specht.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose, "info");

    let mut settings = load_settings(args.config.as_deref(), args.database)?;
    let evaluator = &mut settings.evaluator;
    evaluator.regenerate |= args.regen;
    evaluator.skip_known_families &= !args.no_shortcuts;
    if let Some(strategy) = args.strategy {
        evaluator.strategy = strategy;
    }
    if let Some(max_n) = args.max_n {
        evaluator.max_n = Some(max_n);
    }
    if let Some(min_n) = args.min_n {
        evaluator.min_n = min_n;
    }
    if args.workers.is_some() {
        evaluator.workers = args.workers;
    }

    let store = SqliteStore::open(&settings.database)
        .with_context(|| format!("opening {}", settings.database.display()))?;
    let mut driver = Driver::resume(store, settings.evaluator)?;
    println!(
        "Populating {} from n = {}",
        settings.database.display(),
        driver.current_n()
    );

    let mut computed = 0usize;
    while !driver.finished() {
        let n = driver.current_n();
        let report = driver.step().with_context(|| format!("populating n = {n}"))?;
        computed += report.computed + report.shortcuts;
        println!(
            "n = {:>2}: {} pair(s), {} computed, {} by closed form, {} already stored",
            report.n, report.candidates, report.computed, report.shortcuts, report.skipped
        );
    }

    println!(
        "Population complete: {} pair(s) written, {} record(s) stored.",
        computed,
        driver.store().count()?
    );
    Ok(())
}
