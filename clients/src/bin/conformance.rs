//! `specht-conformance` — Checks the Specht parity engine against its
//! structural properties.
//!
//! Covers partition generation and conjugation, standard tableau counts,
//! family closed forms, the agreement of every matrix assembly and solve
//! path, and store round trips.
//!
//! **Usage:**
//! ```
//! specht-conformance [--partitions <n>] [--tableaux <n>] [--families <n>]
//!                    [--pipeline <n>] [--workers <k>]
//! ```
//!
//! Exits non-zero if any check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::process;

use anyhow::Result;
use clap::Parser;
use specht_clients::init_tracing;
use specht_conformance::{run_all, Limits};

/// Run the Specht parity conformance suite.
#[derive(Parser)]
#[command(
    name = "specht-conformance",
    about = "Validate the Specht parity engine against its structural properties"
)]
struct Args {
    /// Largest n for partition checks.
    #[arg(long)]
    partitions: Option<usize>,

    /// Largest n for tableau checks.
    #[arg(long)]
    tableaux: Option<usize>,

    /// Largest n for family checks.
    #[arg(long)]
    families: Option<usize>,

    /// Largest n for pipeline agreement checks.
    #[arg(long)]
    pipeline: Option<usize>,

    /// Worker threads for the distributed checks.
    #[arg(long)]
    workers: Option<usize>,

    /// Log at debug level.
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose, "warn");

    let defaults = Limits::default();
    let limits = Limits {
        partitions: args.partitions.unwrap_or(defaults.partitions),
        tableaux: args.tableaux.unwrap_or(defaults.tableaux),
        families: args.families.unwrap_or(defaults.families),
        pipeline: args.pipeline.unwrap_or(defaults.pipeline),
        workers: args.workers.or(defaults.workers),
    };

    let report = run_all(&limits)?;

    println!("Specht Parity Conformance Report");
    println!("================================");
    println!();
    for result in &report.results {
        println!("{result}");
    }
    println!();
    println!("{}", report.summary());

    if !report.all_passed() {
        eprintln!(
            "Conformance FAILED: {} check(s) did not pass.",
            report.failure_count()
        );
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}
