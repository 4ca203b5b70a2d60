//! `specht-query` — Reads stored Specht parities.
//!
//! Exactly one selection is applied, in this precedence: `-a`, `-p`, `-f`
//! (narrowed by `-s` or `-n`), `-s`, `-n`. The database is never written.
//!
//! **Usage:**
//! ```
//! specht-query -p 3 3 2
//! specht-query -n 9 --families
//! specht-query -f hook -s 1 --json
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use specht::{Family, LookupRecord, Parity, Partition};
use specht_clients::{init_tracing, load_settings};
use specht_store::{format_rows, not_found, Query, Row, SqliteStore, INCOMPLETE_WARNING};

/// Query the Specht parity database.
#[derive(Parser)]
#[command(
    name = "specht-query",
    about = "Look up Specht parities by partition, n, solution or family"
)]
struct Args {
    /// A partition, as `3,3,2` or `3 3 2`.
    #[arg(short = 'p', long = "partition", num_args = 1..)]
    partition: Option<Vec<String>>,

    /// Every record of this n.
    #[arg(short = 'n', long = "n")]
    n: Option<usize>,

    /// Every record with this solution (0 or 1).
    #[arg(short = 's', long = "solution")]
    solution: Option<u8>,

    /// A family: hook, 1d, self-conj or none.
    #[arg(short = 'f', long = "family")]
    family: Option<String>,

    /// Every record.
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// Append family tags to rows.
    ///
    /// A row gets one tag, by priority [1D], then [SELF-CONJ], then [HOOK]:
    /// (3,1,1) is tagged [SELF-CONJ] and (1,1,1) is tagged [1D], although
    /// both are hooks. Use `-f hook` to list every hook.
    #[arg(long)]
    families: bool,

    /// Print rows as JSON.
    #[arg(long)]
    json: bool,

    /// Log at debug level.
    #[arg(long, short = 'v')]
    verbose: bool,

    /// SQLite database (overrides the settings file and SPECHT_DB).
    #[arg(long)]
    database: Option<PathBuf>,

    /// Settings file (default: specht.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    /// The selection, validated before the database is opened.
    fn query(&self) -> Result<Query> {
        let solution = self
            .solution
            .map(Parity::try_from)
            .transpose()
            .map_err(|e| anyhow!(e))?;
        if self.all {
            return Ok(Query::All);
        }
        if let Some(pieces) = &self.partition {
            let text = pieces.join(",");
            let p: Partition = text
                .parse()
                .with_context(|| format!("reading partition {text:?}"))?;
            return Ok(Query::Partition(p));
        }
        if let Some(tag) = &self.family {
            let family: Family = tag.parse()?;
            return Ok(Query::Family {
                family,
                solution,
                n: self.n,
            });
        }
        if let Some(parity) = solution {
            return Ok(Query::Solution(parity));
        }
        if let Some(n) = self.n {
            return Ok(Query::N(n));
        }
        bail!("nothing to select; pass one of -p, -n, -s, -f or -a")
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose, "error");

    let query = args.query()?;
    let settings = load_settings(args.config.as_deref(), args.database.clone())?;
    let store = SqliteStore::open(&settings.database)
        .with_context(|| format!("opening {}", settings.database.display()))?;
    let answer = query.run(&store)?;

    if args.json {
        print_json(&answer.records, args.families)?;
    } else if let (Query::Partition(p), true) = (&query, answer.is_empty()) {
        println!("{}", not_found(p));
    } else {
        for line in format_rows(&answer.records, args.families) {
            println!("{line}");
        }
    }

    if answer.incomplete_at.is_some() {
        println!("{INCOMPLETE_WARNING}");
    }
    Ok(())
}

fn print_json(records: &[LookupRecord], families: bool) -> Result<()> {
    let rows: Vec<Row> = records.iter().map(|r| Row::new(r, families)).collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
