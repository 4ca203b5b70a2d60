//! `specht-solve` — Evaluates the Specht parity of a single shape.
//!
//! The shape need not be 2-special. Nothing is stored.
//!
//! **Usage:**
//! ```
//! specht-solve [<shape>] [--tableaux] [--matrix] [--solution] [--no-shortcuts]
//!              [--strategy sequential|distributed] [--workers <k>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use anyhow::{Context, Result};
use clap::Parser;
use specht::{Evaluator, EvaluatorConfig, Method, Partition, Shape, Strategy};
use specht_clients::init_tracing;

/// Solve one shape.
#[derive(Parser)]
#[command(
    name = "specht-solve",
    about = "Compute the Specht parity of one partition"
)]
struct Args {
    /// The shape, as `3,2` or `(3,2)`.
    #[arg(default_value = "3,2")]
    shape: Partition,

    /// Print the standard tableaux in canonical order.
    #[arg(long)]
    tableaux: bool,

    /// Print the incidence matrix.
    #[arg(long)]
    matrix: bool,

    /// Print the solution vector.
    #[arg(long)]
    solution: bool,

    /// Build the matrix even when a closed form is known.
    #[arg(long)]
    no_shortcuts: bool,

    /// Matrix assembly strategy.
    #[arg(long, default_value_t = Strategy::Sequential)]
    strategy: Strategy,

    /// Worker threads for the distributed strategy.
    #[arg(long)]
    workers: Option<usize>,

    /// Log at debug level.
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose, "warn");

    let evaluator = Evaluator::new(EvaluatorConfig {
        strategy: args.strategy,
        workers: args.workers,
        skip_known_families: !args.no_shortcuts,
        ..EvaluatorConfig::default()
    })?;
    let p = &args.shape;
    let evaluation = evaluator
        .evaluate(p)
        .with_context(|| format!("solving {p}"))?;

    let method = match evaluation.method {
        Method::Trivial => "one box".to_string(),
        Method::Shortcut(family) => format!("closed form for {family}"),
        Method::Sequential => "sequential pipeline".to_string(),
        Method::Distributed => "distributed pipeline".to_string(),
    };
    println!(
        "{p} \u{22a2} {}: solution {} ({method})",
        p.size(),
        evaluation.parity
    );
    if let Some(count) = evaluation.tableaux {
        println!("{count} standard tableau(x)");
    }
    if p.is_2special() && p.conjugate().is_2special() {
        println!("{p} and {} are both 2-special", p.conjugate());
    }

    if args.tableaux || args.matrix {
        let (order, matrix) = evaluator.matrix(&Shape::from(p))?;
        if args.tableaux {
            for (i, t) in order.iter().enumerate() {
                println!("[{i}]");
                println!("{t}");
            }
        }
        if args.matrix {
            println!("{matrix}");
        }
    }

    if args.solution {
        match &evaluation.solution {
            Some(solution) => {
                let entries: Vec<String> =
                    solution.coefficients().iter().map(|c| c.to_string()).collect();
                println!("x = [{}]", entries.join(", "));
                println!("sum = {}", solution.sum());
            }
            None => println!("no solution vector; rerun with --no-shortcuts"),
        }
    }
    Ok(())
}
