//! Property report for the Specht parity engine.
//!
//! Each validator checks one group of properties up to the bounds in
//! [`Limits`] and reports PASS, WARN or FAIL per property.
//!
//! | Validator | Properties |
//! |-----------|------------|
//! | `partition/*` | conjugate involution, partition counts, 2-special filter |
//! | `tableau/*` | corner search count equals hook-length dimension, standardness |
//! | `family/*` | one-dimensional, odd hook and self-conjugate closed forms |
//! | `pipeline/*` | orbit policies, GF(2) solve, (3,3,3) cross-check, one-box shape |
//! | `store/*` | population idempotence against SQLite |
//!
//! # Entry Point
//!
//! ```
//! use specht_conformance::{run_all, Limits};
//!
//! let limits = Limits { partitions: 12, tableaux: 6, families: 5, pipeline: 5, workers: Some(2) };
//! let report = run_all(&limits).unwrap();
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod report;
pub mod validators;

pub use report::{ConformanceReport, Severity, TestResult};

/// Upper bounds on `n` for each validator group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Partition algebra checks.
    pub partitions: usize,
    /// Tableau enumeration checks.
    pub tableaux: usize,
    /// Family closed forms against the full pipeline.
    pub families: usize,
    /// Matrix and solver cross-checks, and store population.
    pub pipeline: usize,
    /// Worker threads for the distributed cross-check.
    pub workers: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            partitions: 30,
            tableaux: 9,
            families: 7,
            pipeline: 7,
            workers: None,
        }
    }
}

/// Runs every validator and returns the aggregated report.
///
/// Validators run in this order:
/// 1. Partition algebra
/// 2. Tableau enumeration
/// 3. Family closed forms
/// 4. Pipeline cross-checks
/// 5. Store population
///
/// # Errors
///
/// Returns an error only if a computation that a check depends on fails
/// outright (a singular matrix, a pool that cannot start, a store that
/// cannot open).
pub fn run_all(limits: &Limits) -> anyhow::Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    // 1. Partition algebra
    report.extend(validators::partitions::validate(limits)?);

    // 2. Tableau enumeration
    report.extend(validators::tableaux::validate(limits)?);

    // 3. Family closed forms
    report.extend(validators::families::validate(limits)?);

    // 4. Pipeline cross-checks
    report.extend(validators::pipeline::validate(limits)?);

    // 5. Store population
    report.extend(validators::store::validate(limits)?);

    tracing::info!(
        passed = report.pass_count(),
        warnings = report.warning_count(),
        failed = report.failure_count(),
        "conformance run finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_limits_pass() {
        let limits = Limits {
            partitions: 14,
            tableaux: 7,
            families: 6,
            pipeline: 6,
            workers: Some(2),
        };
        let report = run_all(&limits).unwrap();
        let failures: Vec<_> = report.results.iter().filter(|r| r.is_failure()).collect();
        assert!(failures.is_empty(), "failures: {failures:#?}");
        assert!(report.pass_count() >= 12);
    }
}
