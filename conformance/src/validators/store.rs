//! Population loop against an in-memory SQLite store.

use anyhow::{Context, Result};
use specht::{Driver, EvaluatorConfig, SolutionStore};
use specht_store::SqliteStore;

use crate::report::{ConformanceReport, TestResult};
use crate::Limits;

/// Populates `n ≤ limits.pipeline`, re-runs without regeneration, and checks
/// that nothing changed and that every record's conjugate is stored with
/// the same parity.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or a step fails.
pub fn validate(limits: &Limits) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    let config = EvaluatorConfig {
        max_n: Some(limits.pipeline),
        ..EvaluatorConfig::default()
    };

    let mut driver = Driver::resume(SqliteStore::open_in_memory()?, config.clone())?;
    driver.run().context("first population run")?;
    let store = driver.into_store();
    let before = store.records()?;

    let mut driver = Driver::resume(store, config)?;
    let reports = driver.run().context("second population run")?;
    let after = driver.store().records()?;
    let recomputed: usize = reports.iter().map(|r| r.computed + r.shortcuts).sum();

    if before == after && recomputed == 0 {
        report.push(TestResult::pass(
            "store/idempotence",
            format!("re-running over n ≤ {} leaves {} records unchanged", limits.pipeline, after.len()),
        ));
    } else {
        report.push(TestResult::fail(
            "store/idempotence",
            format!("re-run recomputed {recomputed} pair(s); {} → {} records", before.len(), after.len()),
        ));
    }

    let mut unpaired = Vec::new();
    for record in &after {
        let conjugate = record.partition.conjugate();
        match driver.store().get(&conjugate)? {
            Some(other) if other.parity == record.parity => {}
            Some(other) => unpaired.push(format!(
                "{}: {}, {conjugate}: {}",
                record.partition, record.parity, other.parity
            )),
            None => unpaired.push(format!("{} stored without {conjugate}", record.partition)),
        }
    }
    report.push(TestResult::from_violations(
        "store/conjugates",
        "every stored partition has its conjugate with the same parity",
        unpaired,
    ));

    Ok(report)
}
