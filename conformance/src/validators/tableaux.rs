//! Tableau enumeration validator.

use anyhow::Result;
use num_bigint::BigUint;
use specht::{Partition, Shape, StandardOrder, Tableau};

use crate::report::{ConformanceReport, TestResult};
use crate::Limits;

/// Checks, for every shape of `n ≤ limits.tableaux`, that the corner search
/// yields the hook-length number of distinct standard tableaux and that the
/// canonical order starts with the row reading.
///
/// # Errors
///
/// Never fails; the signature matches the other validators.
pub fn validate(limits: &Limits) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    let max = limits.tableaux;

    let mut dimension = Vec::new();
    let mut standard = Vec::new();
    let mut first = Vec::new();
    let mut shapes = 0usize;
    for n in 1..=max {
        for p in Partition::all(n) {
            shapes += 1;
            let shape = Shape::from(&p);
            let order = StandardOrder::new(&shape);
            let expected = shape.dimension();
            if BigUint::from(order.len()) != expected {
                dimension.push(format!("{shape}: {} tableaux, dimension {expected}", order.len()));
            }
            let broken = order
                .iter()
                .enumerate()
                .filter(|(i, t)| !t.is_standard() || order.index_of(t) != Some(*i))
                .count();
            if broken > 0 {
                standard.push(format!("{shape}: {broken} non-standard or duplicated"));
            }
            if order.get(0) != Some(&Tableau::row_reading(&shape)) {
                first.push(format!("{shape}"));
            }
        }
    }

    report.push(TestResult::from_violations(
        "tableau/dimension",
        format!("tableau count equals the hook-length formula on {shapes} shapes"),
        dimension,
    ));
    report.push(TestResult::from_violations(
        "tableau/standard",
        "every enumerated tableau is standard and indexed once",
        standard,
    ));
    report.push(TestResult::from_violations(
        "tableau/order",
        "canonical order starts with the row reading",
        first,
    ));
    Ok(report)
}
