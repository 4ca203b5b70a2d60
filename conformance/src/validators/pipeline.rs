//! Cross-checks between assembly strategies, orbit policies and solvers.

use anyhow::{Context, Result};
use num_bigint::BigInt;
use specht::{
    build_matrix, find_solution, DistributedEvaluator, OrbitPolicy, Parity, Partition, Shape,
    StandardOrder,
};

use crate::report::{ConformanceReport, TestResult};
use crate::Limits;

/// Validates the matrix pipeline on every shape of `n ≤ limits.pipeline`,
/// plus the (3,3,3) regression and the one-box shape.
///
/// # Errors
///
/// Returns an error if the worker pool cannot start or a matrix cannot be
/// solved.
pub fn validate(limits: &Limits) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    let max = limits.pipeline;
    let pool = DistributedEvaluator::new(limits.workers).context("starting worker pool")?;

    let mut policies = Vec::new();
    let mut triangular = Vec::new();
    let mut gf2 = Vec::new();
    let mut strategies = Vec::new();
    let mut conjugates = Vec::new();
    for n in 2..=max {
        for p in Partition::all(n) {
            let order = StandardOrder::new(&Shape::from(&p));
            let m = build_matrix(&order, OrbitPolicy::Parity);
            if build_matrix(&order, OrbitPolicy::Set) != m {
                policies.push(format!("{p}"));
            }
            if !m.is_unit_lower_triangular() {
                triangular.push(format!("{p}"));
            }
            let exact = m.solve().with_context(|| format!("solving {p}"))?.parity();
            if m.solve_parity()? != exact {
                gf2.push(format!("{p}"));
            }
            if pool.matrix(&order)? != m {
                strategies.push(format!("{p}"));
            }
            let q = p.conjugate();
            if p > q {
                let other = find_solution(&Shape::from(&q), OrbitPolicy::Parity)?.parity();
                if other != exact {
                    conjugates.push(format!("{p}: {exact}, {q}: {other}"));
                }
            }
        }
    }
    report.push(TestResult::from_violations(
        "pipeline/policy",
        format!("set and parity orbit accounting build the same matrix, n ≤ {max}"),
        policies,
    ));
    report.push(TestResult::from_violations(
        "pipeline/triangular",
        "incidence matrices are unit lower triangular in canonical order",
        triangular,
    ));
    report.push(TestResult::from_violations(
        "pipeline/gf2",
        "GF(2) solve agrees with the exact solve",
        gf2,
    ));
    report.push(TestResult::from_violations(
        "pipeline/distributed",
        format!(
            "worker-pool assembly equals sequential assembly ({} workers)",
            pool.workers()
        ),
        strategies,
    ));
    report.push(TestResult::from_violations(
        "pipeline/conjugate",
        "a partition and its conjugate share the invariant",
        conjugates,
    ));

    let order = StandardOrder::new(&Shape::new(vec![3, 3, 3])?);
    let sequential = build_matrix(&order, OrbitPolicy::Parity);
    let distributed = pool.matrix(&order)?;
    let parity = sequential.solve()?.parity();
    if sequential == distributed && parity == Parity::Even {
        report.push(TestResult::pass(
            "pipeline/333",
            "(3,3,3): sequential and distributed matrices agree, parity 0",
        ));
    } else {
        report.push(TestResult::fail(
            "pipeline/333",
            format!(
                "(3,3,3): matrices {}, parity {parity}",
                if sequential == distributed { "agree" } else { "differ" }
            ),
        ));
    }

    let one = find_solution(&Shape::new(vec![1])?, OrbitPolicy::Parity)?;
    if one.sum() == BigInt::from(1) {
        report.push(TestResult::pass("pipeline/one-box", "(1) has invariant 1"));
    } else {
        report.push(TestResult::fail(
            "pipeline/one-box",
            format!("(1) has invariant {}", one.sum()),
        ));
    }

    Ok(report)
}
