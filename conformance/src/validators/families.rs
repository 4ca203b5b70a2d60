//! Family closed forms against the full tableau pipeline.

use anyhow::Result;
use specht::{
    find_solution, hook_parity, hooks, one_dimensional, self_conjugates, OrbitPolicy, Parity,
    Partition, Shape,
};

use crate::report::{ConformanceReport, TestResult};
use crate::Limits;

fn pipeline(p: &Partition) -> Result<Parity> {
    Ok(find_solution(&Shape::from(p), OrbitPolicy::Parity)?.parity())
}

/// Validates the one-dimensional, hook and self-conjugate closed forms for
/// `n ≤ limits.families`.
///
/// # Errors
///
/// Returns an error if a matrix cannot be solved.
pub fn validate(limits: &Limits) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    let max = limits.families;

    let mut one_dim = Vec::new();
    for n in 1..=max {
        for p in one_dimensional(n) {
            if pipeline(&p)? != Parity::Odd {
                one_dim.push(format!("{p}"));
            }
        }
    }
    report.push(TestResult::from_violations(
        "family/one-dimensional",
        format!("(n) and (1ⁿ) have parity 1 for n ≤ {max}"),
        one_dim,
    ));

    let mut odd_hooks = Vec::new();
    let mut even_mismatches = 0usize;
    for n in 2..=max {
        for p in hooks(n) {
            let computed = pipeline(&p)?;
            let closed = hook_parity(n, p.trailing_ones());
            if computed != closed {
                if n % 2 == 1 {
                    odd_hooks.push(format!("{p}: computed {computed}, closed form {closed}"));
                } else {
                    even_mismatches += 1;
                }
            }
        }
    }
    report.push(TestResult::from_violations(
        "family/hook",
        format!("closed form matches the pipeline on odd-n hooks, n ≤ {max}"),
        odd_hooks,
    ));
    if even_mismatches > 0 {
        report.push(TestResult::warn(
            "family/hook-even",
            format!(
                "closed form disagrees on {even_mismatches} even-n hook(s); those are always computed"
            ),
        ));
    }

    let mut self_conj = Vec::new();
    for n in 2..=max {
        for p in self_conjugates(n) {
            if pipeline(&p)? != Parity::Even {
                self_conj.push(format!("{p}"));
            }
        }
    }
    report.push(TestResult::from_violations(
        "family/self-conjugate",
        format!("self-conjugate partitions have parity 0 for 2 ≤ n ≤ {max}"),
        self_conj,
    ));

    Ok(report)
}
