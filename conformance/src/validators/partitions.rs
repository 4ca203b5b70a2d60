//! Partition algebra validator.
//!
//! - conjugation is an involution and preserves size
//! - the generator yields p(n) distinct partitions (Euler's pentagonal
//!   recurrence as reference)
//! - `(n)` and `(1ⁿ)` always pass the 2-special filter on both sides

use std::collections::HashSet;

use anyhow::Result;
use specht::{candidates, one_dimensional, Partition};

use crate::report::{ConformanceReport, TestResult};
use crate::Limits;

/// Validates partition generation and conjugation for `n ≤ limits.partitions`.
///
/// # Errors
///
/// Never fails; the signature matches the other validators.
pub fn validate(limits: &Limits) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    let max = limits.partitions;

    let mut involution = Vec::new();
    let mut counts = Vec::new();
    let expected = partition_numbers(max);
    for n in 1..=max {
        let all: Vec<Partition> = Partition::all(n).collect();
        for p in &all {
            let back = p.conjugate().conjugate();
            if &back != p || p.conjugate().size() != n {
                involution.push(format!("{p} -> {back}"));
            }
        }
        let distinct: HashSet<&Partition> = all.iter().collect();
        if all.len() != expected[n] || distinct.len() != all.len() {
            counts.push(format!(
                "n = {n}: generated {} ({} distinct), expected {}",
                all.len(),
                distinct.len(),
                expected[n]
            ));
        }
    }
    report.push(TestResult::from_violations(
        "partition/involution",
        format!("conjugate(conjugate(p)) = p for every p of n ≤ {max}"),
        involution,
    ));
    report.push(TestResult::from_violations(
        "partition/count",
        format!("generator yields p(n) distinct partitions for n ≤ {max}"),
        counts,
    ));

    let mut filter = Vec::new();
    let mut pairs = 0usize;
    for n in 2..=max {
        let kept = candidates(n);
        pairs += kept.len();
        for p in one_dimensional(n) {
            if !kept.iter().any(|(a, b)| *a == p || *b == p) {
                filter.push(format!("{p} missing from the 2-special pairs of {n}"));
            }
        }
    }
    report.push(TestResult::from_violations(
        "partition/2special",
        format!("one-dimensional partitions are always kept ({pairs} pairs for n ≤ {max})"),
        filter,
    ));

    Ok(report)
}

/// p(0..=max) by the pentagonal number recurrence.
fn partition_numbers(max: usize) -> Vec<usize> {
    let mut p = vec![0i128; max + 1];
    p[0] = 1;
    for n in 1..=max {
        let mut total = 0i128;
        for k in 1usize.. {
            let first = k * (3 * k - 1) / 2;
            if first > n {
                break;
            }
            let sign = if k % 2 == 1 { 1 } else { -1 };
            total += sign * p[n - first];
            let second = k * (3 * k + 1) / 2;
            if second <= n {
                total += sign * p[n - second];
            }
        }
        p[n] = total;
    }
    p.into_iter()
        .map(|v| usize::try_from(v).unwrap_or(usize::MAX))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pentagonal_reference() {
        assert_eq!(
            partition_numbers(12),
            vec![1, 1, 2, 3, 5, 7, 11, 15, 22, 30, 42, 56, 77]
        );
        assert_eq!(partition_numbers(30)[30], 5604);
    }
}
