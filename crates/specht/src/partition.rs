//! Integer partitions and the arithmetic filters applied to them.
//!
//! A [`Partition`] of `n` is a non-increasing sequence of positive integers
//! summing to `n`. Parts are always stored in descending order, so two
//! partitions are equal exactly when their part sequences are equal.
//!
//! # Examples
//!
//! ```
//! use specht::Partition;
//!
//! let p = Partition::new(vec![2, 3, 3]).unwrap();
//! assert_eq!(p.parts(), &[3, 3, 2]);
//! assert_eq!(p.conjugate().parts(), &[3, 3, 2]);
//! assert!(p.is_2special());
//! ```

use std::fmt;
use std::iter;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpechtError};
use crate::record::Parity;

/// A partition of a positive integer, parts sorted descending.
///
/// # Invariant
///
/// `parts` is non-empty, every part is positive, and the sequence is
/// non-increasing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Partition {
    parts: Vec<usize>,
}

impl Partition {
    /// Builds a partition from parts in any order.
    ///
    /// # Errors
    ///
    /// Returns [`SpechtError::InvalidPartition`] if `parts` is empty or
    /// contains a zero.
    pub fn new(parts: impl Into<Vec<usize>>) -> Result<Self> {
        let parts = parts.into();
        if parts.is_empty() || parts.contains(&0) {
            return Err(SpechtError::InvalidPartition { parts });
        }
        Ok(Self::from_positive(parts))
    }

    /// The one-part partition `(n)`.
    ///
    /// # Errors
    ///
    /// Returns [`SpechtError::InvalidPartition`] when `n` is zero.
    pub fn row(n: usize) -> Result<Self> {
        Self::new(vec![n])
    }

    /// The one-column partition `(1ⁿ)`.
    ///
    /// # Errors
    ///
    /// Returns [`SpechtError::InvalidPartition`] when `n` is zero.
    pub fn column(n: usize) -> Result<Self> {
        Self::new(vec![1; n])
    }

    /// Sorts positive parts descending. Callers guarantee positivity.
    pub(crate) fn from_positive(mut parts: Vec<usize>) -> Self {
        parts.sort_unstable_by(|a, b| b.cmp(a));
        Self { parts }
    }

    /// Every partition of `n`, in generator order.
    pub fn all(n: usize) -> impl Iterator<Item = Partition> {
        Partitions::new(n).map(Self::from_positive)
    }

    /// Parts in descending order.
    #[inline]
    pub fn parts(&self) -> &[usize] {
        &self.parts
    }

    /// Number of parts (rows of the diagram).
    #[inline]
    pub fn num_parts(&self) -> usize {
        self.parts.len()
    }

    /// The integer being partitioned.
    #[inline]
    pub fn size(&self) -> usize {
        self.parts.iter().sum()
    }

    /// Largest part (length of the first row).
    #[inline]
    pub fn largest(&self) -> usize {
        self.parts[0]
    }

    /// Transpose of the Young diagram.
    ///
    /// Strips are peeled off from the smallest part: a part `v` with `l`
    /// parts still present contributes `v` columns of height `l`.
    pub fn conjugate(&self) -> Self {
        let mut remaining = self.parts.clone();
        let mut transposed = Vec::with_capacity(self.largest());
        while let Some(v) = remaining.pop() {
            let height = remaining.len() + 1;
            transposed.extend(iter::repeat(height).take(v));
            for part in &mut remaining {
                *part -= v;
            }
        }
        Self::from_positive(transposed)
    }

    /// Whether every adjacent pair `(a, b)` satisfies `a ≡ m − 1 (mod m)`,
    /// `m` being the least power of two strictly greater than `b`.
    ///
    /// ```
    /// use specht::Partition;
    ///
    /// assert!(Partition::new(vec![3, 1, 1]).unwrap().is_2special());
    /// assert!(Partition::new(vec![3, 2]).unwrap().is_2special());
    /// assert!(!Partition::new(vec![5, 2]).unwrap().is_2special());
    /// ```
    pub fn is_2special(&self) -> bool {
        self.parts.windows(2).all(|pair| {
            let modulus = (pair[1] + 1).next_power_of_two();
            pair[0] % modulus == modulus - 1
        })
    }

    /// Whether the partition is `(n)` or `(1ⁿ)`.
    pub fn is_one_dimensional(&self) -> bool {
        self.parts.len() == 1 || self.parts.iter().all(|&p| p == 1)
    }

    /// Whether the partition is a hook `(k, 1ʳ)` with at least two parts.
    pub fn is_hook(&self) -> bool {
        self.parts.len() > 1 && self.parts[1..].iter().all(|&p| p == 1)
    }

    /// Whether the partition equals its conjugate.
    pub fn is_self_conjugate(&self) -> bool {
        *self == self.conjugate()
    }

    /// Number of parts after the first that equal one.
    pub fn trailing_ones(&self) -> usize {
        self.parts[1..].iter().filter(|&&p| p == 1).count()
    }

    /// Order of the column stabilizer of any tableau of this shape,
    /// saturating at `u128::MAX`.
    pub fn column_stabilizer_order(&self) -> u128 {
        self.conjugate()
            .parts
            .iter()
            .fold(1u128, |acc, &height| acc.saturating_mul(factorial(height)))
    }

    /// Order of the row stabilizer (product of the factorials of the parts).
    pub fn row_stabilizer_order(&self) -> u128 {
        self.parts
            .iter()
            .fold(1u128, |acc, &width| acc.saturating_mul(factorial(width)))
    }

    /// Canonical storage key: descending parts joined by commas.
    pub fn key(&self) -> String {
        let mut key = String::new();
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                key.push(',');
            }
            key.push_str(&part.to_string());
        }
        key
    }
}

fn factorial(k: usize) -> u128 {
    (2..=k as u128).fold(1u128, |acc, x| acc.saturating_mul(x))
}

/// Whether the binomial coefficient `C(n, k)` is odd (Lucas' theorem).
#[inline]
pub const fn binomial_is_odd(n: usize, k: usize) -> bool {
    k <= n && (k & !n) == 0
}

/// Closed-form parity for the hook `(n − r, 1ʳ)`.
///
/// Odd exactly when `n` is odd, `r` is even and `C(n − 1, r)` is odd.
/// The formula only agrees with the tableau computation for odd `n`.
pub fn hook_parity(n: usize, r: usize) -> Parity {
    let odd = n % 2 == 1 && r % 2 == 0 && binomial_is_odd(n - 1, r);
    Parity::from_bit(odd)
}

/// Every hook partition `(n − i, 1ⁱ)` for `1 ≤ i < n`.
pub fn hooks(n: usize) -> impl Iterator<Item = Partition> {
    (1..n).map(move |i| {
        let mut parts = vec![1; i + 1];
        parts[0] = n - i;
        Partition { parts }
    })
}

/// Every self-conjugate partition of `n`.
pub fn self_conjugates(n: usize) -> impl Iterator<Item = Partition> {
    Partition::all(n).filter(Partition::is_self_conjugate)
}

/// The two one-dimensional partitions `(n)` and `(1ⁿ)`; empty for `n = 0`.
pub fn one_dimensional(n: usize) -> impl Iterator<Item = Partition> {
    let pair = if n == 0 {
        Vec::new()
    } else {
        vec![
            Partition { parts: vec![n] },
            Partition { parts: vec![1; n] },
        ]
    };
    pair.into_iter()
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.key())
    }
}

impl FromStr for Partition {
    type Err = SpechtError;

    /// Accepts `3,3,2`, `(3,3,2)` or `3 3 2`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|piece| !piece.is_empty())
            .map(|piece| piece.parse::<usize>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| SpechtError::UnparsablePartition {
                input: s.to_string(),
            })?;
        Self::new(parts)
    }
}

impl TryFrom<Vec<usize>> for Partition {
    type Error = SpechtError;

    fn try_from(parts: Vec<usize>) -> Result<Self> {
        Self::new(parts)
    }
}

impl From<Partition> for Vec<usize> {
    fn from(p: Partition) -> Self {
        p.parts
    }
}

/// Lazy generator of every partition of `n` (accelerated ascending
/// compositions).
///
/// Each item is the part list of one partition. Runs of the generator emit
/// some partitions ascending and some descending; use [`Partition::all`] for
/// canonical values. Total work is proportional to the number of partitions.
#[derive(Debug, Clone)]
pub struct Partitions {
    a: Vec<usize>,
    k: usize,
    x: usize,
    y: usize,
    l: usize,
    phase: Phase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Backtrack to the next ascending prefix.
    Descend,
    /// Emit two-part tails `(x, y)` while `x <= y`.
    Split,
    /// Emit the merged tail `x + y`.
    Merge,
    Done,
}

impl Partitions {
    /// Starts the generator; `n = 0` yields nothing.
    pub fn new(n: usize) -> Self {
        Self {
            a: vec![0; n + 1],
            k: 1,
            x: 0,
            y: n.saturating_sub(1),
            l: 0,
            phase: if n == 0 { Phase::Done } else { Phase::Descend },
        }
    }
}

impl Iterator for Partitions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        loop {
            match self.phase {
                Phase::Done => return None,
                Phase::Descend => {
                    if self.k == 0 {
                        self.phase = Phase::Done;
                        return None;
                    }
                    self.x = self.a[self.k - 1] + 1;
                    self.k -= 1;
                    while 2 * self.x <= self.y {
                        self.a[self.k] = self.x;
                        self.y -= self.x;
                        self.k += 1;
                    }
                    self.l = self.k + 1;
                    self.phase = Phase::Split;
                }
                Phase::Split => {
                    if self.x <= self.y {
                        self.a[self.k] = self.x;
                        self.a[self.l] = self.y;
                        let item = self.a[..self.k + 2].to_vec();
                        self.x += 1;
                        self.y -= 1;
                        return Some(item);
                    }
                    self.phase = Phase::Merge;
                }
                Phase::Merge => {
                    let merged = self.x + self.y;
                    self.a[self.k] = merged;
                    self.y = merged - 1;
                    self.phase = Phase::Descend;
                    let mut item = self.a[..self.k + 1].to_vec();
                    item.reverse();
                    return Some(item);
                }
            }
        }
    }
}
