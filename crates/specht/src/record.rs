//! Persisted values: the parity bit and the lookup record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::partition::Partition;

/// The invariant reduced mod 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Parity {
    /// Congruent to 0 (mod 2).
    Even,
    /// Congruent to 1 (mod 2).
    Odd,
}

impl Parity {
    /// `Odd` for `true`, `Even` for `false`.
    #[inline]
    pub const fn from_bit(odd: bool) -> Self {
        if odd {
            Self::Odd
        } else {
            Self::Even
        }
    }

    /// The stored bit: 0 or 1.
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Self::Even => 0,
            Self::Odd => 1,
        }
    }

    /// Addition in GF(2).
    #[inline]
    pub const fn xor(self, other: Self) -> Self {
        Self::from_bit((self.bit() ^ other.bit()) == 1)
    }
}

impl From<Parity> for u8 {
    fn from(p: Parity) -> Self {
        p.bit()
    }
}

impl TryFrom<u8> for Parity {
    type Error = String;

    fn try_from(bit: u8) -> Result<Self, Self::Error> {
        match bit {
            0 => Ok(Self::Even),
            1 => Ok(Self::Odd),
            other => Err(format!("parity bit must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bit())
    }
}

/// One row of the lookup: `(n, partition, parity)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRecord {
    /// The integer being partitioned.
    pub n: usize,
    /// The partition the parity belongs to.
    pub partition: Partition,
    /// Invariant mod 2.
    pub parity: Parity,
}

impl LookupRecord {
    /// Builds a record, taking `n` from the partition.
    pub fn new(partition: Partition, parity: Parity) -> Self {
        Self {
            n: partition.size(),
            partition,
            parity,
        }
    }

    /// The record for the conjugate partition (same parity).
    pub fn conjugate(&self) -> Self {
        Self::new(self.partition.conjugate(), self.parity)
    }
}
