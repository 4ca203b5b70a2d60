//! The incidence matrix and its exact solve.
//!
//! Column `i` of an [`IncidenceMatrix`] is the indicator vector of the orbit
//! relation of standard tableau `i`, with a one on the diagonal. In the
//! canonical order the matrix is unit lower triangular, so `M·x = 1` has a
//! unique integer solution; other orders go through fraction-free
//! elimination.
//!
//! # Examples
//!
//! ```
//! use specht::{IncidenceMatrix, Parity};
//!
//! let m = IncidenceMatrix::from_columns(vec![vec![1, 1], vec![0, 1]]).unwrap();
//! let x = m.solve().unwrap();
//! assert_eq!(x.parity(), Parity::Odd); // x = (1, 0)
//! assert_eq!(m.solve_parity().unwrap(), Parity::Odd);
//! ```

use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::error::{Result, SpechtError};
use crate::record::Parity;

/// Square 0/1 matrix, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidenceMatrix {
    size: usize,
    entries: Vec<u8>,
}

impl IncidenceMatrix {
    /// The `size × size` zero matrix.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            entries: vec![0; size * size],
        }
    }

    /// The `size × size` identity.
    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size);
        for i in 0..size {
            m.set(i, i, 1);
        }
        m
    }

    /// Stacks column vectors side by side.
    ///
    /// # Errors
    ///
    /// Returns [`SpechtError::MalformedRow`] if a column's length differs
    /// from the number of columns or an entry is not 0 or 1.
    pub fn from_columns(columns: Vec<Vec<u8>>) -> Result<Self> {
        let size = columns.len();
        let mut m = Self::zeros(size);
        for (c, column) in columns.iter().enumerate() {
            if column.len() != size {
                return Err(SpechtError::MalformedRow {
                    index: c,
                    reason: "length differs from the number of vectors",
                });
            }
            for (r, &entry) in column.iter().enumerate() {
                if entry > 1 {
                    return Err(SpechtError::MalformedRow {
                        index: c,
                        reason: "entry is not 0 or 1",
                    });
                }
                m.set(r, c, entry);
            }
        }
        Ok(m)
    }

    /// Dimension.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Entry at row `r`, column `c`.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> u8 {
        self.entries[r * self.size + c]
    }

    /// Sets the entry at row `r`, column `c`.
    #[inline]
    pub fn set(&mut self, r: usize, c: usize, value: u8) {
        self.entries[r * self.size + c] = value;
    }

    /// Adds one to the entry in GF(2).
    #[inline]
    pub fn toggle(&mut self, r: usize, c: usize) {
        self.entries[r * self.size + c] ^= 1;
    }

    /// Column `c`, top to bottom.
    pub fn column(&self, c: usize) -> Vec<u8> {
        (0..self.size).map(|r| self.get(r, c)).collect()
    }

    /// Row `r`, left to right.
    pub fn row(&self, r: usize) -> &[u8] {
        &self.entries[r * self.size..(r + 1) * self.size]
    }

    /// Number of non-zero entries.
    pub fn nonzeros(&self) -> usize {
        self.entries.iter().filter(|&&e| e != 0).count()
    }

    /// Ones on the diagonal and zeros above it.
    pub fn is_unit_lower_triangular(&self) -> bool {
        (0..self.size).all(|r| self.get(r, r) == 1 && (r + 1..self.size).all(|c| self.get(r, c) == 0))
    }

    /// Solves `M·x = 1` exactly over the integers.
    ///
    /// # Errors
    ///
    /// Returns [`SpechtError::SingularMatrix`] when there is no unique
    /// solution and [`SpechtError::NonIntegralSolution`] when the unique
    /// rational solution is not integral.
    pub fn solve(&self) -> Result<Solution> {
        if self.is_unit_lower_triangular() {
            Ok(self.forward_substitute())
        } else {
            self.eliminate()
        }
    }

    fn forward_substitute(&self) -> Solution {
        let mut x: Vec<BigInt> = Vec::with_capacity(self.size);
        for r in 0..self.size {
            let mut value = BigInt::one();
            for (c, xc) in x.iter().enumerate() {
                if self.get(r, c) == 1 {
                    value -= xc;
                }
            }
            x.push(value);
        }
        Solution { coefficients: x }
    }

    /// Fraction-free Gauss–Jordan elimination on `[M | 1]`.
    ///
    /// Every intermediate entry is a minor of the augmented matrix, so the
    /// division by the previous pivot is exact. At the end each diagonal
    /// entry equals `±det M` and the last column holds `det M · x`.
    fn eliminate(&self) -> Result<Solution> {
        let n = self.size;
        let width = n + 1;
        let mut a: Vec<Vec<BigInt>> = (0..n)
            .map(|r| {
                let mut row: Vec<BigInt> = self.row(r).iter().map(|&e| BigInt::from(e)).collect();
                row.push(BigInt::one());
                row
            })
            .collect();

        let mut previous = BigInt::one();
        for k in 0..n {
            let pivot_row = (k..n)
                .find(|&r| !a[r][k].is_zero())
                .ok_or(SpechtError::SingularMatrix { size: n })?;
            a.swap(k, pivot_row);

            let pivot = a[k][k].clone();
            let pivot_line = a[k].clone();
            for (i, line) in a.iter_mut().enumerate() {
                if i == k {
                    continue;
                }
                let factor = line[k].clone();
                for j in 0..width {
                    if j == k {
                        continue;
                    }
                    line[j] = (&pivot * &line[j] - &factor * &pivot_line[j]) / &previous;
                }
                line[k] = BigInt::zero();
            }
            previous = pivot;
        }

        let mut x = Vec::with_capacity(n);
        for (i, line) in a.iter().enumerate() {
            let diagonal = &line[i];
            let numerator = &line[n];
            if !(numerator % diagonal).is_zero() {
                return Err(SpechtError::NonIntegralSolution { index: i });
            }
            x.push(numerator / diagonal);
        }
        Ok(Solution { coefficients: x })
    }

    /// Parity of the solution sum, solving `M·x = 1` over GF(2).
    ///
    /// Agrees with [`solve`](Self::solve) whenever `det M` is odd, which
    /// holds for every unit-triangular matrix. Rows are packed 64 entries to
    /// a word and reduced with XOR.
    ///
    /// # Errors
    ///
    /// Returns [`SpechtError::SingularMatrix`] when `M` is singular mod 2.
    pub fn solve_parity(&self) -> Result<Parity> {
        let n = self.size;
        let words = (n + 1).div_ceil(64);
        let mut rows: Vec<Vec<u64>> = (0..n)
            .map(|r| {
                let mut packed = vec![0u64; words];
                for c in 0..n {
                    if self.get(r, c) == 1 {
                        packed[c / 64] |= 1 << (c % 64);
                    }
                }
                packed[n / 64] |= 1 << (n % 64);
                packed
            })
            .collect();

        for k in 0..n {
            let (word, bit) = (k / 64, 1u64 << (k % 64));
            let pivot = (k..n)
                .find(|&r| rows[r][word] & bit != 0)
                .ok_or(SpechtError::SingularMatrix { size: n })?;
            rows.swap(k, pivot);
            let pivot_line = rows[k].clone();
            for (i, line) in rows.iter_mut().enumerate() {
                if i != k && line[word] & bit != 0 {
                    for (dst, src) in line.iter_mut().zip(&pivot_line) {
                        *dst ^= src;
                    }
                }
            }
        }

        let (word, bit) = (n / 64, 1u64 << (n % 64));
        let ones = rows.iter().filter(|line| line[word] & bit != 0).count();
        Ok(Parity::from_bit(ones % 2 == 1))
    }
}

impl fmt::Display for IncidenceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            if r > 0 {
                writeln!(f)?;
            }
            let cells: Vec<String> = self.row(r).iter().map(|e| e.to_string()).collect();
            write!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// The integer solution vector of `M·x = 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    coefficients: Vec<BigInt>,
}

impl Solution {
    /// Wraps an already computed solution vector.
    pub fn new(coefficients: Vec<BigInt>) -> Self {
        Self { coefficients }
    }

    /// Entries of `x`.
    pub fn coefficients(&self) -> &[BigInt] {
        &self.coefficients
    }

    /// Sum of the entries: the invariant.
    pub fn sum(&self) -> BigInt {
        self.coefficients.iter().sum()
    }

    /// The invariant mod 2.
    pub fn parity(&self) -> Parity {
        let two = BigInt::from(2);
        Parity::from_bit(!(self.sum() % two).is_zero())
    }

    /// Largest absolute entry, zero for an empty solution.
    pub fn max_magnitude(&self) -> BigInt {
        self.coefficients
            .iter()
            .map(Signed::abs)
            .max()
            .unwrap_or_else(BigInt::zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[u8]]) -> IncidenceMatrix {
        let n = rows.len();
        let mut m = IncidenceMatrix::zeros(n);
        for (r, row) in rows.iter().enumerate() {
            for (c, &e) in row.iter().enumerate() {
                m.set(r, c, e);
            }
        }
        m
    }

    fn ints(values: &[i64]) -> Vec<BigInt> {
        values.iter().map(|&v| BigInt::from(v)).collect()
    }

    #[test]
    fn identity_solution_is_all_ones() {
        let x = IncidenceMatrix::identity(4).solve().unwrap();
        assert_eq!(x.coefficients(), ints(&[1, 1, 1, 1]).as_slice());
        assert_eq!(x.sum(), BigInt::from(4));
        assert_eq!(x.parity(), Parity::Even);
    }

    #[test]
    fn forward_substitution() {
        let m = matrix(&[&[1, 0, 0], &[1, 1, 0], &[1, 1, 1]]);
        assert!(m.is_unit_lower_triangular());
        let x = m.solve().unwrap();
        assert_eq!(x.coefficients(), ints(&[1, 0, 0]).as_slice());

        let m = matrix(&[&[1, 0, 0], &[1, 1, 0], &[0, 1, 1]]);
        let x = m.solve().unwrap();
        assert_eq!(x.coefficients(), ints(&[1, 0, 1]).as_slice());
        assert_eq!(x.parity(), Parity::Even);
    }

    #[test]
    fn negative_entries_reduce_correctly() {
        // x = (1, 0, 0, 1, -1): sum 1.
        let m = matrix(&[
            &[1, 0, 0, 0, 0],
            &[1, 1, 0, 0, 0],
            &[1, 0, 1, 0, 0],
            &[0, 0, 0, 1, 0],
            &[1, 0, 0, 1, 1],
        ]);
        let x = m.solve().unwrap();
        assert_eq!(x.coefficients(), ints(&[1, 0, 0, 1, -1]).as_slice());
        assert_eq!(x.parity(), Parity::Odd);
        assert_eq!(x.max_magnitude(), BigInt::from(1));
        assert_eq!(m.solve_parity().unwrap(), Parity::Odd);
    }

    #[test]
    fn general_elimination_matches_triangular() {
        let m = matrix(&[&[1, 0, 0], &[1, 1, 0], &[0, 1, 1]]);
        // Reverse the basis: P·M·Pᵀ is upper triangular.
        let n = m.size();
        let mut reversed = IncidenceMatrix::zeros(n);
        for r in 0..n {
            for c in 0..n {
                reversed.set(n - 1 - r, n - 1 - c, m.get(r, c));
            }
        }
        assert!(!reversed.is_unit_lower_triangular());
        let x = reversed.solve().unwrap();
        assert_eq!(x.coefficients(), ints(&[1, 0, 1]).as_slice());
        assert_eq!(x.sum(), m.solve().unwrap().sum());
    }

    #[test]
    fn elimination_with_pivoting() {
        // [[0, 1], [1, 1]] x = 1  =>  x = (0, 1).
        let m = matrix(&[&[0, 1], &[1, 1]]);
        let x = m.solve().unwrap();
        assert_eq!(x.coefficients(), ints(&[0, 1]).as_slice());
        assert_eq!(m.solve_parity().unwrap(), Parity::Odd);
    }

    #[test]
    fn singular_matrix_is_fatal() {
        let m = matrix(&[&[1, 1], &[1, 1]]);
        assert_eq!(m.solve(), Err(SpechtError::SingularMatrix { size: 2 }));
        assert_eq!(m.solve_parity(), Err(SpechtError::SingularMatrix { size: 2 }));
    }

    #[test]
    fn non_integral_solution_is_fatal() {
        // det = 2: x = (1/2, 1/2, 1/2).
        let m = matrix(&[&[1, 1, 0], &[0, 1, 1], &[1, 0, 1]]);
        assert_eq!(
            m.solve(),
            Err(SpechtError::NonIntegralSolution { index: 0 })
        );
    }

    #[test]
    fn from_columns_rejects_ragged_input() {
        let err = IncidenceMatrix::from_columns(vec![vec![1, 0], vec![1]]).unwrap_err();
        assert!(matches!(err, SpechtError::MalformedRow { index: 1, .. }));
        let m = IncidenceMatrix::from_columns(vec![vec![1, 1], vec![0, 1]]).unwrap();
        assert_eq!(m.column(0), vec![1, 1]);
        assert_eq!(m.to_string(), "1 0\n1 1");
        assert_eq!(m.nonzeros(), 3);
    }

    #[test]
    fn packed_rows_cross_word_boundaries() {
        let n = 70;
        let mut m = IncidenceMatrix::identity(n);
        for r in 1..n {
            m.set(r, r - 1, 1);
        }
        // x alternates 1, 0, 1, 0, ...: sum 35.
        let x = m.solve().unwrap();
        assert_eq!(x.sum(), BigInt::from(35));
        assert_eq!(m.solve_parity().unwrap(), Parity::Odd);
    }
}
