//! Young tableaux and the canonical order of standard tableaux.
//!
//! A [`Tableau`] fills the cells of a [`Shape`] with `1..=n`, stored
//! row-major. [`total_order`] enumerates every standard tableau of a shape by
//! placing labels from `n` down to `1` into free corners; [`StandardOrder`]
//! fixes the reversed enumeration as the index set of the incidence matrix.
//!
//! # Examples
//!
//! ```
//! use specht::{Partition, Shape, StandardOrder};
//!
//! let shape = Shape::from(&Partition::new(vec![3, 2]).unwrap());
//! let order = StandardOrder::new(&shape);
//! assert_eq!(order.len(), 5);
//! assert_eq!(order.get(0).unwrap().values(), &[1, 2, 3, 4, 5]);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::One;

use crate::error::{Result, SpechtError};
use crate::partition::Partition;

/// Row lengths of a Young diagram, longest first.
///
/// Cheap to clone; the row table is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: Arc<[usize]>,
}

impl Shape {
    /// Builds a shape from row lengths.
    ///
    /// # Errors
    ///
    /// Returns [`SpechtError::InvalidPartition`] for an empty row list or a
    /// zero-length row. Rows are sorted descending.
    pub fn new(rows: impl Into<Vec<usize>>) -> Result<Self> {
        Partition::new(rows).map(|p| Self::from(&p))
    }

    /// Row lengths.
    #[inline]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (length of the first row).
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.rows[0]
    }

    /// Number of cells.
    #[inline]
    pub fn cells(&self) -> usize {
        self.rows.iter().sum()
    }

    /// Height of column `c`.
    pub fn column_height(&self, c: usize) -> usize {
        self.rows.iter().take_while(|&&len| len > c).count()
    }

    /// Flat index of the first cell of row `r`.
    pub fn row_start(&self, r: usize) -> usize {
        self.rows[..r].iter().sum()
    }

    /// Flat index of cell `(r, c)`, if the cell exists.
    pub fn index(&self, r: usize, c: usize) -> Option<usize> {
        match self.rows.get(r) {
            Some(&len) if c < len => Some(self.row_start(r) + c),
            _ => None,
        }
    }

    /// `(row, column)` of every flat index, row-major.
    pub fn coordinates(&self) -> Vec<(usize, usize)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, &len)| (0..len).map(move |c| (r, c)))
            .collect()
    }

    /// Flat indices of each column, top to bottom.
    pub fn column_indices(&self) -> Vec<Vec<usize>> {
        let starts: Vec<usize> = (0..self.num_rows()).map(|r| self.row_start(r)).collect();
        (0..self.num_columns())
            .map(|c| {
                (0..self.column_height(c))
                    .map(|r| starts[r] + c)
                    .collect()
            })
            .collect()
    }

    /// Number of standard tableaux, by the hook-length formula.
    pub fn dimension(&self) -> BigUint {
        let n = self.cells();
        let numerator = (1..=n).fold(BigUint::one(), |acc, k| acc * BigUint::from(k));
        let mut denominator = BigUint::one();
        for (r, &len) in self.rows.iter().enumerate() {
            for c in 0..len {
                let arm = len - c - 1;
                let leg = self.column_height(c) - r - 1;
                denominator *= BigUint::from(arm + leg + 1);
            }
        }
        numerator / denominator
    }

    /// The shape as a partition.
    pub fn to_partition(&self) -> Partition {
        Partition::from_positive(self.rows.to_vec())
    }
}

impl From<&Partition> for Shape {
    fn from(p: &Partition) -> Self {
        Self {
            rows: Arc::from(p.parts()),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self.rows.iter().map(|r| r.to_string()).collect();
        write!(f, "({})", rows.join(","))
    }
}

/// A shape filled with `1..=n`, stored row-major.
///
/// Equality and hashing use the shape and the values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tableau {
    shape: Shape,
    values: Vec<usize>,
}

impl Tableau {
    /// Builds a tableau.
    ///
    /// # Errors
    ///
    /// Returns [`SpechtError::ShapeMismatch`] when the value count differs
    /// from the cell count, and [`SpechtError::InvalidFilling`] when the
    /// values are not a permutation of `1..=n`.
    pub fn new(shape: Shape, values: Vec<usize>) -> Result<Self> {
        let n = shape.cells();
        if values.len() != n {
            return Err(SpechtError::ShapeMismatch {
                shape: shape.rows().to_vec(),
                cells: n,
                values: values.len(),
            });
        }
        let mut seen = vec![false; n + 1];
        for &v in &values {
            if v == 0 || v > n || seen[v] {
                return Err(SpechtError::InvalidFilling { n, values });
            }
            seen[v] = true;
        }
        Ok(Self { shape, values })
    }

    /// Row-superstandard filling: `1..=n` in reading order.
    pub fn row_reading(shape: &Shape) -> Self {
        Self {
            shape: shape.clone(),
            values: (1..=shape.cells()).collect(),
        }
    }

    /// Internal constructor for fillings already known to be valid.
    pub(crate) fn from_filled(shape: Shape, values: Vec<usize>) -> Self {
        debug_assert_eq!(shape.cells(), values.len());
        Self { shape, values }
    }

    /// The shape.
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Values in row-major order.
    #[inline]
    pub fn values(&self) -> &[usize] {
        &self.values
    }

    /// Consumes the tableau, returning its row-major values.
    pub fn into_values(self) -> Vec<usize> {
        self.values
    }

    /// Row `r`, left to right.
    pub fn row(&self, r: usize) -> &[usize] {
        let start = self.shape.row_start(r);
        &self.values[start..start + self.shape.rows()[r]]
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> + '_ {
        (0..self.shape.num_rows()).map(move |r| self.row(r))
    }

    /// All columns, each top to bottom.
    pub fn columns(&self) -> Vec<Vec<usize>> {
        self.shape
            .column_indices()
            .into_iter()
            .map(|column| column.into_iter().map(|i| self.values[i]).collect())
            .collect()
    }

    /// Row of every value: `rows[v]` is the row holding `v` (index 0 unused).
    pub fn row_of_values(&self) -> Vec<usize> {
        let mut rows = vec![0; self.values.len() + 1];
        for (r, row) in self.rows().enumerate() {
            for &v in row {
                rows[v] = r;
            }
        }
        rows
    }

    /// Rows increase left to right and columns increase top to bottom.
    pub fn is_standard(&self) -> bool {
        let rows_ok = self.rows().all(|row| row.windows(2).all(|w| w[0] < w[1]));
        rows_ok
            && self
                .columns()
                .iter()
                .all(|col| col.windows(2).all(|w| w[0] < w[1]))
    }

    /// Sorts every row ascending (the tabloid's canonical representative).
    pub fn sort_rows(&mut self) {
        let mut start = 0;
        for &len in self.shape.rows() {
            self.values[start..start + len].sort_unstable();
            start += len;
        }
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.rows().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            write!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Lazy enumeration of every standard tableau of a shape.
///
/// Depth-first over the corner-placement search tree: each stack entry is a
/// partially filled grid (`0` marks an empty cell) and the next label to
/// place. Children are pushed in reverse so cells are tried in reading
/// order. Finite and not restartable.
#[derive(Debug, Clone)]
pub struct TotalOrder {
    shape: Shape,
    coords: Vec<(usize, usize)>,
    stack: Vec<(Vec<usize>, usize)>,
}

/// Starts the standard-tableau search for `shape`.
///
/// Items arrive in search order; [`StandardOrder`] reverses them.
pub fn total_order(shape: &Shape) -> TotalOrder {
    let n = shape.cells();
    TotalOrder {
        shape: shape.clone(),
        coords: shape.coordinates(),
        stack: vec![(vec![0; n], n)],
    }
}

impl TotalOrder {
    /// An empty cell whose lower and right neighbours are absent or filled.
    fn is_free_corner(&self, grid: &[usize], i: usize) -> bool {
        let (r, c) = self.coords[i];
        let rows = self.shape.rows();
        let below_clear = match self.shape.index(r + 1, c) {
            None => true,
            Some(below) => grid[below] != 0,
        };
        let right_clear = c + 1 == rows[r] || grid[i + 1] != 0;
        grid[i] == 0 && below_clear && right_clear
    }
}

impl Iterator for TotalOrder {
    type Item = Tableau;

    fn next(&mut self) -> Option<Tableau> {
        while let Some((grid, label)) = self.stack.pop() {
            if label == 0 {
                return Some(Tableau::from_filled(self.shape.clone(), grid));
            }
            let corners: Vec<usize> = (0..grid.len())
                .filter(|&i| self.is_free_corner(&grid, i))
                .collect();
            for &i in corners.iter().rev() {
                let mut child = grid.clone();
                child[i] = label;
                self.stack.push((child, label - 1));
            }
        }
        None
    }
}

/// The canonical, indexed list of standard tableaux of a shape.
#[derive(Debug, Clone)]
pub struct StandardOrder {
    shape: Shape,
    tableaux: Vec<Tableau>,
    index: HashMap<Tableau, usize>,
}

impl StandardOrder {
    /// Enumerates and indexes every standard tableau of `shape`.
    pub fn new(shape: &Shape) -> Self {
        let mut tableaux: Vec<Tableau> = total_order(shape).collect();
        tableaux.reverse();
        tracing::debug!(shape = %shape, count = tableaux.len(), "enumerated standard tableaux");
        Self::from_tableaux(shape.clone(), tableaux)
    }

    /// Indexes an already ordered list.
    pub fn from_tableaux(shape: Shape, tableaux: Vec<Tableau>) -> Self {
        let index = tableaux
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self {
            shape,
            tableaux,
            index,
        }
    }

    /// The shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of standard tableaux.
    pub fn len(&self) -> usize {
        self.tableaux.len()
    }

    /// Always false for a valid shape.
    pub fn is_empty(&self) -> bool {
        self.tableaux.is_empty()
    }

    /// Tableau at canonical index `i`.
    pub fn get(&self, i: usize) -> Option<&Tableau> {
        self.tableaux.get(i)
    }

    /// Canonical index of `t`.
    pub fn index_of(&self, t: &Tableau) -> Option<usize> {
        self.index.get(t).copied()
    }

    /// Tableaux in canonical order.
    pub fn tableaux(&self) -> &[Tableau] {
        &self.tableaux
    }

    /// Iterates in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tableau> {
        self.tableaux.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn shape(rows: &[usize]) -> Shape {
        Shape::new(rows.to_vec()).unwrap()
    }

    #[test]
    fn value_count_mismatch_is_rejected() {
        let err = Tableau::new(shape(&[3, 2]), vec![1, 2, 3, 4]).unwrap_err();
        assert!(matches!(err, SpechtError::ShapeMismatch { cells: 5, values: 4, .. }));
        let err = Tableau::new(shape(&[2, 1]), vec![1, 1, 3]).unwrap_err();
        assert!(matches!(err, SpechtError::InvalidFilling { n: 3, .. }));
    }

    #[test]
    fn rows_and_columns() {
        let t = Tableau::new(shape(&[3, 2]), vec![1, 3, 4, 2, 5]).unwrap();
        assert_eq!(t.row(0), &[1, 3, 4]);
        assert_eq!(t.row(1), &[2, 5]);
        assert_eq!(t.columns(), vec![vec![1, 2], vec![3, 5], vec![4]]);
        assert!(t.is_standard());
        assert_eq!(t.to_string(), "1 3 4\n2 5");
        assert_eq!(t.row_of_values()[5], 1);
    }

    #[test]
    fn standard_check() {
        let not_row = Tableau::new(shape(&[3, 2]), vec![1, 4, 3, 2, 5]).unwrap();
        assert!(!not_row.is_standard());
        let not_col = Tableau::new(shape(&[3, 2]), vec![2, 3, 4, 1, 5]).unwrap();
        assert!(!not_col.is_standard());
    }

    #[test]
    fn sort_rows_canonicalizes() {
        let mut t = Tableau::new(shape(&[3, 2]), vec![4, 1, 3, 5, 2]).unwrap();
        t.sort_rows();
        assert_eq!(t.values(), &[1, 3, 4, 2, 5]);
    }

    #[test]
    fn canonical_order_of_three_two() {
        let order = StandardOrder::new(&shape(&[3, 2]));
        let values: Vec<Vec<usize>> = order.iter().map(|t| t.values().to_vec()).collect();
        let expected: Vec<Vec<usize>> = vec![
            vec![1, 2, 3, 4, 5],
            vec![1, 2, 4, 3, 5],
            vec![1, 3, 4, 2, 5],
            vec![1, 2, 5, 3, 4],
            vec![1, 3, 5, 2, 4],
        ];
        assert_eq!(values, expected);
        assert_eq!(order.index_of(order.get(3).unwrap()), Some(3));
    }

    #[test]
    fn counts_match_hook_length_formula() {
        for n in 1..=8 {
            for p in Partition::all(n) {
                let s = Shape::from(&p);
                let tableaux: Vec<Tableau> = total_order(&s).collect();
                assert_eq!(BigUint::from(tableaux.len()), s.dimension(), "shape {s}");
                assert!(tableaux.iter().all(Tableau::is_standard));
                let unique: HashSet<&Tableau> = tableaux.iter().collect();
                assert_eq!(unique.len(), tableaux.len());
            }
        }
    }

    #[test]
    fn dimension_examples() {
        assert_eq!(shape(&[3, 2]).dimension(), BigUint::from(5u32));
        assert_eq!(shape(&[3, 3, 3]).dimension(), BigUint::from(42u32));
        assert_eq!(shape(&[1]).dimension(), BigUint::from(1u32));
    }

    #[test]
    fn shape_geometry() {
        let s = shape(&[3, 2, 2]);
        assert_eq!(s.column_height(0), 3);
        assert_eq!(s.column_height(2), 1);
        assert_eq!(s.index(1, 1), Some(4));
        assert_eq!(s.index(1, 2), None);
        assert_eq!(s.column_indices(), vec![vec![0, 3, 5], vec![1, 4, 6], vec![2]]);
        assert_eq!(s.to_partition().parts(), &[3, 2, 2]);
    }
}
