//! Column-stabilizer orbits of standard tableaux.
//!
//! The column stabilizer of a tableau permutes values freely inside each
//! column and never across columns. Applying one of its elements and then
//! sorting every row gives a tabloid representative; the standard ones form
//! the orbit relation of the tableau.
//!
//! Two ways to get the relation:
//!
//! - [`orbit_relation`] walks the whole stabilizer (with the first column
//!   pinned so that `1` stays in the corner) and accounts for arrivals with
//!   an [`OrbitPolicy`].
//! - [`PairwiseTest::generates`] decides, for one target tableau, whether a
//!   column permutation exists, without walking the group.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::tableau::{Shape, Tableau};

/// Accounting for a target tableau reached more than once.
///
/// A tabloid is reached by at most one column permutation (a row
/// permutation that is also a column permutation is the identity), so both
/// policies give the same relation. Parity is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrbitPolicy {
    /// A reached tableau is related once, however many arrivals.
    Set,
    /// Arrivals are summed in GF(2); an even count cancels.
    #[default]
    Parity,
}

/// Lexicographic successor of `values`; false once the last permutation is
/// passed (the slice is then left sorted descending).
fn next_permutation(values: &mut [usize]) -> bool {
    let Some(pivot) = values.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let successor = values
        .iter()
        .rposition(|&v| v > values[pivot])
        .unwrap_or(pivot + 1);
    values.swap(pivot, successor);
    values[pivot + 1..].reverse();
    true
}

/// Every ordering of `values`.
fn permutations(values: &[usize]) -> Vec<Vec<usize>> {
    let mut current = values.to_vec();
    current.sort_unstable();
    let mut all = vec![current.clone()];
    while next_permutation(&mut current) {
        all.push(current.clone());
    }
    all
}

/// Column stabilizer of one tableau, enumerated as value grids.
///
/// Iteration is an odometer over the per-column permutation lists, so the
/// group is never materialized as a whole.
#[derive(Debug, Clone)]
pub struct ColumnStabilizer {
    template: Vec<usize>,
    columns: Vec<Vec<usize>>,
    choices: Vec<Vec<Vec<usize>>>,
}

impl ColumnStabilizer {
    /// The full stabilizer of `t`.
    pub fn new(t: &Tableau) -> Self {
        Self::build(t, false)
    }

    /// The elements that keep the corner value of the first column in place.
    ///
    /// For a standard tableau the corner holds `1`, and moving it down can
    /// never yield a standard tableau.
    pub fn pinned(t: &Tableau) -> Self {
        Self::build(t, true)
    }

    fn build(t: &Tableau, pin_corner: bool) -> Self {
        let columns = t.shape().column_indices();
        let values = t.values();
        let choices = columns
            .iter()
            .enumerate()
            .map(|(c, cells)| {
                let column: Vec<usize> = cells.iter().map(|&i| values[i]).collect();
                let mut perms = permutations(&column);
                if pin_corner && c == 0 {
                    perms.retain(|perm| perm[0] == values[0]);
                }
                perms
            })
            .collect();
        Self {
            template: values.to_vec(),
            columns,
            choices,
        }
    }

    /// Number of elements enumerated, saturating.
    pub fn order(&self) -> u128 {
        self.choices
            .iter()
            .fold(1u128, |acc, perms| acc.saturating_mul(perms.len() as u128))
    }

    /// Value grids obtained by applying every element positionally.
    pub fn images(&self) -> StabilizerImages<'_> {
        StabilizerImages {
            stabilizer: self,
            odometer: vec![0; self.choices.len()],
            exhausted: self.choices.iter().any(Vec::is_empty),
        }
    }
}

/// Iterator over [`ColumnStabilizer::images`].
#[derive(Debug)]
pub struct StabilizerImages<'a> {
    stabilizer: &'a ColumnStabilizer,
    odometer: Vec<usize>,
    exhausted: bool,
}

impl Iterator for StabilizerImages<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.exhausted {
            return None;
        }
        let s = self.stabilizer;
        let mut grid = s.template.clone();
        for ((cells, perms), &pick) in s.columns.iter().zip(&s.choices).zip(&self.odometer) {
            for (&cell, &value) in cells.iter().zip(&perms[pick]) {
                grid[cell] = value;
            }
        }

        // Advance, least significant column last.
        self.exhausted = true;
        for c in (0..self.odometer.len()).rev() {
            self.odometer[c] += 1;
            if self.odometer[c] < s.choices[c].len() {
                self.exhausted = false;
                break;
            }
            self.odometer[c] = 0;
        }
        Some(grid)
    }
}

/// Every standard tableau produced by the pinned stabilizer of `t` after
/// row sorting, with multiplicity (identity image included).
pub fn orbit(t: &Tableau) -> Vec<Tableau> {
    let shape = t.shape().clone();
    ColumnStabilizer::pinned(t)
        .images()
        .filter_map(|grid| {
            let mut image = Tableau::from_filled(shape.clone(), grid);
            image.sort_rows();
            image.is_standard().then_some(image)
        })
        .collect()
}

/// Standard tableaux related to `t`, excluding `t` itself.
///
/// Output order is unspecified.
pub fn orbit_relation(t: &Tableau, policy: OrbitPolicy) -> Vec<Tableau> {
    let mut arrivals: HashMap<Tableau, usize> = HashMap::new();
    for image in orbit(t) {
        if image != *t {
            *arrivals.entry(image).or_insert(0) += 1;
        }
    }
    let related: Vec<Tableau> = arrivals
        .into_iter()
        .filter(|(_, count)| match policy {
            OrbitPolicy::Set => true,
            OrbitPolicy::Parity => count % 2 == 1,
        })
        .map(|(image, _)| image)
        .collect();
    for s in &related {
        tracing::trace!(from = ?t.values(), to = ?s.values(), "column orbit reaches");
    }
    related
}

/// Pairwise form of the orbit relation for a fixed source tableau.
#[derive(Debug, Clone)]
pub struct PairwiseTest<'a> {
    source: &'a Tableau,
    coords: Vec<(usize, usize)>,
}

impl<'a> PairwiseTest<'a> {
    /// Prepares the test for `source`.
    pub fn new(source: &'a Tableau) -> Self {
        Self {
            source,
            coords: source.shape().coordinates(),
        }
    }

    /// Whether some column permutation of the source, row-sorted, equals
    /// `target`.
    ///
    /// Every value must move, within its column, to the row it occupies in
    /// `target`; the move is feasible when no destination cell is claimed
    /// twice and every destination exists.
    pub fn generates(&self, target: &Tableau) -> bool {
        let shape: &Shape = self.source.shape();
        if shape != target.shape() {
            return false;
        }
        let values = self.source.values();
        let destination_rows = target.row_of_values();
        let mut claimed = vec![false; values.len() + 1];
        for (i, &value) in values.iter().enumerate() {
            let (r, c) = self.coords[i];
            let row = destination_rows[value];
            let occupant = if row == r {
                value
            } else {
                match shape.index(row, c) {
                    Some(j) => values[j],
                    None => return false,
                }
            };
            if claimed[occupant] {
                return false;
            }
            claimed[occupant] = true;
        }
        true
    }
}

/// Shorthand for a one-off [`PairwiseTest`].
pub fn generates(source: &Tableau, target: &Tableau) -> bool {
    PairwiseTest::new(source).generates(target)
}
