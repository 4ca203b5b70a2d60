//! Column-parallel assembly of the incidence matrix.
//!
//! The work is split in three stages:
//!
//! 1. [`row_vector`]: a pure task computing the vector of one standard
//!    tableau against every tableau at or after its own index, using the
//!    pairwise [`generates`](crate::orbit::generates) test.
//! 2. [`sort_by_leading_one`]: puts vectors delivered in any order back into
//!    canonical order.
//! 3. [`solve_columns`]: stacks the ordered vectors and solves.
//!
//! [`DistributedEvaluator`] runs stage 1 on a rayon pool. Scatter spawns one
//! task per tableau and returns a [`RowHandles`]; gather blocks until every
//! task has reported. A failed or lost task fails the whole shape.

use std::sync::{mpsc, Arc};

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Result, SpechtError};
use crate::matrix::{IncidenceMatrix, Solution};
use crate::orbit::PairwiseTest;
use crate::tableau::{Shape, StandardOrder, Tableau};

/// Vector of tableau `index`: entry `j` is one when `j ≥ index` and the
/// tableau filled with `values` generates `standards[j]`.
///
/// # Errors
///
/// Returns the tableau construction error if `values` do not fill `shape`.
pub fn row_vector(
    shape: &Shape,
    values: &[usize],
    standards: &[Tableau],
    index: usize,
) -> Result<Vec<u8>> {
    let source = Tableau::new(shape.clone(), values.to_vec())?;
    let test = PairwiseTest::new(&source);
    let mut row = vec![0u8; standards.len()];
    for (j, target) in standards.iter().enumerate().skip(index) {
        if test.generates(target) {
            row[j] = 1;
        }
    }
    Ok(row)
}

/// Orders vectors by the position of their first one.
///
/// # Errors
///
/// - [`SpechtError::MalformedRow`] for a vector of the wrong length, with an
///   entry other than 0 or 1, or with no one at all.
/// - [`SpechtError::DuplicateRow`] when two vectors lead at the same
///   position.
pub fn sort_by_leading_one(rows: Vec<Vec<u8>>) -> Result<Vec<Vec<u8>>> {
    let n = rows.len();
    let mut slots: Vec<Option<Vec<u8>>> = vec![None; n];
    for (index, row) in rows.into_iter().enumerate() {
        if row.len() != n {
            return Err(SpechtError::MalformedRow {
                index,
                reason: "length differs from the number of rows",
            });
        }
        if row.iter().any(|&e| e > 1) {
            return Err(SpechtError::MalformedRow {
                index,
                reason: "entry is not 0 or 1",
            });
        }
        let lead = row
            .iter()
            .position(|&e| e == 1)
            .ok_or(SpechtError::MalformedRow {
                index,
                reason: "no leading one",
            })?;
        let slot = &mut slots[lead];
        if slot.is_some() {
            return Err(SpechtError::DuplicateRow { position: lead });
        }
        *slot = Some(row);
    }
    // n vectors with distinct leads in 0..n fill every slot.
    Ok(slots.into_iter().flatten().collect())
}

/// Stacks canonically ordered vectors as matrix columns and solves.
///
/// # Errors
///
/// Propagates matrix construction and solve errors.
pub fn solve_columns(columns: Vec<Vec<u8>>) -> Result<Solution> {
    IncidenceMatrix::from_columns(columns)?.solve()
}

/// Worker pool for the row tasks.
#[derive(Debug)]
pub struct DistributedEvaluator {
    pool: ThreadPool,
}

impl DistributedEvaluator {
    /// Starts a pool with `workers` threads, or rayon's default count.
    ///
    /// # Errors
    ///
    /// Returns [`SpechtError::Pool`] when the threads cannot be spawned.
    pub fn new(workers: Option<usize>) -> Result<Self> {
        let mut builder = ThreadPoolBuilder::new()
            .thread_name(|i| format!("specht-row-{i}"))
            .panic_handler(|_| tracing::error!("row task panicked"));
        if let Some(workers) = workers {
            builder = builder.num_threads(workers);
        }
        let pool = builder
            .build()
            .map_err(|e| SpechtError::Pool(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Spawns one task per tableau of `order` and returns without waiting.
    pub fn scatter(&self, order: &StandardOrder) -> RowHandles {
        let (sender, receiver) = mpsc::channel();
        let standards: Arc<[Tableau]> = order.tableaux().into();
        for index in 0..standards.len() {
            let sender = sender.clone();
            let standards = Arc::clone(&standards);
            let shape = order.shape().clone();
            self.pool.spawn(move || {
                let values = standards[index].values();
                let row = row_vector(&shape, values, &standards, index);
                // The receiver is gone only if gather already failed.
                let _ = sender.send((index, row));
            });
        }
        tracing::debug!(shape = %order.shape(), tasks = standards.len(), "scattered row tasks");
        RowHandles {
            expected: standards.len(),
            receiver,
        }
    }

    /// Scatter, gather and reorder: the incidence matrix of `order`.
    ///
    /// # Errors
    ///
    /// Returns [`SpechtError::WorkerFailed`] or
    /// [`SpechtError::IncompleteRows`] from the gather, and the errors of
    /// [`sort_by_leading_one`] and [`IncidenceMatrix::from_columns`].
    pub fn matrix(&self, order: &StandardOrder) -> Result<IncidenceMatrix> {
        let rows = self.scatter(order).gather()?;
        IncidenceMatrix::from_columns(sort_by_leading_one(rows)?)
    }

    /// The solution vector of `order`'s incidence matrix.
    ///
    /// # Errors
    ///
    /// As [`matrix`](Self::matrix), plus solve errors.
    pub fn solve(&self, order: &StandardOrder) -> Result<Solution> {
        let rows = self.scatter(order).gather()?;
        solve_columns(sort_by_leading_one(rows)?)
    }
}

/// Pending row tasks of one shape.
#[derive(Debug)]
pub struct RowHandles {
    expected: usize,
    receiver: mpsc::Receiver<(usize, Result<Vec<u8>>)>,
}

impl RowHandles {
    /// Number of tasks dispatched.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Blocks until every task has delivered or dropped its sender.
    ///
    /// Vectors come back in delivery order.
    ///
    /// # Errors
    ///
    /// - [`SpechtError::WorkerFailed`] for the first failed task.
    /// - [`SpechtError::IncompleteRows`] when a task never delivered.
    pub fn gather(self) -> Result<Vec<Vec<u8>>> {
        let mut rows = Vec::with_capacity(self.expected);
        for (index, row) in self.receiver.iter() {
            let row = row.map_err(|e| SpechtError::WorkerFailed {
                index,
                reason: e.to_string(),
            })?;
            rows.push(row);
        }
        if rows.len() != self.expected {
            return Err(SpechtError::IncompleteRows {
                expected: self.expected,
                received: rows.len(),
            });
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::build_matrix;
    use crate::orbit::OrbitPolicy;

    fn order(rows: &[usize]) -> StandardOrder {
        StandardOrder::new(&Shape::new(rows.to_vec()).unwrap())
    }

    #[test]
    fn row_vector_starts_on_the_diagonal() {
        let order = order(&[3, 2]);
        for (i, t) in order.iter().enumerate() {
            let row = row_vector(order.shape(), t.values(), order.tableaux(), i).unwrap();
            assert_eq!(row.iter().position(|&e| e == 1), Some(i));
        }
    }

    #[test]
    fn row_vector_rejects_bad_values() {
        let order = order(&[3, 2]);
        let err = row_vector(order.shape(), &[1, 2, 3], order.tableaux(), 0).unwrap_err();
        assert!(matches!(err, SpechtError::ShapeMismatch { .. }));
    }

    #[test]
    fn sorting_restores_canonical_order() {
        let rows = vec![vec![0, 0, 1], vec![1, 1, 0], vec![0, 1, 1]];
        let sorted = sort_by_leading_one(rows).unwrap();
        assert_eq!(sorted, vec![vec![1, 1, 0], vec![0, 1, 1], vec![0, 0, 1]]);
    }

    #[test]
    fn sorting_rejects_inconsistent_rows() {
        assert_eq!(
            sort_by_leading_one(vec![vec![1, 0], vec![1, 1]]),
            Err(SpechtError::DuplicateRow { position: 0 })
        );
        assert!(matches!(
            sort_by_leading_one(vec![vec![1, 0], vec![0, 0]]),
            Err(SpechtError::MalformedRow { index: 1, .. })
        ));
        assert!(matches!(
            sort_by_leading_one(vec![vec![1, 0, 0], vec![0, 1]]),
            Err(SpechtError::MalformedRow { index: 0, .. })
        ));
    }

    #[test]
    fn pool_matches_sequential_assembly() {
        let evaluator = DistributedEvaluator::new(Some(3)).unwrap();
        assert_eq!(evaluator.workers(), 3);
        for rows in [&[3, 2][..], &[2, 2, 1][..], &[4, 2, 1][..], &[3, 3, 1][..]] {
            let order = order(rows);
            let sequential = build_matrix(&order, OrbitPolicy::Parity);
            assert_eq!(evaluator.matrix(&order).unwrap(), sequential, "{rows:?}");
            assert_eq!(
                evaluator.solve(&order).unwrap(),
                sequential.solve().unwrap()
            );
        }
    }

    #[test]
    fn gather_counts_every_task() {
        let evaluator = DistributedEvaluator::new(Some(2)).unwrap();
        let order = order(&[4, 2, 1]);
        let handles = evaluator.scatter(&order);
        assert_eq!(handles.expected(), 35);
        assert_eq!(handles.gather().unwrap().len(), 35);
    }
}
