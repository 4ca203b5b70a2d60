//! Specht parity: a mod-2 invariant of 2-special partitions.
//!
//! For a partition `λ ⊢ n`, the standard Young tableaux of shape `λ` are
//! related through the column stabilizer: permute values inside columns,
//! sort the rows, keep what is standard again. Stacking these relations as
//! columns gives a unit lower triangular 0/1 matrix `M` in the canonical
//! tableau order. The invariant is the sum of the entries of the integer
//! solution of `M·x = 1`, reduced mod 2.
//!
//! # Pipeline
//!
//! ```text
//! Partition ──► Shape ──► StandardOrder ──► orbit relations ──► IncidenceMatrix ──► Parity
//!  (filter)              (corner search)   (column stabilizer)   (exact solve)
//! ```
//!
//! | Stage | Module |
//! |-------|--------|
//! | partitions, conjugation, 2-special filter | [`partition`] |
//! | family closed forms | [`family`] |
//! | standard tableaux in canonical order | [`tableau`] |
//! | column-stabilizer relation | [`orbit`] |
//! | matrix and solve | [`matrix`] |
//! | per-partition evaluation | [`evaluate`] |
//! | worker-pool assembly | [`distributed`] |
//! | population loop and store boundary | [`driver`] |
//!
//! # Example
//!
//! ```
//! use specht::{find_solution, OrbitPolicy, Parity, Partition, Shape};
//!
//! let p: Partition = "3,3,1".parse().unwrap();
//! assert!(p.is_2special());
//!
//! let solution = find_solution(&Shape::from(&p), OrbitPolicy::Parity).unwrap();
//! assert_eq!(solution.parity(), Parity::Odd);
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

// Error type shared by every stage
pub mod error;

// Partitions of n, conjugation, 2-special filter
pub mod partition;

// Parity bit and lookup record
pub mod record;

// One-dimensional, self-conjugate and hook families
pub mod family;

// Shapes, tableaux, canonical standard order
pub mod tableau;

// Column-stabilizer orbits and the pairwise test
pub mod orbit;

// Incidence matrix and exact solve
pub mod matrix;

// Sequential pipeline and per-partition evaluation
pub mod evaluate;

// Scatter/gather assembly on a worker pool
pub mod distributed;

// Population loop over n
pub mod driver;

pub use distributed::{DistributedEvaluator, RowHandles};
pub use driver::{candidates, Driver, DriverError, MemoryStore, SolutionStore, StepReport};
pub use error::{Result, SpechtError};
pub use evaluate::{
    build_matrix, cheaper_side, find_solution, Evaluation, Evaluator, EvaluatorConfig, Method,
    Strategy, UnknownStrategy,
};
pub use family::{Family, UnknownFamily};
pub use matrix::{IncidenceMatrix, Solution};
pub use orbit::{generates, orbit_relation, OrbitPolicy, PairwiseTest};
pub use partition::{hook_parity, hooks, one_dimensional, self_conjugates, Partition, Partitions};
pub use record::{LookupRecord, Parity};
pub use tableau::{total_order, Shape, StandardOrder, Tableau, TotalOrder};
