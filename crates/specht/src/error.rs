//! Error types for the engine.
//!
//! Every variant is a precondition or internal-consistency failure. None of
//! them is recoverable by retrying the same computation.

use thiserror::Error;

/// Errors raised by the partition, tableau, matrix and evaluation layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpechtError {
    /// A partition was given with no parts, or with a zero part.
    #[error("invalid partition {parts:?}: parts must be positive and non-empty")]
    InvalidPartition {
        /// The offending parts as supplied.
        parts: Vec<usize>,
    },

    /// A partition string could not be parsed.
    #[error("cannot parse partition from {input:?}")]
    UnparsablePartition {
        /// The rejected input.
        input: String,
    },

    /// The number of values does not match the number of cells of the shape.
    #[error("shape {shape:?} has {cells} cells but {values} values were supplied")]
    ShapeMismatch {
        /// Row lengths of the shape.
        shape: Vec<usize>,
        /// Number of cells of the shape.
        cells: usize,
        /// Number of values supplied.
        values: usize,
    },

    /// The values are not a permutation of `1..=n`.
    #[error("values {values:?} are not a filling of 1..={n}")]
    InvalidFilling {
        /// Cell count of the shape.
        n: usize,
        /// The rejected values.
        values: Vec<usize>,
    },

    /// A row vector has the wrong length or no leading one.
    #[error("row {index} is malformed: {reason}")]
    MalformedRow {
        /// Position of the row in the delivered collection.
        index: usize,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Fewer or more rows arrived at the fan-in barrier than were dispatched.
    #[error("expected {expected} rows at fan-in, received {received}")]
    IncompleteRows {
        /// Number of row tasks dispatched.
        expected: usize,
        /// Number of rows received.
        received: usize,
    },

    /// Two delivered rows claim the same leading position.
    #[error("two rows share leading position {position}")]
    DuplicateRow {
        /// The contested leading position.
        position: usize,
    },

    /// A row task failed in the worker pool.
    #[error("row task {index} failed: {reason}")]
    WorkerFailed {
        /// Index of the tableau whose row failed.
        index: usize,
        /// Failure description.
        reason: String,
    },

    /// The worker pool could not be created.
    #[error("cannot build worker pool: {0}")]
    Pool(String),

    /// The incidence matrix has no unique solution.
    #[error("incidence matrix of size {size} is singular")]
    SingularMatrix {
        /// Matrix dimension.
        size: usize,
    },

    /// The unique rational solution has a non-integer entry.
    #[error("solution entry {index} is not an integer")]
    NonIntegralSolution {
        /// Offending position in the solution vector.
        index: usize,
    },
}

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, SpechtError>;
