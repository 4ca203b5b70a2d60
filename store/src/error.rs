//! Store error type.

use std::path::PathBuf;

use specht::{SpechtError, UnknownFamily};
use thiserror::Error;

/// Failures of the store, the query surface and settings loading.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite rejected a statement.
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A family tag that names no family.
    #[error(transparent)]
    UnknownFamily(#[from] UnknownFamily),

    /// A stored partition key does not parse.
    #[error("stored partition {key:?} is malformed: {source}")]
    MalformedPartition {
        /// The stored key.
        key: String,
        /// Parse failure.
        #[source]
        source: SpechtError,
    },

    /// A stored solution is not 0 or 1.
    #[error("stored solution {value} for {key:?} is not a parity bit")]
    MalformedSolution {
        /// The stored key.
        key: String,
        /// The stored value.
        value: i64,
    },

    /// A stored `n` disagrees with the partition it belongs to.
    #[error("stored n = {n} for {key:?} does not match the partition size")]
    InconsistentRecord {
        /// The stored key.
        key: String,
        /// The stored `n`.
        n: i64,
    },

    /// The settings file cannot be read.
    #[error("cannot read settings {}: {source}", path.display())]
    SettingsIo {
        /// Settings file path.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid.
    #[error("cannot parse settings {}: {source}", path.display())]
    SettingsParse {
        /// Settings file path.
        path: PathBuf,
        /// TOML failure.
        #[source]
        source: toml::de::Error,
    },
}

/// Convenience alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;
