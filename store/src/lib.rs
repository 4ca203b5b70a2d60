//! Persistence and query surface for Specht parities.
//!
//! | Module | Role |
//! |--------|------|
//! | [`sqlite`] | `specht` table, [`SolutionStore`](specht::SolutionStore) implementation |
//! | [`query`] | selection by partition, `n`, parity, family |
//! | [`format`] | report rows and messages |
//! | [`settings`] | `specht.toml` and environment overrides |
//!
//! # Entry Point
//!
//! ```
//! use specht::{Driver, EvaluatorConfig};
//! use specht_store::{Query, SqliteStore};
//!
//! let store = SqliteStore::open_in_memory().unwrap();
//! let config = EvaluatorConfig { max_n: Some(5), ..EvaluatorConfig::default() };
//! let mut driver = Driver::resume(store, config).unwrap();
//! driver.run().unwrap();
//!
//! let answer = Query::N(5).run(driver.store()).unwrap();
//! assert_eq!(answer.records.len(), 3);
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod error;
pub mod format;
pub mod query;
pub mod settings;
pub mod sqlite;

pub use error::{Result, StoreError};
pub use format::{format_rows, not_found, Row, INCOMPLETE_WARNING};
pub use query::{Answer, Query};
pub use settings::Settings;
pub use sqlite::SqliteStore;
