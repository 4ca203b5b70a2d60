//! SQLite persistence.
//!
//! One table, keyed by the canonical partition string:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS specht (n INTEGER, partition TEXT PRIMARY KEY, solution INTEGER)
//! ```
//!
//! A partition and its conjugate are written in one transaction with
//! `INSERT OR REPLACE`, so repeated writes are idempotent.

use std::fmt;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};
use specht::{LookupRecord, Parity, Partition, SolutionStore};

use crate::error::{Result, StoreError};

/// Table definition, applied on open.
pub const SCHEMA: &str =
    "CREATE TABLE IF NOT EXISTS specht (n INTEGER, partition TEXT PRIMARY KEY, solution INTEGER)";

const UPSERT: &str = "INSERT OR REPLACE INTO specht (n, partition, solution) VALUES (?1, ?2, ?3)";

/// A lookup table in a SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlite`] if the file cannot be opened or the
    /// schema cannot be applied.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening store");
        Self::init(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlite`] if the schema cannot be applied.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// The record for `p`, if stored.
    ///
    /// # Errors
    ///
    /// SQLite failures and malformed stored rows.
    pub fn by_partition(&self, p: &Partition) -> Result<Option<LookupRecord>> {
        let raw = self
            .conn
            .query_row(
                "SELECT n, partition, solution FROM specht WHERE partition = ?1",
                params![p.key()],
                raw_row,
            )
            .optional()?;
        raw.map(decode).transpose()
    }

    /// Every record of `n`.
    ///
    /// # Errors
    ///
    /// SQLite failures and malformed stored rows.
    pub fn by_n(&self, n: usize) -> Result<Vec<LookupRecord>> {
        self.select(
            "SELECT n, partition, solution FROM specht WHERE n = ?1",
            params![i64::try_from(n).unwrap_or(i64::MAX)],
        )
    }

    /// Every record with the given parity.
    ///
    /// # Errors
    ///
    /// SQLite failures and malformed stored rows.
    pub fn by_solution(&self, parity: Parity) -> Result<Vec<LookupRecord>> {
        self.select(
            "SELECT n, partition, solution FROM specht WHERE solution = ?1",
            params![parity.bit()],
        )
    }

    /// Every record.
    ///
    /// # Errors
    ///
    /// SQLite failures and malformed stored rows.
    pub fn all(&self) -> Result<Vec<LookupRecord>> {
        self.select("SELECT n, partition, solution FROM specht", [])
    }

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// SQLite failures.
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT count(*) FROM specht", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Largest stored `n`.
    ///
    /// # Errors
    ///
    /// SQLite failures.
    pub fn max_n(&self) -> Result<Option<usize>> {
        let max: Option<i64> = self
            .conn
            .query_row("SELECT max(n) FROM specht", [], |row| row.get(0))?;
        Ok(max.and_then(|n| usize::try_from(n).ok()))
    }

    /// Writes `record` and its conjugate's record in one transaction.
    ///
    /// # Errors
    ///
    /// SQLite failures; nothing is written then.
    pub fn upsert_pair(&mut self, record: &LookupRecord) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(UPSERT)?;
            for r in [record.clone(), record.conjugate()] {
                stmt.execute(params![
                    i64::try_from(r.n).unwrap_or(i64::MAX),
                    r.partition.key(),
                    r.parity.bit()
                ])?;
                tracing::trace!(n = r.n, partition = %r.partition, parity = %r.parity, "upsert");
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn select<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<LookupRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let raw = stmt
            .query_map(params, raw_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let mut records = raw.into_iter().map(decode).collect::<Result<Vec<_>>>()?;
        records.sort_by(|a, b| a.n.cmp(&b.n).then_with(|| b.partition.cmp(&a.partition)));
        Ok(records)
    }
}

type RawRow = (i64, String, i64);

fn raw_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn decode((n, key, solution): RawRow) -> Result<LookupRecord> {
    let partition: Partition = key.parse().map_err(|source| StoreError::MalformedPartition {
        key: key.clone(),
        source,
    })?;
    if usize::try_from(n).ok() != Some(partition.size()) {
        return Err(StoreError::InconsistentRecord { key, n });
    }
    let parity = u8::try_from(solution)
        .ok()
        .and_then(|bit| Parity::try_from(bit).ok())
        .ok_or(StoreError::MalformedSolution {
            key,
            value: solution,
        })?;
    Ok(LookupRecord::new(partition, parity))
}

impl SolutionStore for SqliteStore {
    type Error = StoreError;

    fn max_n(&self) -> Result<Option<usize>> {
        SqliteStore::max_n(self)
    }

    fn get(&self, p: &Partition) -> Result<Option<LookupRecord>> {
        self.by_partition(p)
    }

    fn upsert_pair(&mut self, record: &LookupRecord) -> Result<()> {
        SqliteStore::upsert_pair(self, record)
    }

    fn records(&self) -> Result<Vec<LookupRecord>> {
        self.all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(key: &str) -> Partition {
        key.parse().unwrap()
    }

    #[test]
    fn pair_is_written_together() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.max_n().unwrap(), None);
        store
            .upsert_pair(&LookupRecord::new(p("5,1,1"), Parity::Odd))
            .unwrap();
        assert_eq!(store.count().unwrap(), 2);
        let conjugate = store.by_partition(&p("3,1,1,1,1")).unwrap().unwrap();
        assert_eq!(conjugate.parity, Parity::Odd);
        assert_eq!(conjugate.n, 7);
        assert_eq!(store.max_n().unwrap(), Some(7));
    }

    #[test]
    fn upsert_replaces() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .upsert_pair(&LookupRecord::new(p("3,3,3"), Parity::Odd))
            .unwrap();
        store
            .upsert_pair(&LookupRecord::new(p("3,3,3"), Parity::Even))
            .unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(
            store.by_partition(&p("3,3,3")).unwrap().unwrap().parity,
            Parity::Even
        );
    }

    #[test]
    fn selections() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.upsert_pair(&LookupRecord::new(p("5"), Parity::Odd)).unwrap();
        store.upsert_pair(&LookupRecord::new(p("3,1,1"), Parity::Even)).unwrap();
        store.upsert_pair(&LookupRecord::new(p("7"), Parity::Odd)).unwrap();

        let five: Vec<String> = store.by_n(5).unwrap().iter().map(|r| r.partition.key()).collect();
        assert_eq!(five, vec!["5", "3,1,1", "1,1,1,1,1"]);
        assert_eq!(store.by_solution(Parity::Even).unwrap().len(), 1);
        assert_eq!(store.by_solution(Parity::Odd).unwrap().len(), 4);
        assert_eq!(store.all().unwrap().len(), 5);
        assert!(store.by_partition(&p("4,1")).unwrap().is_none());
    }

    #[test]
    fn malformed_rows_are_reported() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .conn
            .execute("INSERT INTO specht VALUES (3, 'x,y', 1)", [])
            .unwrap();
        assert!(matches!(
            store.all(),
            Err(StoreError::MalformedPartition { .. })
        ));

        let store = SqliteStore::open_in_memory().unwrap();
        store
            .conn
            .execute("INSERT INTO specht VALUES (3, '2,1', 7)", [])
            .unwrap();
        assert!(matches!(
            store.all(),
            Err(StoreError::MalformedSolution { value: 7, .. })
        ));

        let store = SqliteStore::open_in_memory().unwrap();
        store
            .conn
            .execute("INSERT INTO specht VALUES (4, '2,1', 0)", [])
            .unwrap();
        assert!(matches!(
            store.all(),
            Err(StoreError::InconsistentRecord { n: 4, .. })
        ));
    }
}
