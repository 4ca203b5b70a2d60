//! Selections over the lookup table.

use specht::{Family, LookupRecord, Parity, Partition};

use crate::error::Result;
use crate::sqlite::SqliteStore;

/// One selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// A single partition.
    Partition(Partition),
    /// Every record of one `n`.
    N(usize),
    /// Every record with one parity.
    Solution(Parity),
    /// Members of a family, optionally narrowed by parity or by `n`.
    ///
    /// Parity takes precedence when both are given.
    Family {
        /// Family to keep.
        family: Family,
        /// Narrow to one parity.
        solution: Option<Parity>,
        /// Narrow to one `n`.
        n: Option<usize>,
    },
    /// Every record.
    All,
}

/// Records selected by a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Matching records, ordered by `n` then partition descending.
    pub records: Vec<LookupRecord>,
    /// Set to the stored maximum (0 for an empty store) when the query
    /// asked for an `n` at or beyond it; the records may then be incomplete.
    pub incomplete_at: Option<usize>,
}

impl Answer {
    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Query {
    /// Runs the selection.
    ///
    /// # Errors
    ///
    /// SQLite failures and malformed stored rows.
    pub fn run(&self, store: &SqliteStore) -> Result<Answer> {
        let records = match self {
            Query::Partition(p) => store.by_partition(p)?.into_iter().collect(),
            Query::N(n) => store.by_n(*n)?,
            Query::Solution(parity) => store.by_solution(*parity)?,
            Query::Family {
                family,
                solution,
                n,
            } => {
                let candidates = match (solution, n) {
                    (Some(parity), _) => store.by_solution(*parity)?,
                    (None, Some(n)) => store.by_n(*n)?,
                    (None, None) => store.all()?,
                };
                candidates
                    .into_iter()
                    .filter(|r| family.matches(&r.partition))
                    .collect()
            }
            Query::All => store.all()?,
        };

        let incomplete_at = match self.requested_n() {
            Some(n) => {
                // An empty store has computed nothing; every window is open.
                let max = store.max_n()?.unwrap_or(0);
                if n >= max {
                    tracing::warn!(n, max, "requested n is at or beyond the stored maximum");
                    Some(max)
                } else {
                    None
                }
            }
            None => None,
        };
        Ok(Answer {
            records,
            incomplete_at,
        })
    }

    /// The `n` a numeric selection asks for.
    fn requested_n(&self) -> Option<usize> {
        match self {
            Query::N(n) => Some(*n),
            Query::Family {
                solution: None,
                n: Some(n),
                ..
            } => Some(*n),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specht::{Driver, EvaluatorConfig};

    fn populated(max_n: usize) -> SqliteStore {
        let config = EvaluatorConfig {
            max_n: Some(max_n),
            ..EvaluatorConfig::default()
        };
        let mut driver = Driver::resume(SqliteStore::open_in_memory().unwrap(), config).unwrap();
        driver.run().unwrap();
        driver.into_store()
    }

    fn keys(answer: &Answer) -> Vec<String> {
        answer.records.iter().map(|r| r.partition.key()).collect()
    }

    #[test]
    fn partition_lookup() {
        let store = populated(7);
        let answer = Query::Partition("5,1,1".parse().unwrap()).run(&store).unwrap();
        assert_eq!(answer.records.len(), 1);
        assert_eq!(answer.records[0].parity, Parity::Odd);

        let answer = Query::Partition("4,2,1".parse().unwrap()).run(&store).unwrap();
        assert!(answer.is_empty());
        assert_eq!(answer.incomplete_at, None);
    }

    #[test]
    fn n_at_maximum_is_flagged() {
        let store = populated(7);
        let answer = Query::N(7).run(&store).unwrap();
        assert_eq!(keys(&answer), vec!["7", "5,1,1", "3,1,1,1,1", "1,1,1,1,1,1,1"]);
        assert_eq!(answer.incomplete_at, Some(7));

        let answer = Query::N(5).run(&store).unwrap();
        assert_eq!(answer.incomplete_at, None);
        assert!(Query::N(12).run(&store).unwrap().is_empty());
    }

    #[test]
    fn family_filters() {
        let store = populated(9);
        let hooks = Query::Family {
            family: Family::Hook,
            solution: None,
            n: Some(9),
        }
        .run(&store)
        .unwrap();
        assert_eq!(
            keys(&hooks),
            vec!["7,1,1", "5,1,1,1,1", "3,1,1,1,1,1,1", "1,1,1,1,1,1,1,1,1"]
        );
        assert_eq!(hooks.incomplete_at, Some(9));

        let even_self_conjugates = Query::Family {
            family: Family::SelfConjugate,
            solution: Some(Parity::Even),
            n: None,
        }
        .run(&store)
        .unwrap();
        assert_eq!(
            keys(&even_self_conjugates),
            vec!["3,1,1", "3,3,2", "5,1,1,1,1", "3,3,3"]
        );

        let unclassified = Query::Family {
            family: Family::Unclassified,
            solution: None,
            n: None,
        }
        .run(&store)
        .unwrap();
        assert!(unclassified.is_empty());
    }

    #[test]
    fn empty_store_flags_every_numeric_query() {
        let store = SqliteStore::open_in_memory().unwrap();
        let answer = Query::N(5).run(&store).unwrap();
        assert!(answer.is_empty());
        assert_eq!(answer.incomplete_at, Some(0));

        let hooks = Query::Family {
            family: Family::Hook,
            solution: None,
            n: Some(3),
        }
        .run(&store)
        .unwrap();
        assert_eq!(hooks.incomplete_at, Some(0));

        assert_eq!(Query::All.run(&store).unwrap().incomplete_at, None);
    }

    #[test]
    fn solution_selection() {
        let store = populated(5);
        let even = Query::Solution(Parity::Even).run(&store).unwrap();
        assert_eq!(keys(&even), vec!["3,1,1"]);
        assert_eq!(Query::All.run(&store).unwrap().records.len(), 9);
    }
}
