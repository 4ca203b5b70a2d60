//! The population loop against a SQLite store.

use specht::{Driver, EvaluatorConfig, Parity, SolutionStore, Strategy};
use specht_store::{format_rows, Query, SqliteStore};

fn config(max_n: usize) -> EvaluatorConfig {
    EvaluatorConfig {
        max_n: Some(max_n),
        ..EvaluatorConfig::default()
    }
}

#[test]
fn populate_resume_and_query() {
    let mut driver = Driver::resume(SqliteStore::open_in_memory().unwrap(), config(6)).unwrap();
    driver.run().unwrap();
    let store = driver.into_store();
    assert_eq!(store.max_n().unwrap(), Some(6));
    let before = store.all().unwrap();

    // Resuming re-visits the stored maximum, then continues.
    let mut driver = Driver::resume(store, config(9)).unwrap();
    assert_eq!(driver.current_n(), 6);
    let reports = driver.run().unwrap();
    assert_eq!(reports.len(), 4);
    assert_eq!(reports[0].skipped, reports[0].candidates);

    let store = driver.into_store();
    let after = store.all().unwrap();
    assert!(before.iter().all(|r| after.contains(r)));
    assert_eq!(after.len(), 24);

    let answer = Query::N(9).run(&store).unwrap();
    assert_eq!(answer.records.len(), 6);
    assert_eq!(answer.incomplete_at, Some(9));
    let rows = format_rows(&answer.records, true);
    assert_eq!(rows[0], "(9)                 \u{22a2}  9: solution 1 [1D]");
}

#[test]
fn distributed_population_matches_sequential() {
    let sequential = {
        let mut driver = Driver::resume(
            SqliteStore::open_in_memory().unwrap(),
            EvaluatorConfig {
                skip_known_families: false,
                ..config(9)
            },
        )
        .unwrap();
        driver.run().unwrap();
        driver.into_store().records().unwrap()
    };
    let distributed = {
        let mut driver = Driver::resume(
            SqliteStore::open_in_memory().unwrap(),
            EvaluatorConfig {
                strategy: Strategy::Distributed,
                workers: Some(2),
                skip_known_families: false,
                ..config(9)
            },
        )
        .unwrap();
        driver.run().unwrap();
        driver.into_store().records().unwrap()
    };
    assert_eq!(sequential, distributed);
    let three_three_three = sequential
        .iter()
        .find(|r| r.partition.key() == "3,3,3")
        .unwrap();
    assert_eq!(three_three_three.parity, Parity::Even);
}
