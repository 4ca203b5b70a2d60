//! The population loop.
//!
//! A [`Driver`] owns a [`SolutionStore`], an [`Evaluator`] and the next `n`
//! to visit. Each [`step`](Driver::step) evaluates every candidate pair of
//! that `n` and persists both sides before advancing.

use std::collections::BTreeMap;
use std::convert::Infallible;

use thiserror::Error;

use crate::error::SpechtError;
use crate::evaluate::{Evaluator, EvaluatorConfig, Method};
use crate::partition::Partition;
use crate::record::LookupRecord;

/// Persistence boundary of the population loop.
pub trait SolutionStore {
    /// Backend failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Largest `n` with at least one record.
    ///
    /// # Errors
    ///
    /// Backend failure.
    fn max_n(&self) -> Result<Option<usize>, Self::Error>;

    /// The record for `p`, if any.
    ///
    /// # Errors
    ///
    /// Backend failure.
    fn get(&self, p: &Partition) -> Result<Option<LookupRecord>, Self::Error>;

    /// Whether `p` has a record.
    ///
    /// # Errors
    ///
    /// Backend failure.
    fn contains(&self, p: &Partition) -> Result<bool, Self::Error> {
        Ok(self.get(p)?.is_some())
    }

    /// Writes `record` and the record of its conjugate, replacing existing
    /// ones.
    ///
    /// # Errors
    ///
    /// Backend failure. Implementations write both or neither.
    fn upsert_pair(&mut self, record: &LookupRecord) -> Result<(), Self::Error>;

    /// Every record, ordered by `n`, then partition descending.
    ///
    /// # Errors
    ///
    /// Backend failure.
    fn records(&self) -> Result<Vec<LookupRecord>, Self::Error>;
}

/// A [`SolutionStore`] held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<Partition, LookupRecord>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SolutionStore for MemoryStore {
    type Error = Infallible;

    fn max_n(&self) -> Result<Option<usize>, Infallible> {
        Ok(self.records.values().map(|r| r.n).max())
    }

    fn get(&self, p: &Partition) -> Result<Option<LookupRecord>, Infallible> {
        Ok(self.records.get(p).cloned())
    }

    fn upsert_pair(&mut self, record: &LookupRecord) -> Result<(), Infallible> {
        let conjugate = record.conjugate();
        self.records.insert(record.partition.clone(), record.clone());
        self.records.insert(conjugate.partition.clone(), conjugate);
        Ok(())
    }

    fn records(&self) -> Result<Vec<LookupRecord>, Infallible> {
        let mut all: Vec<LookupRecord> = self.records.values().cloned().collect();
        all.sort_by(|a, b| a.n.cmp(&b.n).then_with(|| b.partition.cmp(&a.partition)));
        Ok(all)
    }
}

/// Failure of one population step.
#[derive(Debug, Error)]
pub enum DriverError<E: std::error::Error + 'static> {
    /// The store rejected a read or write.
    #[error("store: {0}")]
    Store(#[source] E),
    /// The evaluation itself failed.
    #[error(transparent)]
    Compute(#[from] SpechtError),
}

/// Counts for one completed `n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// The `n` visited.
    pub n: usize,
    /// Conjugate pairs with both sides 2-special.
    pub candidates: usize,
    /// Pairs already persisted and left alone.
    pub skipped: usize,
    /// Pairs settled by a family closed form or the one-box case.
    pub shortcuts: usize,
    /// Pairs that needed a matrix.
    pub computed: usize,
}

/// Conjugate pairs of `n` with both sides 2-special, each pair once.
///
/// The first element of a pair is the lexicographically larger side.
pub fn candidates(n: usize) -> Vec<(Partition, Partition)> {
    Partition::all(n)
        .filter_map(|p| {
            if !p.is_2special() {
                return None;
            }
            let conjugate = p.conjugate();
            (conjugate.is_2special() && p >= conjugate).then_some((p, conjugate))
        })
        .collect()
}

/// The population loop with its current position.
#[derive(Debug)]
pub struct Driver<S> {
    store: S,
    evaluator: Evaluator,
    current_n: usize,
}

impl<S: SolutionStore> Driver<S> {
    /// Positions a driver on `store`: at `min_n` when regenerating or when
    /// the store is empty, otherwise at the store's largest `n`.
    ///
    /// # Errors
    ///
    /// Store failures, or a worker pool that cannot be built.
    pub fn resume(store: S, config: EvaluatorConfig) -> Result<Self, DriverError<S::Error>> {
        let start = if config.regenerate {
            config.min_n
        } else {
            match store.max_n().map_err(DriverError::Store)? {
                Some(n) => n.max(config.min_n),
                None => config.min_n,
            }
        };
        tracing::info!(start, regenerate = config.regenerate, strategy = %config.strategy, "resuming");
        let evaluator = Evaluator::new(config)?;
        Ok(Self {
            store,
            evaluator,
            current_n: start,
        })
    }

    /// The next `n` to visit.
    pub fn current_n(&self) -> usize {
        self.current_n
    }

    /// The store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Gives the store back.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Whether the configured bound has been passed.
    pub fn finished(&self) -> bool {
        self.evaluator
            .config()
            .max_n
            .is_some_and(|max| self.current_n > max)
    }

    /// Evaluates and persists every candidate pair of the current `n`, then
    /// advances.
    ///
    /// # Errors
    ///
    /// The first store or evaluation failure. `n` does not advance.
    pub fn step(&mut self) -> Result<StepReport, DriverError<S::Error>> {
        let n = self.current_n;
        let regenerate = self.evaluator.config().regenerate;
        let mut report = StepReport {
            n,
            ..StepReport::default()
        };
        for (p, conjugate) in candidates(n) {
            report.candidates += 1;
            if !regenerate && self.persisted(&p, &conjugate)? {
                report.skipped += 1;
                continue;
            }
            let evaluation = self.evaluator.evaluate_pair(&p, &conjugate)?;
            match evaluation.method {
                Method::Trivial | Method::Shortcut(_) => report.shortcuts += 1,
                Method::Sequential | Method::Distributed => report.computed += 1,
            }
            let record = LookupRecord::new(evaluation.partition, evaluation.parity);
            self.store.upsert_pair(&record).map_err(DriverError::Store)?;
            tracing::debug!(partition = %p, conjugate = %conjugate, parity = %record.parity, "persisted");
        }
        tracing::info!(
            n,
            candidates = report.candidates,
            computed = report.computed,
            shortcuts = report.shortcuts,
            skipped = report.skipped,
            "completed n"
        );
        self.current_n += 1;
        Ok(report)
    }

    /// Steps until the configured bound is passed; forever without one.
    ///
    /// # Errors
    ///
    /// The first failing step.
    pub fn run(&mut self) -> Result<Vec<StepReport>, DriverError<S::Error>> {
        let mut reports = Vec::new();
        while !self.finished() {
            reports.push(self.step()?);
        }
        Ok(reports)
    }

    fn persisted(&self, p: &Partition, conjugate: &Partition) -> Result<bool, DriverError<S::Error>> {
        let store = &self.store;
        Ok(store.contains(p).map_err(DriverError::Store)?
            && store.contains(conjugate).map_err(DriverError::Store)?)
    }
}
