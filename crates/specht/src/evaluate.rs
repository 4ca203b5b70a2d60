//! Per-partition evaluation.
//!
//! [`find_solution`] is the sequential pipeline for one shape: enumerate the
//! standard tableaux, relate each one to its column orbit, assemble the
//! incidence matrix and solve it. [`Evaluator`] wraps that pipeline with the
//! trivial-shape case, the family shortcuts and the choice of execution
//! strategy.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::One;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::distributed::DistributedEvaluator;
use crate::error::Result;
use crate::family::Family;
use crate::matrix::{IncidenceMatrix, Solution};
use crate::orbit::{orbit_relation, OrbitPolicy};
use crate::partition::Partition;
use crate::record::Parity;
use crate::tableau::{Shape, StandardOrder};

/// How the incidence matrix is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Orbit relations computed one tableau after another.
    #[default]
    Sequential,
    /// Matrix columns computed as independent tasks on a worker pool.
    Distributed,
}

/// A strategy name that is neither `sequential` nor `distributed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("strategy {0:?} not recognized; use 'sequential' or 'distributed'")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" | "seq" => Ok(Strategy::Sequential),
            "distributed" | "dist" => Ok(Strategy::Distributed),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Sequential => "sequential",
            Strategy::Distributed => "distributed",
        })
    }
}

/// Knobs for the evaluator and the population loop.
///
/// Deserializes from the `[evaluator]` table of a settings file; every field
/// is optional there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluatorConfig {
    /// Matrix assembly strategy.
    pub strategy: Strategy,
    /// First `n` visited on an empty store or on regeneration.
    pub min_n: usize,
    /// Last `n` visited; unbounded when absent.
    pub max_n: Option<usize>,
    /// Worker threads for the distributed strategy; rayon's default when absent.
    pub workers: Option<usize>,
    /// Accounting for repeated orbit arrivals.
    pub policy: OrbitPolicy,
    /// Use the closed forms for one-dimensional, self-conjugate and odd hook
    /// partitions instead of building a matrix.
    pub skip_known_families: bool,
    /// Recompute partitions that are already persisted.
    pub regenerate: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Sequential,
            min_n: 2,
            max_n: None,
            workers: None,
            policy: OrbitPolicy::Parity,
            skip_known_families: true,
            regenerate: false,
        }
    }
}

/// Where an invariant came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// The one-box shape, defined to be 1.
    Trivial,
    /// A family closed form.
    Shortcut(Family),
    /// The single-threaded pipeline.
    Sequential,
    /// The worker-pool pipeline.
    Distributed,
}

impl Method {
    /// Whether an incidence matrix was built.
    pub fn built_matrix(self) -> bool {
        matches!(self, Method::Sequential | Method::Distributed)
    }
}

/// Outcome of evaluating one partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// The side of the conjugate pair that was evaluated.
    pub partition: Partition,
    /// The invariant mod 2.
    pub parity: Parity,
    /// How it was obtained.
    pub method: Method,
    /// Number of standard tableaux, when they were enumerated.
    pub tableaux: Option<usize>,
    /// The solution vector, when a matrix was solved or the shape is trivial.
    pub solution: Option<Solution>,
}

/// Assembles the incidence matrix over `order`.
///
/// Column `i` has a one on the diagonal and at the index of every tableau
/// the orbit of tableau `i` reaches.
pub fn build_matrix(order: &StandardOrder, policy: OrbitPolicy) -> IncidenceMatrix {
    let mut m = IncidenceMatrix::identity(order.len());
    for (i, t) in order.iter().enumerate() {
        let related = orbit_relation(t, policy);
        tracing::debug!(shape = %order.shape(), index = i, related = related.len(), "orbit relation");
        for s in &related {
            if let Some(j) = order.index_of(s) {
                m.set(j, i, 1);
            }
        }
    }
    m
}

/// Runs the sequential pipeline on `shape`.
///
/// The one-box shape returns `x = (1)` without building a matrix.
///
/// # Errors
///
/// Propagates [`SpechtError::SingularMatrix`] and
/// [`SpechtError::NonIntegralSolution`] from the solve.
///
/// [`SpechtError::SingularMatrix`]: crate::SpechtError::SingularMatrix
/// [`SpechtError::NonIntegralSolution`]: crate::SpechtError::NonIntegralSolution
pub fn find_solution(shape: &Shape, policy: OrbitPolicy) -> Result<Solution> {
    if shape.cells() == 1 {
        return Ok(Solution::new(vec![BigInt::one()]));
    }
    let order = StandardOrder::new(shape);
    build_matrix(&order, policy).solve()
}

/// The side of a conjugate pair with the smaller column stabilizer.
///
/// Both sides share the invariant; this only picks the cheaper search.
/// Ties keep `p`.
pub fn cheaper_side<'a>(p: &'a Partition, conjugate: &'a Partition) -> &'a Partition {
    if conjugate.column_stabilizer_order() < p.column_stabilizer_order() {
        conjugate
    } else {
        p
    }
}

/// Evaluates partitions under one [`EvaluatorConfig`].
#[derive(Debug)]
pub struct Evaluator {
    config: EvaluatorConfig,
    pool: Option<DistributedEvaluator>,
}

impl Evaluator {
    /// Builds an evaluator, starting the worker pool for the distributed
    /// strategy.
    ///
    /// # Errors
    ///
    /// Returns [`SpechtError::Pool`](crate::SpechtError::Pool) if the pool
    /// cannot be created.
    pub fn new(config: EvaluatorConfig) -> Result<Self> {
        let pool = match config.strategy {
            Strategy::Sequential => None,
            Strategy::Distributed => Some(DistributedEvaluator::new(config.workers)?),
        };
        Ok(Self { config, pool })
    }

    /// The configuration in effect.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Builds the incidence matrix of `shape` with the configured strategy.
    ///
    /// # Errors
    ///
    /// Fails only for the distributed strategy, when a row task fails or
    /// the gathered rows are inconsistent.
    pub fn matrix(&self, shape: &Shape) -> Result<(StandardOrder, IncidenceMatrix)> {
        let order = StandardOrder::new(shape);
        let matrix = match &self.pool {
            None => build_matrix(&order, self.config.policy),
            Some(pool) => pool.matrix(&order)?,
        };
        Ok((order, matrix))
    }

    /// Evaluates `p`, using a family shortcut when allowed.
    ///
    /// # Errors
    ///
    /// Returns an error when the matrix cannot be built or solved. For a
    /// valid shape this indicates an internal inconsistency.
    pub fn evaluate(&self, p: &Partition) -> Result<Evaluation> {
        if p.size() == 1 {
            return Ok(Evaluation {
                partition: p.clone(),
                parity: Parity::Odd,
                method: Method::Trivial,
                tableaux: Some(1),
                solution: Some(Solution::new(vec![BigInt::one()])),
            });
        }
        if self.config.skip_known_families {
            if let Some((family, parity)) = Family::known_parity(p) {
                tracing::debug!(partition = %p, %family, %parity, "family shortcut");
                return Ok(Evaluation {
                    partition: p.clone(),
                    parity,
                    method: Method::Shortcut(family),
                    tableaux: None,
                    solution: None,
                });
            }
        }

        let (order, matrix) = self.matrix(&Shape::from(p))?;
        let solution = matrix.solve()?;
        let parity = solution.parity();
        let method = match self.config.strategy {
            Strategy::Sequential => Method::Sequential,
            Strategy::Distributed => Method::Distributed,
        };
        tracing::info!(
            partition = %p,
            tableaux = order.len(),
            solution = %solution.sum(),
            %parity,
            strategy = %self.config.strategy,
            "solved"
        );
        Ok(Evaluation {
            partition: p.clone(),
            parity,
            method,
            tableaux: Some(order.len()),
            solution: Some(solution),
        })
    }

    /// Evaluates the cheaper side of the pair `(p, conjugate)`.
    ///
    /// # Errors
    ///
    /// As [`evaluate`](Self::evaluate).
    pub fn evaluate_pair(&self, p: &Partition, conjugate: &Partition) -> Result<Evaluation> {
        self.evaluate(cheaper_side(p, conjugate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(parts: &[usize]) -> Partition {
        Partition::new(parts.to_vec()).unwrap()
    }

    fn full_pipeline() -> Evaluator {
        Evaluator::new(EvaluatorConfig {
            skip_known_families: false,
            ..EvaluatorConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn one_box_needs_no_matrix() {
        let solution = find_solution(&Shape::new(vec![1]).unwrap(), OrbitPolicy::Parity).unwrap();
        assert_eq!(solution.sum(), BigInt::one());

        let evaluation = full_pipeline().evaluate(&p(&[1])).unwrap();
        assert_eq!(evaluation.method, Method::Trivial);
        assert_eq!(evaluation.parity, Parity::Odd);
    }

    #[test]
    fn three_two_matrix_is_unit_lower_triangular() {
        let order = StandardOrder::new(&Shape::new(vec![3, 2]).unwrap());
        let m = build_matrix(&order, OrbitPolicy::Parity);
        assert_eq!(m.size(), 5);
        assert!(m.is_unit_lower_triangular());
        // Tableau 0 reaches exactly one other.
        assert_eq!(m.column(0).iter().filter(|&&e| e == 1).count(), 2);
        assert_eq!(m.solve().unwrap().parity(), Parity::Even);
    }

    #[test]
    fn known_parities_through_the_pipeline() {
        let evaluator = full_pipeline();
        for (parts, parity) in [
            (&[2, 1][..], Parity::Even),
            (&[3, 1][..], Parity::Odd),
            (&[3, 2][..], Parity::Even),
            (&[3, 3, 1][..], Parity::Odd),
            (&[4, 2, 1][..], Parity::Even),
            (&[4, 3, 1][..], Parity::Odd),
            (&[5, 3][..], Parity::Odd),
        ] {
            let evaluation = evaluator.evaluate(&p(parts)).unwrap();
            assert_eq!(evaluation.parity, parity, "{parts:?}");
            assert!(evaluation.method.built_matrix());
        }
    }

    #[test]
    fn shortcuts_skip_the_matrix() {
        let evaluator = Evaluator::new(EvaluatorConfig::default()).unwrap();
        let evaluation = evaluator.evaluate(&p(&[5, 1, 1])).unwrap();
        assert_eq!(evaluation.method, Method::Shortcut(Family::Hook));
        assert_eq!(evaluation.parity, Parity::Odd);
        assert!(evaluation.solution.is_none());

        // Even hooks are computed.
        let evaluation = evaluator.evaluate(&p(&[3, 1])).unwrap();
        assert_eq!(evaluation.method, Method::Sequential);
        assert_eq!(evaluation.parity, Parity::Odd);
    }

    #[test]
    fn conjugates_share_the_invariant() {
        let evaluator = full_pipeline();
        for parts in [&[4, 2, 1][..], &[5, 2][..], &[3, 2, 2][..]] {
            let q = p(parts);
            let a = evaluator.evaluate(&q).unwrap().parity;
            let b = evaluator.evaluate(&q.conjugate()).unwrap().parity;
            assert_eq!(a, b, "{q}");
        }
    }

    #[test]
    fn cheaper_side_prefers_short_columns() {
        let wide = p(&[7, 1, 1]);
        let tall = wide.conjugate();
        assert_eq!(cheaper_side(&wide, &tall), &wide);
        assert_eq!(cheaper_side(&tall, &wide), &wide);
        let square = p(&[3, 3, 3]);
        assert_eq!(cheaper_side(&square, &square.conjugate()), &square);
    }

    #[test]
    fn strategy_names() {
        assert_eq!("distributed".parse::<Strategy>(), Ok(Strategy::Distributed));
        assert_eq!(" Sequential ".parse::<Strategy>(), Ok(Strategy::Sequential));
        assert!("cluster".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Distributed.to_string(), "distributed");
    }
}
