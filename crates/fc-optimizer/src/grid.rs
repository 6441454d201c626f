//! Exhaustive grid search with a random-sampling fallback.

use rand::Rng;
use std::time::Instant;
use tracing::{info, warn};

use fc_types::{
    budget_error, DiscreteValues, EvaluationFunction, FcResult, ParameterRange, ParameterSet,
    TargetMetric,
};

use crate::problem::{Problem, DEFAULT_CONVERGENCE_EPSILON};
use crate::result::{BestCandidate, OptimizationMethod, OptimizationResult};
use crate::rng;

pub const DEFAULT_MAX_EVALUATIONS: usize = 100_000;

/// Evaluates every combination of the parameters' discretized values, or
/// `max_evaluations` random combinations when the grid is larger than that.
#[derive(Debug, Clone)]
pub struct GridSearchOptimizer<E> {
    problem: Problem<E>,
    max_evaluations: usize,
    seed: u64,
    convergence_epsilon: f64,
}

impl<E: EvaluationFunction> GridSearchOptimizer<E> {
    pub fn new(
        parameters: Vec<ParameterRange>,
        targets: Vec<TargetMetric>,
        evaluator: E,
    ) -> FcResult<Self> {
        Ok(Self::from_problem(Problem::new(parameters, targets, evaluator)?))
    }

    /// Build from an already validated problem. The sampling seed is drawn
    /// from entropy until [`GridSearchOptimizer::with_seed`] overrides it.
    pub fn from_problem(problem: Problem<E>) -> Self {
        Self {
            problem,
            max_evaluations: DEFAULT_MAX_EVALUATIONS,
            seed: rng::entropy_seed(),
            convergence_epsilon: DEFAULT_CONVERGENCE_EPSILON,
        }
    }

    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }

    /// Seed for the sampling fallback.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_convergence_epsilon(mut self, epsilon: f64) -> Self {
        self.convergence_epsilon = epsilon;
        self
    }

    pub fn problem(&self) -> &Problem<E> {
        &self.problem
    }

    /// Number of grid points, or `None` if it overflows `usize`.
    pub fn grid_size(&self) -> Option<usize> {
        self.axes()
            .iter()
            .try_fold(1usize, |total, axis| total.checked_mul(axis.len()))
    }

    /// Whether the whole grid fits in the evaluation budget.
    pub fn is_exhaustive(&self) -> bool {
        self.grid_size()
            .is_some_and(|size| size <= self.max_evaluations)
    }

    /// Run the search.
    ///
    /// Only fails, before any evaluation, when the evaluation budget is zero.
    pub fn optimize(&self) -> FcResult<OptimizationResult> {
        if self.max_evaluations == 0 {
            return Err(budget_error!("grid search needs at least one evaluation"));
        }

        let started = Instant::now();
        let grid_size = self.grid_size();
        info!(
            parameters = self.problem.parameters().len(),
            targets = self.problem.targets().len(),
            grid_size = ?grid_size,
            max_evaluations = self.max_evaluations,
            "Starting grid search"
        );

        let result = match grid_size {
            Some(size) if size <= self.max_evaluations => self.enumerate(started),
            _ => {
                let shown = grid_size.map_or_else(|| "overflow".to_string(), |n| n.to_string());
                warn!(
                    "Grid size ({shown}) exceeds max evaluations ({}). Sampling randomly.",
                    self.max_evaluations
                );
                self.sample(started)
            }
        };

        info!(
            method = %result.method,
            best_score = result.best_score,
            evaluations = result.evaluations,
            elapsed_seconds = result.elapsed_seconds,
            "Grid search completed"
        );
        Ok(result)
    }

    fn axes(&self) -> Vec<DiscreteValues> {
        self.problem
            .parameters()
            .iter()
            .map(ParameterRange::discrete_values)
            .collect()
    }

    fn enumerate(&self, started: Instant) -> OptimizationResult {
        // The grid fits in the budget, so every axis is small enough to hold.
        let axes: Vec<Vec<f64>> = self
            .axes()
            .into_iter()
            .map(|axis| axis.collect::<Vec<f64>>())
            .collect();
        let mut best = BestCandidate::new();
        let mut evaluations = 0;

        for params in GridPoints::new(self.problem.parameters(), &axes) {
            let score = self.problem.evaluate(&params);
            evaluations += 1;
            best.offer(&params, &score);
            if best.score() < self.convergence_epsilon {
                break;
            }
        }

        best.into_result(
            OptimizationMethod::GridSearch,
            evaluations,
            evaluations,
            started,
            None,
        )
    }

    fn sample(&self, started: Instant) -> OptimizationResult {
        let mut rng = rng::seeded_rng(self.seed);
        let parameters = self.problem.parameters();
        let axes = self.axes();
        let mut best = BestCandidate::new();
        let mut evaluations = 0;

        for _ in 0..self.max_evaluations {
            let params: ParameterSet = parameters
                .iter()
                .zip(&axes)
                .map(|(param, axis)| {
                    let value = axis
                        .get(rng.random_range(0..axis.len()))
                        .unwrap_or_else(|| param.min_value());
                    (param.name().to_string(), value)
                })
                .collect();

            let score = self.problem.evaluate(&params);
            evaluations += 1;
            best.offer(&params, &score);
            if best.score() < self.convergence_epsilon {
                break;
            }
        }

        best.into_result(
            OptimizationMethod::GridSearchSampled,
            evaluations,
            evaluations,
            started,
            Some(self.seed),
        )
    }
}

/// Lazy Cartesian product of per-parameter value lists, in configured
/// parameter order with the last parameter varying fastest.
struct GridPoints<'a> {
    parameters: &'a [ParameterRange],
    axes: &'a [Vec<f64>],
    cursor: Vec<usize>,
    exhausted: bool,
}

impl<'a> GridPoints<'a> {
    fn new(parameters: &'a [ParameterRange], axes: &'a [Vec<f64>]) -> Self {
        Self {
            parameters,
            axes,
            cursor: vec![0; axes.len()],
            exhausted: axes.iter().any(Vec::is_empty),
        }
    }

    /// Odometer step. Marks the iterator exhausted once every axis wraps.
    fn advance(&mut self) {
        for axis in (0..self.cursor.len()).rev() {
            self.cursor[axis] += 1;
            if self.cursor[axis] < self.axes[axis].len() {
                return;
            }
            self.cursor[axis] = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for GridPoints<'_> {
    type Item = ParameterSet;

    fn next(&mut self) -> Option<ParameterSet> {
        if self.exhausted {
            return None;
        }
        let point = self
            .parameters
            .iter()
            .zip(self.axes)
            .zip(&self.cursor)
            .map(|((param, values), &index)| (param.name().to_string(), values[index]))
            .collect();
        self.advance();
        Some(point)
    }
}
