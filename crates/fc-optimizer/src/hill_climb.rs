//! Stochastic hill climbing with random restarts.
//!
//! Each restart starts from a candidate (configured initial values or range
//! midpoints for restart 0, uniform random values afterwards) and repeatedly
//! nudges one randomly chosen parameter by one step in a random direction,
//! keeping the move only when it strictly lowers the score. The best
//! candidate over all restarts is returned.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

use fc_types::{
    budget_error, round_to, EvaluationFunction, FcResult, ParameterRange, ParameterSet,
    TargetMetric, VALUE_PRECISION,
};

use crate::problem::{Problem, DEFAULT_CONVERGENCE_EPSILON};
use crate::result::{BestCandidate, OptimizationMethod, OptimizationResult};
use crate::rng;

pub const DEFAULT_MAX_ITERATIONS: usize = 5000;
pub const DEFAULT_RESTARTS: usize = 5;

/// Greedy single-parameter local search with random restarts.
#[derive(Debug, Clone)]
pub struct HillClimbOptimizer<E> {
    problem: Problem<E>,
    max_iterations: usize,
    restarts: usize,
    seed: u64,
    convergence_epsilon: f64,
    parallel: bool,
}

/// What one restart found, plus its share of the run counters.
struct RestartOutcome {
    best: BestCandidate,
    iterations: usize,
    evaluations: usize,
}

impl<E: EvaluationFunction> HillClimbOptimizer<E> {
    pub fn new(
        parameters: Vec<ParameterRange>,
        targets: Vec<TargetMetric>,
        evaluator: E,
    ) -> FcResult<Self> {
        Ok(Self::from_problem(Problem::new(parameters, targets, evaluator)?))
    }

    /// Build from an already validated problem. The seed is drawn from
    /// entropy until [`HillClimbOptimizer::with_seed`] overrides it.
    pub fn from_problem(problem: Problem<E>) -> Self {
        Self {
            problem,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            restarts: DEFAULT_RESTARTS,
            seed: rng::entropy_seed(),
            convergence_epsilon: DEFAULT_CONVERGENCE_EPSILON,
            parallel: false,
        }
    }

    /// Maximum inner-loop steps per restart.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_convergence_epsilon(mut self, epsilon: f64) -> Self {
        self.convergence_epsilon = epsilon;
        self
    }

    /// Run restarts on the rayon pool. Results are identical to a sequential run.
    pub fn with_parallel_restarts(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn problem(&self) -> &Problem<E> {
        &self.problem
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run the search.
    ///
    /// Only fails, before any evaluation, when `restarts` is zero.
    pub fn optimize(&self) -> FcResult<OptimizationResult> {
        if self.restarts == 0 {
            return Err(budget_error!("hill climbing needs at least one restart"));
        }

        let started = Instant::now();
        info!(
            parameters = self.problem.parameters().len(),
            targets = self.problem.targets().len(),
            restarts = self.restarts,
            max_iterations = self.max_iterations,
            seed = self.seed,
            parallel = self.parallel,
            "Starting hill climbing"
        );

        let outcomes: Vec<RestartOutcome> = if self.parallel {
            (0..self.restarts)
                .into_par_iter()
                .map(|restart| self.run_restart(restart))
                .collect()
        } else {
            (0..self.restarts)
                .map(|restart| self.run_restart(restart))
                .collect()
        };

        let mut best = BestCandidate::new();
        let mut iterations = 0;
        let mut evaluations = 0;
        // Restart order, so ties go to the earliest restart whatever the scheduling.
        for outcome in outcomes {
            iterations += outcome.iterations;
            evaluations += outcome.evaluations;
            best.merge(outcome.best);
        }

        let result = best.into_result(
            OptimizationMethod::HillClimbing,
            iterations,
            evaluations,
            started,
            Some(self.seed),
        );
        info!(
            best_score = result.best_score,
            iterations = result.iterations,
            evaluations = result.evaluations,
            elapsed_seconds = result.elapsed_seconds,
            "Hill climbing completed"
        );
        Ok(result)
    }

    fn run_restart(&self, restart: usize) -> RestartOutcome {
        let mut rng = rng::restart_rng(self.seed, restart);
        let parameters = self.problem.parameters();

        let mut current = if restart == 0 {
            self.initial_params()
        } else {
            self.random_params(&mut rng)
        };
        let mut current_score = self.problem.evaluate(&current);
        let mut evaluations = 1;
        let mut iterations = 0;

        for _ in 0..self.max_iterations {
            iterations += 1;

            let param = &parameters[rng.random_range(0..parameters.len())];
            let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let candidate = perturb(&current, param, direction);

            let candidate_score = self.problem.evaluate(&candidate);
            evaluations += 1;

            if candidate_score.total < current_score.total {
                debug!(
                    restart,
                    iteration = iterations,
                    param = param.name(),
                    score = candidate_score.total,
                    "Accepted improvement"
                );
                current = candidate;
                current_score = candidate_score;
            }

            if current_score.total < self.convergence_epsilon {
                break;
            }
        }

        debug!(
            restart,
            score = current_score.total,
            iterations,
            "Restart finished"
        );

        let mut best = BestCandidate::new();
        best.offer(&current, &current_score);
        RestartOutcome {
            best,
            iterations,
            evaluations,
        }
    }

    /// Configured initial values, or range midpoints.
    fn initial_params(&self) -> ParameterSet {
        self.problem
            .parameters()
            .iter()
            .map(|p| (p.name().to_string(), p.starting_value()))
            .collect()
    }

    /// Independent uniform draw per parameter.
    fn random_params(&self, rng: &mut ChaCha8Rng) -> ParameterSet {
        self.problem
            .parameters()
            .iter()
            .map(|p| {
                let value = rng.random_range(p.min_value()..=p.max_value());
                (p.name().to_string(), p.clamp(round_to(value, VALUE_PRECISION)))
            })
            .collect()
    }
}

/// `current` with `param` moved one step in `direction`, clamped to its range.
fn perturb(current: &ParameterSet, param: &ParameterRange, direction: f64) -> ParameterSet {
    let value = current
        .get(param.name())
        .copied()
        .unwrap_or_else(|| param.starting_value());
    let mut candidate = current.clone();
    candidate.insert(
        param.name().to_string(),
        param.clamp(value + direction * param.step()),
    );
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_types::{ConfigError, FcError, MetricSet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn range(name: &str, min: f64, max: f64, step: f64, initial: Option<f64>) -> ParameterRange {
        ParameterRange::new(name, min, max, step, initial).unwrap()
    }

    /// y = x, z = w
    fn passthrough(p: &ParameterSet) -> MetricSet {
        let mut m = MetricSet::new();
        if let Some(x) = p.get("x") {
            m.insert("y".to_string(), *x);
        }
        if let Some(w) = p.get("w") {
            m.insert("z".to_string(), *w);
        }
        m
    }

    #[test]
    fn climbs_to_exact_target() {
        let optimizer = HillClimbOptimizer::new(
            vec![range("x", 0.0, 10.0, 1.0, Some(1.0))],
            vec![TargetMetric::new("y", 7.0).unwrap()],
            passthrough,
        )
        .unwrap()
        .with_max_iterations(200)
        .with_restarts(1)
        .with_seed(3);

        let result = optimizer.optimize().unwrap();
        assert_eq!(result.method, OptimizationMethod::HillClimbing);
        assert_eq!(result.best_params["x"], 7.0);
        assert_eq!(result.best_score, 0.0);
        assert_eq!(result.seed, Some(3));
        assert!(result.iterations < 200);
    }

    #[test]
    fn never_worse_than_initial_candidate() {
        let targets = vec![
            TargetMetric::new("y", 3.3).unwrap(),
            TargetMetric::weighted("z", 8.0, 0.5).unwrap(),
        ];
        let parameters = vec![
            range("x", 0.0, 10.0, 0.5, None),
            range("w", -4.0, 4.0, 1.0, Some(-4.0)),
        ];
        let problem = Problem::new(parameters, targets, passthrough).unwrap();
        let initial = problem.evaluate(&ParameterSet::from([
            ("x".to_string(), 5.0),
            ("w".to_string(), -4.0),
        ]));

        for seed in 0..10 {
            let result = HillClimbOptimizer::from_problem(problem.clone())
                .with_max_iterations(1)
                .with_restarts(1)
                .with_seed(seed)
                .optimize()
                .unwrap();
            assert!(result.best_score <= initial.total);
        }
    }

    #[test]
    fn same_seed_same_result() {
        let build = || {
            HillClimbOptimizer::new(
                vec![range("x", 0.0, 100.0, 0.7, None), range("w", 0.0, 50.0, 0.3, None)],
                vec![TargetMetric::new("y", 41.3).unwrap(), TargetMetric::new("z", 12.1).unwrap()],
                passthrough,
            )
            .unwrap()
            .with_max_iterations(300)
            .with_restarts(4)
            .with_seed(1234)
        };

        let a = build().optimize().unwrap();
        let b = build().optimize().unwrap();
        assert_eq!(a.best_params, b.best_params);
        assert_eq!(a.best_score, b.best_score);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn parallel_restarts_match_sequential() {
        let build = |parallel| {
            HillClimbOptimizer::new(
                vec![range("x", 0.0, 100.0, 0.7, None), range("w", 0.0, 50.0, 0.3, None)],
                vec![TargetMetric::new("y", 41.3).unwrap(), TargetMetric::new("z", 12.1).unwrap()],
                passthrough,
            )
            .unwrap()
            .with_max_iterations(250)
            .with_restarts(6)
            .with_seed(77)
            .with_parallel_restarts(parallel)
        };

        let sequential = build(false).optimize().unwrap();
        let parallel = build(true).optimize().unwrap();
        assert_eq!(sequential.best_params, parallel.best_params);
        assert_eq!(sequential.best_score, parallel.best_score);
        assert_eq!(sequential.iterations, parallel.iterations);
        assert_eq!(sequential.evaluations, parallel.evaluations);
    }

    #[test]
    fn counters_cover_every_restart() {
        let calls = AtomicUsize::new(0);
        let counting = |p: &ParameterSet| {
            calls.fetch_add(1, Ordering::Relaxed);
            passthrough(p)
        };
        // Target outside the range: never converges, so every step runs.
        let result = HillClimbOptimizer::new(
            vec![range("x", 0.0, 10.0, 1.0, None)],
            vec![TargetMetric::new("y", 20.0).unwrap()],
            counting,
        )
        .unwrap()
        .with_max_iterations(25)
        .with_restarts(3)
        .with_seed(5)
        .optimize()
        .unwrap();

        assert_eq!(result.iterations, 75);
        assert_eq!(result.evaluations, 78);
        assert_eq!(calls.load(Ordering::Relaxed), 78);
        assert_eq!(result.best_params["x"], 10.0);
        assert!((result.best_score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn converged_start_still_takes_one_step() {
        let result = HillClimbOptimizer::new(
            vec![range("x", 0.0, 10.0, 1.0, None)],
            vec![TargetMetric::new("y", 5.0).unwrap()],
            passthrough,
        )
        .unwrap()
        .with_restarts(1)
        .with_seed(0)
        .optimize()
        .unwrap();

        assert_eq!(result.best_score, 0.0);
        assert_eq!(result.best_params["x"], 5.0);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.evaluations, 2);
    }

    #[test]
    fn evaluations_are_iterations_plus_one_per_restart() {
        let result = HillClimbOptimizer::new(
            vec![range("x", 0.0, 10.0, 1.0, None)],
            vec![TargetMetric::new("y", 5.0).unwrap()],
            passthrough,
        )
        .unwrap()
        .with_max_iterations(10_000)
        .with_restarts(3)
        .with_seed(1)
        .optimize()
        .unwrap();

        assert_eq!(result.best_score, 0.0);
        assert_eq!(result.evaluations, result.iterations + 3);
        // Every restart reaches x = 5 and stops well short of the cap.
        assert!(result.iterations >= 3);
        assert!(result.iterations < 3 * 10_000);
    }

    #[test]
    fn values_stay_in_range() {
        let parameters = vec![range("x", 2.0, 3.0, 0.4, None), range("w", -1.0, 1.0, 5.0, None)];
        let result = HillClimbOptimizer::new(
            parameters.clone(),
            vec![TargetMetric::new("y", 100.0).unwrap(), TargetMetric::new("z", -100.0).unwrap()],
            passthrough,
        )
        .unwrap()
        .with_max_iterations(100)
        .with_restarts(5)
        .with_seed(11)
        .optimize()
        .unwrap();

        for p in &parameters {
            let v = result.best_params[p.name()];
            assert!(v >= p.min_value() && v <= p.max_value());
        }
    }

    #[test]
    fn zero_restarts_is_a_config_error() {
        let result = HillClimbOptimizer::new(
            vec![range("x", 0.0, 10.0, 1.0, None)],
            vec![TargetMetric::new("y", 5.0).unwrap()],
            passthrough,
        )
        .unwrap()
        .with_restarts(0)
        .optimize();

        assert!(matches!(
            result,
            Err(FcError::Config(ConfigError::InvalidBudget { .. }))
        ));
    }

    #[test]
    fn perturb_builds_a_new_assignment() {
        let param = range("x", 0.0, 1.0, 0.75, None);
        let current = ParameterSet::from([("x".to_string(), 0.5), ("w".to_string(), 2.0)]);

        let up = perturb(&current, &param, 1.0);
        let down = perturb(&current, &param, -1.0);
        assert_eq!(up["x"], 1.0);
        assert_eq!(down["x"], 0.0);
        assert_eq!(up["w"], 2.0);
        assert_eq!(current["x"], 0.5);
    }
}
