//! Optimization results and best-candidate tracking.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use fc_types::{round_to, ParameterSet};

use crate::scoring::Score;

/// Which algorithm produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationMethod {
    HillClimbing,
    /// Full enumeration of the discretized grid.
    GridSearch,
    /// Random draws from the grid because it exceeded the evaluation budget.
    GridSearchSampled,
}

impl OptimizationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HillClimbing => "hill_climbing",
            Self::GridSearch => "grid_search",
            Self::GridSearchSampled => "grid_search_sampled",
        }
    }

    /// Whether the search covered every candidate it could have produced.
    pub fn is_exhaustive(&self) -> bool {
        matches!(self, Self::GridSearch)
    }
}

impl fmt::Display for OptimizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The final, immutable outcome of one optimizer run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub method: OptimizationMethod,
    pub best_params: ParameterSet,
    pub best_score: f64,
    /// Per-target deviation at `best_params`.
    pub target_deviations: BTreeMap<String, f64>,
    /// Search steps attempted, accepted or not.
    pub iterations: usize,
    /// Calls made to the evaluation function.
    pub evaluations: usize,
    pub elapsed_seconds: f64,
    /// Seed of the random source, when the method used one.
    pub seed: Option<u64>,
}

impl OptimizationResult {
    /// Whether the best score fell below `epsilon`.
    pub fn converged(&self, epsilon: f64) -> bool {
        self.best_score < epsilon
    }
}

/// Best (assignment, score) pair seen so far.
///
/// The first candidate offered is always taken. After that a candidate
/// replaces the incumbent only when its score is strictly lower, so the
/// earliest of several equal scores is kept.
#[derive(Debug, Clone, Default)]
pub(crate) struct BestCandidate {
    best: Option<(ParameterSet, Score)>,
}

impl BestCandidate {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Score of the incumbent, infinite while nothing has been offered.
    pub(crate) fn score(&self) -> f64 {
        self.best
            .as_ref()
            .map_or(f64::INFINITY, |(_, score)| score.total)
    }

    fn improves(&self, total: f64) -> bool {
        self.best.is_none() || total < self.score()
    }

    /// Record `params` if it improves on the incumbent. Returns whether it did.
    pub(crate) fn offer(&mut self, params: &ParameterSet, score: &Score) -> bool {
        if self.improves(score.total) {
            self.best = Some((params.clone(), score.clone()));
            true
        } else {
            false
        }
    }

    /// Owned variant of [`BestCandidate::offer`] used when merging restarts.
    pub(crate) fn merge(&mut self, other: BestCandidate) {
        if let Some((params, score)) = other.best {
            if self.improves(score.total) {
                self.best = Some((params, score));
            }
        }
    }

    pub(crate) fn into_result(
        self,
        method: OptimizationMethod,
        iterations: usize,
        evaluations: usize,
        started: Instant,
        seed: Option<u64>,
    ) -> OptimizationResult {
        let (best_params, best_score, target_deviations) = match self.best {
            Some((params, score)) => (params, score.total, score.deviations),
            None => (ParameterSet::new(), f64::INFINITY, BTreeMap::new()),
        };
        OptimizationResult {
            method,
            best_params,
            best_score,
            target_deviations,
            iterations,
            evaluations,
            elapsed_seconds: round_to(started.elapsed().as_secs_f64(), 3),
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(total: f64) -> Score {
        Score {
            total,
            deviations: BTreeMap::from([("ttk".to_string(), total)]),
        }
    }

    fn params(x: f64) -> ParameterSet {
        ParameterSet::from([("x".to_string(), x)])
    }

    #[test]
    fn method_labels() {
        assert_eq!(OptimizationMethod::HillClimbing.to_string(), "hill_climbing");
        assert_eq!(OptimizationMethod::GridSearch.to_string(), "grid_search");
        assert_eq!(
            serde_json::to_string(&OptimizationMethod::GridSearchSampled).unwrap(),
            "\"grid_search_sampled\""
        );
        assert!(OptimizationMethod::GridSearch.is_exhaustive());
        assert!(!OptimizationMethod::GridSearchSampled.is_exhaustive());
        assert!(!OptimizationMethod::HillClimbing.is_exhaustive());
    }

    #[test]
    fn best_candidate_keeps_strict_improvements_only() {
        let mut best = BestCandidate::new();
        assert!(best.offer(&params(1.0), &score(0.5)));
        assert!(!best.offer(&params(2.0), &score(0.5)));
        assert!(!best.offer(&params(3.0), &score(0.9)));
        assert!(best.offer(&params(4.0), &score(0.1)));

        let result = best.into_result(OptimizationMethod::GridSearch, 4, 4, Instant::now(), None);
        assert_eq!(result.best_params, params(4.0));
        assert_eq!(result.best_score, 0.1);
        assert_eq!(result.target_deviations["ttk"], 0.1);
        assert!(result.converged(0.2));
        assert!(!result.converged(0.1));
    }

    #[test]
    fn merge_prefers_incumbent_on_ties() {
        let mut first = BestCandidate::new();
        first.offer(&params(1.0), &score(0.3));
        let mut second = BestCandidate::new();
        second.offer(&params(2.0), &score(0.3));

        first.merge(second);
        assert_eq!(first.best.as_ref().unwrap().0, params(1.0));

        let mut third = BestCandidate::new();
        third.offer(&params(3.0), &score(0.2));
        first.merge(third);
        assert_eq!(first.best.as_ref().unwrap().0, params(3.0));
        assert_eq!(first.score(), 0.2);
    }

    #[test]
    fn first_offer_is_taken_even_when_not_finite() {
        let mut best = BestCandidate::new();
        assert_eq!(best.score(), f64::INFINITY);
        assert!(best.offer(&params(1.0), &score(f64::INFINITY)));
        let result = best.into_result(OptimizationMethod::HillClimbing, 0, 1, Instant::now(), Some(7));
        assert_eq!(result.best_params, params(1.0));
    }

    #[test]
    fn result_serializes_with_method_label() {
        let result = OptimizationResult {
            method: OptimizationMethod::HillClimbing,
            best_params: params(5.0),
            best_score: 0.0,
            target_deviations: BTreeMap::new(),
            iterations: 10,
            evaluations: 11,
            elapsed_seconds: 0.001,
            seed: Some(42),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["method"], "hill_climbing");
        assert_eq!(json["best_params"]["x"], 5.0);
        assert_eq!(json["seed"], 42);
    }
}
