//! The search problem shared by every optimizer: parameters, targets,
//! evaluation function and scorer.

use std::collections::HashSet;

use fc_types::{
    ConfigError, EvaluationFunction, FcResult, MetricSet, ParameterRange, ParameterSet,
    TargetMetric,
};

use crate::scoring::{Score, ScoringEngine};

/// Score below which a search is treated as converged.
pub const DEFAULT_CONVERGENCE_EPSILON: f64 = 1e-8;

/// A validated tuning problem.
#[derive(Debug, Clone)]
pub struct Problem<E> {
    parameters: Vec<ParameterRange>,
    targets: Vec<TargetMetric>,
    evaluator: E,
    scoring: ScoringEngine,
}

impl<E: EvaluationFunction> Problem<E> {
    /// Fails with [`ConfigError::NoParameters`], [`ConfigError::NoTargets`]
    /// or [`ConfigError::DuplicateParameter`].
    pub fn new(
        parameters: Vec<ParameterRange>,
        targets: Vec<TargetMetric>,
        evaluator: E,
    ) -> FcResult<Self> {
        if parameters.is_empty() {
            return Err(ConfigError::NoParameters.into());
        }
        if targets.is_empty() {
            return Err(ConfigError::NoTargets.into());
        }

        let mut seen = HashSet::new();
        for param in &parameters {
            if !seen.insert(param.name()) {
                return Err(ConfigError::DuplicateParameter {
                    name: param.name().to_string(),
                }
                .into());
            }
        }

        Ok(Self {
            parameters,
            targets,
            evaluator,
            scoring: ScoringEngine::new(),
        })
    }

    pub fn with_scoring(mut self, scoring: ScoringEngine) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn parameters(&self) -> &[ParameterRange] {
        &self.parameters
    }

    pub fn targets(&self) -> &[TargetMetric] {
        &self.targets
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    /// Raw metrics for `params`.
    pub fn metrics(&self, params: &ParameterSet) -> MetricSet {
        self.evaluator.evaluate(params)
    }

    /// Evaluate `params` and score the resulting metrics.
    pub fn evaluate(&self, params: &ParameterSet) -> Score {
        self.scoring.score(&self.metrics(params), &self.targets)
    }
}
