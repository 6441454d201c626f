//! Weighted deviation scoring of a metric set against its targets.

use serde::Serialize;
use std::collections::BTreeMap;

use fc_types::{round_to, MetricSet, TargetMetric};

/// Deviation charged for a target whose metric the evaluation function did not produce.
pub const DEFAULT_MISSING_METRIC_PENALTY: f64 = 1e6;

/// Decimal places kept for reported per-target deviations.
pub const DEVIATION_PRECISION: i32 = 6;

/// Fitness of one candidate: lower is better, zero is an exact match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score {
    pub total: f64,
    /// Deviation of each target, keyed by target name.
    pub deviations: BTreeMap<String, f64>,
}

/// Stateless scorer with a configurable missing-metric penalty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringEngine {
    missing_metric_penalty: f64,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            missing_metric_penalty: DEFAULT_MISSING_METRIC_PENALTY,
        }
    }

    pub fn with_missing_metric_penalty(mut self, penalty: f64) -> Self {
        self.missing_metric_penalty = penalty;
        self
    }

    pub fn missing_metric_penalty(&self) -> f64 {
        self.missing_metric_penalty
    }

    /// Deviation of a single target.
    ///
    /// Relative (`|actual - target| / |target|`) for non-zero targets,
    /// absolute for a zero target, and the missing-metric penalty when the
    /// metric is absent or not a finite number.
    pub fn deviation(&self, actual: Option<f64>, target: f64) -> f64 {
        match actual {
            None => self.missing_metric_penalty,
            Some(actual) if !actual.is_finite() => self.missing_metric_penalty,
            Some(actual) if target != 0.0 => (actual - target).abs() / target.abs(),
            Some(actual) => (actual - target).abs(),
        }
    }

    /// Score `metrics` against `targets`: the weighted sum of per-target deviations.
    pub fn score(&self, metrics: &MetricSet, targets: &[TargetMetric]) -> Score {
        let mut total = 0.0;
        let mut deviations = BTreeMap::new();

        for target in targets {
            let deviation = self.deviation(metrics.get(target.name()).copied(), target.target());
            total += deviation * target.weight();
            deviations.insert(
                target.name().to_string(),
                round_to(deviation, DEVIATION_PRECISION),
            );
        }

        Score { total, deviations }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}
