//! The evaluation-function seam between the search core and the formulas it tunes.

use std::collections::BTreeMap;

use crate::parameter::ParameterSet;

/// A complete or partial mapping of metric name to value.
pub type MetricSet = BTreeMap<String, f64>;

/// Maps a parameter assignment to the metrics it produces.
///
/// Implementations must be pure: identical inputs yield identical outputs,
/// and calls may happen repeatedly and from several threads at once. A
/// metric the implementation cannot produce is simply left out of the
/// returned set.
pub trait EvaluationFunction: Send + Sync {
    fn evaluate(&self, params: &ParameterSet) -> MetricSet;
}

impl<F> EvaluationFunction for F
where
    F: Fn(&ParameterSet) -> MetricSet + Send + Sync,
{
    fn evaluate(&self, params: &ParameterSet) -> MetricSet {
        self(params)
    }
}
