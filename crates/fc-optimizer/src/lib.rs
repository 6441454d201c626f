//! # fc-optimizer
//!
//! Parameter search for Fulcrum: tunes bounded numeric parameters so that the
//! metrics an evaluation function derives from them hit designer targets.
//!
//! Provides the weighted-deviation scorer, a hill-climbing optimizer with
//! random restarts, an exhaustive grid search that falls back to random
//! sampling on oversized grids, and the JSON tuning configuration.

mod config;
mod grid;
mod hill_climb;
mod problem;
mod result;
mod rng;
mod scoring;

pub use config::{ParameterSpec, TargetSpec, TuningConfig, DEFAULT_EVAL_FUNCTION};
pub use grid::{GridSearchOptimizer, DEFAULT_MAX_EVALUATIONS};
pub use hill_climb::{HillClimbOptimizer, DEFAULT_MAX_ITERATIONS, DEFAULT_RESTARTS};
pub use problem::{Problem, DEFAULT_CONVERGENCE_EPSILON};
pub use result::{OptimizationMethod, OptimizationResult};
pub use scoring::{Score, ScoringEngine, DEFAULT_MISSING_METRIC_PENALTY};
