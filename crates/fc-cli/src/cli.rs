use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use fc_optimizer::{DEFAULT_MAX_EVALUATIONS, DEFAULT_MAX_ITERATIONS, DEFAULT_RESTARTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Method {
    #[default]
    #[value(name = "hill_climbing")]
    HillClimbing,
    #[value(name = "grid_search")]
    GridSearch,
}

/// Optimize game balance parameters to match target metrics
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct OptimizeArgs {
    /// Optimization config JSON file (parameters, targets, eval_function)
    #[arg(long)]
    pub config: PathBuf,

    /// Optimization method
    #[arg(long, value_enum, default_value_t = Method::HillClimbing)]
    pub method: Method,

    /// Max iterations per restart for hill climbing
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub iterations: usize,

    /// Random restarts for hill climbing
    #[arg(long, default_value_t = DEFAULT_RESTARTS)]
    pub restarts: usize,

    /// Max evaluations for grid search
    #[arg(long = "max-evals", default_value_t = DEFAULT_MAX_EVALUATIONS)]
    pub max_evals: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output path for results JSON
    #[arg(long, default_value = "optimized_params.json")]
    pub output: PathBuf,

    /// Run hill-climbing restarts in parallel
    #[arg(long)]
    pub parallel: bool,
}
