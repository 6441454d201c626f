use tracing::info;

use fc_formulas::EvalFunctionKind;
use fc_optimizer::{GridSearchOptimizer, HillClimbOptimizer, Problem, TuningConfig};
use fc_types::FcResult;

use crate::cli::{Method, OptimizeArgs};
use crate::report::OptimizationReport;

/// Load the configuration, run the selected optimizer and build the report.
///
/// Every configuration problem is reported before the search starts.
pub fn run(args: &OptimizeArgs) -> FcResult<OptimizationReport> {
    let config = TuningConfig::from_path(&args.config)?;
    let (parameters, targets) = config.to_problem_parts()?;
    let eval_function: EvalFunctionKind = config.eval_function.parse()?;

    info!(
        method = ?args.method,
        eval_function = %eval_function,
        parameters = parameters.len(),
        targets = targets.len(),
        "Loaded tuning config"
    );

    let problem = Problem::new(parameters.clone(), targets.clone(), eval_function)?;
    let result = match args.method {
        Method::HillClimbing => {
            let mut optimizer = HillClimbOptimizer::from_problem(problem)
                .with_max_iterations(args.iterations)
                .with_restarts(args.restarts)
                .with_parallel_restarts(args.parallel);
            if let Some(seed) = args.seed {
                optimizer = optimizer.with_seed(seed);
            }
            optimizer.optimize()?
        }
        Method::GridSearch => {
            let mut optimizer =
                GridSearchOptimizer::from_problem(problem).with_max_evaluations(args.max_evals);
            if let Some(seed) = args.seed {
                optimizer = optimizer.with_seed(seed);
            }
            optimizer.optimize()?
        }
    };

    Ok(OptimizationReport::new(
        &args.config,
        eval_function,
        result,
        targets,
        parameters,
    ))
}
