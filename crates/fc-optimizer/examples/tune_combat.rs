use fc_formulas::combat_metrics;
use fc_optimizer::{GridSearchOptimizer, HillClimbOptimizer};
use fc_types::{FcResult, ParameterRange, TargetMetric};

fn main() -> FcResult<()> {
    println!("Fulcrum combat tuning example");

    let parameters = vec![
        ParameterRange::new("attack_power", 5.0, 50.0, 1.0, Some(10.0))?,
        ParameterRange::new("attack_speed", 0.5, 2.0, 0.1, None)?,
        ParameterRange::new("armor", 0.0, 20.0, 1.0, None)?,
    ];
    let targets = vec![
        TargetMetric::weighted("ttk", 3.0, 2.0)?,
        TargetMetric::new("ehp", 150.0)?,
    ];

    let climb = HillClimbOptimizer::new(parameters.clone(), targets.clone(), combat_metrics)?
        .with_max_iterations(2_000)
        .with_restarts(4)
        .with_seed(42)
        .optimize()?;
    println!(
        "hill climbing: score {:.6} after {} evaluations -> {:?}",
        climb.best_score, climb.evaluations, climb.best_params
    );

    let grid = GridSearchOptimizer::new(parameters, targets, combat_metrics)?
        .with_max_evaluations(5_000)
        .with_seed(42)
        .optimize()?;
    println!(
        "{}: score {:.6} after {} evaluations -> {:?}",
        grid.method, grid.best_score, grid.evaluations, grid.best_params
    );

    Ok(())
}
