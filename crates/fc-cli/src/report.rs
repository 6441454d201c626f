//! Result file and console summary for a finished run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use uuid::Uuid;

use fc_formulas::EvalFunctionKind;
use fc_optimizer::OptimizationResult;
use fc_types::{EvaluationFunction, FcResult, MetricSet, ParameterRange, TargetMetric};

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub config_file: String,
    pub eval_function: EvalFunctionKind,
}

/// Everything written to the output JSON.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationReport {
    pub metadata: ReportMetadata,
    pub result: OptimizationResult,
    /// Metrics recomputed at `result.best_params`.
    pub final_metrics: MetricSet,
    pub targets: Vec<TargetMetric>,
    pub parameters: Vec<ParameterRange>,
}

impl OptimizationReport {
    pub fn new(
        config_file: &Path,
        eval_function: EvalFunctionKind,
        result: OptimizationResult,
        targets: Vec<TargetMetric>,
        parameters: Vec<ParameterRange>,
    ) -> Self {
        let final_metrics = eval_function.evaluate(&result.best_params);
        Self {
            metadata: ReportMetadata {
                run_id: Uuid::new_v4(),
                generated_at: Utc::now(),
                config_file: config_file.display().to_string(),
                eval_function,
            },
            result,
            final_metrics,
            targets,
            parameters,
        }
    }

    /// Write pretty-printed JSON, creating parent directories as needed.
    pub fn write_to(&self, path: &Path) -> FcResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Human-readable summary for the console.
    pub fn summary(&self) -> String {
        let result = &self.result;
        let mut out = String::new();

        let _ = writeln!(out, "Optimization Complete ({})", result.method);
        let _ = writeln!(out, "  Iterations : {}", result.iterations);
        let _ = writeln!(out, "  Evaluations: {}", result.evaluations);
        let _ = writeln!(out, "  Elapsed    : {:.3}s", result.elapsed_seconds);
        let _ = writeln!(out, "  Best Score : {:.6} (lower is better)", result.best_score);

        let _ = writeln!(out, "\nOptimized Parameters:");
        for (name, value) in &result.best_params {
            let _ = writeln!(out, "  {name}: {value:.4}");
        }

        let _ = writeln!(out, "\nResulting Metrics:");
        for (name, value) in &self.final_metrics {
            let _ = writeln!(out, "  {name}: {value:.4}");
        }

        let _ = writeln!(out, "\nTarget Deviations:");
        for target in &self.targets {
            let actual = self
                .final_metrics
                .get(target.name())
                .map_or_else(|| "N/A".to_string(), |v| format!("{v:.4}"));
            let deviation = result
                .target_deviations
                .get(target.name())
                .map_or_else(|| "N/A".to_string(), |d| format!("{:.4}%", d * 100.0));
            let _ = writeln!(
                out,
                "  {}: target={:.4}  actual={actual}  deviation={deviation}",
                target.name(),
                target.target()
            );
        }

        out
    }
}
