//! JSON tuning configuration: parameter ranges, targets and the evaluation
//! function key.

use serde::{Deserialize, Serialize};
use std::path::Path;

use fc_types::{ConfigError, FcResult, ParameterRange, TargetMetric, DEFAULT_TARGET_WEIGHT};

/// Evaluation function used when the configuration names none.
pub const DEFAULT_EVAL_FUNCTION: &str = "combat";

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningConfig {
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,

    #[serde(default)]
    pub targets: Vec<TargetSpec>,

    /// Key into the registry of built-in evaluation functions.
    #[serde(default = "default_eval_function")]
    pub eval_function: String,
}

/// One `parameters[]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub min: f64,
    pub max: f64,
    #[serde(default = "default_step")]
    pub step: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<f64>,
}

/// One `targets[]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub name: String,
    pub target: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_eval_function() -> String {
    DEFAULT_EVAL_FUNCTION.to_string()
}

fn default_step() -> f64 {
    1.0
}

fn default_weight() -> f64 {
    DEFAULT_TARGET_WEIGHT
}

impl TuningConfig {
    pub fn from_path(path: impl AsRef<Path>) -> FcResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> FcResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Validate every entry and build the typed parameter and target lists.
    pub fn to_problem_parts(&self) -> FcResult<(Vec<ParameterRange>, Vec<TargetMetric>)> {
        if self.parameters.is_empty() {
            return Err(ConfigError::NoParameters.into());
        }
        if self.targets.is_empty() {
            return Err(ConfigError::NoTargets.into());
        }

        let parameters = self
            .parameters
            .iter()
            .map(|p| ParameterRange::new(&p.name, p.min, p.max, p.step, p.initial))
            .collect::<FcResult<Vec<_>>>()?;
        let targets = self
            .targets
            .iter()
            .map(|t| TargetMetric::weighted(&t.name, t.target, t.weight))
            .collect::<FcResult<Vec<_>>>()?;

        Ok((parameters, targets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_types::FcError;

    const SAMPLE: &str = r#"{
        "parameters": [
            {"name": "attack_power", "min": 5, "max": 50, "step": 1, "initial": 10},
            {"name": "armor", "min": 0, "max": 20}
        ],
        "targets": [
            {"name": "ttk", "target": 3.0, "weight": 2.0},
            {"name": "dps", "target": 40}
        ],
        "eval_function": "combat"
    }"#;

    #[test]
    fn parses_sample_config() {
        let config = TuningConfig::from_json_str(SAMPLE).unwrap();
        assert_eq!(config.eval_function, "combat");
        assert_eq!(config.parameters[1].step, 1.0);
        assert_eq!(config.parameters[1].initial, None);
        assert_eq!(config.targets[1].weight, 1.0);

        let (parameters, targets) = config.to_problem_parts().unwrap();
        assert_eq!(parameters[0].name(), "attack_power");
        assert_eq!(parameters[0].initial(), Some(10.0));
        assert_eq!(parameters[1].max_value(), 20.0);
        assert_eq!(targets[0].weight(), 2.0);
        assert_eq!(targets[1].target(), 40.0);
    }

    #[test]
    fn eval_function_defaults_to_combat() {
        let config = TuningConfig::from_json_str(
            r#"{"parameters": [{"name": "x", "min": 0, "max": 1}], "targets": [{"name": "y", "target": 1}]}"#,
        )
        .unwrap();
        assert_eq!(config.eval_function, DEFAULT_EVAL_FUNCTION);
    }

    #[test]
    fn empty_sections_are_config_errors() {
        let no_params = TuningConfig::from_json_str(r#"{"targets": [{"name": "y", "target": 1}]}"#).unwrap();
        assert!(matches!(
            no_params.to_problem_parts(),
            Err(FcError::Config(ConfigError::NoParameters))
        ));

        let no_targets =
            TuningConfig::from_json_str(r#"{"parameters": [{"name": "x", "min": 0, "max": 1}]}"#).unwrap();
        assert!(matches!(
            no_targets.to_problem_parts(),
            Err(FcError::Config(ConfigError::NoTargets))
        ));
    }

    #[test]
    fn invalid_entries_are_rejected() {
        let inverted = TuningConfig::from_json_str(
            r#"{"parameters": [{"name": "x", "min": 5, "max": 1}], "targets": [{"name": "y", "target": 1}]}"#,
        )
        .unwrap();
        assert!(matches!(
            inverted.to_problem_parts(),
            Err(FcError::Config(ConfigError::InvalidParameter { .. }))
        ));

        let negative_weight = TuningConfig::from_json_str(
            r#"{"parameters": [{"name": "x", "min": 0, "max": 1}], "targets": [{"name": "y", "target": 1, "weight": -1}]}"#,
        )
        .unwrap();
        assert!(matches!(
            negative_weight.to_problem_parts(),
            Err(FcError::Config(ConfigError::InvalidTarget { .. }))
        ));
    }

    #[test]
    fn missing_bounds_fail_to_parse() {
        let result = TuningConfig::from_json_str(
            r#"{"parameters": [{"name": "x", "min": 0}], "targets": []}"#,
        );
        assert!(matches!(result, Err(FcError::Serialization(_))));
    }
}
