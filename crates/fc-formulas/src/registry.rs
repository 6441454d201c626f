//! The closed set of built-in evaluation functions, selectable by key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use fc_types::{ConfigError, EvaluationFunction, FcError, MetricSet, ParameterSet};

use crate::combat::combat_metrics;
use crate::economy::economy_metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalFunctionKind {
    /// DPS, effective DPS, time-to-kill and effective health.
    Combat,
    /// Net flow, time to afford, faucet/sink ratio and inflation.
    Economy,
}

impl EvalFunctionKind {
    pub const ALL: [EvalFunctionKind; 2] = [Self::Combat, Self::Economy];

    /// Configuration key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Combat => "combat",
            Self::Economy => "economy",
        }
    }

    pub fn available_keys() -> Vec<String> {
        Self::ALL.iter().map(|kind| kind.key().to_string()).collect()
    }
}

impl fmt::Display for EvalFunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EvalFunctionKind {
    type Err = FcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| {
                ConfigError::UnknownEvalFunction {
                    name: s.to_string(),
                    available: Self::available_keys(),
                }
                .into()
            })
    }
}

impl EvaluationFunction for EvalFunctionKind {
    fn evaluate(&self, params: &ParameterSet) -> MetricSet {
        match self {
            Self::Combat => combat_metrics(params),
            Self::Economy => economy_metrics(params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_keys() {
        assert_eq!("combat".parse::<EvalFunctionKind>().unwrap(), EvalFunctionKind::Combat);
        assert_eq!("economy".parse::<EvalFunctionKind>().unwrap(), EvalFunctionKind::Economy);
        for kind in EvalFunctionKind::ALL {
            assert_eq!(kind.to_string().parse::<EvalFunctionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_key_lists_available() {
        match "loot".parse::<EvalFunctionKind>() {
            Err(FcError::Config(ConfigError::UnknownEvalFunction { name, available })) => {
                assert_eq!(name, "loot");
                assert_eq!(available, vec!["combat", "economy"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn dispatches_to_formula() {
        let params = ParameterSet::new();
        assert!(EvalFunctionKind::Combat.evaluate(&params).contains_key("ttk"));
        assert!(EvalFunctionKind::Economy.evaluate(&params).contains_key("inflation_rate"));
        assert!(!EvalFunctionKind::Economy.evaluate(&params).contains_key("ttk"));
    }

    #[test]
    fn serializes_as_key() {
        assert_eq!(serde_json::to_string(&EvalFunctionKind::Economy).unwrap(), "\"economy\"");
    }
}
