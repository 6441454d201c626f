//! Currency faucet/sink flow formulas.

use serde::{Deserialize, Serialize};

use fc_types::{round_to, MetricSet, ParameterSet};

use crate::combat::METRIC_PRECISION;

/// Reported when currency never accumulates, so the item is never affordable.
pub const NEVER_AFFORDABLE: f64 = 9999.0;

/// Economy rates read from a parameter assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyInput {
    /// Currency entering the economy per tick.
    pub faucet_rate: f64,
    /// Currency leaving the economy per tick.
    pub sink_rate: f64,
    pub initial_currency: f64,
    pub item_cost: f64,
}

impl Default for EconomyInput {
    fn default() -> Self {
        Self {
            faucet_rate: 100.0,
            sink_rate: 80.0,
            initial_currency: 1000.0,
            item_cost: 5000.0,
        }
    }
}

impl EconomyInput {
    pub fn from_params(params: &ParameterSet) -> Self {
        let defaults = Self::default();
        let get = |name: &str, fallback: f64| params.get(name).copied().unwrap_or(fallback);
        Self {
            faucet_rate: get("faucet_rate", defaults.faucet_rate),
            sink_rate: get("sink_rate", defaults.sink_rate),
            initial_currency: get("initial_currency", defaults.initial_currency),
            item_cost: get("item_cost", defaults.item_cost),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyMetrics {
    pub net_flow: f64,
    /// Ticks until `item_cost` is reached from `initial_currency`.
    pub time_to_afford: f64,
    pub faucet_sink_ratio: f64,
    /// Net flow as a percentage of the starting balance.
    pub inflation_rate: f64,
}

impl EconomyMetrics {
    pub fn compute(input: &EconomyInput) -> Self {
        let net_flow = input.faucet_rate - input.sink_rate;
        let time_to_afford = if net_flow > 0.0 {
            ((input.item_cost - input.initial_currency) / net_flow).max(0.0)
        } else {
            NEVER_AFFORDABLE
        };
        let faucet_sink_ratio = input.faucet_rate / input.sink_rate.max(0.01);
        let inflation_rate = net_flow / input.initial_currency.max(1.0) * 100.0;

        Self {
            net_flow: round_to(net_flow, METRIC_PRECISION),
            time_to_afford: round_to(time_to_afford, METRIC_PRECISION),
            faucet_sink_ratio: round_to(faucet_sink_ratio, METRIC_PRECISION),
            inflation_rate: round_to(inflation_rate, METRIC_PRECISION),
        }
    }

    pub fn to_metric_set(&self) -> MetricSet {
        MetricSet::from([
            ("net_flow".to_string(), self.net_flow),
            ("time_to_afford".to_string(), self.time_to_afford),
            ("faucet_sink_ratio".to_string(), self.faucet_sink_ratio),
            ("inflation_rate".to_string(), self.inflation_rate),
        ])
    }
}

/// The `economy` evaluation function.
pub fn economy_metrics(params: &ParameterSet) -> MetricSet {
    EconomyMetrics::compute(&EconomyInput::from_params(params)).to_metric_set()
}
