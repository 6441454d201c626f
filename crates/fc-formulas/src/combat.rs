//! Damage-per-second and time-to-kill formulas.

use serde::{Deserialize, Serialize};

use fc_types::{round_to, MetricSet, ParameterSet};

/// Decimal places kept for every formula output.
pub const METRIC_PRECISION: i32 = 4;

/// Combat stats read from a parameter assignment.
///
/// Any stat missing from the assignment takes its [`Default`] value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatInput {
    pub attack_power: f64,
    /// Attacks per second.
    pub attack_speed: f64,
    /// Probability of a critical hit (0-1).
    pub critical_chance: f64,
    /// Damage multiplier applied on a critical hit.
    pub critical_multiplier: f64,
    /// Flat damage removed from each hit.
    pub armor: f64,
    pub health: f64,
}

impl Default for CombatInput {
    fn default() -> Self {
        Self {
            attack_power: 10.0,
            attack_speed: 1.0,
            critical_chance: 0.0,
            critical_multiplier: 1.5,
            armor: 0.0,
            health: 100.0,
        }
    }
}

impl CombatInput {
    pub fn from_params(params: &ParameterSet) -> Self {
        let defaults = Self::default();
        let get = |name: &str, fallback: f64| params.get(name).copied().unwrap_or(fallback);
        Self {
            attack_power: get("attack_power", defaults.attack_power),
            attack_speed: get("attack_speed", defaults.attack_speed),
            critical_chance: get("critical_chance", defaults.critical_chance),
            critical_multiplier: get("critical_multiplier", defaults.critical_multiplier),
            armor: get("armor", defaults.armor),
            health: get("health", defaults.health),
        }
    }
}

/// Derived combat metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatMetrics {
    /// Expected damage per second including crits, before armor.
    pub dps: f64,
    /// DPS after flat armor reduction, floored at 1.
    pub effective_dps: f64,
    /// Seconds to kill a target with `health` hit points.
    pub ttk: f64,
    /// Effective hit points once armor is accounted for.
    pub ehp: f64,
}

impl CombatMetrics {
    pub fn compute(input: &CombatInput) -> Self {
        let base_dps = input.attack_power * input.attack_speed;
        let crit_dps =
            base_dps * (1.0 + input.critical_chance * (input.critical_multiplier - 1.0));

        // Flat reduction: armor is subtracted from every hit.
        let effective_dps = (crit_dps - input.armor * input.attack_speed).max(1.0);
        let ttk = input.health / effective_dps.max(0.01);
        let ehp = input.health + input.armor * (input.health / input.attack_power.max(1.0));

        Self {
            dps: round_to(crit_dps, METRIC_PRECISION),
            effective_dps: round_to(effective_dps, METRIC_PRECISION),
            ttk: round_to(ttk, METRIC_PRECISION),
            ehp: round_to(ehp, METRIC_PRECISION),
        }
    }

    pub fn to_metric_set(&self) -> MetricSet {
        MetricSet::from([
            ("dps".to_string(), self.dps),
            ("effective_dps".to_string(), self.effective_dps),
            ("ttk".to_string(), self.ttk),
            ("ehp".to_string(), self.ehp),
        ])
    }
}

/// The `combat` evaluation function.
pub fn combat_metrics(params: &ParameterSet) -> MetricSet {
    CombatMetrics::compute(&CombatInput::from_params(params)).to_metric_set()
}
