//! Target metric definitions.

use serde::Serialize;

use crate::errors::{ConfigError, FcResult};

/// Weight given to a target when the configuration does not specify one.
pub const DEFAULT_TARGET_WEIGHT: f64 = 1.0;

/// A named metric value the search should hit, scaled by an importance weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetMetric {
    name: String,
    target: f64,
    weight: f64,
}

impl TargetMetric {
    /// Create a target with the default weight of 1.0.
    pub fn new(name: impl Into<String>, target: f64) -> FcResult<Self> {
        Self::weighted(name, target, DEFAULT_TARGET_WEIGHT)
    }

    /// Create a target with an explicit, non-negative weight.
    pub fn weighted(name: impl Into<String>, target: f64, weight: f64) -> FcResult<Self> {
        let name = name.into();
        if !target.is_finite() {
            return Err(ConfigError::InvalidTarget {
                name,
                reason: format!("target ({target}) must be finite"),
            }
            .into());
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(ConfigError::InvalidTarget {
                name,
                reason: format!("weight ({weight}) must be finite and non-negative"),
            }
            .into());
        }
        Ok(Self {
            name,
            target,
            weight,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weight_is_one() {
        let t = TargetMetric::new("ttk", 3.0).unwrap();
        assert_eq!(t.name(), "ttk");
        assert_eq!(t.target(), 3.0);
        assert_eq!(t.weight(), 1.0);
    }

    #[test]
    fn zero_weight_is_allowed() {
        assert_eq!(TargetMetric::weighted("dps", 10.0, 0.0).unwrap().weight(), 0.0);
    }

    #[test]
    fn rejects_negative_weight_and_non_finite_target() {
        assert!(TargetMetric::weighted("dps", 10.0, -0.5).is_err());
        assert!(TargetMetric::weighted("dps", 10.0, f64::NAN).is_err());
        assert!(TargetMetric::new("dps", f64::INFINITY).is_err());
    }
}
