//! Tunable parameter definitions and parameter assignments.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::errors::{ConfigError, FcResult};

/// A complete assignment of every configured parameter name to a value.
pub type ParameterSet = BTreeMap<String, f64>;

/// Tolerance applied when deciding whether the last grid step still lands on `max_value`.
pub const DISCRETIZATION_TOLERANCE: f64 = 1e-9;

/// Decimal places kept for grid values and randomly drawn restart values.
pub const VALUE_PRECISION: i32 = 6;

/// Round `value` to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// A tunable scalar with inclusive bounds, a step size and an optional
/// starting value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterRange {
    name: String,
    min_value: f64,
    max_value: f64,
    step: f64,
    initial: Option<f64>,
}

impl ParameterRange {
    /// Create a validated range.
    ///
    /// Fails when the bounds are not finite or inverted, when `step` is not
    /// strictly positive, or when `initial` lies outside the bounds.
    pub fn new(
        name: impl Into<String>,
        min_value: f64,
        max_value: f64,
        step: f64,
        initial: Option<f64>,
    ) -> FcResult<Self> {
        let name = name.into();
        let invalid = |reason: String| ConfigError::InvalidParameter {
            name: name.clone(),
            reason,
        };

        if !min_value.is_finite() || !max_value.is_finite() {
            return Err(invalid("bounds must be finite".to_string()).into());
        }
        if min_value > max_value {
            return Err(invalid(format!(
                "min ({min_value}) must be less than or equal to max ({max_value})"
            ))
            .into());
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(invalid(format!("step ({step}) must be positive")).into());
        }
        if let Some(value) = initial {
            if !(min_value..=max_value).contains(&value) {
                return Err(invalid(format!(
                    "initial ({value}) must lie within [{min_value}, {max_value}]"
                ))
                .into());
            }
        }

        Ok(Self {
            name,
            min_value,
            max_value,
            step,
            initial,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn initial(&self) -> Option<f64> {
        self.initial
    }

    /// Midpoint of the range, rounded to [`VALUE_PRECISION`] places.
    pub fn midpoint(&self) -> f64 {
        self.clamp(round_to(
            (self.min_value + self.max_value) / 2.0,
            VALUE_PRECISION,
        ))
    }

    /// The value a search starts from: `initial` when configured, the midpoint otherwise.
    pub fn starting_value(&self) -> f64 {
        self.initial.unwrap_or_else(|| self.midpoint())
    }

    /// Restrict `value` to `[min_value, max_value]`.
    ///
    /// NaN maps to `min_value`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min_value;
        }
        value.clamp(self.min_value, self.max_value)
    }

    /// The grid values `min, min + step, min + 2*step, ...` up to and
    /// including `max` (within [`DISCRETIZATION_TOLERANCE`]).
    pub fn discrete_values(&self) -> DiscreteValues {
        let span = (self.max_value - self.min_value + DISCRETIZATION_TOLERANCE) / self.step;
        // `as` saturates, so absurdly fine steps cap at usize::MAX instead of wrapping.
        let len = (span.floor() as usize).saturating_add(1);
        DiscreteValues {
            range: self.clone(),
            front: 0,
            back: len,
        }
    }
}

/// Lazy, finite sequence of a parameter's grid values.
///
/// Values are computed from their index rather than by accumulating `step`,
/// so random access through [`DiscreteValues::get`] is O(1) and large grids
/// never have to be materialized.
#[derive(Debug, Clone)]
pub struct DiscreteValues {
    range: ParameterRange,
    front: usize,
    back: usize,
}

impl DiscreteValues {
    /// The `index`-th grid value counted from the start of the sequence.
    pub fn get(&self, index: usize) -> Option<f64> {
        let absolute = self.front.checked_add(index)?;
        if absolute >= self.back {
            return None;
        }
        Some(self.value_at(absolute))
    }

    fn value_at(&self, index: usize) -> f64 {
        let raw = self.range.min_value + index as f64 * self.range.step;
        self.range.clamp(round_to(raw, VALUE_PRECISION))
    }
}

impl Iterator for DiscreteValues {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.front >= self.back {
            return None;
        }
        let value = self.value_at(self.front);
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<f64> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for DiscreteValues {
    fn next_back(&mut self) -> Option<f64> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.value_at(self.back))
    }
}

impl ExactSizeIterator for DiscreteValues {}
