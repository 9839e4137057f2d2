use crate::{foundation::core::MixValue, mix::policy::ValueControl};

/// Weighted sum of the per-input contributions to one channel.
///
/// Inputs may be pushed in any order; the policy is only applied once every active
/// input has been folded in, because it needs the full `total_weight`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blend<T> {
    pub value: T,
    pub total_weight: f64,
}

impl<T: MixValue> Default for Blend<T> {
    fn default() -> Self {
        Self {
            value: T::ZERO,
            total_weight: 0.0,
        }
    }
}

impl<T: MixValue> Blend<T> {
    pub fn push(&mut self, contribution: T, weight: f64) {
        self.value = self.value.add(contribution.scale(weight));
        self.total_weight += weight;
    }

    pub fn is_empty(&self) -> bool {
        self.total_weight <= 0.0
    }

    /// Run the channel's [`ValueControl`] against the captured baseline.
    pub fn resolve(&self, policy: ValueControl, binding_value: T, initial: T) -> T {
        policy.apply(binding_value, initial, self.value, self.total_weight)
    }
}

/// Parallel accumulator of curve-modulated inputs on a scalar channel.
///
/// Only inputs with curve modulation enabled are pushed; `total_weight` is therefore the
/// curve-enabled share of the channel's weight.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CurveBlend {
    pub weighted_sum: f64,
    pub total_weight: f64,
}

impl CurveBlend {
    pub fn push(&mut self, curve_value: f64, weight: f64) {
        self.weighted_sum += curve_value * weight;
        self.total_weight += weight;
    }

    pub fn is_empty(&self) -> bool {
        self.total_weight <= 0.0
    }

    /// Blend between "no curve" and "fully curve-multiplied" by the curve-enabled weight:
    /// `value * (1 - w) + value * weighted_sum * w`.
    pub fn apply(&self, value: f64) -> f64 {
        if self.is_empty() {
            return value;
        }
        let w = self.total_weight;
        value * (1.0 - w) + value * self.weighted_sum * w
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mix/blend.rs"]
mod tests;
