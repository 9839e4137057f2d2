use std::sync::Arc;

use crate::{
    animation::ease::Ease,
    foundation::core::MixValue,
    foundation::error::{MixError, MixResult},
};

/// One key of a [`NormalizedKeys`] curve.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Key<T> {
    /// Position in the clip's normalized time, `[0, 1]`.
    pub t: f64,
    pub value: T,
    /// Ease applied toward the next key.
    #[serde(default)]
    pub ease: Ease,
}

impl<T> Key<T> {
    pub fn new(t: f64, value: T) -> Self {
        Self {
            t,
            value,
            ease: Ease::Linear,
        }
    }

    pub fn eased(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Keyframes laid out over a clip's normalized `[0, 1]` time.
///
/// This covers gradients (color keys), scalar curves and vector paths alike.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct NormalizedKeys<T> {
    pub keys: Vec<Key<T>>, // sorted by t
}

impl<T: MixValue> NormalizedKeys<T> {
    pub fn new(keys: Vec<Key<T>>) -> Self {
        Self { keys }
    }

    /// Two-key linear ramp from `from` at `t = 0` to `to` at `t = 1`.
    pub fn ramp(from: T, to: T) -> Self {
        Self::new(vec![Key::new(0.0, from), Key::new(1.0, to)])
    }

    pub fn validate(&self) -> MixResult<()> {
        if self.keys.is_empty() {
            return Err(MixError::validation("keys must contain at least one key"));
        }
        if self.keys.iter().any(|k| !k.t.is_finite() || !(0.0..=1.0).contains(&k.t)) {
            return Err(MixError::validation("key positions must lie in [0, 1]"));
        }
        if !self.keys.windows(2).all(|w| w[0].t <= w[1].t) {
            return Err(MixError::validation("keys must be sorted by t"));
        }
        Ok(())
    }

    /// Sample at normalized time `t` (clamped into `[0, 1]`).
    ///
    /// Holds the first/last key outside the keyed range. An empty curve samples as
    /// [`MixValue::ZERO`].
    pub fn evaluate(&self, t: f64) -> T {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let Some(first) = self.keys.first() else {
            return T::ZERO;
        };

        let idx = self.keys.partition_point(|k| k.t <= t);
        if idx == 0 {
            return first.value;
        }
        if idx >= self.keys.len() {
            return self.keys[self.keys.len() - 1].value;
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let span = b.t - a.t;
        if span <= 0.0 {
            return a.value;
        }
        let u = a.ease.apply((t - a.t) / span);
        T::lerp(a.value, b.value, u)
    }
}

/// Host-provided evaluation function `t -> T`.
///
/// Must be pure and total on `[0, 1]`.
#[derive(Clone)]
pub struct ValueFn<T>(Arc<dyn Fn(f64) -> T + Send + Sync>);

impl<T> ValueFn<T> {
    pub fn new(f: impl Fn(f64) -> T + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, t: f64) -> T {
        (self.0)(t)
    }
}

impl<T> std::fmt::Debug for ValueFn<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ValueFn(..)")
    }
}

/// Payload of one clip channel: what the clip contributes at normalized time `t`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipValue<T> {
    /// The same value over the whole clip.
    Constant(T),
    /// Gradient/curve over the clip's normalized time.
    Keys(NormalizedKeys<T>),
    /// Host callback; not serializable.
    #[serde(skip)]
    Function(ValueFn<T>),
}

impl<T: MixValue> ClipValue<T> {
    pub fn constant(value: T) -> Self {
        Self::Constant(value)
    }

    pub fn keys(keys: Vec<Key<T>>) -> Self {
        Self::Keys(NormalizedKeys::new(keys))
    }

    pub fn ramp(from: T, to: T) -> Self {
        Self::Keys(NormalizedKeys::ramp(from, to))
    }

    pub fn from_fn(f: impl Fn(f64) -> T + Send + Sync + 'static) -> Self {
        Self::Function(ValueFn::new(f))
    }

    /// Sample at normalized time `t`; `t` is clamped into `[0, 1]`.
    pub fn evaluate(&self, t: f64) -> T {
        match self {
            Self::Constant(v) => *v,
            Self::Keys(keys) => keys.evaluate(t),
            Self::Function(f) => {
                let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
                f.call(t)
            }
        }
    }

    pub fn validate(&self) -> MixResult<()> {
        match self {
            Self::Constant(_) | Self::Function(_) => Ok(()),
            Self::Keys(keys) => keys.validate(),
        }
    }
}

impl<T: MixValue> From<T> for ClipValue<T> {
    fn from(value: T) -> Self {
        Self::Constant(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
