use crate::{
    animation::noise::pseudo_noise_1d,
    animation::value::{ClipValue, Key, NormalizedKeys},
    foundation::error::{MixError, MixResult},
    foundation::math::{is_non_negative_finite, wrapped_time},
    mix::blend::{Blend, CurveBlend},
    mix::cache::CurveCache,
    mix::mixer::InputSample,
    mix::policy::ValueControl,
};

/// Deterministic pseudo-random variation added to a scalar contribution.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    pub enabled: bool,
    /// Phase offset into the noise field; lets clips sharing a speed decorrelate.
    pub offset: u8,
    pub speed: f64,
    pub power: f64,
    pub strength: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            enabled: false,
            offset: 0,
            speed: 1.0,
            power: 1.0,
            strength: 1.0,
        }
    }
}

impl NoiseParams {
    /// `pseudo_noise_1d(local_time * speed + offset)^power * strength`.
    pub fn sample(&self, local_time: f64) -> f64 {
        let n = pseudo_noise_1d(local_time * self.speed + f64::from(self.offset));
        n.powf(self.power) * self.strength
    }

    /// Noise to add to a contribution: `0.0` when disabled.
    pub fn offset_for(&self, local_time: f64) -> f64 {
        if self.enabled {
            self.sample(local_time)
        } else {
            0.0
        }
    }

    pub fn validate(&self) -> MixResult<()> {
        for (name, v) in [
            ("speed", self.speed),
            ("power", self.power),
            ("strength", self.strength),
        ] {
            if !v.is_finite() {
                return Err(MixError::validation(format!("noise {name} must be finite")));
            }
        }
        if !is_non_negative_finite(self.power) {
            return Err(MixError::validation("noise power must be >= 0"));
        }
        Ok(())
    }
}

/// Time-indexed multiplier applied to a scalar channel.
///
/// The curve loops over the clip: it is sampled at the wrapped phase of the clip's
/// local time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CurveModulation {
    pub enabled: bool,
    pub curve: NormalizedKeys<f64>,
}

impl Default for CurveModulation {
    fn default() -> Self {
        Self {
            enabled: false,
            curve: NormalizedKeys::new(vec![Key::new(0.0, 1.0)]),
        }
    }
}

impl CurveModulation {
    pub fn validate(&self) -> MixResult<()> {
        if self.enabled {
            self.curve.validate()?;
        }
        Ok(())
    }
}

/// Both modulators of a scalar channel.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScalarModulators {
    pub noise: NoiseParams,
    pub curve: CurveModulation,
}

impl ScalarModulators {
    pub fn validate(&self) -> MixResult<()> {
        self.noise.validate()?;
        self.curve.validate()
    }
}

/// Accumulator of a modulated scalar channel (e.g. light intensity).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModulatedScalar {
    pub blend: Blend<f64>,
    pub curve: CurveBlend,
}

impl ModulatedScalar {
    /// Fold one input: noise is added before weighting, the curve feeds the parallel
    /// curve accumulator.
    pub fn push(
        &mut self,
        value: &ClipValue<f64>,
        mods: &ScalarModulators,
        sample: &InputSample,
        cache: &mut CurveCache,
    ) {
        let contribution = value.evaluate(sample.normalized) + mods.noise.offset_for(sample.local_time);
        self.blend.push(contribution, sample.weight);

        if mods.curve.enabled {
            let phase = wrapped_time(sample.local_time, sample.duration);
            let c = cache.curve(sample.clip_id, &mods.curve.curve).sample(phase);
            self.curve.push(c, sample.weight);
        }
    }

    /// Policy first, then the curve blend. A channel the track does not own
    /// (`ValueControl::None`) is passed through untouched.
    pub fn resolve(&self, policy: ValueControl, binding_value: f64, initial: f64) -> f64 {
        if !policy.owns_channel() {
            return binding_value;
        }
        self.curve.apply(self.blend.resolve(policy, binding_value, initial))
    }
}

/// Read-only preview of one clip's modulated scalar at `local_time`, as a lone input at
/// full weight would contribute it.
///
/// Uses the same baked curve as the runtime path when `cache` holds one.
pub fn modulated_sample(
    value: &ClipValue<f64>,
    mods: &ScalarModulators,
    sample: &InputSample,
    cache: &CurveCache,
) -> f64 {
    let base = value.evaluate(sample.normalized) + mods.noise.offset_for(sample.local_time);
    if !mods.curve.enabled {
        return base;
    }
    let phase = wrapped_time(sample.local_time, sample.duration);
    base * cache.peek_or_bake(sample.clip_id, &mods.curve.curve).sample(phase)
}

#[cfg(test)]
#[path = "../../tests/unit/mix/modulate.rs"]
mod tests;
