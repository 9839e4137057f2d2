use crate::{
    animation::value::ClipValue,
    composition::model::TrackKind,
    foundation::core::Rgba,
    foundation::error::{MixError, MixResult},
    mix::blend::Blend,
    mix::cache::CurveCache,
    mix::mixer::{InputSample, TrackFamily},
    mix::modulate::{ModulatedScalar, ScalarModulators},
    mix::policy::ValueControl,
};

/// Tracks driving a 2D (sprite-space) light.
#[derive(Clone, Copy, Debug, Default)]
pub struct Light2dFamily;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Light2dState {
    pub color: Rgba,
    pub intensity: f64,
    pub falloff_intensity: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub volume_intensity: f64,
}

impl Default for Light2dState {
    fn default() -> Self {
        Self {
            color: Rgba::WHITE,
            intensity: 1.0,
            falloff_intensity: 0.5,
            inner_radius: 0.0,
            outer_radius: 1.0,
            volume_intensity: 0.0,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Light2dParams {
    #[serde(default = "default_color")]
    pub color: ClipValue<Rgba>,
    #[serde(default = "one")]
    pub intensity: ClipValue<f64>,
    /// Noise and curve modulation of `intensity`.
    #[serde(default)]
    pub intensity_modulators: ScalarModulators,
    #[serde(default = "half")]
    pub falloff_intensity: ClipValue<f64>,
    #[serde(default = "zero")]
    pub inner_radius: ClipValue<f64>,
    #[serde(default = "one")]
    pub outer_radius: ClipValue<f64>,
    #[serde(default = "zero")]
    pub volume_intensity: ClipValue<f64>,
}

fn default_color() -> ClipValue<Rgba> {
    ClipValue::Constant(Rgba::WHITE)
}

fn zero() -> ClipValue<f64> {
    ClipValue::Constant(0.0)
}

fn half() -> ClipValue<f64> {
    ClipValue::Constant(0.5)
}

fn one() -> ClipValue<f64> {
    ClipValue::Constant(1.0)
}

impl Default for Light2dParams {
    fn default() -> Self {
        Self {
            color: default_color(),
            intensity: one(),
            intensity_modulators: ScalarModulators::default(),
            falloff_intensity: half(),
            inner_radius: zero(),
            outer_radius: one(),
            volume_intensity: zero(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Light2dSettings {
    pub color: ValueControl,
    pub intensity: ValueControl,
    pub falloff_intensity: ValueControl,
    pub inner_radius: ValueControl,
    pub outer_radius: ValueControl,
    pub volume_intensity: ValueControl,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Light2dAccum {
    color: Blend<Rgba>,
    intensity: ModulatedScalar,
    falloff_intensity: Blend<f64>,
    inner_radius: Blend<f64>,
    outer_radius: Blend<f64>,
    volume_intensity: Blend<f64>,
}

impl TrackFamily for Light2dFamily {
    type Params = Light2dParams;
    type Settings = Light2dSettings;
    type State = Light2dState;
    type Accum = Light2dAccum;

    const KIND: TrackKind = TrackKind::Light2d;
    const CHANNELS: &'static [&'static str] = &[
        "color",
        "intensity",
        "falloff_intensity",
        "inner_radius",
        "outer_radius",
        "volume_intensity",
    ];

    fn validate_params(p: &Light2dParams) -> MixResult<()> {
        p.color.validate()?;
        p.intensity.validate()?;
        p.intensity_modulators.validate()?;
        p.falloff_intensity.validate()?;
        p.inner_radius.validate()?;
        p.outer_radius.validate()?;
        p.volume_intensity.validate()?;
        if let (ClipValue::Constant(inner), ClipValue::Constant(outer)) =
            (&p.inner_radius, &p.outer_radius)
            && inner > outer
        {
            return Err(MixError::validation(
                "inner_radius must not exceed outer_radius",
            ));
        }
        Ok(())
    }

    fn accumulate(
        acc: &mut Light2dAccum,
        p: &Light2dParams,
        sample: &InputSample,
        cache: &mut CurveCache,
    ) {
        let t = sample.normalized;
        let w = sample.weight;
        acc.color.push(p.color.evaluate(t), w);
        acc.intensity
            .push(&p.intensity, &p.intensity_modulators, sample, cache);
        acc.falloff_intensity.push(p.falloff_intensity.evaluate(t), w);
        acc.inner_radius.push(p.inner_radius.evaluate(t), w);
        acc.outer_radius.push(p.outer_radius.evaluate(t), w);
        acc.volume_intensity.push(p.volume_intensity.evaluate(t), w);
    }

    fn resolve(
        s: &Light2dSettings,
        acc: &Light2dAccum,
        current: &Light2dState,
        initial: &Light2dState,
    ) -> Light2dState {
        Light2dState {
            color: acc.color.resolve(s.color, current.color, initial.color),
            intensity: acc
                .intensity
                .resolve(s.intensity, current.intensity, initial.intensity),
            falloff_intensity: acc.falloff_intensity.resolve(
                s.falloff_intensity,
                current.falloff_intensity,
                initial.falloff_intensity,
            ),
            inner_radius: acc.inner_radius.resolve(
                s.inner_radius,
                current.inner_radius,
                initial.inner_radius,
            ),
            outer_radius: acc.outer_radius.resolve(
                s.outer_radius,
                current.outer_radius,
                initial.outer_radius,
            ),
            volume_intensity: acc.volume_intensity.resolve(
                s.volume_intensity,
                current.volume_intensity,
                initial.volume_intensity,
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracks/light2d.rs"]
mod tests;
