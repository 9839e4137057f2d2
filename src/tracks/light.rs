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

/// Tracks driving a 3D light.
#[derive(Clone, Copy, Debug, Default)]
pub struct LightFamily;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LightState {
    pub color: Rgba,
    pub intensity: f64,
    pub bounce_intensity: f64,
    pub range: f64,
    /// Outer spot angle in degrees.
    pub spot_angle: f64,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            color: Rgba::WHITE,
            intensity: 1.0,
            bounce_intensity: 1.0,
            range: 10.0,
            spot_angle: 30.0,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LightParams {
    #[serde(default = "default_color")]
    pub color: ClipValue<Rgba>,
    #[serde(default = "default_intensity")]
    pub intensity: ClipValue<f64>,
    /// Noise and curve modulation of `intensity`.
    #[serde(default)]
    pub intensity_modulators: ScalarModulators,
    #[serde(default = "default_intensity")]
    pub bounce_intensity: ClipValue<f64>,
    #[serde(default = "default_range")]
    pub range: ClipValue<f64>,
    #[serde(default = "default_spot_angle")]
    pub spot_angle: ClipValue<f64>,
}

fn default_color() -> ClipValue<Rgba> {
    ClipValue::Constant(Rgba::WHITE)
}

fn default_intensity() -> ClipValue<f64> {
    ClipValue::Constant(1.0)
}

fn default_range() -> ClipValue<f64> {
    ClipValue::Constant(10.0)
}

fn default_spot_angle() -> ClipValue<f64> {
    ClipValue::Constant(30.0)
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            color: default_color(),
            intensity: default_intensity(),
            intensity_modulators: ScalarModulators::default(),
            bounce_intensity: default_intensity(),
            range: default_range(),
            spot_angle: default_spot_angle(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightSettings {
    pub color: ValueControl,
    pub intensity: ValueControl,
    pub bounce_intensity: ValueControl,
    pub range: ValueControl,
    pub spot_angle: ValueControl,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LightAccum {
    color: Blend<Rgba>,
    intensity: ModulatedScalar,
    bounce_intensity: Blend<f64>,
    range: Blend<f64>,
    spot_angle: Blend<f64>,
}

impl TrackFamily for LightFamily {
    type Params = LightParams;
    type Settings = LightSettings;
    type State = LightState;
    type Accum = LightAccum;

    const KIND: TrackKind = TrackKind::Light;
    const CHANNELS: &'static [&'static str] =
        &["color", "intensity", "bounce_intensity", "range", "spot_angle"];

    fn validate_params(p: &LightParams) -> MixResult<()> {
        p.color.validate()?;
        p.intensity.validate()?;
        p.intensity_modulators.validate()?;
        p.bounce_intensity.validate()?;
        p.range.validate()?;
        p.spot_angle.validate()?;
        if let ClipValue::Constant(a) = p.spot_angle
            && !(0.0..=180.0).contains(&a)
        {
            return Err(MixError::validation("spot_angle must lie in [0, 180] degrees"));
        }
        Ok(())
    }

    fn accumulate(
        acc: &mut LightAccum,
        p: &LightParams,
        sample: &InputSample,
        cache: &mut CurveCache,
    ) {
        let t = sample.normalized;
        let w = sample.weight;
        acc.color.push(p.color.evaluate(t), w);
        acc.intensity
            .push(&p.intensity, &p.intensity_modulators, sample, cache);
        acc.bounce_intensity.push(p.bounce_intensity.evaluate(t), w);
        acc.range.push(p.range.evaluate(t), w);
        acc.spot_angle.push(p.spot_angle.evaluate(t), w);
    }

    fn resolve(
        s: &LightSettings,
        acc: &LightAccum,
        current: &LightState,
        initial: &LightState,
    ) -> LightState {
        LightState {
            color: acc.color.resolve(s.color, current.color, initial.color),
            intensity: acc
                .intensity
                .resolve(s.intensity, current.intensity, initial.intensity),
            bounce_intensity: acc.bounce_intensity.resolve(
                s.bounce_intensity,
                current.bounce_intensity,
                initial.bounce_intensity,
            ),
            range: acc.range.resolve(s.range, current.range, initial.range),
            spot_angle: acc
                .spot_angle
                .resolve(s.spot_angle, current.spot_angle, initial.spot_angle),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracks/light.rs"]
mod tests;
