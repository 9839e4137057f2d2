use crate::{
    animation::value::ClipValue,
    composition::model::TrackKind,
    foundation::core::Rgba,
    foundation::error::MixResult,
    mix::blend::Blend,
    mix::cache::CurveCache,
    mix::mixer::{InputSample, TrackFamily},
    mix::policy::{ValueControl, tint},
};

/// Tracks driving one color (a sprite tint, a UI graphic, a material color).
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorFamily;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ColorParams {
    /// Solid color or gradient over the clip.
    pub color: ClipValue<Rgba>,
}

impl ColorParams {
    pub fn solid(color: Rgba) -> Self {
        Self {
            color: ClipValue::constant(color),
        }
    }

    pub fn gradient(from: Rgba, to: Rgba) -> Self {
        Self {
            color: ClipValue::ramp(from, to),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    pub color: ValueControl,
    /// Multiply the baseline by the blended color instead of applying `color`.
    pub tint: bool,
}

impl TrackFamily for ColorFamily {
    type Params = ColorParams;
    type Settings = ColorSettings;
    type State = Rgba;
    type Accum = Blend<Rgba>;

    const KIND: TrackKind = TrackKind::Color;
    const CHANNELS: &'static [&'static str] = &["color"];

    fn validate_params(params: &ColorParams) -> MixResult<()> {
        params.color.validate()
    }

    fn accumulate(
        acc: &mut Blend<Rgba>,
        params: &ColorParams,
        sample: &InputSample,
        _cache: &mut CurveCache,
    ) {
        acc.push(params.color.evaluate(sample.normalized), sample.weight);
    }

    fn resolve(settings: &ColorSettings, acc: &Blend<Rgba>, current: &Rgba, initial: &Rgba) -> Rgba {
        if settings.tint {
            tint(*initial, acc.value)
        } else {
            acc.resolve(settings.color, *current, *initial)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracks/color.rs"]
mod tests;
