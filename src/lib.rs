//! clipmix is a timeline parameter-mixing engine.
//!
//! Tracks of clips drive bound targets (a color, a light, a 2D light, a transform).
//! Each tick, every clip active on a track contributes a weighted value; the
//! [`TrackMixer`] folds those contributions and combines them with the target's
//! captured baseline under a per-channel [`ValueControl`], then writes one coherent
//! value back through a [`TargetBinding`].
//!
//! # Pipeline overview
//!
//! 1. **Schedule**: `Track + time -> [MixInput]` (which clips contribute, with what weight)
//! 2. **Accumulate**: per-input values, noise and curve modulation folded into blends
//! 3. **Resolve**: per-channel policy (and tint) against the baseline, then curve finalization
//! 4. **Write**: the mixed state goes to the binding; the baseline is restored at zero weight
//!
//! The fade geometry resolver ([`fade_in`], [`fade_out`]) answers, for any clip, which
//! neighbor it crossfades with and over which normalized window.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: noise is a pure function of time, and input order does not change results.
//! - **Per-mixer state**: baselines and baked curves live in the mixer, never in globals.
#![forbid(unsafe_code)]

mod animation;
mod binding;
mod composition;
mod eval;
mod foundation;
mod mix;
mod session;
mod tracks;

pub use animation::ease::Ease;
pub use animation::noise::{Rng64, perlin_1d, pseudo_noise_1d};
pub use animation::value::{ClipValue, Key, NormalizedKeys, ValueFn};
pub use binding::{MemoryBinding, TargetBinding};
pub use composition::dsl::{ClipBuilder, TimelineBuilder, TrackBuilder};
pub use composition::model::{ClipId, ParameterClip, TimelineSpan, Track, TrackKind};
pub use composition::timeline::{AnyTrack, TargetState, Timeline};
pub use eval::fade::{
    FadeSummary, FadeWindow, fade_in, fade_out, fade_windows, has_fade_in, has_fade_out,
    next_clip, previous_clip,
};
pub use eval::schedule::{clip_weight, mix_inputs};
pub use foundation::core::{MixValue, Rgba, Vec3};
pub use foundation::error::{FadeEdge, MixError, MixResult};
pub use foundation::math::{normalized_time, normalized_time_clamped, wrapped_time};
pub use mix::blend::{Blend, CurveBlend};
pub use mix::cache::{BAKED_CURVE_SAMPLES, BakedCurve, CurveCache};
pub use mix::mixer::{InputSample, MixInput, MixOutcome, TrackFamily, TrackMixer};
pub use mix::modulate::{
    CurveModulation, ModulatedScalar, NoiseParams, ScalarModulators, modulated_sample,
};
pub use mix::policy::{ValueControl, tint};
pub use mix::state::BaselineState;
pub use session::playback::{
    MAX_RANGE_TICKS, PlaybackSession, SessionOpts, Tick, TrackOutput,
};
pub use tracks::color::{ColorFamily, ColorParams, ColorSettings};
pub use tracks::light::{LightAccum, LightFamily, LightParams, LightSettings, LightState};
pub use tracks::light2d::{
    Light2dAccum, Light2dFamily, Light2dParams, Light2dSettings, Light2dState,
};
pub use tracks::transform::{
    TransformAccum, TransformFamily, TransformParams, TransformSettings, TransformState,
};
