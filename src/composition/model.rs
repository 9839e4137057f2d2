use std::collections::BTreeSet;

use crate::{
    animation::ease::Ease,
    foundation::error::{MixError, MixResult},
    foundation::math::{is_non_negative_finite, normalized_time, normalized_time_clamped, stable_hash64},
    mix::mixer::TrackFamily,
};

/// Stable identifier of a clip, derived from its name.
///
/// Used as the key of per-mixer caches, so it must not change while a clip is edited.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ClipId(pub u64);

impl ClipId {
    pub fn from_name(name: &str) -> Self {
        Self(stable_hash64(0, name))
    }
}

/// Capability of the target a track drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    Color,
    Light,
    Light2d,
    Transform,
}

impl TrackKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Light => "light",
            Self::Light2d => "light2d",
            Self::Transform => "transform",
        }
    }
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timing view of a clip, as the fade resolver and the scheduler see it.
pub trait TimelineSpan {
    fn name(&self) -> &str;
    fn start(&self) -> f64;
    fn end(&self) -> f64;
    fn ease_in_duration(&self) -> f64;
    fn ease_out_duration(&self) -> f64;
    fn has_blend_in(&self) -> bool;
    fn has_blend_out(&self) -> bool;
    fn blend_in_duration(&self) -> f64;
    fn blend_out_duration(&self) -> f64;

    fn duration(&self) -> f64 {
        self.end() - self.start()
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One authored segment of a track: its placement, its fades and its payload.
pub struct ParameterClip<P> {
    /// Clip name, unique within its track.
    pub name: String,
    /// Absolute timeline start in seconds.
    pub start: f64,
    /// Absolute timeline end in seconds; must be greater than `start`.
    pub end: f64,
    /// Self-contained fade at the clip start, in seconds.
    #[serde(default)]
    pub ease_in_duration: f64,
    /// Self-contained fade at the clip end, in seconds.
    #[serde(default)]
    pub ease_out_duration: f64,
    /// Shape of the incoming weight ramp.
    #[serde(default)]
    pub ease_in_curve: Ease,
    /// Shape of the outgoing weight ramp.
    #[serde(default)]
    pub ease_out_curve: Ease,
    /// The clip crossfades with its predecessor.
    #[serde(default)]
    pub has_blend_in: bool,
    /// The clip crossfades with its successor.
    #[serde(default)]
    pub has_blend_out: bool,
    /// Crossfade length at the start; read only when `has_blend_in` is set.
    #[serde(default)]
    pub blend_in_duration: f64,
    /// Crossfade length at the end; read only when `has_blend_out` is set.
    #[serde(default)]
    pub blend_out_duration: f64,
    /// Family-specific channel payloads.
    pub params: P,
}

impl<P> ParameterClip<P> {
    pub fn new(name: impl Into<String>, start: f64, end: f64, params: P) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            ease_in_duration: 0.0,
            ease_out_duration: 0.0,
            ease_in_curve: Ease::Linear,
            ease_out_curve: Ease::Linear,
            has_blend_in: false,
            has_blend_out: false,
            blend_in_duration: 0.0,
            blend_out_duration: 0.0,
            params,
        }
    }

    pub fn id(&self) -> ClipId {
        ClipId::from_name(&self.name)
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Seconds elapsed since the clip started.
    pub fn local_time(&self, time: f64) -> f64 {
        time - self.start
    }

    /// `local_time / duration`, zero-duration guarded, unclamped.
    pub fn normalized(&self, local_time: f64) -> f64 {
        normalized_time(local_time, self.duration())
    }

    /// `local_time / duration` clamped into `[0, 1]`: the clip's own sampling space.
    pub fn normalized_clamped(&self, local_time: f64) -> f64 {
        normalized_time_clamped(local_time, self.duration())
    }

    /// Length of the incoming ramp: the crossfade when blending, else the ease.
    pub fn fade_in_length(&self) -> f64 {
        if self.has_blend_in {
            self.blend_in_duration
        } else {
            self.ease_in_duration
        }
    }

    /// Length of the outgoing ramp: the crossfade when blending, else the ease.
    pub fn fade_out_length(&self) -> f64 {
        if self.has_blend_out {
            self.blend_out_duration
        } else {
            self.ease_out_duration
        }
    }

    /// Timing invariants. Payload checks are done by the owning [`Track`].
    pub fn validate_timing(&self) -> MixResult<()> {
        if self.name.trim().is_empty() {
            return Err(MixError::validation("clip name must be non-empty"));
        }
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(MixError::validation(format!(
                "clip '{}' start/end must be finite",
                self.name
            )));
        }
        if self.end <= self.start {
            return Err(MixError::validation(format!(
                "clip '{}' must end after it starts",
                self.name
            )));
        }
        for (field, v) in [
            ("ease_in_duration", self.ease_in_duration),
            ("ease_out_duration", self.ease_out_duration),
            ("blend_in_duration", self.blend_in_duration),
            ("blend_out_duration", self.blend_out_duration),
        ] {
            if !is_non_negative_finite(v) {
                return Err(MixError::validation(format!(
                    "clip '{}' {field} must be finite and >= 0",
                    self.name
                )));
            }
        }
        if self.fade_in_length() > self.duration() || self.fade_out_length() > self.duration() {
            return Err(MixError::validation(format!(
                "clip '{}' fades are longer than the clip",
                self.name
            )));
        }
        Ok(())
    }
}

impl<P> TimelineSpan for ParameterClip<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&self) -> f64 {
        self.start
    }

    fn end(&self) -> f64 {
        self.end
    }

    fn ease_in_duration(&self) -> f64 {
        self.ease_in_duration
    }

    fn ease_out_duration(&self) -> f64 {
        self.ease_out_duration
    }

    fn has_blend_in(&self) -> bool {
        self.has_blend_in
    }

    fn has_blend_out(&self) -> bool {
        self.has_blend_out
    }

    fn blend_in_duration(&self) -> f64 {
        self.blend_in_duration
    }

    fn blend_out_duration(&self) -> f64 {
        self.blend_out_duration
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(bound(
    serialize = "F::Settings: serde::Serialize, F::Params: serde::Serialize",
    deserialize = "F::Settings: serde::Deserialize<'de>, F::Params: serde::Deserialize<'de>"
))]
/// An ordered (not necessarily sorted) set of clips driving one bound target.
pub struct Track<F: TrackFamily> {
    /// Track name for authoring/debugging.
    pub name: String,
    /// Key of the bound target.
    pub target: String,
    /// Per-channel value control (and family extras such as tint).
    #[serde(default)]
    pub settings: F::Settings,
    /// Clips in authoring order.
    #[serde(default)]
    pub clips: Vec<ParameterClip<F::Params>>,
}

impl<F: TrackFamily> Track<F> {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            settings: F::Settings::default(),
            clips: Vec::new(),
        }
    }

    pub fn kind(&self) -> TrackKind {
        F::KIND
    }

    pub fn channels(&self) -> &'static [&'static str] {
        F::CHANNELS
    }

    pub fn clip_index(&self, name: &str) -> Option<usize> {
        self.clips.iter().position(|c| c.name == name)
    }

    pub fn clip(&self, index: usize) -> MixResult<&ParameterClip<F::Params>> {
        self.clips.get(index).ok_or_else(|| {
            MixError::contract(format!(
                "track '{}' has no clip at index {index} ({} clips)",
                self.name,
                self.clips.len()
            ))
        })
    }

    /// Latest clip end on the track, `0.0` when empty.
    pub fn end_time(&self) -> f64 {
        self.clips.iter().map(|c| c.end).fold(0.0, f64::max)
    }

    pub fn validate(&self) -> MixResult<()> {
        if self.name.trim().is_empty() {
            return Err(MixError::validation("track name must be non-empty"));
        }
        if self.target.trim().is_empty() {
            return Err(MixError::validation(format!(
                "track '{}' target must be non-empty",
                self.name
            )));
        }
        let mut seen = BTreeSet::new();
        for clip in &self.clips {
            clip.validate_timing()?;
            if !seen.insert(clip.name.as_str()) {
                return Err(MixError::validation(format!(
                    "track '{}' has duplicate clip name '{}'",
                    self.name, clip.name
                )));
            }
            F::validate_params(&clip.params).map_err(|e| {
                MixError::validation(format!("clip '{}': {e}", clip.name))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
