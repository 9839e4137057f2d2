use std::collections::{BTreeMap, BTreeSet};

use crate::{
    composition::model::{Track, TrackKind},
    foundation::core::Rgba,
    foundation::error::{MixError, MixResult},
    tracks::color::ColorFamily,
    tracks::light::{LightFamily, LightState},
    tracks::light2d::{Light2dFamily, Light2dState},
    tracks::transform::{TransformFamily, TransformState},
};

/// A track of any family, tagged by `kind` in JSON.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnyTrack {
    Color(Track<ColorFamily>),
    Light(Track<LightFamily>),
    Light2d(Track<Light2dFamily>),
    Transform(Track<TransformFamily>),
}

impl AnyTrack {
    pub fn kind(&self) -> TrackKind {
        match self {
            Self::Color(_) => TrackKind::Color,
            Self::Light(_) => TrackKind::Light,
            Self::Light2d(_) => TrackKind::Light2d,
            Self::Transform(_) => TrackKind::Transform,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Color(t) => &t.name,
            Self::Light(t) => &t.name,
            Self::Light2d(t) => &t.name,
            Self::Transform(t) => &t.name,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            Self::Color(t) => &t.target,
            Self::Light(t) => &t.target,
            Self::Light2d(t) => &t.target,
            Self::Transform(t) => &t.target,
        }
    }

    pub fn end_time(&self) -> f64 {
        match self {
            Self::Color(t) => t.end_time(),
            Self::Light(t) => t.end_time(),
            Self::Light2d(t) => t.end_time(),
            Self::Transform(t) => t.end_time(),
        }
    }

    pub fn clip_index(&self, name: &str) -> Option<usize> {
        match self {
            Self::Color(t) => t.clip_index(name),
            Self::Light(t) => t.clip_index(name),
            Self::Light2d(t) => t.clip_index(name),
            Self::Transform(t) => t.clip_index(name),
        }
    }

    pub fn validate(&self) -> MixResult<()> {
        match self {
            Self::Color(t) => t.validate(),
            Self::Light(t) => t.validate(),
            Self::Light2d(t) => t.validate(),
            Self::Transform(t) => t.validate(),
        }
    }
}

impl From<Track<ColorFamily>> for AnyTrack {
    fn from(t: Track<ColorFamily>) -> Self {
        Self::Color(t)
    }
}

impl From<Track<LightFamily>> for AnyTrack {
    fn from(t: Track<LightFamily>) -> Self {
        Self::Light(t)
    }
}

impl From<Track<Light2dFamily>> for AnyTrack {
    fn from(t: Track<Light2dFamily>) -> Self {
        Self::Light2d(t)
    }
}

impl From<Track<TransformFamily>> for AnyTrack {
    fn from(t: Track<TransformFamily>) -> Self {
        Self::Transform(t)
    }
}

/// State of one bound target, tagged by `kind` like [`AnyTrack`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetState {
    Color(Rgba),
    Light(LightState),
    Light2d(Light2dState),
    Transform(TransformState),
}

impl TargetState {
    pub fn kind(&self) -> TrackKind {
        match self {
            Self::Color(_) => TrackKind::Color,
            Self::Light(_) => TrackKind::Light,
            Self::Light2d(_) => TrackKind::Light2d,
            Self::Transform(_) => TrackKind::Transform,
        }
    }

    /// Rest state of a freshly created target of `kind`.
    pub fn default_for(kind: TrackKind) -> Self {
        match kind {
            TrackKind::Color => Self::Color(Rgba::default()),
            TrackKind::Light => Self::Light(LightState::default()),
            TrackKind::Light2d => Self::Light2d(Light2dState::default()),
            TrackKind::Transform => Self::Transform(TransformState::default()),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Timeline document: tracks plus the initial state of every target they drive.
pub struct Timeline {
    /// Explicit length in seconds; defaults to the latest clip end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Tracks in evaluation order.
    #[serde(default)]
    pub tracks: Vec<AnyTrack>,
    /// Initial target states keyed by target name.
    #[serde(default)]
    pub targets: BTreeMap<String, TargetState>,
}

impl Timeline {
    /// Parse and validate a JSON document.
    pub fn from_json(s: &str) -> MixResult<Self> {
        let timeline: Self = serde_json::from_str(s)?;
        timeline.validate()?;
        Ok(timeline)
    }

    pub fn to_json_pretty(&self) -> MixResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Length in seconds: the explicit duration, else the latest clip end.
    pub fn end_time(&self) -> f64 {
        self.duration.unwrap_or_else(|| {
            self.tracks
                .iter()
                .map(AnyTrack::end_time)
                .fold(0.0, f64::max)
        })
    }

    pub fn track(&self, name: &str) -> Option<&AnyTrack> {
        self.tracks.iter().find(|t| t.name() == name)
    }

    pub fn validate(&self) -> MixResult<()> {
        if let Some(d) = self.duration
            && (!d.is_finite() || d <= 0.0)
        {
            return Err(MixError::validation("timeline duration must be finite and > 0"));
        }

        let mut names = BTreeSet::new();
        let mut bound: BTreeMap<&str, &str> = BTreeMap::new();
        for track in &self.tracks {
            track.validate()?;
            if !names.insert(track.name()) {
                return Err(MixError::validation(format!(
                    "duplicate track name '{}'",
                    track.name()
                )));
            }
            if let Some(other) = bound.insert(track.target(), track.name()) {
                return Err(MixError::validation(format!(
                    "target '{}' is driven by both '{other}' and '{}'",
                    track.target(),
                    track.name()
                )));
            }
            let state = self.targets.get(track.target()).ok_or_else(|| {
                MixError::validation(format!(
                    "track '{}' references unknown target '{}'",
                    track.name(),
                    track.target()
                ))
            })?;
            if state.kind() != track.kind() {
                return Err(MixError::validation(format!(
                    "track '{}' is a {} track but target '{}' holds {} state",
                    track.name(),
                    track.kind(),
                    track.target(),
                    state.kind()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/timeline.rs"]
mod tests;
