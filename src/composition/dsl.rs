use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    composition::model::{ParameterClip, Track},
    composition::timeline::{AnyTrack, TargetState, Timeline},
    foundation::error::{MixError, MixResult},
    mix::mixer::TrackFamily,
};

pub struct TimelineBuilder {
    duration: Option<f64>,
    tracks: Vec<AnyTrack>,
    targets: BTreeMap<String, TargetState>,
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self {
            duration: None,
            tracks: Vec::new(),
            targets: BTreeMap::new(),
        }
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn target(mut self, key: impl Into<String>, state: TargetState) -> MixResult<Self> {
        let key = key.into();
        if self.targets.contains_key(&key) {
            return Err(MixError::validation(format!(
                "duplicate target key '{key}'"
            )));
        }
        self.targets.insert(key, state);
        Ok(self)
    }

    /// Add a track; its target gets the family's rest state unless already declared.
    pub fn track(mut self, track: impl Into<AnyTrack>) -> Self {
        let track = track.into();
        self.targets
            .entry(track.target().to_owned())
            .or_insert_with(|| TargetState::default_for(track.kind()));
        self.tracks.push(track);
        self
    }

    pub fn build(self) -> MixResult<Timeline> {
        let timeline = Timeline {
            duration: self.duration,
            tracks: self.tracks,
            targets: self.targets,
        };
        timeline.validate()?;
        Ok(timeline)
    }
}

pub struct TrackBuilder<F: TrackFamily> {
    name: String,
    target: String,
    settings: F::Settings,
    clips: Vec<ParameterClip<F::Params>>,
}

impl<F: TrackFamily> TrackBuilder<F> {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            settings: F::Settings::default(),
            clips: Vec::new(),
        }
    }

    pub fn settings(mut self, settings: F::Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn clip(mut self, clip: ParameterClip<F::Params>) -> Self {
        self.clips.push(clip);
        self
    }

    pub fn build(self) -> MixResult<Track<F>> {
        let track = Track {
            name: self.name,
            target: self.target,
            settings: self.settings,
            clips: self.clips,
        };
        track.validate()?;
        Ok(track)
    }
}

pub struct ClipBuilder<P> {
    name: String,
    start: f64,
    end: f64,
    ease_in: (f64, Ease),
    ease_out: (f64, Ease),
    blend_in: Option<f64>,
    blend_out: Option<f64>,
    params: P,
}

impl<P> ClipBuilder<P> {
    pub fn new(name: impl Into<String>, start: f64, end: f64, params: P) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            ease_in: (0.0, Ease::Linear),
            ease_out: (0.0, Ease::Linear),
            blend_in: None,
            blend_out: None,
            params,
        }
    }

    pub fn ease_in(mut self, seconds: f64, curve: Ease) -> Self {
        self.ease_in = (seconds, curve);
        self
    }

    pub fn ease_out(mut self, seconds: f64, curve: Ease) -> Self {
        self.ease_out = (seconds, curve);
        self
    }

    /// Crossfade with the previous clip over `seconds`.
    pub fn blend_in(mut self, seconds: f64) -> Self {
        self.blend_in = Some(seconds);
        self
    }

    /// Crossfade with the next clip over `seconds`.
    pub fn blend_out(mut self, seconds: f64) -> Self {
        self.blend_out = Some(seconds);
        self
    }

    pub fn build(self) -> MixResult<ParameterClip<P>> {
        let mut clip = ParameterClip::new(self.name, self.start, self.end, self.params);
        (clip.ease_in_duration, clip.ease_in_curve) = self.ease_in;
        (clip.ease_out_duration, clip.ease_out_curve) = self.ease_out;
        if let Some(d) = self.blend_in {
            clip.has_blend_in = true;
            clip.blend_in_duration = d;
        }
        if let Some(d) = self.blend_out {
            clip.has_blend_out = true;
            clip.blend_out_duration = d;
        }
        clip.validate_timing()?;
        Ok(clip)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
