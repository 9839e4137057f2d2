use rayon::prelude::*;

use crate::{
    binding::MemoryBinding,
    composition::model::{Track, TrackKind},
    composition::timeline::{AnyTrack, TargetState, Timeline},
    eval::fade::{FadeSummary, fade_windows},
    eval::schedule::mix_inputs,
    foundation::error::{MixError, MixResult},
    mix::mixer::{TrackFamily, TrackMixer},
    tracks::color::ColorFamily,
    tracks::light::LightFamily,
    tracks::light2d::Light2dFamily,
    tracks::transform::TransformFamily,
};

/// Upper bound on the ticks one [`PlaybackSession::sample_range`] call may produce.
pub const MAX_RANGE_TICKS: u64 = 1 << 24;

/// Options controlling how a [`PlaybackSession`] evaluates ticks.
#[derive(Clone, Debug)]
pub struct SessionOpts {
    /// Evaluate tracks in parallel (rayon) on a dedicated thread pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

/// Result of one track at one tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TrackOutput {
    pub track: String,
    pub target: String,
    pub kind: TrackKind,
    /// Sum of contributing weights; `0` when the track is idle or just restored.
    pub total_weight: f64,
    /// Target state after the tick.
    pub state: TargetState,
}

/// All track outputs at one timeline position.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Tick {
    pub time: f64,
    pub tracks: Vec<TrackOutput>,
}

/// One track with its mixer and in-memory target.
struct Lane<F: TrackFamily> {
    track: Track<F>,
    mixer: TrackMixer<F>,
    binding: MemoryBinding<F::State>,
}

impl<F: TrackFamily> Lane<F> {
    fn new(track: Track<F>, initial: F::State) -> Self {
        Self {
            track,
            mixer: TrackMixer::new(),
            binding: MemoryBinding::new(initial),
        }
    }

    fn step(&mut self, time: f64) -> MixResult<(f64, F::State)> {
        let inputs = mix_inputs(&self.track, time);
        let outcome = self
            .mixer
            .process_frame(&self.track, &inputs, &mut self.binding)?;
        Ok((outcome.total_weight(), self.binding.value().clone()))
    }

    fn output(&self, total_weight: f64, state: TargetState) -> TrackOutput {
        TrackOutput {
            track: self.track.name.clone(),
            target: self.track.target.clone(),
            kind: F::KIND,
            total_weight,
            state,
        }
    }

    fn invalidate_clip(&mut self, clip: &str) -> MixResult<bool> {
        let index = self.track.clip_index(clip).ok_or_else(|| {
            MixError::validation(format!(
                "track '{}' has no clip named '{clip}'",
                self.track.name
            ))
        })?;
        Ok(self.mixer.invalidate_clip(self.track.clips[index].id()))
    }

    fn teardown(&mut self) {
        self.mixer.teardown(&mut self.binding);
    }
}

enum AnyLane {
    Color(Lane<ColorFamily>),
    Light(Lane<LightFamily>),
    Light2d(Lane<Light2dFamily>),
    Transform(Lane<TransformFamily>),
}

impl AnyLane {
    fn new(track: AnyTrack, initial: TargetState) -> MixResult<Self> {
        Ok(match (track, initial) {
            (AnyTrack::Color(t), TargetState::Color(s)) => Self::Color(Lane::new(t, s)),
            (AnyTrack::Light(t), TargetState::Light(s)) => Self::Light(Lane::new(t, s)),
            (AnyTrack::Light2d(t), TargetState::Light2d(s)) => Self::Light2d(Lane::new(t, s)),
            (AnyTrack::Transform(t), TargetState::Transform(s)) => {
                Self::Transform(Lane::new(t, s))
            }
            (track, state) => {
                return Err(MixError::validation(format!(
                    "track '{}' ({}) cannot drive a {} target",
                    track.name(),
                    track.kind(),
                    state.kind()
                )));
            }
        })
    }

    fn name(&self) -> &str {
        match self {
            Self::Color(l) => &l.track.name,
            Self::Light(l) => &l.track.name,
            Self::Light2d(l) => &l.track.name,
            Self::Transform(l) => &l.track.name,
        }
    }

    fn step(&mut self, time: f64) -> MixResult<TrackOutput> {
        Ok(match self {
            Self::Color(l) => {
                let (w, s) = l.step(time)?;
                l.output(w, TargetState::Color(s))
            }
            Self::Light(l) => {
                let (w, s) = l.step(time)?;
                l.output(w, TargetState::Light(s))
            }
            Self::Light2d(l) => {
                let (w, s) = l.step(time)?;
                l.output(w, TargetState::Light2d(s))
            }
            Self::Transform(l) => {
                let (w, s) = l.step(time)?;
                l.output(w, TargetState::Transform(s))
            }
        })
    }

    fn state(&self) -> TargetState {
        match self {
            Self::Color(l) => TargetState::Color(*l.binding.value()),
            Self::Light(l) => TargetState::Light(*l.binding.value()),
            Self::Light2d(l) => TargetState::Light2d(*l.binding.value()),
            Self::Transform(l) => TargetState::Transform(*l.binding.value()),
        }
    }

    fn fades(&self) -> Vec<MixResult<FadeSummary>> {
        fn collect<F: TrackFamily>(lane: &Lane<F>) -> Vec<MixResult<FadeSummary>> {
            fade_windows(&lane.track.clips)
                .into_iter()
                .map(|w| w.map(|w| w.summary()))
                .collect()
        }
        match self {
            Self::Color(l) => collect(l),
            Self::Light(l) => collect(l),
            Self::Light2d(l) => collect(l),
            Self::Transform(l) => collect(l),
        }
    }

    fn invalidate_clip(&mut self, clip: &str) -> MixResult<bool> {
        match self {
            Self::Color(l) => l.invalidate_clip(clip),
            Self::Light(l) => l.invalidate_clip(clip),
            Self::Light2d(l) => l.invalidate_clip(clip),
            Self::Transform(l) => l.invalidate_clip(clip),
        }
    }

    fn teardown(&mut self) {
        match self {
            Self::Color(l) => l.teardown(),
            Self::Light(l) => l.teardown(),
            Self::Light2d(l) => l.teardown(),
            Self::Transform(l) => l.teardown(),
        }
    }
}

/// Stateful player of a [`Timeline`]: one mixer and one in-memory target per track.
///
/// Ticks must be fed in playback order for the baseline capture/restore cycle to
/// mirror a live host; seeking is allowed and behaves like a jump cut.
pub struct PlaybackSession {
    lanes: Vec<AnyLane>,
    end_time: f64,
    pool: Option<rayon::ThreadPool>,
}

impl PlaybackSession {
    pub fn new(timeline: Timeline) -> MixResult<Self> {
        Self::with_opts(timeline, SessionOpts::default())
    }

    #[tracing::instrument(skip(timeline), fields(tracks = timeline.tracks.len()))]
    pub fn with_opts(timeline: Timeline, opts: SessionOpts) -> MixResult<Self> {
        timeline.validate()?;
        let end_time = timeline.end_time();
        let Timeline {
            tracks, targets, ..
        } = timeline;

        let mut lanes = Vec::with_capacity(tracks.len());
        for track in tracks {
            let initial = targets
                .get(track.target())
                .copied()
                .unwrap_or_else(|| TargetState::default_for(track.kind()));
            lanes.push(AnyLane::new(track, initial)?);
        }

        let pool = if opts.parallel {
            Some(build_thread_pool(opts.threads)?)
        } else {
            None
        };

        Ok(Self {
            lanes,
            end_time,
            pool,
        })
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn track_count(&self) -> usize {
        self.lanes.len()
    }

    /// Advance every track to `time` and report their outputs in track order.
    #[tracing::instrument(skip(self))]
    pub fn evaluate(&mut self, time: f64) -> MixResult<Vec<TrackOutput>> {
        if !time.is_finite() {
            return Err(MixError::evaluation("time must be finite"));
        }
        match &self.pool {
            Some(pool) => {
                let lanes = &mut self.lanes;
                pool.install(|| lanes.par_iter_mut().map(|l| l.step(time)).collect())
            }
            None => self.lanes.iter_mut().map(|l| l.step(time)).collect(),
        }
    }

    /// Evaluate `from..=to` every `step` seconds.
    pub fn sample_range(&mut self, from: f64, to: f64, step: f64) -> MixResult<Vec<Tick>> {
        if !(step.is_finite() && step > 0.0) {
            return Err(MixError::validation("step must be finite and > 0"));
        }
        if !from.is_finite() || !to.is_finite() || to < from {
            return Err(MixError::validation("range must be finite with from <= to"));
        }
        let span = ((to - from) / step + 1e-9).floor();
        if !span.is_finite() || span >= MAX_RANGE_TICKS as f64 {
            return Err(MixError::validation(format!(
                "range {from}..={to} every {step}s exceeds {MAX_RANGE_TICKS} ticks"
            )));
        }
        let count = span as u64 + 1;
        let mut ticks = Vec::new();
        for i in 0..count {
            let time = from + i as f64 * step;
            ticks.push(Tick {
                time,
                tracks: self.evaluate(time)?,
            });
        }
        Ok(ticks)
    }

    /// Current state of the target driven by `track`.
    pub fn state(&self, track: &str) -> Option<TargetState> {
        self.lanes
            .iter()
            .find(|l| l.name() == track)
            .map(AnyLane::state)
    }

    /// Fade windows of every track, in track order.
    pub fn fades(&self) -> Vec<MixResult<FadeSummary>> {
        self.lanes.iter().flat_map(AnyLane::fades).collect()
    }

    /// Drop the cached curve of an edited clip.
    pub fn invalidate_clip(&mut self, track: &str, clip: &str) -> MixResult<bool> {
        let lane = self
            .lanes
            .iter_mut()
            .find(|l| l.name() == track)
            .ok_or_else(|| MixError::validation(format!("unknown track '{track}'")))?;
        lane.invalidate_clip(clip)
    }

    /// Restore every target that still holds a captured baseline.
    pub fn teardown(&mut self) {
        for lane in &mut self.lanes {
            lane.teardown();
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> MixResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MixError::validation(
            "session 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MixError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/playback.rs"]
mod tests;
