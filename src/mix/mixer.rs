use crate::{
    binding::TargetBinding,
    composition::model::{ClipId, ParameterClip, Track, TrackKind},
    foundation::error::{MixError, MixResult},
    mix::cache::CurveCache,
    mix::state::BaselineState,
};

/// One active clip at one tick, as supplied by the host's crossfade mechanism.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MixInput {
    /// Index into the track's clips.
    pub clip: usize,
    /// Crossfade weight; weights across inputs need not sum to 1.
    pub weight: f64,
    /// Seconds elapsed since the clip started.
    pub local_time: f64,
}

impl MixInput {
    pub fn new(clip: usize, weight: f64, local_time: f64) -> Self {
        Self {
            clip,
            weight,
            local_time,
        }
    }
}

/// Everything a family needs to sample one input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputSample {
    pub clip_id: ClipId,
    pub weight: f64,
    /// Seconds since clip start.
    pub local_time: f64,
    /// Clip duration in seconds.
    pub duration: f64,
    /// `local_time / duration` clamped into `[0, 1]`.
    pub normalized: f64,
}

impl InputSample {
    pub fn new<P>(clip: &ParameterClip<P>, weight: f64, local_time: f64) -> Self {
        Self {
            clip_id: clip.id(),
            weight,
            local_time,
            duration: clip.duration(),
            normalized: clip.normalized_clamped(local_time),
        }
    }
}

/// A parameter set: the channels one kind of target exposes and how they mix.
///
/// The four track families implement this; [`TrackMixer`] drives any of them.
pub trait TrackFamily: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Per-clip channel payloads.
    type Params: Clone + std::fmt::Debug + Send + Sync;
    /// Per-track value-control selection.
    type Settings: Clone + std::fmt::Debug + Default + Send + Sync;
    /// Full state of the bound target.
    type State: Clone + std::fmt::Debug + PartialEq + Send + Sync;
    /// Per-tick accumulators, one per channel.
    type Accum: Default;

    const KIND: TrackKind;
    /// Output parameter names, in state order.
    const CHANNELS: &'static [&'static str];

    fn validate_params(params: &Self::Params) -> MixResult<()>;

    /// Fold one input into the accumulators.
    fn accumulate(
        acc: &mut Self::Accum,
        params: &Self::Params,
        sample: &InputSample,
        cache: &mut CurveCache,
    );

    /// Combine the accumulators with the target's current and baseline state.
    fn resolve(
        settings: &Self::Settings,
        acc: &Self::Accum,
        current: &Self::State,
        initial: &Self::State,
    ) -> Self::State;
}

/// What one [`TrackMixer::process_frame`] call did to the target.
#[derive(Clone, Debug, PartialEq)]
pub enum MixOutcome<S> {
    /// No weight and nothing to restore: the target was not touched.
    Idle,
    /// Weight dropped to zero: the baseline was written back and forgotten.
    Restored(S),
    /// The mixed value that was written.
    Mixed { total_weight: f64, value: S },
}

impl<S> MixOutcome<S> {
    pub fn value(&self) -> Option<&S> {
        match self {
            Self::Idle => None,
            Self::Restored(v) | Self::Mixed { value: v, .. } => Some(v),
        }
    }

    pub fn total_weight(&self) -> f64 {
        match self {
            Self::Mixed { total_weight, .. } => *total_weight,
            Self::Idle | Self::Restored(_) => 0.0,
        }
    }
}

/// Runtime mixer of one track bound to one target.
///
/// Created when the target is bound and dropped on teardown. Holds the target's
/// baseline while the track contributes and a cache of baked modulation curves.
/// A target must be driven by at most one mixer at a time.
#[derive(Clone, Debug)]
pub struct TrackMixer<F: TrackFamily> {
    baseline: BaselineState<F::State>,
    cache: CurveCache,
}

impl<F: TrackFamily> Default for TrackMixer<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: TrackFamily> TrackMixer<F> {
    pub fn new() -> Self {
        Self {
            baseline: BaselineState::Uninitialized,
            cache: CurveCache::new(),
        }
    }

    pub fn baseline(&self) -> Option<&F::State> {
        self.baseline.baseline()
    }

    pub fn is_initialized(&self) -> bool {
        self.baseline.is_initialized()
    }

    pub fn curve_cache(&self) -> &CurveCache {
        &self.cache
    }

    /// Drop the cached curve of an edited clip.
    pub fn invalidate_clip(&mut self, id: ClipId) -> bool {
        self.cache.invalidate(id)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Mix every active input of one tick and write the result to `binding`.
    ///
    /// All inputs are folded before any channel is resolved. Inputs with a zero,
    /// negative or non-finite weight contribute nothing. When the total weight is zero
    /// the captured baseline (if any) is restored and forgotten.
    #[tracing::instrument(skip_all, fields(track = %track.name, kind = %F::KIND, inputs = inputs.len()))]
    pub fn process_frame<B>(
        &mut self,
        track: &Track<F>,
        inputs: &[MixInput],
        binding: &mut B,
    ) -> MixResult<MixOutcome<F::State>>
    where
        B: TargetBinding<Value = F::State> + ?Sized,
    {
        let mut total_weight = 0.0;
        for input in inputs {
            track.clip(input.clip)?;
            if !input.local_time.is_finite() {
                return Err(MixError::contract(format!(
                    "input for clip {} has non-finite local time",
                    input.clip
                )));
            }
            if contributes(input) {
                total_weight += input.weight;
            } else if !input.weight.is_finite() {
                tracing::warn!(clip = input.clip, weight = input.weight, "ignoring non-finite weight");
            }
        }

        if total_weight <= 0.0 {
            return Ok(match self.baseline.uninitialize() {
                Some(baseline) => {
                    tracing::debug!("total weight reached zero, restoring baseline");
                    binding.write(baseline.clone());
                    MixOutcome::Restored(baseline)
                }
                None => MixOutcome::Idle,
            });
        }

        if !self.baseline.is_initialized() {
            tracing::debug!(total_weight, "capturing baseline");
        }
        let initial = self.baseline.initialize(|| binding.capture_initial()).clone();
        let current = binding.read();

        let mut acc = F::Accum::default();
        for input in inputs.iter().filter(|i| contributes(i)) {
            let clip = track.clip(input.clip)?;
            let sample = InputSample::new(clip, input.weight, input.local_time);
            F::accumulate(&mut acc, &clip.params, &sample, &mut self.cache);
        }

        if total_weight > 1.0 + 1e-9 {
            tracing::trace!(total_weight, "total weight above 1, replace channels extrapolate");
        }

        let value = F::resolve(&track.settings, &acc, &current, &initial);
        binding.write(value.clone());
        Ok(MixOutcome::Mixed {
            total_weight,
            value,
        })
    }

    /// Restore the target on teardown if the mixer still holds a baseline.
    pub fn teardown<B>(&mut self, binding: &mut B) -> Option<F::State>
    where
        B: TargetBinding<Value = F::State> + ?Sized,
    {
        let baseline = self.baseline.uninitialize()?;
        binding.write(baseline.clone());
        Some(baseline)
    }
}

fn contributes(input: &MixInput) -> bool {
    input.weight.is_finite() && input.weight > 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/mix/mixer.rs"]
mod tests;
