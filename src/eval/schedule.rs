use smallvec::SmallVec;

use crate::{
    composition::model::{ParameterClip, Track},
    mix::mixer::{MixInput, TrackFamily},
};

/// Crossfade weight of `clip` at absolute `time`: in-ramp times out-ramp.
///
/// Ramp lengths are the clip's fade lengths (the blend when flagged, else the ease);
/// zero-length ramps are always complete. Outside the clip the weight is `0`.
pub fn clip_weight<P>(clip: &ParameterClip<P>, time: f64) -> f64 {
    if !time.is_finite() || time < clip.start || time > clip.end {
        return 0.0;
    }
    let fade_in = clip
        .ease_in_curve
        .ramp(time - clip.start, clip.fade_in_length());
    let fade_out = clip
        .ease_out_curve
        .ramp(clip.end - time, clip.fade_out_length());
    fade_in * fade_out
}

/// Mix inputs of `track` at absolute `time`, standing in for a host's crossfade
/// scheduler.
///
/// Clips are active on `[start, end)`. When nothing is active, clips ending exactly at
/// `time` are used instead, so the last frame of a track still mixes.
pub fn mix_inputs<F: TrackFamily>(track: &Track<F>, time: f64) -> SmallVec<[MixInput; 4]> {
    let mut inputs: SmallVec<[MixInput; 4]> = track
        .clips
        .iter()
        .enumerate()
        .filter(|(_, c)| c.start <= time && time < c.end)
        .map(|(i, c)| MixInput::new(i, clip_weight(c, time), c.local_time(time)))
        .collect();

    if inputs.is_empty() {
        inputs.extend(
            track
                .clips
                .iter()
                .enumerate()
                .filter(|(_, c)| c.end == time)
                .map(|(i, c)| MixInput::new(i, clip_weight(c, time), c.local_time(time))),
        );
    }

    tracing::trace!(track = %track.name, time, active = inputs.len(), "scheduled mix inputs");
    inputs
}

#[cfg(test)]
#[path = "../../tests/unit/eval/schedule.rs"]
mod tests;
