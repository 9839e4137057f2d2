use crate::{
    animation::value::ClipValue,
    composition::model::{ParameterClip, TimelineSpan},
    foundation::core::MixValue,
    foundation::error::{FadeEdge, MixError, MixResult},
    foundation::math::normalized_time,
};

/// Interpolation window of one fade: which clips it runs between and where in each
/// clip's normalized time it starts and ends.
///
/// For a crossfade `former` and `later` are the two neighbors; for a self-contained
/// ease both are the clip itself. `start_t` is a position in `former`, `end_t` a
/// position in `later`.
#[derive(Clone, Debug)]
pub struct FadeWindow<'a, C> {
    pub edge: FadeEdge,
    pub former: &'a C,
    pub later: &'a C,
    pub start_t: f64,
    pub end_t: f64,
}

impl<C: TimelineSpan> FadeWindow<'_, C> {
    /// `true` for a self-contained ease (no neighbor involved).
    pub fn is_ease(&self) -> bool {
        std::ptr::eq(self.former, self.later)
    }

    /// Length of the fade in seconds, measured in the clip that owns the edge.
    pub fn span_seconds(&self) -> f64 {
        match self.edge {
            FadeEdge::In => self.end_t * self.later.duration(),
            FadeEdge::Out => (1.0 - self.start_t) * self.former.duration(),
        }
    }

    pub fn summary(&self) -> FadeSummary {
        let owner = match self.edge {
            FadeEdge::In => self.later,
            FadeEdge::Out => self.former,
        };
        FadeSummary {
            clip: owner.name().to_owned(),
            edge: self.edge,
            former: self.former.name().to_owned(),
            later: self.later.name().to_owned(),
            start_t: self.start_t,
            end_t: self.end_t,
            span_seconds: self.span_seconds(),
        }
    }
}

impl<P> FadeWindow<'_, ParameterClip<P>> {
    /// Value of `channel` where the fade starts: `former` sampled at `start_t`.
    pub fn start_value<T: MixValue>(&self, channel: impl Fn(&P) -> &ClipValue<T>) -> T {
        channel(&self.former.params).evaluate(self.start_t)
    }

    /// Value of `channel` where the fade ends: `later` sampled at `end_t`.
    pub fn end_value<T: MixValue>(&self, channel: impl Fn(&P) -> &ClipValue<T>) -> T {
        channel(&self.later.params).evaluate(self.end_t)
    }

    /// Straight-line preview of `channel` across the window, `u` in `[0, 1]`.
    pub fn sample<T: MixValue>(&self, channel: impl Fn(&P) -> &ClipValue<T>, u: f64) -> T {
        let u = if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0) };
        T::lerp(self.start_value(&channel), self.end_value(&channel), u)
    }
}

/// Owned, serializable description of a [`FadeWindow`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FadeSummary {
    pub clip: String,
    pub edge: FadeEdge,
    pub former: String,
    pub later: String,
    pub start_t: f64,
    pub end_t: f64,
    pub span_seconds: f64,
}

/// Fade-in window of `clips[index]`.
///
/// A blend-in pairs the clip with its predecessor; otherwise a positive ease-in gives
/// a window over the clip itself. A clip with neither has no fade-in data, which is a
/// contract error: callers check [`has_fade_in`] first.
pub fn fade_in<C: TimelineSpan>(clips: &[C], index: usize) -> MixResult<FadeWindow<'_, C>> {
    let clip = clip_at(clips, index)?;

    if clip.has_blend_in() {
        let former = previous_clip(clips, index)
            .ok_or_else(|| MixError::no_adjacent_clip(clip.name(), FadeEdge::In))?;
        return Ok(FadeWindow {
            edge: FadeEdge::In,
            former,
            later: clip,
            start_t: normalized_time(
                former.duration() - former.blend_out_duration(),
                former.duration(),
            ),
            end_t: normalized_time(clip.blend_in_duration(), clip.duration()),
        });
    }

    if clip.ease_in_duration() > 0.0 {
        return Ok(FadeWindow {
            edge: FadeEdge::In,
            former: clip,
            later: clip,
            start_t: 0.0,
            end_t: normalized_time(clip.ease_in_duration(), clip.duration()),
        });
    }

    Err(MixError::contract(format!(
        "clip '{}' has no fade-in data",
        clip.name()
    )))
}

/// Fade-out window of `clips[index]`; mirror of [`fade_in`].
pub fn fade_out<C: TimelineSpan>(clips: &[C], index: usize) -> MixResult<FadeWindow<'_, C>> {
    let clip = clip_at(clips, index)?;

    if clip.has_blend_out() {
        let later = next_clip(clips, index)
            .ok_or_else(|| MixError::no_adjacent_clip(clip.name(), FadeEdge::Out))?;
        return Ok(FadeWindow {
            edge: FadeEdge::Out,
            former: clip,
            later,
            start_t: normalized_time(
                clip.duration() - clip.blend_out_duration(),
                clip.duration(),
            ),
            end_t: normalized_time(later.blend_in_duration(), later.duration()),
        });
    }

    if clip.ease_out_duration() > 0.0 {
        return Ok(FadeWindow {
            edge: FadeEdge::Out,
            former: clip,
            later: clip,
            start_t: normalized_time(clip.duration() - clip.ease_out_duration(), clip.duration()),
            end_t: 1.0,
        });
    }

    Err(MixError::contract(format!(
        "clip '{}' has no fade-out data",
        clip.name()
    )))
}

pub fn has_fade_in<C: TimelineSpan>(clip: &C) -> bool {
    clip.has_blend_in() || clip.ease_in_duration() > 0.0
}

pub fn has_fade_out<C: TimelineSpan>(clip: &C) -> bool {
    clip.has_blend_out() || clip.ease_out_duration() > 0.0
}

/// Every fade the clips declare, in clip order (in before out).
///
/// Declared fades whose neighbor is missing are reported as errors in place.
pub fn fade_windows<C: TimelineSpan>(clips: &[C]) -> Vec<MixResult<FadeWindow<'_, C>>> {
    let mut out = Vec::new();
    for (index, clip) in clips.iter().enumerate() {
        if has_fade_in(clip) {
            out.push(fade_in(clips, index));
        }
        if has_fade_out(clip) {
            out.push(fade_out(clips, index));
        }
    }
    out
}

/// Latest-ending clip that starts no later than `clips[index]`.
///
/// Not necessarily the neighbor in index order; the first clip wins on equal ends.
pub fn previous_clip<C: TimelineSpan>(clips: &[C], index: usize) -> Option<&C> {
    let clip = clips.get(index)?;
    let mut best: Option<&C> = None;
    for (i, c) in clips.iter().enumerate() {
        if i == index || c.start() > clip.start() {
            continue;
        }
        if best.is_none_or(|b| c.end() > b.end()) {
            best = Some(c);
        }
    }
    best
}

/// Earliest-starting clip that starts within `clips[index]` (both ends inclusive).
pub fn next_clip<C: TimelineSpan>(clips: &[C], index: usize) -> Option<&C> {
    let clip = clips.get(index)?;
    let mut best: Option<&C> = None;
    for (i, c) in clips.iter().enumerate() {
        if i == index || c.start() < clip.start() || c.start() > clip.end() {
            continue;
        }
        if best.is_none_or(|b| c.start() < b.start()) {
            best = Some(c);
        }
    }
    best
}

fn clip_at<C: TimelineSpan>(clips: &[C], index: usize) -> MixResult<&C> {
    clips.get(index).ok_or_else(|| {
        MixError::contract(format!(
            "no clip at index {index} ({} clips)",
            clips.len()
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/eval/fade.rs"]
mod tests;
