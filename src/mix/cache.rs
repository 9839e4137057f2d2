use std::{collections::HashMap, sync::Arc};

use crate::{animation::value::NormalizedKeys, composition::model::ClipId};

/// Samples per baked curve, endpoints included.
pub const BAKED_CURVE_SAMPLES: usize = 257;

/// A modulation curve pre-sampled over `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct BakedCurve {
    samples: Vec<f64>,
}

impl BakedCurve {
    pub fn bake(keys: &NormalizedKeys<f64>) -> Self {
        let last = (BAKED_CURVE_SAMPLES - 1) as f64;
        let samples = (0..BAKED_CURVE_SAMPLES)
            .map(|i| keys.evaluate(i as f64 / last))
            .collect();
        Self { samples }
    }

    /// Piecewise-linear lookup; flat runs are returned exactly.
    pub fn sample(&self, t: f64) -> f64 {
        let Some(&last_sample) = self.samples.last() else {
            return 1.0;
        };
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (self.samples.len() - 1) as f64;
        let i = pos.floor() as usize;
        if i + 1 >= self.samples.len() {
            return last_sample;
        }
        let a = self.samples[i];
        let b = self.samples[i + 1];
        if a == b {
            return a;
        }
        a + (b - a) * (pos - i as f64)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
}

/// Per-mixer memo of baked modulation curves, keyed by clip.
///
/// Owned by one `TrackMixer`, never shared process-wide. Authoring code that edits a
/// clip's curve must call [`CurveCache::invalidate`] (or [`CurveCache::clear`]).
#[derive(Clone, Debug, Default)]
pub struct CurveCache {
    curves: HashMap<ClipId, Arc<BakedCurve>>,
}

impl CurveCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached curve for `id`, baking `keys` on first use.
    pub fn curve(&mut self, id: ClipId, keys: &NormalizedKeys<f64>) -> Arc<BakedCurve> {
        Arc::clone(
            self.curves
                .entry(id)
                .or_insert_with(|| {
                    tracing::trace!(clip = ?id, "baking modulation curve");
                    Arc::new(BakedCurve::bake(keys))
                }),
        )
    }

    /// Like [`CurveCache::curve`] but never mutates the cache.
    pub fn peek_or_bake(&self, id: ClipId, keys: &NormalizedKeys<f64>) -> Arc<BakedCurve> {
        match self.curves.get(&id) {
            Some(c) => Arc::clone(c),
            None => Arc::new(BakedCurve::bake(keys)),
        }
    }

    pub fn get(&self, id: ClipId) -> Option<&BakedCurve> {
        self.curves.get(&id).map(Arc::as_ref)
    }

    /// Drop one clip's cached curve. Returns whether anything was cached.
    pub fn invalidate(&mut self, id: ClipId) -> bool {
        self.curves.remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        self.curves.clear();
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mix/cache.rs"]
mod tests;
