/// `elapsed / duration` with the zero-duration guard.
///
/// A non-positive or non-finite duration (or a non-finite elapsed time) yields `0.0`
/// instead of propagating `NaN`/`inf`. The result is not clamped.
pub fn normalized_time(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 || !duration.is_finite() || !elapsed.is_finite() {
        return 0.0;
    }
    elapsed / duration
}

/// [`normalized_time`] clamped into `[0, 1]`.
pub fn normalized_time_clamped(elapsed: f64, duration: f64) -> f64 {
    normalized_time(elapsed, duration).clamp(0.0, 1.0)
}

/// Loop `elapsed` over `duration` and return the phase in `[0, 1)`.
pub fn wrapped_time(elapsed: f64, duration: f64) -> f64 {
    let t = normalized_time(elapsed, duration);
    let w = t - t.floor();
    // `t - floor(t)` can round up to exactly 1.0 for tiny negative inputs.
    if w >= 1.0 { 0.0 } else { w }
}

/// Stable 64-bit hash of a string key (xxh3).
pub(crate) fn stable_hash64(seed: u64, s: &str) -> u64 {
    xxhash_rust::xxh3::xxh3_64_with_seed(s.as_bytes(), seed)
}

pub(crate) fn is_non_negative_finite(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
