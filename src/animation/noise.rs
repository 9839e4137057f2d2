//! Deterministic 1-D gradient noise.
//!
//! Lattice gradients come from a SplitMix64 hash of the integer cell, so the output is a
//! pure function of the input coordinate: no tables, no global state, bit-identical across
//! calls and threads.

/// SplitMix64 generator.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

const NOISE_SEED: u64 = 0x5EED_C0DE_2D11_6A5E;

fn gradient(cell: i64) -> f64 {
    let mut rng = Rng64::new(NOISE_SEED ^ (cell as u64).wrapping_mul(0xD6E8_FEB8_6659_FD93));
    rng.next_f64_01() * 2.0 - 1.0
}

fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Signed Perlin gradient noise, range `[-0.5, 0.5]`, zero at every integer.
pub fn perlin_1d(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    let x0 = x.floor();
    let f = x - x0;
    let cell = x0 as i64;

    let n0 = gradient(cell) * f;
    let n1 = gradient(cell.wrapping_add(1)) * (f - 1.0);
    let u = fade(f);
    n0 * (1.0 - u) + n1 * u
}

/// Perlin noise remapped into `[0, 1]`, centred on `0.5`.
///
/// Non-finite input samples as `0.0` so a corrupt time never injects noise.
pub fn pseudo_noise_1d(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    (perlin_1d(x) + 0.5).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/noise.rs"]
mod tests;
