/// Arithmetic every mixable channel value supports.
///
/// `mul` is component-wise for compound values. `lerp` uses the
/// `a * (1 - t) + b * t` form so both endpoints are reproduced exactly.
pub trait MixValue: Copy + std::fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Additive identity.
    const ZERO: Self;

    /// Component-wise sum.
    fn add(self, rhs: Self) -> Self;

    /// Multiply every component by a scalar.
    fn scale(self, k: f64) -> Self;

    /// Component-wise product.
    fn mul(self, rhs: Self) -> Self;

    /// Linear interpolation, unclamped in `t`.
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a.scale(1.0 - t).add(b.scale(t))
    }
}

impl MixValue for f64 {
    const ZERO: Self = 0.0;

    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn scale(self, k: f64) -> Self {
        self * k
    }

    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }
}

/// Linear RGBA color with `f64` components.
///
/// Components are not clamped: HDR colors and intermediate overshoot are legal.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

fn default_alpha() -> f64 {
    1.0
}

impl Rgba {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl MixValue for Rgba {
    const ZERO: Self = Self::TRANSPARENT;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
            self.a + rhs.a,
        )
    }

    fn scale(self, k: f64) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k, self.a * k)
    }

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.r * rhs.r,
            self.g * rhs.g,
            self.b * rhs.b,
            self.a * rhs.a,
        )
    }
}

impl std::ops::Add for Rgba {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        MixValue::add(self, rhs)
    }
}

impl std::ops::Mul<f64> for Rgba {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

/// 3-component vector used for positions, Euler rotations (degrees) and scales.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl MixValue for Vec3 {
    const ZERO: Self = Vec3::ZERO;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }

    fn scale(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        MixValue::add(self, rhs)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
