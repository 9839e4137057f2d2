use crate::{
    foundation::core::MixValue,
    foundation::error::{MixError, MixResult},
};

/// How a track's blended clip values combine with the bound target's own value.
///
/// Chosen per channel: one track can `Replace` its color while it `Multiply`s intensity.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ValueControl {
    /// The track does not own this channel; the target keeps its current value.
    None,
    /// Crossfade from the captured baseline toward the blended clip value.
    #[default]
    Replace,
    /// Offset the baseline by the blended clip value.
    Add,
    /// Scale the baseline by the blended clip value (component-wise).
    Multiply,
}

impl ValueControl {
    pub const ALL: [Self; 4] = [Self::None, Self::Replace, Self::Add, Self::Multiply];

    /// Combine one channel.
    ///
    /// `binding_value` is only read for [`ValueControl::None`]. `blended_input` is the
    /// weighted sum of contributions and `total_weight` the unclamped sum of weights, so
    /// `Replace` keeps `1 - total_weight` of the baseline and goes negative past 1.
    pub fn apply<T: MixValue>(
        self,
        binding_value: T,
        initial: T,
        blended_input: T,
        total_weight: f64,
    ) -> T {
        match self {
            Self::None => binding_value,
            Self::Replace => initial.scale(1.0 - total_weight).add(blended_input),
            Self::Add => initial.add(blended_input),
            Self::Multiply => initial.mul(blended_input),
        }
    }

    /// `false` for [`ValueControl::None`].
    pub fn owns_channel(self) -> bool {
        self != Self::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Replace => "replace",
            Self::Add => "add",
            Self::Multiply => "multiply",
        }
    }
}

/// Tint rule of color tracks: the baseline multiplied by the blended input,
/// whatever the configured [`ValueControl`].
pub fn tint<T: MixValue>(initial: T, blended_input: T) -> T {
    initial.mul(blended_input)
}

impl TryFrom<u8> for ValueControl {
    type Error = MixError;

    fn try_from(v: u8) -> MixResult<Self> {
        Self::ALL
            .get(usize::from(v))
            .copied()
            .ok_or_else(|| MixError::validation(format!("unknown value control option {v}")))
    }
}

impl std::str::FromStr for ValueControl {
    type Err = MixError;

    fn from_str(s: &str) -> MixResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "replace" => Ok(Self::Replace),
            "add" | "additive" => Ok(Self::Add),
            "multiply" | "mul" => Ok(Self::Multiply),
            other => Err(MixError::validation(format!(
                "unknown value control option '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for ValueControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mix/policy.rs"]
mod tests;
