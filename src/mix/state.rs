/// Baseline of a bound target, captured while the track contributes.
///
/// Two states, two transitions:
/// - `Uninitialized -> Initialized` when total weight goes from 0 to > 0 (capture),
/// - `Initialized -> Uninitialized` when it returns to 0 (restore, then forget).
#[derive(Clone, Debug, PartialEq)]
pub enum BaselineState<T> {
    Uninitialized,
    Initialized {
        baseline: T,
    },
}

impl<T> Default for BaselineState<T> {
    fn default() -> Self {
        Self::Uninitialized
    }
}

impl<T> BaselineState<T> {
    pub fn is_initialized(&self) -> bool {
        matches!(self, Self::Initialized { .. })
    }

    pub fn baseline(&self) -> Option<&T> {
        match self {
            Self::Uninitialized => None,
            Self::Initialized { baseline } => Some(baseline),
        }
    }

    /// Capture the baseline if none is held yet; returns the held baseline.
    ///
    /// `capture` runs only on the `Uninitialized -> Initialized` transition.
    pub fn initialize(&mut self, capture: impl FnOnce() -> T) -> &T {
        if let Self::Uninitialized = self {
            *self = Self::Initialized {
                baseline: capture(),
            };
        }
        match self {
            Self::Initialized { baseline } => baseline,
            Self::Uninitialized => unreachable!("baseline state was just initialized"),
        }
    }

    /// Forget the baseline, handing it back so the caller can restore the target.
    pub fn uninitialize(&mut self) -> Option<T> {
        match std::mem::replace(self, Self::Uninitialized) {
            Self::Uninitialized => None,
            Self::Initialized { baseline } => Some(baseline),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mix/state.rs"]
mod tests;
