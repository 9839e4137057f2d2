/// Convenience result type used across clipmix.
pub type MixResult<T> = Result<T, MixError>;

/// Which edge of a clip a fade query refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeEdge {
    /// Start of the clip (fade-in / blend-in).
    In,
    /// End of the clip (fade-out / blend-out).
    Out,
}

impl std::fmt::Display for FadeEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::In => f.write_str("in"),
            Self::Out => f.write_str("out"),
        }
    }
}

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum MixError {
    /// Invalid user-provided timeline, track or clip data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The caller broke an API contract (missing fade data, bad clip index, ...).
    #[error("contract violation: {0}")]
    Contract(String),

    /// A blend flag is set but the timeline has no neighbor on that edge.
    #[error("no adjacent clip: clip '{clip}' blends {edge} but has no neighbor")]
    NoAdjacentClip {
        /// Name of the clip whose neighbor is missing.
        clip: String,
        /// Edge the blend was requested on.
        edge: FadeEdge,
    },

    /// Errors while evaluating a track for a tick.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MixError {
    /// Build a [`MixError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MixError::Contract`] value.
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::Contract(msg.into())
    }

    /// Build a [`MixError::NoAdjacentClip`] value.
    pub fn no_adjacent_clip(clip: impl Into<String>, edge: FadeEdge) -> Self {
        Self::NoAdjacentClip {
            clip: clip.into(),
            edge,
        }
    }

    /// Build a [`MixError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`MixError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MixError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
