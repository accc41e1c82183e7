/// Result alias used across the crate.
pub type CurtainResult<T> = Result<T, CurtainError>;

#[derive(thiserror::Error, Debug)]
/// Construction-time failures.
///
/// Sequencing itself never fails: stalled loads and missing milestones are
/// recovered by timers. Only invalid configuration, timelines and scenarios
/// are reported through this type.
pub enum CurtainError {
    /// Invalid configuration value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed animation timeline.
    #[error("timeline error: {0}")]
    Timeline(String),

    /// Malformed or inconsistent scenario script.
    #[error("scenario error: {0}")]
    Scenario(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CurtainError {
    /// Build a [`CurtainError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CurtainError::Timeline`].
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`CurtainError::Scenario`].
    pub fn scenario(msg: impl Into<String>) -> Self {
        Self::Scenario(msg.into())
    }

    /// Build a [`CurtainError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CurtainError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
