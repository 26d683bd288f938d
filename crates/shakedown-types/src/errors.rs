//! Unified error type for the shakedown assessment harness.
//!
//! All crates use this error type for propagation across crate boundaries.
//! Assessors themselves never surface these errors to the orchestrator —
//! invocation failures are caught per test and folded into report metrics.

/// Unified error type for the shakedown workspace.
#[derive(Debug, thiserror::Error)]
pub enum ShakedownError {
    /// The invocation channel rejected or failed a tool call.
    #[error("invoke error: {0}")]
    Invoke(String),

    /// A tool call exceeded its per-test timeout.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Error from configuration loading or validation.
    #[error("config error: {0}")]
    Config(String),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Generic internal error for unexpected conditions.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ShakedownError {
    fn from(err: serde_json::Error) -> Self {
        ShakedownError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for ShakedownError {
    fn from(err: serde_yaml::Error) -> Self {
        ShakedownError::Serialization(err.to_string())
    }
}
