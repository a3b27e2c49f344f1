//! Error types for the Foresight workspace.

use thiserror::Error;

/// Main error type for Foresight operations.
#[derive(Error, Debug, Clone)]
pub enum ForesightError {
    /// A request payload failed schema validation.
    #[error("invalid input: {} violation(s)", details.len())]
    InvalidInput { details: Vec<String> },

    /// A pipeline run was cancelled before completion.
    ///
    /// Not a user-facing failure: the consumer downgrades the owning
    /// exploration to `paused` and absorbs this value.
    #[error("pipeline run cancelled")]
    Cancelled,

    /// A stored artifact bundle no longer passes the output schema.
    #[error("stored artifacts failed output validation: {} violation(s)", details.len())]
    InvalidArtifacts { details: Vec<String> },

    /// Resource not found.
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// Persistence failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Connection error (SDK side).
    #[error("connection error: {0}")]
    Connection(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ForesightError {
    /// Returns true if this is a cooperative cancellation, which consumers
    /// absorb into a `paused` state instead of surfacing.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ForesightError::Cancelled)
    }

    /// Build a not-found error for a run id.
    pub fn run_not_found(id: impl Into<String>) -> Self {
        ForesightError::NotFound {
            resource: "run".to_string(),
            id: id.into(),
        }
    }
}

/// Convenience Result type for Foresight operations.
pub type Result<T> = std::result::Result<T, ForesightError>;

impl From<serde_json::Error> for ForesightError {
    fn from(err: serde_json::Error) -> Self {
        ForesightError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_is_distinct() {
        assert!(ForesightError::Cancelled.is_cancellation());
        assert!(!ForesightError::Internal("boom".into()).is_cancellation());
    }

    #[test]
    fn test_invalid_input_message_counts_violations() {
        let err = ForesightError::InvalidInput {
            details: vec!["a".into(), "b".into()],
        };
        assert!(err.to_string().contains("2 violation(s)"));
    }
}
