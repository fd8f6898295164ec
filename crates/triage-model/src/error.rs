//! Error types for the triage-model crate.

use thiserror::Error;

/// Result type alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while training, saving, or loading a model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An argument failed pre-flight validation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A required artifact file is absent.
    #[error("Model artifacts missing: {0}")]
    ArtifactsMissing(String),

    /// Encoding or decoding an artifact failed.
    #[error("Artifact serialization failed: {0}")]
    Serialization(String),

    /// The normal-equations system could not be factorized.
    #[error("Normal equations are not positive definite")]
    NotPositiveDefinite,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModelError {
    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a missing artifacts error.
    pub fn artifacts_missing(msg: impl Into<String>) -> Self {
        Self::ArtifactsMissing(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Check if this error was caused by bad caller input.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
