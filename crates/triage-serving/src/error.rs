//! Error types for the scoring service.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use triage_model::ModelError;

/// Result type alias for serving operations.
pub type ServingResult<T> = Result<T, ServingError>;

/// One field-level validation failure, as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Offending field name, or `"body"` for request-level failures.
    pub field: String,
    /// Machine-readable failure kind.
    pub kind: String,
    /// Human-readable description.
    pub message: String,
}

impl FieldIssue {
    /// Create an issue for `field`.
    pub fn new(
        field: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while serving predictions.
#[derive(Debug, Error)]
pub enum ServingError {
    /// The request body failed schema validation.
    #[error("Invalid payload ({} issue(s))", .0.len())]
    InvalidPayload(Vec<FieldIssue>),

    /// The pipeline or feature manifest file is absent.
    #[error("Model artifacts missing")]
    ArtifactsMissing,

    /// Artifacts exist but could not be read or decoded.
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    /// The loaded pipeline could not score the request.
    #[error("Prediction failed: {0}")]
    Prediction(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServingError {
    /// Create a model load error.
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad(msg.into())
    }

    /// Create a prediction error.
    pub fn prediction(msg: impl Into<String>) -> Self {
        Self::Prediction(msg.into())
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this is a client error (bad request).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidPayload(_))
    }

    /// Check if this is a server-side failure.
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}

impl From<ModelError> for ServingError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::ArtifactsMissing(_) => Self::ArtifactsMissing,
            other => Self::ModelLoad(other.to_string()),
        }
    }
}
