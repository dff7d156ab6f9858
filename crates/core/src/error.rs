//! Error types for the tutor workspace.
//!
//! A single error enum covers configuration, I/O, completion API, ingestion,
//! retrieval and prompt failures. Every crate returns `AppResult<T>`.

use thiserror::Error;

/// Unified error type shared by every tutor crate.
///
/// Failures are represented and propagated, never panicked on. The HTTP layer
/// turns any of these into an `{"error": ...}` body using the `Display` text.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Completion API errors (network, auth, quota, malformed reply)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Retrieval and index errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Content merge errors for a single input file
    #[error("Ingest error: {0}")]
    Ingest(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// The similarity index was never built (empty or missing corpus).
    #[error("Context data not loaded")]
    ContextNotLoaded,

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
