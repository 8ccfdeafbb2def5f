//! Error types for the tax interview orchestrator

use thiserror::Error;

/// Result type alias for interview operations
pub type Result<T> = std::result::Result<T, InterviewError>;

#[derive(Error, Debug)]
pub enum InterviewError {

    // =============================
    // Stage Pipeline Errors
    // =============================

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Moderation error: {0}")]
    ModerationError(String),

    #[error("Malformed tax profile: {0}")]
    MalformedProfile(String),

    #[error("Resource error: {0}")]
    ResourceError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Turn limit exceeded: {0}")]
    TurnLimitExceeded(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
