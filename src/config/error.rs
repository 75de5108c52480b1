//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid host address: {0}")]
    InvalidHost(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid AI base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("AI model name is empty")]
    EmptyModel,

    #[error("Invalid AI timeout")]
    InvalidAiTimeout,

    #[error("AI max_retries {0} exceeds the limit of 10")]
    TooManyRetries(u32),

    #[error("Invalid batch deadline")]
    InvalidBatchDeadline,

    #[error("Batch deadline ({batch_secs}s) must be shorter than the request timeout ({request_secs}s)")]
    BatchDeadlineTooLong { batch_secs: u64, request_secs: u64 },

    #[error("File storage requires a data directory")]
    MissingDataDir,
}
