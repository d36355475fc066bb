//! Error types shared across handsign crates.

use std::path::PathBuf;

/// Top-level error type for handsign operations.
#[derive(Debug, thiserror::Error)]
pub enum HandsignError {
    #[error("Pose source error: {message}")]
    Source { message: String },

    #[error("Invalid pose: expected {expected} landmarks, got {actual}")]
    InvalidPose { expected: usize, actual: usize },

    #[error("Invalid pose: landmark {index} has a non-finite coordinate")]
    NonFiniteLandmark { index: usize },

    #[error("Action sink error: {message}")]
    Sink { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using HandsignError.
pub type HandsignResult<T> = Result<T, HandsignError>;

impl HandsignError {
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source {
            message: msg.into(),
        }
    }

    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
