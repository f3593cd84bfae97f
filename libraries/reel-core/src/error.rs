//! Core error types for Reel

use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Reel
#[derive(Debug, Error)]
pub enum CoreError {
    /// Audio output backend failure
    #[error("Audio output error: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Create an audio output error from any message
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output(message.into())
    }
}
