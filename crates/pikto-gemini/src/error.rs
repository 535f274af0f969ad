//! Gemini backend error types.

use thiserror::Error;

use pikto_runtime::engine::ProcessorError;

/// Result type for Gemini backend operations.
pub type GeminiResult<T> = Result<T, GeminiError>;

/// Errors that can occur talking to the Gemini API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Transport-level failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("gemini api error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error body or status text.
        message: String,
    },

    /// The response contained no image data.
    #[error("no image data received from generation")]
    NoImage,

    /// Response body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<GeminiError> for ProcessorError {
    fn from(error: GeminiError) -> Self {
        ProcessorError::new(error.to_string())
    }
}
