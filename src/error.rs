//! Error types for rendering operations
//!
//! The Markdown renderer itself never fails. These errors come from the layers
//! around it: decoding post records and validating data at the C boundary.

use thiserror::Error;

/// Errors that can occur while preparing or rendering a post page
#[derive(Debug, Error)]
pub enum RenderError {
    /// Post JSON could not be decoded
    #[error("Payload error: {0}")]
    Payload(String),
    /// Input bytes are not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(String),
    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RenderError {
    /// Get numeric error code for FFI
    pub fn code(&self) -> u32 {
        match self {
            RenderError::Payload(_) => 1,
            RenderError::Encoding(_) => 2,
            RenderError::InvalidInput(_) => 5,
            RenderError::Internal(_) => 99,
        }
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Payload(err.to_string())
    }
}

impl From<std::str::Utf8Error> for RenderError {
    fn from(err: std::str::Utf8Error) -> Self {
        RenderError::Encoding(err.to_string())
    }
}
