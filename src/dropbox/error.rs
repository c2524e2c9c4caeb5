/*!
 * Error types for Dropbox API calls
 */

use thiserror::Error;

/// Errors that can occur while talking to the Dropbox API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connection, TLS, timeout)
    #[error("Request error: {0}")]
    Request(String),

    /// API answered with a non-success status
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Request(error.to_string())
    }
}

/// Specialized Result type for Dropbox API calls
pub type ApiResult<T> = Result<T, ApiError>;
