//! Error types for the remote backend client.

use thiserror::Error;

/// Errors that can occur when talking to the health backend.
///
/// None of these reach the dashboard: [`FallbackFeed`](crate::source::FallbackFeed)
/// logs them and substitutes locally generated data.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Backend answered with a non-success HTTP status.
    #[error("Backend returned status {0}")]
    Http(u16),

    /// Failed to decode the response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Could not reach the backend.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// Backend replied with `success: false` or without a payload.
    #[error("Backend rejected request: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Http(status.as_u16())
        } else {
            FetchError::Connection(err.to_string())
        }
    }
}
