//! Error types for the API client.

/// Errors that can occur when talking to the stock server.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The base URL and path did not combine into a valid request URL.
    #[error("invalid request URL: {0}")]
    Url(String),
    /// The request never produced a response (connection, TLS, timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// A success response carried a body that did not decode as expected.
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl Error {
    /// True for failures worth retrying: transport faults and 5xx statuses.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            Error::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
