//! Client error types

use thiserror::Error;

/// Closed set of failures a backing-service call can produce
///
/// Raw transport errors never leave this layer: they are mapped here,
/// once, and callers match on the kind instead of on reqwest internals.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection refused, DNS failure or timeout - the service could not
    /// be reached at all. Never silently treated as success.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    /// The service answered with a non-2xx business error
    #[error("upstream rejected ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The service answered 2xx but the body did not parse
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Map a reqwest transport error into the closed set
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            ClientError::Unavailable(err.to_string())
        } else if err.is_decode() {
            ClientError::InvalidResponse(err.to_string())
        } else {
            ClientError::Unavailable(err.to_string())
        }
    }
}

/// Result type for backing-service calls
pub type ClientResult<T> = Result<T, ClientError>;
