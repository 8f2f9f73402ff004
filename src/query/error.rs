//! Failures of the remote collection call.

use std::time::Duration;

use thiserror::Error;

/// The remote call failed. Recovered locally: prior rows stay on screen,
/// the view turns to `Error`, and nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Could not reach the endpoint
    #[error("Connection to '{endpoint}' failed: {message}")]
    Connection { endpoint: String, message: String },

    /// Request exceeded total timeout
    #[error("Request timeout after {duration:?}")]
    Timeout { duration: Duration },

    /// Endpoint answered with a non-2xx status
    #[error("Remote error: HTTP {status} - {message}")]
    Status { status: u16, message: String },

    /// Body was not a `{ users, total }` page
    #[error("Malformed response: {message}")]
    Decode { message: String },
}

impl TransportError {
    /// User-friendly message for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            TransportError::Connection { .. } => "Could not reach the server",
            TransportError::Timeout { .. } => "The server took too long to answer",
            TransportError::Status { .. } => "The server rejected the request",
            TransportError::Decode { .. } => "The server sent an unexpected response",
        }
    }

    /// Error type string for logs and JSON output.
    pub fn error_type(&self) -> &'static str {
        match self {
            TransportError::Connection { .. } => "connection_error",
            TransportError::Timeout { .. } => "request_timeout",
            TransportError::Status { .. } => "status_error",
            TransportError::Decode { .. } => "decode_error",
        }
    }
}
