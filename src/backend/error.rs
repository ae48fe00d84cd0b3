//! Backend Error Types

use thiserror::Error;

/// Text shown to the worker when no response could be obtained
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error: the reservation server could not be reached";

/// Fallback when an error response carries no readable `detail`
pub const UNKNOWN_ERROR_DETAIL: &str = "Unknown error";

/// Errors that can occur when talking to the reservation backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// No response obtained (refused, DNS, reset...)
    #[error("Backend unreachable: {0}")]
    Connection(String),

    #[error("Request timeout")]
    Timeout,

    /// Non-success status with the backend's human readable detail
    #[error("API error {status}: {detail}")]
    Api { status: u16, detail: String },

    /// Success status but a body we could not understand
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    /// True when the request never produced a response
    pub fn is_transport(&self) -> bool {
        matches!(self, BackendError::Connection(_) | BackendError::Timeout)
    }

    /// True when the backend rejected the bearer credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BackendError::Api { status: 401, .. })
    }

    /// Message suitable for an alert
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Connection(_) | BackendError::Timeout => {
                CONNECTION_ERROR_MESSAGE.to_string()
            }
            BackendError::Api { detail, .. } => format!("Error: {}", detail),
            BackendError::Decode(_) => "Error: unexpected response from the server".to_string(),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout
        } else if e.is_decode() {
            BackendError::Decode(e.to_string())
        } else {
            BackendError::Connection(e.to_string())
        }
    }
}

/// Result type for backend calls
pub type BackendResult<T> = Result<T, BackendError>;
