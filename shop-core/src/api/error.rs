use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with a non-success status. `message` is the
    /// server's own message when it sent one.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never got a response (DNS, connect, timeout, TLS).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    /// Message used when the server gave no reason of its own.
    pub fn generic_status(status: u16) -> Self {
        Self::Status {
            status,
            message: format!("Request failed with status {status}"),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
