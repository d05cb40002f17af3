use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the remote call store.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-2xx status.
    #[error("{url} returned {status}")]
    Status { status: StatusCode, url: String },

    /// The response body was not a valid call payload.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL cannot address `/activities`.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl TransportError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Http(e) => e.status(),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("base URL {url:?} is not usable: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}
