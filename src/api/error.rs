//! Errors raised by remote task service calls.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("status {status}: {body}")]
    Http { status: u16, body: String },
    #[error("{0} not found")]
    NotFound(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the failed response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Turns a 404 from a lookup endpoint into [`ApiError::NotFound`].
    pub(crate) fn not_found_as(self, what: impl FnOnce() -> String) -> Self {
        match self {
            ApiError::Http { status: 404, .. } => ApiError::NotFound(what()),
            other => other,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
