//! Error handling for the Qobuz search adapter

use thiserror::Error;

/// Result type for pqqobuz
pub type Result<T> = std::result::Result<T, QobuzError>;

/// Errors returned by the Qobuz search adapter
#[derive(Error, Debug)]
pub enum QobuzError {
    /// Invalid search input (blank query, bad paging values)
    #[error("{0}")]
    InvalidQuery(String),

    /// The upstream catalog answered with a non-success status
    #[error("Qobuz upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    /// Transport-level failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Missing or invalid adapter configuration (app ID, base URL)
    #[error("Qobuz configuration error: {0}")]
    Configuration(String),
}

impl QobuzError {
    /// True when retrying against the upstream could help (5xx only)
    pub fn is_retryable(&self) -> bool {
        match self {
            QobuzError::Upstream { status, .. } => *status >= 500,
            QobuzError::Http(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}
