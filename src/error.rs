use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a pull request fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The credential source is missing, unreadable or incomplete.
    #[error("configuration error in {}: {reason}", .path.display())]
    Configuration { path: PathBuf, reason: String },

    /// The request could not be sent or its body could not be read.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// GitHub answered with a non-success status.
    #[error("GitHub API returned HTTP {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The response body or a date could not be understood.
    #[error("parse error: {0}")]
    Parse(String),
}

impl FetchError {
    pub(crate) fn configuration(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        FetchError::Configuration {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
