//! Error types for connection-details issuance

use crate::auth::AccessTokenError;
use axum::http::StatusCode;
use thiserror::Error;

/// Broad failure categories, used to pick a response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied input missing or empty
    Validation,
    /// Server-side configuration missing
    Configuration,
    /// Token signing failed
    Signing,
    /// Request body could not be read as JSON
    Transport,
}

impl ErrorKind {
    /// HTTP status for this kind of failure
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::Validation | ErrorKind::Transport => StatusCode::BAD_REQUEST,
            ErrorKind::Configuration | ErrorKind::Signing => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Errors raised while building connection details
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("token signing failed: {0}")]
    Signing(#[from] AccessTokenError),
}

impl IssueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IssueError::Validation(_) => ErrorKind::Validation,
            IssueError::Configuration(_) => ErrorKind::Configuration,
            IssueError::Signing(_) => ErrorKind::Signing,
        }
    }

    pub(crate) fn missing_env(name: &str) -> Self {
        IssueError::Configuration(format!("Missing required env var: {}", name))
    }
}
