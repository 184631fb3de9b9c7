//! Error types and handling
//!
//! Entity policy functions return [`AppError`]; the error reporting wrapper in
//! [`crate::middleware::error_reporting`] is the only place an error becomes an
//! HTTP response. Classification goes through [`AppError::kind`], never through
//! the error message.

use axum::http::StatusCode;
use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found (404). The message is surfaced to the caller.
    #[error("{0}")]
    NotFound(String),

    /// Request body could not be decoded into the expected shape
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// Anything else: store failures, constraint violations, serialization
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse error classification used for status translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Internal,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::InvalidBody(_) | AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        // Alternate formatting keeps the whole context chain for the server log
        AppError::Internal(format!("{:#}", err))
    }
}

/// Result type alias for policy handlers
pub type AppResult<T> = Result<T, AppError>;
