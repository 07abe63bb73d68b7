//! Error types and handling for the debtbot server

use serde::Serialize;
use thiserror::Error;

/// Application error types
///
/// The search-core conditions (`NoActiveSession`, `EmptyPage`,
/// `InvalidSelection`) are recoverable and reported back to the caller; a
/// too-short query is not an error at all and yields an empty result set.
#[derive(Debug, Error, Serialize)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No active search session: {0}")]
    NoActiveSession(String),
    #[error("Page has no results: {0}")]
    EmptyPage(String),
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
    #[error("Back-office fetch failed: {0}")]
    FetchFailed(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for JSON-RPC responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NoActiveSession(_) => "no_active_session",
            AppError::EmptyPage(_) => "empty_page",
            AppError::InvalidSelection(_) => "invalid_selection",
            AppError::FetchFailed(_) => "fetch_failed",
            AppError::Timeout(_) => "timeout",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Convert anyhow::Error to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert reqwest::Error to AppError
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() || err.is_status() {
            AppError::FetchFailed(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

/// Convert serde_json::Error to AppError
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
