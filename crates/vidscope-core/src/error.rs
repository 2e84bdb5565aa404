//! Error types for vidscope-core
//!
//! Validation errors are surfaced to the user before any request is sent.
//! Backend errors describe a failed call to a collaborator; the resilience
//! adapter masks them on the search path, so they only reach callers that
//! talk to a [`SearchBackend`](crate::SearchBackend) directly.

use serde::Serialize;
use thiserror::Error;

/// Local validation failure while composing a search request
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ValidationError {
    /// Query text is empty after trimming
    #[error("query is empty")]
    EmptyQuery,

    /// Date range is incomplete, unparseable, or reversed
    #[error("invalid date range: {0}")]
    InvalidDateRange(String),
}

impl ValidationError {
    /// Notice text shown to the user for this error
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyQuery => "Enter a keyword to search the video archive.".to_string(),
            Self::InvalidDateRange(reason) => {
                format!("The date range is not valid ({}). Use YYYY-MM-DD dates with start <= end.", reason)
            }
        }
    }
}

/// Failure reaching or parsing a collaborator response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Connection could not be established or was dropped
    #[error("network error: {0}")]
    Network(String),

    /// Request did not complete in time
    #[error("timeout after {0}ms")]
    Timeout(u64),

    /// Collaborator answered with a non-success HTTP status
    #[error("unexpected status: {0}")]
    Status(u16),

    /// Body could not be decoded
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Collaborator call failed
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// Invalid settings
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
