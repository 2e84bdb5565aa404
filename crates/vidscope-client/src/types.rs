//! Wire types and configuration for the HTTP collaborator.

use serde::Deserialize;
use std::time::Duration;
use vidscope_core::{Hit, VideoSource};

/// Default API URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

// ============================================================================
// API Types
// ============================================================================

/// Response from the search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Matching detections; absent means none
    #[serde(default)]
    pub results: Vec<Hit>,
}

/// Response from the videos endpoint
#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    /// Known videos; absent means none
    #[serde(default)]
    pub videos: Vec<VideoSource>,
}

/// Error body returned by the API on failure
#[derive(Debug, Deserialize)]
pub struct ApiError {
    /// Error message
    pub error: String,
}

/// HTTP collaborator configuration
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL of the API (default: http://localhost:5000/api)
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl HttpBackendConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
