//! Resilience adapter
//!
//! Wraps every call to the search/index collaborator. A failed call (network,
//! non-success status, malformed body) never reaches the caller as an error:
//! it is logged and replaced with a fixed degraded-mode result, so a search
//! always ends in a renderable state.

use crate::backend::{ProcessingJob, SearchBackend};
use crate::types::{Hit, ProcessingAck, SearchRequest, VideoSource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Token that selects the demo hit when the service is down
const DEMO_TOKEN: &str = "msi";

/// What to substitute when the collaborator cannot be reached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegradedMode {
    /// Synthetic demo hit for queries containing the demo token, else nothing
    #[default]
    Demo,
    /// Always an empty result
    Empty,
}

/// Search result as seen by the session
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Hits to render, possibly empty
    pub hits: Vec<Hit>,
    /// True when `hits` is a substitute for a failed call
    pub degraded: bool,
}

/// Failure-masking wrapper around a [`SearchBackend`]
#[derive(Clone)]
pub struct ResilienceAdapter {
    backend: Arc<dyn SearchBackend>,
    mode: DegradedMode,
}

impl ResilienceAdapter {
    /// Wrap `backend`, substituting per `mode` on failure
    #[must_use]
    pub fn new(backend: Arc<dyn SearchBackend>, mode: DegradedMode) -> Self {
        Self { backend, mode }
    }

    /// Active degraded mode
    #[must_use]
    pub fn mode(&self) -> DegradedMode {
        self.mode
    }

    /// Run a search. Never fails.
    pub async fn execute(&self, request: &SearchRequest) -> SearchOutcome {
        debug!(backend = self.backend.name(), query = request.query(), "dispatching search");
        match self.backend.search(request).await {
            Ok(hits) => SearchOutcome {
                hits,
                degraded: false,
            },
            Err(e) => {
                warn!(
                    backend = self.backend.name(),
                    query = request.query(),
                    error = %e,
                    "search failed, using degraded-mode results"
                );
                SearchOutcome {
                    hits: self.fallback_hits(request.query()),
                    degraded: true,
                }
            }
        }
    }

    /// List known video sources. Never fails.
    pub async fn fetch_catalog(&self) -> Vec<VideoSource> {
        match self.backend.list_catalog().await {
            Ok(videos) => videos,
            Err(e) => {
                warn!(backend = self.backend.name(), error = %e, "catalog fetch failed, using fallback catalog");
                fallback_catalog()
            }
        }
    }

    /// Forward a processing request. Never fails.
    pub async fn submit_processing_job(&self, job: &ProcessingJob) -> ProcessingAck {
        match self.backend.request_processing(job).await {
            Ok(ack) => ack,
            Err(e) => {
                warn!(
                    backend = self.backend.name(),
                    video_id = %job.video_id,
                    error = %e,
                    "processing request failed, returning simulated acknowledgement"
                );
                fallback_ack()
            }
        }
    }

    fn fallback_hits(&self, query: &str) -> Vec<Hit> {
        match self.mode {
            DegradedMode::Demo if query.to_lowercase().contains(DEMO_TOKEN) => vec![demo_hit()],
            DegradedMode::Demo | DegradedMode::Empty => Vec::new(),
        }
    }
}

fn demo_hit() -> Hit {
    Hit {
        text: "MSI-123".to_string(),
        timestamp_seconds: 10.5,
        camera_id: "CAM_01".to_string(),
        source_video_id: "OCR-Video.mp4".to_string(),
        screenshot_id: Some("MSI123_CAM_01_10_5s.png".to_string()),
    }
}

fn fallback_catalog() -> Vec<VideoSource> {
    vec![VideoSource {
        id: "OCR-Video.mp4".to_string(),
        name: "OCR Video".to_string(),
        camera_id: "CAM_01".to_string(),
    }]
}

fn fallback_ack() -> ProcessingAck {
    ProcessingAck {
        status: "success".to_string(),
        message: Some("Video processing simulation complete (mock response)".to_string()),
    }
}
