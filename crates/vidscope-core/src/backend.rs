//! Collaborator contracts
//!
//! The orchestrator never knows how the search/index service or the asset
//! server are reached. It talks to them through these traits.

use crate::clip::ClipWindow;
use crate::error::BackendError;
use crate::types::{Hit, ProcessingAck, SearchRequest, VideoSource};
use serde::Serialize;

/// Request to (re)process a video into the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingJob {
    /// Video to process
    #[serde(rename = "video_file")]
    pub video_id: String,
    /// Camera the video belongs to, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<String>,
}

impl ProcessingJob {
    /// Job for a video with no camera hint
    #[must_use]
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            camera_id: None,
        }
    }

    /// Attach the camera id
    #[must_use]
    pub fn with_camera(mut self, camera_id: impl Into<String>) -> Self {
        self.camera_id = Some(camera_id.into());
        self
    }
}

/// Remote search/index service
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    /// Backend name, for logs
    fn name(&self) -> &str;

    /// Run a search and return the matching hits
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Hit>, BackendError>;

    /// List the known video sources
    async fn list_catalog(&self) -> Result<Vec<VideoSource>, BackendError>;

    /// Ask the service to process a video
    async fn request_processing(&self, job: &ProcessingJob) -> Result<ProcessingAck, BackendError>;
}

/// Asset server URL scheme
pub trait AssetLocator: Send + Sync {
    /// URL of the clip `window` cut from `source_video_id`
    fn clip_url(&self, source_video_id: &str, window: &ClipWindow) -> String;

    /// URL of a screenshot, or `None` when the id is blank or unusable
    fn screenshot_url(&self, screenshot_id: &str) -> Option<String>;
}
