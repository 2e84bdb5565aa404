//! Asset server URLs for clips and screenshots.

use reqwest::Url;
use vidscope_core::{AssetLocator, ClipWindow, Error, Result};

/// URL scheme of the asset server
#[derive(Debug, Clone)]
pub struct HttpAssets {
    base: Url,
}

impl HttpAssets {
    /// Parse `base_url` (e.g. `http://localhost:5000/api`)
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url.trim())
            .map_err(|e| Error::Configuration(format!("invalid asset url '{}': {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::Configuration(format!(
                "asset url '{}' cannot carry a path",
                base_url
            )));
        }
        Ok(Self::from_url(base))
    }

    pub(crate) fn from_url(base: Url) -> Self {
        Self { base }
    }

    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl AssetLocator for HttpAssets {
    fn clip_url(&self, source_video_id: &str, window: &ClipWindow) -> String {
        let mut url = self.join(&["video_segment"]);
        url.query_pairs_mut()
            .append_pair("video_path", source_video_id)
            .append_pair("start_time", &window.start_seconds.to_string())
            .append_pair("end_time", &window.end_seconds.to_string());
        url.into()
    }

    fn screenshot_url(&self, screenshot_id: &str) -> Option<String> {
        let id = screenshot_id.trim();
        // the server refuses traversal-looking names
        if id.is_empty() || id.contains("..") || id.contains('/') {
            return None;
        }
        Some(self.join(&["screenshot", id]).into())
    }
}
