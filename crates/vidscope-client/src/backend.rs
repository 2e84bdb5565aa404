//! Search/index collaborator over HTTP.

use crate::assets::HttpAssets;
use crate::types::{ApiError, CatalogResponse, HttpBackendConfig, SearchResponse};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use vidscope_core::{
    BackendError, Error, Hit, ProcessingAck, ProcessingJob, Result, SearchBackend, SearchRequest,
    VideoSource,
};

/// HTTP search backend
pub struct HttpBackend {
    client: Client,
    config: HttpBackendConfig,
    base: Url,
}

impl HttpBackend {
    /// Create a new backend, validating the base URL
    pub fn new(config: HttpBackendConfig) -> Result<Self> {
        let base = parse_base_url(&config.base_url)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Backend(BackendError::Network(e.to_string())))?;

        Ok(Self {
            client,
            config,
            base,
        })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpBackendConfig::default())
    }

    /// Asset URL scheme on the same server
    #[must_use]
    pub fn assets(&self) -> HttpAssets {
        HttpAssets::from_url(self.base.clone())
    }

    pub(crate) fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(path);
        }
        url
    }

    fn map_send_error(&self, e: reqwest::Error) -> BackendError {
        if e.is_connect() {
            BackendError::Network(format!(
                "failed to connect to {}. Is the search service running?",
                self.base
            ))
        } else if e.is_timeout() {
            BackendError::Timeout(self.config.timeout.as_millis() as u64)
        } else {
            BackendError::Network(e.to_string())
        }
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> std::result::Result<T, BackendError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<ApiError>(&body) {
                debug!(status = status.as_u16(), error = %error.error, "api returned error body");
            }
            return Err(BackendError::Status(status.as_u16()));
        }

        serde_json::from_str(&body).map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

/// Parse a collaborator base URL; only absolute http(s) URLs are accepted.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Configuration(format!("invalid base url '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Configuration(format!(
            "base url '{}' must be an http(s) url",
            raw
        )));
    }
    Ok(url)
}

/// Query parameters sent for a search request
pub(crate) fn search_params(request: &SearchRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![("query", request.query().to_string())];
    if let Some(filters) = request.filters() {
        if let Some(range) = filters.date_range {
            params.push(("start_date", range.start().format("%Y-%m-%d").to_string()));
            params.push(("end_date", range.end().format("%Y-%m-%d").to_string()));
        }
        if let Some(camera_id) = &filters.camera_id {
            params.push(("camera_id", camera_id.clone()));
        }
    }
    params
}

/// Drop hits whose timestamp cannot anchor a clip
pub(crate) fn retain_playable(hits: Vec<Hit>) -> Vec<Hit> {
    let total = hits.len();
    let playable: Vec<Hit> = hits
        .into_iter()
        .filter(|h| h.timestamp_seconds.is_finite() && h.timestamp_seconds >= 0.0)
        .collect();
    if playable.len() != total {
        warn!(dropped = total - playable.len(), "ignoring hits with invalid timestamps");
    }
    playable
}

#[async_trait::async_trait]
impl SearchBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, request), fields(query = %request.query()))]
    async fn search(&self, request: &SearchRequest) -> std::result::Result<Vec<Hit>, BackendError> {
        let response = self
            .client
            .get(self.endpoint("search"))
            .query(&search_params(request))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let body: SearchResponse = self.read_json(response).await?;
        Ok(retain_playable(body.results))
    }

    #[instrument(skip(self))]
    async fn list_catalog(&self) -> std::result::Result<Vec<VideoSource>, BackendError> {
        let response = self
            .client
            .get(self.endpoint("videos"))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let body: CatalogResponse = self.read_json(response).await?;
        Ok(body.videos)
    }

    #[instrument(skip(self, job), fields(video_id = %job.video_id))]
    async fn request_processing(
        &self,
        job: &ProcessingJob,
    ) -> std::result::Result<ProcessingAck, BackendError> {
        let response = self
            .client
            .post(self.endpoint("process"))
            .json(job)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.read_json(response).await
    }
}
