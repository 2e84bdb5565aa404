//! Mock search backend for testing
//!
//! Returns scripted hits per query, optionally after a delay, and can simulate
//! an unreachable service.

use crate::backend::{ProcessingJob, SearchBackend};
use crate::error::BackendError;
use crate::types::{Hit, ProcessingAck, SearchRequest, VideoSource};

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
struct ScriptedSearch {
    result: Result<Vec<Hit>, BackendError>,
    delay: Duration,
}

/// A scripted backend. Unscripted queries return no hits.
pub struct MockBackend {
    searches: Arc<Mutex<HashMap<String, ScriptedSearch>>>,
    catalog: Arc<Mutex<Vec<VideoSource>>>,
    unreachable: AtomicBool,
    search_calls: AtomicUsize,
    processing_calls: AtomicUsize,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a reachable mock with nothing scripted.
    #[must_use]
    pub fn new() -> Self {
        Self {
            searches: Arc::new(Mutex::new(HashMap::new())),
            catalog: Arc::new(Mutex::new(Vec::new())),
            unreachable: AtomicBool::new(false),
            search_calls: AtomicUsize::new(0),
            processing_calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock whose every call fails with a network error.
    #[must_use]
    pub fn unreachable() -> Self {
        let mock = Self::new();
        mock.set_unreachable(true);
        mock
    }

    /// Toggle simulated outage.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Script the hits returned for `query`.
    pub fn add_search_response(&self, query: impl Into<String>, hits: Vec<Hit>) {
        self.script(query.into(), Ok(hits), Duration::ZERO);
    }

    /// Script the hits returned for `query`, delivered after `delay`.
    pub fn add_delayed_search_response(
        &self,
        query: impl Into<String>,
        hits: Vec<Hit>,
        delay: Duration,
    ) {
        self.script(query.into(), Ok(hits), delay);
    }

    /// Script a failure for `query`.
    pub fn add_search_failure(&self, query: impl Into<String>, error: BackendError) {
        self.script(query.into(), Err(error), Duration::ZERO);
    }

    /// Replace the catalog.
    pub fn set_catalog(&self, videos: Vec<VideoSource>) {
        *self.catalog.lock().unwrap_or_else(|e| e.into_inner()) = videos;
    }

    /// Number of search calls received so far.
    #[must_use]
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Number of processing requests received so far.
    #[must_use]
    pub fn processing_calls(&self) -> usize {
        self.processing_calls.load(Ordering::SeqCst)
    }

    fn script(&self, query: String, result: Result<Vec<Hit>, BackendError>, delay: Duration) {
        self.searches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(query, ScriptedSearch { result, delay });
    }

    fn check_reachable(&self) -> Result<(), BackendError> {
        if self.unreachable.load(Ordering::SeqCst) {
            Err(BackendError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl SearchBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<Hit>, BackendError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;

        let scripted = self
            .searches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(request.query())
            .cloned();

        match scripted {
            Some(scripted) => {
                if !scripted.delay.is_zero() {
                    tokio::time::sleep(scripted.delay).await;
                }
                scripted.result
            }
            None => Ok(Vec::new()),
        }
    }

    async fn list_catalog(&self) -> Result<Vec<VideoSource>, BackendError> {
        self.check_reachable()?;
        Ok(self
            .catalog
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    async fn request_processing(&self, job: &ProcessingJob) -> Result<ProcessingAck, BackendError> {
        self.processing_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;
        Ok(ProcessingAck {
            status: "processing".to_string(),
            message: Some(format!("{} queued", job.video_id)),
        })
    }
}
