//! Search session state machine
//!
//! One session tracks the lifecycle of successive searches:
//!
//! ```text
//! Idle ──submit──▶ Pending(n) ──response n──▶ Succeeded(n) | Empty(n)
//!   │                  │
//!   └──invalid input───┴──────────────────────▶ Failed(n)
//! ```
//!
//! Every submit allocates a new, strictly increasing request id. A response is
//! applied only when its id is still the latest one; anything older is dropped
//! without touching the visible state, so the last submitted search wins even
//! when an earlier one answers later.

use crate::error::ValidationError;
use crate::event_bus::{EventBus, SessionEvent};
use crate::query::compose;
use crate::resilience::{ResilienceAdapter, SearchOutcome};
use crate::types::{Hit, RawFilters};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Monotonically increasing search request identifier
pub type RequestId = u64;

/// Visible state of a search session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Nothing submitted yet
    Idle,
    /// Request dispatched, waiting for the response
    Pending {
        /// Request in flight
        request_id: RequestId,
    },
    /// Response with at least one hit
    Succeeded {
        /// Request that produced the hits
        request_id: RequestId,
        /// Hits in collaborator order
        hits: Vec<Hit>,
        /// Whether the hits are a degraded-mode substitute
        degraded: bool,
    },
    /// Response with no hits
    Empty {
        /// Request that came back empty
        request_id: RequestId,
        /// Whether the empty list is a degraded-mode substitute
        degraded: bool,
    },
    /// Input was rejected before any request was sent
    Failed {
        /// Request id allocated for the rejected submission
        request_id: RequestId,
        /// Validation failure
        error: ValidationError,
    },
}

impl SessionState {
    /// Request the state belongs to, `None` while idle
    #[must_use]
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            Self::Idle => None,
            Self::Pending { request_id }
            | Self::Succeeded { request_id, .. }
            | Self::Empty { request_id, .. }
            | Self::Failed { request_id, .. } => Some(*request_id),
        }
    }

    /// True once a submission has reached its final state
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded { .. } | Self::Empty { .. } | Self::Failed { .. }
        )
    }

    /// Hits to render; empty unless the state is `Succeeded`
    #[must_use]
    pub fn hits(&self) -> &[Hit] {
        match self {
            Self::Succeeded { hits, .. } => hits,
            _ => &[],
        }
    }

    /// One-line description for result headers
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Idle => "Ready".to_string(),
            Self::Pending { .. } => "Searching...".to_string(),
            Self::Succeeded { hits, .. } if hits.len() == 1 => "Found 1 result".to_string(),
            Self::Succeeded { hits, .. } => format!("Found {} results", hits.len()),
            Self::Empty { .. } => "No results found".to_string(),
            Self::Failed { error, .. } => error.to_string(),
        }
    }
}

struct SessionInner {
    state: SessionState,
    latest: RequestId,
}

/// Handle to a submitted search
#[derive(Debug)]
pub struct SearchTicket {
    request_id: RequestId,
    handle: Option<JoinHandle<()>>,
}

impl SearchTicket {
    /// Id allocated for the submission
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Whether a request was actually dispatched
    #[must_use]
    pub fn dispatched(&self) -> bool {
        self.handle.is_some()
    }

    /// Wait until the response has been applied or discarded.
    pub async fn wait(self) {
        if let Some(handle) = self.handle {
            if let Err(e) = handle.await {
                warn!(request_id = self.request_id, error = %e, "search task did not complete");
            }
        }
    }
}

/// Owner of the search state for one user session
#[derive(Clone)]
pub struct SearchSession {
    adapter: ResilienceAdapter,
    events: EventBus,
    inner: Arc<Mutex<SessionInner>>,
}

impl SearchSession {
    /// Create an idle session
    #[must_use]
    pub fn new(adapter: ResilienceAdapter, events: EventBus) -> Self {
        Self {
            adapter,
            events,
            inner: Arc::new(Mutex::new(SessionInner {
                state: SessionState::Idle,
                latest: 0,
            })),
        }
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.lock().state.clone()
    }

    /// Most recently allocated request id (0 before the first submit)
    #[must_use]
    pub fn latest_request_id(&self) -> RequestId {
        self.lock().latest
    }

    /// Event bus the session publishes on
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Submit a search.
    ///
    /// Invalid input moves straight to `Failed` and sends nothing. Otherwise
    /// the session moves to `Pending` and the search runs on a spawned task;
    /// this must be called from within a Tokio runtime.
    pub fn submit(&self, raw_text: &str, raw_filters: &RawFilters) -> SearchTicket {
        let composed = compose(raw_text, raw_filters);

        let mut inner = self.lock();
        inner.latest += 1;
        let request_id = inner.latest;

        let request = match composed {
            Ok(request) => request,
            Err(error) => {
                info!(request_id, error = %error, "search rejected");
                inner.state = SessionState::Failed {
                    request_id,
                    error: error.clone(),
                };
                self.events
                    .publish(SessionEvent::QueryRejected { request_id, error });
                return SearchTicket {
                    request_id,
                    handle: None,
                };
            }
        };

        inner.state = SessionState::Pending { request_id };
        self.events.publish(SessionEvent::SearchStarted {
            request_id,
            query: request.query().to_string(),
        });
        drop(inner);

        let session = self.clone();
        let handle = tokio::spawn(async move {
            let outcome = session.adapter.execute(&request).await;
            session.resolve(request_id, request.query(), outcome);
        });

        SearchTicket {
            request_id,
            handle: Some(handle),
        }
    }

    /// Apply the response for `request_id`.
    ///
    /// Returns `false` when the request was superseded (or already resolved)
    /// and the response was dropped.
    pub fn resolve(&self, request_id: RequestId, query: &str, outcome: SearchOutcome) -> bool {
        let mut inner = self.lock();

        let is_current = inner.latest == request_id
            && matches!(inner.state, SessionState::Pending { request_id: p } if p == request_id);
        if !is_current {
            let latest = inner.latest;
            warn!(request_id, latest, hits = outcome.hits.len(), "discarding stale search response");
            self.events
                .publish(SessionEvent::ResponseDiscarded { request_id, latest });
            return false;
        }

        let SearchOutcome { hits, degraded } = outcome;
        if hits.is_empty() {
            info!(request_id, degraded, "search returned no results");
            inner.state = SessionState::Empty {
                request_id,
                degraded,
            };
            self.events.publish(SessionEvent::NoResults {
                request_id,
                query: query.to_string(),
                degraded,
            });
        } else {
            info!(request_id, hits = hits.len(), degraded, "search succeeded");
            let hit_count = hits.len();
            inner.state = SessionState::Succeeded {
                request_id,
                hits,
                degraded,
            };
            self.events.publish(SessionEvent::ResultsReady {
                request_id,
                hit_count,
                degraded,
            });
        }
        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests;
