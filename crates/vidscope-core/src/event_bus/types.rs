use crate::error::ValidationError;
use serde::Serialize;

/// Events emitted by a search session.
///
/// Only [`NoResults`](Self::NoResults) and [`QueryRejected`](Self::QueryRejected)
/// are user-visible notices; a successful search is silent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A request was dispatched
    SearchStarted {
        /// Request identifier
        request_id: u64,
        /// Normalized query text
        query: String,
    },
    /// The current request returned hits
    ResultsReady {
        /// Request identifier
        request_id: u64,
        /// Number of hits
        hit_count: usize,
        /// Whether the hits are a degraded-mode substitute
        degraded: bool,
    },
    /// The current request returned no hits
    NoResults {
        /// Request identifier
        request_id: u64,
        /// Normalized query text
        query: String,
        /// Whether the empty list is a degraded-mode substitute
        degraded: bool,
    },
    /// The submitted input failed validation; nothing was sent
    QueryRejected {
        /// Request identifier
        request_id: u64,
        /// Why the input was rejected
        error: ValidationError,
    },
    /// A response arrived for a superseded request and was dropped
    ResponseDiscarded {
        /// Request the response belonged to
        request_id: u64,
        /// Request that is current
        latest: u64,
    },
}

impl SessionEvent {
    /// Request the event belongs to.
    #[must_use]
    pub fn request_id(&self) -> u64 {
        match self {
            Self::SearchStarted { request_id, .. }
            | Self::ResultsReady { request_id, .. }
            | Self::NoResults { request_id, .. }
            | Self::QueryRejected { request_id, .. }
            | Self::ResponseDiscarded { request_id, .. } => *request_id,
        }
    }

    /// Whether the event should be shown to the user as a notice.
    #[must_use]
    pub fn is_notice(&self) -> bool {
        matches!(self, Self::NoResults { .. } | Self::QueryRejected { .. })
    }

    /// Notice text, for notice events.
    #[must_use]
    pub fn notice_text(&self) -> Option<String> {
        match self {
            Self::NoResults { query, .. } => Some(format!("No results found for \"{}\"", query)),
            Self::QueryRejected { error, .. } => Some(error.user_message()),
            _ => None,
        }
    }
}
