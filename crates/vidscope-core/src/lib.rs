//! Vidscope Core - Search and Playback Orchestration
//!
//! This crate owns the client-side control flow of a video-forensics search:
//! - Query: Normalizing raw user input into a search request
//! - Session: Tracking one search lifecycle, discarding superseded responses
//! - Resilience: Masking collaborator outages with degraded-mode results
//! - Clip: Deriving the playback interval around a hit
//! - Playback: Owning the video modal state and its clip URL
//! - Event bus: Broadcasting notices to whatever presentation layer subscribes
//!
//! The remote search/index service and the asset server are reached through
//! the [`SearchBackend`] and [`AssetLocator`] traits; `vidscope-client`
//! provides the HTTP implementations.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod clip;
pub mod error;
pub mod event_bus;
pub mod mock;
pub mod playback;
pub mod query;
pub mod resilience;
pub mod session;
pub mod types;

pub use backend::{AssetLocator, ProcessingJob, SearchBackend};
pub use clip::{derive_clip_window, format_clock, ClipWindow, CLIP_PADDING_SECS};
pub use error::{BackendError, Error, Result, ValidationError};
pub use event_bus::{EventBus, SessionEvent};
pub use mock::MockBackend;
pub use playback::{PlaybackController, PlaybackState};
pub use query::compose;
pub use resilience::{DegradedMode, ResilienceAdapter, SearchOutcome};
pub use session::{RequestId, SearchSession, SearchTicket, SessionState};
pub use types::{DateRange, Hit, ProcessingAck, RawFilters, SearchFilters, SearchRequest, VideoSource};
