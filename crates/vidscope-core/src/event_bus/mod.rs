//! EventBus - broadcast-based stream of session events.
//!
//! The search session publishes an event alongside each state transition, so a
//! presentation layer can show notices (no results, rejected query) without the
//! state machine calling into it.

/// Core event bus implementation (broadcast channel).
pub mod bus;
/// Event type definitions for the search lifecycle.
pub mod types;

pub use bus::{EventBus, DEFAULT_CAPACITY};
pub use types::SessionEvent;
