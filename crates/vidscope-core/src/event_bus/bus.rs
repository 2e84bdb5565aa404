use super::types::SessionEvent;
use tokio::sync::broadcast;
use tracing::trace;

/// Capacity used by [`EventBus::default`]; matches `events.capacity` in the shipped settings.
pub const DEFAULT_CAPACITY: usize = 256;

/// Fan-out of search session events to presentation subscribers.
///
/// A CLI printer, a shell, and tests may all listen to the same session.
/// A subscriber that falls more than `capacity` events behind sees
/// `RecvError::Lagged` and resumes from the oldest retained event; the
/// session itself never waits on a listener.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    /// Bus retaining up to `capacity` undelivered events per subscriber (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Listen for events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Hand `event` to every listener and return how many got it.
    ///
    /// A session with no listener is normal (one-shot commands that only
    /// read the final state), so zero is not an error.
    pub fn publish(&self, event: SessionEvent) -> usize {
        let request_id = event.request_id();
        match self.sender.send(event) {
            Ok(delivered) => delivered,
            Err(_) => {
                trace!(request_id, "session event had no listener");
                0
            }
        }
    }

    /// Number of live listeners.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
