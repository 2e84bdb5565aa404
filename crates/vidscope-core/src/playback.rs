//! Playback controller
//!
//! Owns the video modal: which hit is open, its clip window, and the asset URL
//! of the clip. Independent of the search session; opening a hit never touches
//! search state and vice versa.

use crate::backend::AssetLocator;
use crate::clip::{derive_clip_window, ClipWindow};
use crate::types::Hit;
use std::sync::Arc;
use tracing::debug;

/// State of the video modal
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    /// No clip shown
    Closed,
    /// A hit is being played back
    Open {
        /// Active hit
        hit: Hit,
        /// Clip window derived from the hit
        window: ClipWindow,
    },
}

/// Video modal state machine
pub struct PlaybackController {
    state: PlaybackState,
    assets: Arc<dyn AssetLocator>,
}

impl PlaybackController {
    /// Create a closed controller resolving URLs through `assets`
    #[must_use]
    pub fn new(assets: Arc<dyn AssetLocator>) -> Self {
        Self {
            state: PlaybackState::Closed,
            assets,
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Whether a hit is open
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, PlaybackState::Open { .. })
    }

    /// Open `hit`, replacing whatever was open, and return its clip window.
    pub fn open(&mut self, hit: Hit) -> ClipWindow {
        let window = derive_clip_window(&hit);
        debug!(
            source_video = %hit.source_video_id,
            start = window.start_seconds,
            end = window.end_seconds,
            "opening clip"
        );
        self.state = PlaybackState::Open { hit, window };
        window
    }

    /// Close the modal. Closing a closed modal is a no-op.
    pub fn close(&mut self) {
        if self.is_open() {
            debug!("closing clip");
        }
        self.state = PlaybackState::Closed;
    }

    /// Cancel signal (escape). Same as [`close`](Self::close).
    pub fn cancel(&mut self) {
        self.close();
    }

    /// Clip URL of the open hit; `None` while closed.
    #[must_use]
    pub fn clip_url(&self) -> Option<String> {
        match &self.state {
            PlaybackState::Open { hit, window } => {
                Some(self.assets.clip_url(&hit.source_video_id, window))
            }
            PlaybackState::Closed => None,
        }
    }

    /// Screenshot URL of the open hit, when it has one.
    #[must_use]
    pub fn screenshot_url(&self) -> Option<String> {
        match &self.state {
            PlaybackState::Open { hit, .. } => hit
                .screenshot_id
                .as_deref()
                .and_then(|id| self.assets.screenshot_url(id)),
            PlaybackState::Closed => None,
        }
    }
}
