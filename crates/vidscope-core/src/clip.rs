//! Clip window derivation
//!
//! A hit marks a single instant; playback shows a short clip centered on it.

use crate::types::Hit;
use serde::Serialize;

/// Seconds of video shown on each side of a hit
pub const CLIP_PADDING_SECS: f64 = 5.0;

/// Bounded playback interval, in seconds into the source video
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClipWindow {
    /// Clip start, never negative
    pub start_seconds: f64,
    /// Clip end, always after `start_seconds`
    pub end_seconds: f64,
}

impl ClipWindow {
    /// Window of `padding` seconds either side of `timestamp_seconds`,
    /// clamped at the start of the video.
    #[must_use]
    pub fn around(timestamp_seconds: f64, padding: f64) -> Self {
        Self {
            start_seconds: (timestamp_seconds - padding).max(0.0),
            end_seconds: timestamp_seconds + padding,
        }
    }

    /// Length of the clip in seconds
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

/// Derive the playback window for a hit using [`CLIP_PADDING_SECS`].
#[must_use]
pub fn derive_clip_window(hit: &Hit) -> ClipWindow {
    ClipWindow::around(hit.timestamp_seconds, CLIP_PADDING_SECS)
}

/// Render seconds as `HH:MM:SS`, truncating fractions.
#[must_use]
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}
