//! Plain-text rendering of results, clips and notices.

use vidscope_core::{
    format_clock, AssetLocator, ClipWindow, Hit, PlaybackController, PlaybackState, ProcessingAck,
    SessionEvent, SessionState, VideoSource,
};

pub fn print_state(state: &SessionState, assets: &dyn AssetLocator) {
    match state {
        SessionState::Succeeded { hits, degraded, .. } => {
            println!("🔎 {}", state.summary());
            if *degraded {
                println!("⚠️  Search service unavailable, showing demo results");
            }
            print_hits(hits, assets);
        }
        SessionState::Pending { .. } => println!("⏳ {}", state.summary()),
        // empty and failed states are reported through their notices
        SessionState::Idle | SessionState::Empty { .. } | SessionState::Failed { .. } => {}
    }
}

pub fn print_hits(hits: &[Hit], assets: &dyn AssetLocator) {
    for (i, hit) in hits.iter().enumerate() {
        println!(
            "{:>3}. [{}] {}  found at {}",
            i + 1,
            hit.camera_id,
            hit.text,
            format_clock(hit.timestamp_seconds)
        );
        if let Some(url) = hit
            .screenshot_id
            .as_deref()
            .and_then(|id| assets.screenshot_url(id))
        {
            println!("     screenshot: {}", url);
        }
    }
}

pub fn print_notice(event: &SessionEvent) {
    if let Some(text) = event.notice_text() {
        match event {
            SessionEvent::QueryRejected { .. } => println!("❌ {}", text),
            _ => println!("ℹ️  {}", text),
        }
    }
}

pub fn print_playback(playback: &PlaybackController) {
    match playback.state() {
        PlaybackState::Open { hit, window } => {
            println!("▶️  {} at {} ({})", hit.camera_id, format_clock(hit.timestamp_seconds), hit.text);
            println!("   segment: {}", describe_window(window));
            if let Some(url) = playback.clip_url() {
                println!("   clip: {}", url);
            }
            if let Some(url) = playback.screenshot_url() {
                println!("   screenshot: {}", url);
            }
        }
        PlaybackState::Closed => println!("⏹️  Playback closed"),
    }
}

pub fn describe_window(window: &ClipWindow) -> String {
    format!(
        "{}s - {}s ({}s)",
        window.start_seconds,
        window.end_seconds,
        window.duration()
    )
}

pub fn print_catalog(videos: &[VideoSource]) {
    if videos.is_empty() {
        println!("No videos registered.");
        return;
    }
    for video in videos {
        println!("📼 {}  {}  [{}]", video.id, video.name, video.camera_id);
    }
}

pub fn print_ack(ack: &ProcessingAck) {
    match &ack.message {
        Some(message) => println!("✅ {}: {}", ack.status, message),
        None => println!("✅ {}", ack.status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_window() {
        let window = ClipWindow::around(12.0, 5.0);
        assert_eq!(describe_window(&window), "7s - 17s (10s)");

        let window = ClipWindow::around(2.5, 5.0);
        assert_eq!(describe_window(&window), "0s - 7.5s (7.5s)");
    }
}
