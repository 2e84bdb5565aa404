use super::*;
use crate::mock::MockBackend;
use crate::resilience::DegradedMode;
use std::time::Duration;
use tokio::sync::broadcast::error::TryRecvError;

fn hit(text: &str, t: f64) -> Hit {
    Hit {
        text: text.to_string(),
        timestamp_seconds: t,
        camera_id: "CAM_03".to_string(),
        source_video_id: "yard.mp4".to_string(),
        screenshot_id: None,
    }
}

fn session_with(backend: Arc<MockBackend>) -> SearchSession {
    SearchSession::new(
        ResilienceAdapter::new(backend, DegradedMode::Demo),
        EventBus::new(32),
    )
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            Err(TryRecvError::Lagged(_)) => continue,
        }
    }
    events
}

#[test]
fn test_new_session_is_idle() {
    let session = session_with(Arc::new(MockBackend::new()));
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.latest_request_id(), 0);
    assert_eq!(session.state().summary(), "Ready");
}

#[tokio::test]
async fn test_empty_query_fails_without_request() {
    let backend = Arc::new(MockBackend::new());
    let session = session_with(backend.clone());
    let mut rx = session.events().subscribe();

    let ticket = session.submit("   ", &RawFilters::none());
    assert!(!ticket.dispatched());
    ticket.wait().await;

    assert_eq!(
        session.state(),
        SessionState::Failed {
            request_id: 1,
            error: ValidationError::EmptyQuery,
        }
    );
    assert_eq!(backend.search_calls(), 0);

    let events = drain(&mut rx);
    assert_eq!(events.len(), 1);
    assert!(events[0].is_notice());
}

#[tokio::test]
async fn test_invalid_range_fails_without_request() {
    let backend = Arc::new(MockBackend::new());
    let session = session_with(backend.clone());

    let filters = RawFilters::none().with_dates("2024-09-10", "2024-09-01");
    session.submit("PALLET-A123", &filters).wait().await;

    assert!(matches!(
        session.state(),
        SessionState::Failed {
            error: ValidationError::InvalidDateRange(_),
            ..
        }
    ));
    assert_eq!(backend.search_calls(), 0);
}

#[tokio::test]
async fn test_success_is_silent() {
    let backend = Arc::new(MockBackend::new());
    backend.add_search_response("PALLET-A123", vec![hit("PALLET-A123", 12.0)]);
    let session = session_with(backend);
    let mut rx = session.events().subscribe();

    let ticket = session.submit("PALLET-A123", &RawFilters::none());
    assert_eq!(session.state(), SessionState::Pending { request_id: 1 });
    ticket.wait().await;

    let state = session.state();
    assert!(state.is_terminal());
    assert_eq!(state.hits().len(), 1);
    assert_eq!(state.summary(), "Found 1 result");

    let events = drain(&mut rx);
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], SessionEvent::SearchStarted { request_id: 1, .. }));
    assert!(matches!(
        events[1],
        SessionEvent::ResultsReady {
            request_id: 1,
            hit_count: 1,
            degraded: false
        }
    ));
    assert_eq!(events.iter().filter(|e| e.is_notice()).count(), 0);
}

#[tokio::test]
async fn test_no_hits_emits_one_notice() {
    let session = session_with(Arc::new(MockBackend::new()));
    let mut rx = session.events().subscribe();

    session.submit("nothing-here", &RawFilters::none()).wait().await;

    assert_eq!(
        session.state(),
        SessionState::Empty {
            request_id: 1,
            degraded: false
        }
    );
    let notices: Vec<_> = drain(&mut rx).into_iter().filter(|e| e.is_notice()).collect();
    assert_eq!(notices.len(), 1);
    assert!(matches!(notices[0], SessionEvent::NoResults { .. }));
}

#[tokio::test]
async fn test_later_submission_wins_over_slow_earlier_one() {
    let backend = Arc::new(MockBackend::new());
    backend.add_delayed_search_response("slow", vec![hit("SLOW-1", 40.0)], Duration::from_millis(150));
    backend.add_search_response("fast", vec![hit("FAST-1", 3.0), hit("FAST-2", 9.0)]);
    let session = session_with(backend.clone());
    let mut rx = session.events().subscribe();

    let first = session.submit("slow", &RawFilters::none());
    let second = session.submit("fast", &RawFilters::none());
    second.wait().await;
    first.wait().await;

    match session.state() {
        SessionState::Succeeded {
            request_id, hits, ..
        } => {
            assert_eq!(request_id, 2);
            assert_eq!(hits[0].text, "FAST-1");
        }
        other => panic!("expected fast results, got {:?}", other),
    }
    assert_eq!(backend.search_calls(), 2);

    let events = drain(&mut rx);
    assert!(events.contains(&SessionEvent::ResponseDiscarded {
        request_id: 1,
        latest: 2
    }));
}

#[tokio::test]
async fn test_rejected_submission_supersedes_pending_search() {
    let backend = Arc::new(MockBackend::new());
    backend.add_delayed_search_response("slow", vec![hit("SLOW-1", 40.0)], Duration::from_millis(50));
    let session = session_with(backend);

    let first = session.submit("slow", &RawFilters::none());
    session.submit("", &RawFilters::none()).wait().await;
    first.wait().await;

    assert_eq!(
        session.state(),
        SessionState::Failed {
            request_id: 2,
            error: ValidationError::EmptyQuery,
        }
    );
}

#[test]
fn test_resolve_without_pending_request() {
    let session = session_with(Arc::new(MockBackend::new()));
    let outcome = SearchOutcome {
        hits: vec![hit("X", 1.0)],
        degraded: false,
    };

    // nothing pending yet
    assert!(!session.resolve(1, "x", outcome));
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_resolve_applies_only_once() {
    let session = session_with(Arc::new(MockBackend::new()));
    session.submit("x", &RawFilters::none()).wait().await;
    let settled = session.state();

    let outcome = SearchOutcome {
        hits: vec![hit("LATE", 1.0)],
        degraded: false,
    };
    assert!(!session.resolve(1, "x", outcome));
    assert_eq!(session.state(), settled);
}

#[tokio::test]
async fn test_outage_reaches_terminal_state() {
    let backend = Arc::new(MockBackend::unreachable());
    let session = session_with(backend);

    session.submit("MSI", &RawFilters::none()).wait().await;
    match session.state() {
        SessionState::Succeeded { hits, degraded, .. } => {
            assert!(degraded);
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].camera_id, "CAM_01");
        }
        other => panic!("expected degraded hit, got {:?}", other),
    }

    session.submit("PALLET-A123", &RawFilters::none()).wait().await;
    assert_eq!(
        session.state(),
        SessionState::Empty {
            request_id: 2,
            degraded: true
        }
    );
}

#[tokio::test]
async fn test_request_ids_increase() {
    let session = session_with(Arc::new(MockBackend::new()));
    let a = session.submit("a", &RawFilters::none());
    let b = session.submit("", &RawFilters::none());
    let c = session.submit("c", &RawFilters::none());
    assert!(a.request_id() < b.request_id());
    assert!(b.request_id() < c.request_id());
    assert_eq!(session.latest_request_id(), c.request_id());
    c.wait().await;
    a.wait().await;
}
