use super::backend::{retain_playable, search_params};
use super::*;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use vidscope_core::{
    compose, AssetLocator, BackendError, ClipWindow, Error, Hit, ProcessingJob, RawFilters,
    SearchBackend,
};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn backend_for(base_url: String) -> HttpBackend {
    HttpBackend::new(
        HttpBackendConfig::new()
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap()
}

async fn echo_search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let query = params.get("query").cloned().unwrap_or_default();
    let camera = params
        .get("camera_id")
        .cloned()
        .unwrap_or_else(|| "CAM_01".to_string());
    let range = match (params.get("start_date"), params.get("end_date")) {
        (Some(s), Some(e)) => format!("{}..{}", s, e),
        _ => String::new(),
    };
    Json(json!({
        "results": [
            {
                "text": query,
                "timestamp": 12.0,
                "camera_id": camera,
                "source_video": range,
                "screenshot_filename": "PALLETA123_CAM_01_12_0s.png"
            },
            {
                "text": "BROKEN",
                "timestamp": -3.0,
                "camera_id": "CAM_01",
                "source_video": "x.mp4"
            }
        ]
    }))
}

#[tokio::test]
async fn test_search_sends_query_and_filters() {
    let app = Router::new().route("/api/search", get(echo_search));
    let backend = backend_for(serve(app).await);

    let filters = RawFilters::none()
        .with_dates("2024-05-01", "2024-05-31")
        .with_camera("CAM_09");
    let request = compose("PALLET-A123", &filters).unwrap();
    let hits = backend.search(&request).await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "PALLET-A123");
    assert_eq!(hits[0].camera_id, "CAM_09");
    assert_eq!(hits[0].source_video_id, "2024-05-01..2024-05-31");
    assert_eq!(
        hits[0].screenshot_id.as_deref(),
        Some("PALLETA123_CAM_01_12_0s.png")
    );
}

#[tokio::test]
async fn test_missing_results_key_is_empty() {
    let app = Router::new().route("/api/search", get(|| async { Json(json!({})) }));
    let backend = backend_for(serve(app).await);

    let request = compose("msi", &RawFilters::none()).unwrap();
    assert!(backend.search(&request).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let app = Router::new().route(
        "/api/search",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "index offline"})),
            )
        }),
    );
    let backend = backend_for(serve(app).await);

    let request = compose("msi", &RawFilters::none()).unwrap();
    assert_eq!(
        backend.search(&request).await,
        Err(BackendError::Status(500))
    );
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let app = Router::new().route("/api/search", get(|| async { "<html>oops</html>" }));
    let backend = backend_for(serve(app).await);

    let request = compose("msi", &RawFilters::none()).unwrap();
    assert!(matches!(
        backend.search(&request).await,
        Err(BackendError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_unreachable_is_network_error() {
    // bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = backend_for(format!("http://{}/api", addr));
    let request = compose("msi", &RawFilters::none()).unwrap();
    assert!(matches!(
        backend.search(&request).await,
        Err(BackendError::Network(_))
    ));
}

#[tokio::test]
async fn test_catalog_and_processing() {
    let app = Router::new()
        .route(
            "/api/videos",
            get(|| async {
                Json(json!({"videos": [{"id": "CAM_01", "name": "OCR-Video.mp4", "camera_id": "CAM_01"}]}))
            }),
        )
        .route(
            "/api/process",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "status": "processing",
                    "video": body["video_file"],
                    "message": format!("camera {}", body["camera_id"].as_str().unwrap_or("none"))
                }))
            }),
        );
    let backend = backend_for(serve(app).await);

    let videos = backend.list_catalog().await.unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].name, "OCR-Video.mp4");

    let ack = backend
        .request_processing(&ProcessingJob::new("OCR-Video.mp4").with_camera("CAM_01"))
        .await
        .unwrap();
    assert_eq!(ack.status, "processing");
    assert_eq!(ack.message.as_deref(), Some("camera CAM_01"));
}

#[test]
fn test_search_params_without_filters() {
    let request = compose("  msi ", &RawFilters::none()).unwrap();
    assert_eq!(search_params(&request), vec![("query", "msi".to_string())]);
}

#[test]
fn test_retain_playable_drops_negative_timestamps() {
    let hit = |t: f64| Hit {
        text: "X".to_string(),
        timestamp_seconds: t,
        camera_id: "CAM_01".to_string(),
        source_video_id: "v.mp4".to_string(),
        screenshot_id: None,
    };
    let kept = retain_playable(vec![hit(0.0), hit(-0.5), hit(f64::NAN), hit(8.0)]);
    assert_eq!(kept.len(), 2);
}

#[test]
fn test_endpoints_use_parsed_base_url() {
    let backend = backend_for("  http://search.local:5000/api/ ".to_string());
    assert_eq!(
        backend.endpoint("search").as_str(),
        "http://search.local:5000/api/search"
    );

    let backend = backend_for("http://search.local:5000/api".to_string());
    assert_eq!(
        backend.endpoint("process").as_str(),
        "http://search.local:5000/api/process"
    );
}

#[tokio::test]
async fn test_padded_base_url_reaches_service() {
    let app = Router::new().route("/api/videos", get(|| async { Json(json!({"videos": []})) }));
    let base = serve(app).await;
    let backend = backend_for(format!("  {}\n", base));

    assert_eq!(backend.list_catalog().await, Ok(Vec::new()));
}

#[test]
fn test_invalid_base_url_is_configuration_error() {
    for url in ["not a url", "mailto:ops@example.com", "ftp://example.com/api"] {
        let result = HttpBackend::new(HttpBackendConfig::new().with_base_url(url));
        assert!(matches!(result, Err(Error::Configuration(_))), "{}", url);
    }
    assert!(HttpBackend::with_defaults().is_ok());
}

#[test]
fn test_clip_url() {
    let assets = HttpAssets::new(DEFAULT_BASE_URL).unwrap();
    let window = ClipWindow {
        start_seconds: 7.0,
        end_seconds: 17.0,
    };
    assert_eq!(
        assets.clip_url("OCR-Video.mp4", &window),
        "http://localhost:5000/api/video_segment?video_path=OCR-Video.mp4&start_time=7&end_time=17"
    );

    let window = ClipWindow::around(10.5, 5.0);
    assert_eq!(
        assets.clip_url("cam 1/feed.mp4", &window),
        "http://localhost:5000/api/video_segment?video_path=cam+1%2Ffeed.mp4&start_time=5.5&end_time=15.5"
    );
}

#[test]
fn test_clip_url_with_trailing_slash_base() {
    let assets = HttpAssets::new("http://assets.local:8080/api/").unwrap();
    let url = assets.clip_url("a.mp4", &ClipWindow::around(0.0, 5.0));
    assert!(url.starts_with("http://assets.local:8080/api/video_segment?"));
    assert!(url.ends_with("start_time=0&end_time=5"));
}

#[test]
fn test_screenshot_url() {
    let backend = HttpBackend::with_defaults().unwrap();
    let assets = backend.assets();

    assert_eq!(
        assets.screenshot_url("MSI123_CAM_01_10_5s.png").as_deref(),
        Some("http://localhost:5000/api/screenshot/MSI123_CAM_01_10_5s.png")
    );
    assert_eq!(
        assets.screenshot_url("shot 1.png").as_deref(),
        Some("http://localhost:5000/api/screenshot/shot%201.png")
    );
    assert!(assets.screenshot_url("").is_none());
    assert!(assets.screenshot_url("  ").is_none());
    assert!(assets.screenshot_url("../etc/passwd").is_none());
    assert!(assets.screenshot_url("a/b.png").is_none());
}
