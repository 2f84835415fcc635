use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use punch_clock::{create_router, utils::ManualClock, TimerState, TimerStore};

struct Harness {
    app: Router,
    store: Arc<TimerStore>,
    clock: Arc<ManualClock>,
    _dir: TempDir,
}

impl Harness {
    fn new(now: i64) -> Self {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::new(now));
        let store = Arc::new(
            TimerStore::load_with_clock(dir.path().join("timer.json"), clock.clone()).unwrap(),
        );
        Self {
            app: create_router(store.clone()),
            store,
            clock,
            _dir: dir,
        }
    }

    async fn call(&self, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn timer(&self) -> Value {
        let (status, body) = self.call(Method::GET, "/api/timer", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    async fn post(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        self.call(Method::POST, uri, Body::from(body.to_string())).await
    }
}

#[tokio::test]
async fn start_stop_start_scenario() {
    let h = Harness::new(0);

    let (status, body) = h.post("/api/start", r#"{"offset_hours": 0}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "started"}));

    h.clock.set(65);
    assert_eq!(
        h.timer().await,
        json!({"is_running": true, "elapsed_seconds": 65, "elapsed_formatted": "01:05"})
    );

    let (_, body) = h.post("/api/stop", "").await;
    assert_eq!(body, json!({"status": "stopped"}));
    assert_eq!(
        h.timer().await,
        json!({"is_running": false, "elapsed_seconds": 65, "elapsed_formatted": "01:05"})
    );

    h.clock.set(100);
    h.post("/api/start", "").await;
    let state = h.store.snapshot().unwrap();
    assert_eq!(state.offset_seconds, 65);
    assert_eq!(state.start_time, 100);

    h.clock.set(110);
    assert_eq!(
        h.timer().await,
        json!({"is_running": true, "elapsed_seconds": 75, "elapsed_formatted": "01:15"})
    );
}

#[tokio::test]
async fn offset_hours_rebaselines() {
    let h = Harness::new(5_000);
    h.post("/api/start", "").await;
    h.clock.advance(300);
    h.post("/api/stop", "").await;

    let (_, body) = h.post("/api/start", r#"{"offset_hours": 2}"#).await;
    assert_eq!(body, json!({"status": "started"}));
    assert_eq!(
        h.timer().await,
        json!({"is_running": true, "elapsed_seconds": 7200, "elapsed_formatted": "2:00:00"})
    );
}

#[tokio::test]
async fn repeated_commands_report_noop() {
    let h = Harness::new(5_000);

    let (status, body) = h.post("/api/stop", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "already stopped"}));

    h.post("/api/start", "").await;
    h.clock.advance(10);
    let (status, body) = h.post("/api/start", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "already running"}));
    assert_eq!(h.store.snapshot().unwrap().start_time, 5_000);
}

#[tokio::test]
async fn reset_returns_to_zero() {
    let h = Harness::new(5_000);
    h.post("/api/start", r#"{"offset_hours": 1.5}"#).await;
    h.clock.advance(90);

    let (status, body) = h.post("/api/reset", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "reset"}));
    assert_eq!(
        h.timer().await,
        json!({"is_running": false, "elapsed_seconds": 0, "elapsed_formatted": "00:00"})
    );
    assert_eq!(h.store.snapshot().unwrap(), TimerState::new());
}

#[tokio::test]
async fn malformed_start_leaves_state_alone() {
    let h = Harness::new(5_000);

    for payload in [
        "{oops",
        r#"{"offset_hours": "soon"}"#,
        r#"{"offset_hours": -3}"#,
        r#"{"offset_hours": 1e16}"#,
    ] {
        let (status, body) = h.post("/api/start", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["kind"], "invalid_input");
    }

    assert_eq!(h.store.snapshot().unwrap(), TimerState::new());
    assert!(!h.store.path().exists());
}

#[tokio::test]
async fn null_start_body_means_no_offset() {
    let h = Harness::new(5_000);

    let (status, body) = h.post("/api/start", "null").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "started"}));
    assert_eq!(h.store.snapshot().unwrap().offset_seconds, 0);
}

#[tokio::test]
async fn persist_failure_is_server_error() {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::new(5_000));
    let store = Arc::new(
        TimerStore::load_with_clock(dir.path().join("gone").join("timer.json"), clock).unwrap(),
    );
    let app = create_router(store.clone());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/start")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["kind"], "persistence_failed");

    // No rollback
    assert!(store.snapshot().unwrap().is_running);
}

#[tokio::test]
async fn state_survives_reload() {
    let h = Harness::new(5_000);
    h.post("/api/start", r#"{"offset_hours": 0.5}"#).await;
    h.clock.advance(120);
    h.post("/api/stop", "").await;

    let reloaded = TimerStore::load_with_clock(h.store.path(), h.clock.clone()).unwrap();
    assert_eq!(reloaded.snapshot().unwrap(), h.store.snapshot().unwrap());
    assert_eq!(reloaded.elapsed().unwrap(), (false, 1800 + 120));
}

#[tokio::test]
async fn health_reports_ok() {
    let h = Harness::new(0);
    let (status, body) = h.call(Method::GET, "/health", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
