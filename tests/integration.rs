//! Integration tests for the connection-details endpoint
//!
//! These drive the full axum router in-process.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use roomgate::auth::{grants, verify_token, ApiSecret, Claims};
use roomgate::config::{IssuanceOptions, LiveKitConfig};
use roomgate::server::{create_router, AppState};
use serde_json::{json, Value};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

const TEST_KEY: &str = "APIintegration";
const TEST_SECRET: &str = "test-secret-for-integration-tests";
const SERVER_URL: &str = "wss://demo.livekit.example";

fn full_config() -> LiveKitConfig {
    LiveKitConfig {
        api_key: Some(TEST_KEY.to_string()),
        api_secret: Some(ApiSecret::new(TEST_SECRET)),
        ws_url: Some(SERVER_URL.to_string()),
        url: None,
    }
}

fn decode(token: &Value) -> Claims {
    verify_token(TEST_KEY, &ApiSecret::new(TEST_SECRET), token.as_str().unwrap())
        .expect("token should verify")
}

fn app(config: LiveKitConfig) -> Router {
    create_router(AppState::new(config, IssuanceOptions::default()))
}

async fn post(app: Router, path: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    post(app, "/connection-details", body.to_string()).await
}

#[tokio::test]
async fn test_issue_connection_details() {
    let (status, body) = post_json(
        app(full_config()),
        json!({ "room": "demo-room", "identity": "user-abc" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["serverUrl"], SERVER_URL);

    let claims = decode(&body["token"]);
    assert_eq!(claims.sub, "user-abc");
    assert_eq!(claims.iss, TEST_KEY);
    assert_eq!(claims.video.room, "demo-room");
    assert!(grants::is_full_access(&claims.video));
}

#[tokio::test]
async fn test_legacy_api_path() {
    let (status, body) = post(
        app(full_config()),
        "/api/connection-details",
        json!({ "room": "demo-room", "identity": "user-abc" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["serverUrl"], SERVER_URL);
}

#[tokio::test]
async fn test_invalid_json_body() {
    let (status, body) = post(app(full_config()), "/connection-details", "{room: nope").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid JSON body" }));
}

#[tokio::test]
async fn test_empty_object_is_missing_fields() {
    let (status, body) = post_json(app(full_config()), json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "room and identity are required" }));
}

#[tokio::test]
async fn test_null_and_empty_bodies_are_missing_fields() {
    for raw in ["null", "", "\"just a string\"", "[1,2,3]"] {
        let (status, body) = post(app(full_config()), "/connection-details", raw).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {:?}", raw);
        assert_eq!(body, json!({ "error": "room and identity are required" }));
    }
}

#[tokio::test]
async fn test_empty_room() {
    let (status, body) = post_json(
        app(full_config()),
        json!({ "room": "", "identity": "user-abc" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "room and identity are required" }));
}

#[tokio::test]
async fn test_whitespace_identity() {
    let (status, body) = post_json(
        app(full_config()),
        json!({ "room": "demo-room", "identity": "   " }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "room and identity are required" }));
}

#[tokio::test]
async fn test_missing_secret_is_server_error() {
    let mut config = full_config();
    config.api_secret = None;

    let (status, body) = post_json(
        app(config),
        json!({ "room": "demo-room", "identity": "user-abc" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("LIVEKIT_API_SECRET"));
    assert!(message.to_lowercase().contains("missing required env var"));
}

#[tokio::test]
async fn test_missing_key_is_server_error() {
    let mut config = full_config();
    config.api_key = None;

    let (status, body) = post_json(
        app(config),
        json!({ "room": "demo-room", "identity": "user-abc" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Missing required env var: LIVEKIT_API_KEY");
}

#[tokio::test]
async fn test_missing_server_url_is_server_error() {
    let mut config = full_config();
    config.ws_url = None;

    let (status, body) = post_json(
        app(config),
        json!({ "room": "demo-room", "identity": "user-abc" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Missing LIVEKIT_WS_URL (preferred) or LIVEKIT_URL");
}

#[tokio::test]
async fn test_error_body_never_leaks_secret() {
    let mut config = full_config();
    config.ws_url = None;

    let (_, body) = post_json(
        app(config),
        json!({ "room": "demo-room", "identity": "user-abc" }),
    )
    .await;

    assert!(!body.to_string().contains(TEST_SECRET));
    assert_eq!(body.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn test_repeat_requests_issue_equivalent_tokens() {
    let request = json!({ "room": "demo-room", "identity": "user-abc" });
    let router = app(full_config());

    let (_, first) = post_json(router.clone(), request.clone()).await;
    let (_, second) = post_json(router, request).await;

    assert_eq!(first["serverUrl"], second["serverUrl"]);

    let (a, b) = (decode(&first["token"]), decode(&second["token"]));
    assert_eq!(a.sub, b.sub);
    assert_eq!(grants::describe(&a.video), grants::describe(&b.video));
}

#[tokio::test]
async fn test_configured_ttl_applies() {
    let state = AppState::new(
        full_config(),
        IssuanceOptions::new().ttl(Duration::from_secs(300)),
    );

    let (status, body) = post_json(
        create_router(state),
        json!({ "room": "demo-room", "identity": "user-abc" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let claims = decode(&body["token"]);
    assert_eq!(claims.exp - claims.nbf, 300);
}

#[tokio::test]
async fn test_concurrent_issuance() {
    let router = app(full_config());

    let mut handles = vec![];
    for i in 0..50 {
        let router = router.clone();
        handles.push(tokio::spawn(async move {
            post_json(
                router,
                json!({ "room": format!("room-{}", i % 5), "identity": format!("user-{}", i) }),
            )
            .await
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);

        let claims = decode(&body["token"]);
        assert_eq!(claims.sub, format!("user-{}", i));
        assert_eq!(claims.video.room, format!("room-{}", i % 5));
    }
}

#[tokio::test]
async fn test_health() {
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let resp = app(LiveKitConfig::default()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}

/// Log sink shared between the subscriber and the test
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_logs_never_contain_token_or_secret() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let request = json!({ "room": "demo-room", "identity": "user-abc" });

    let (status, body) = post_json(app(full_config()), request.clone()).await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let mut no_url = full_config();
    no_url.ws_url = None;
    let (status, _) = post_json(app(no_url), request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let output = logs.contents();
    assert!(output.contains("Issued connection details"));
    assert!(output.contains("connection-details error"));
    assert!(!output.contains(&token));
    assert!(!output.contains(TEST_SECRET));
}
