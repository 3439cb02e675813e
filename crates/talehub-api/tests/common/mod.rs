//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use talehub_api::config::AppConfig;
use talehub_api::state::AppState;
use talehub_test_support::{FixedClock, MemoryBlobStore, MemoryDocumentStore, SequenceRng};

/// Cookie attached to every helper request. The guard only checks
/// presence, so any non-empty value passes.
pub const ACCESS_COOKIE: &str = "talehub-access-token=integration-test-token";

const MULTIPART_BOUNDARY: &str = "integration-boundary";

fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: "postgres://unused".into(),
        public_base_url: "http://localhost:3000".into(),
        access_token_cookie: "talehub-access-token".into(),
    }
}

/// Build the full app router over in-memory stores and a fixed clock.
/// Uses the same route structure as `main.rs`.
pub fn build_test_app() -> Router {
    let documents = Arc::new(MemoryDocumentStore::new());
    let blobs = Arc::new(MemoryBlobStore::new("http://localhost:3000"));
    let clock = Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ));
    let rng = Arc::new(Mutex::new(SequenceRng::new(vec![])));
    let app_state = AppState::new(documents, blobs, clock, rng, test_config());

    talehub_api::app(app_state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, ACCESS_COOKIE)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header(header::COOKIE, ACCESS_COOKIE)
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .header(header::COOKIE, ACCESS_COOKIE)
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a bodyless POST request and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, ACCESS_COOKIE)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send the story creation form as `multipart/form-data`.
pub async fn post_story_form(
    app: Router,
    uri: &str,
    title: &str,
    plot: &str,
    image: &[u8],
) -> (StatusCode, serde_json::Value) {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\ncontent-disposition: form-data; name=\"title\"\r\n\r\n{title}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\ncontent-disposition: form-data; name=\"plot\"\r\n\r\n{plot}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\ncontent-disposition: form-data; name=\"image\"; filename=\"cover.png\"\r\ncontent-type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(image);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .header(header::COOKIE, ACCESS_COOKIE)
        .body(Body::from(body))
        .unwrap();

    send(app, request).await
}

/// Sign up a user and return the uid.
pub async fn sign_up(app: Router, name: &str, username: &str, email: &str) -> String {
    let (status, json) = post_json(
        app,
        "/api/v1/auth/sign-up",
        &serde_json::json!({
            "name": name,
            "username": username,
            "email": email,
            "password": "correct horse",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["uid"].as_str().unwrap().to_owned()
}
