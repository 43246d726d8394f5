//! End-to-end tests against a real listener.
//!
//! Each test binds the server on an ephemeral port and talks to it over TCP,
//! so routing, middleware and serialization are exercised exactly as a client
//! sees them.
//!
//! Run with: cargo test --test http_tests
use std::net::SocketAddr;
use std::time::Duration;

use axum_server::Handle;
use konvo::{create_router, http, AppConfig, AppState};
use reqwest::StatusCode;

/// A running server that is shut down when dropped.
struct TestServer {
    addr: SocketAddr,
    handle: Handle,
}

impl TestServer {
    async fn start(config: AppConfig) -> Self {
        let app = create_router(AppState::new(config));
        let handle = Handle::new();
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();

        tokio::spawn(http::serve(app, addr, handle.clone()));
        let addr = handle.listening().await.expect("server failed to bind");

        Self { addr, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        http::trigger_shutdown(&self.handle, Duration::from_secs(1));
    }
}

#[tokio::test]
async fn health_over_tcp() {
    let server = TestServer::start(AppConfig::default()).await;

    let response = reqwest::get(server.url("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.text().await.unwrap(), r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn ping_over_tcp() {
    let server = TestServer::start(AppConfig::default()).await;

    let body: serde_json::Value = reqwest::get(server.url("/api/ping"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, serde_json::json!({"message": "pong"}));
}

#[tokio::test]
async fn concurrent_requests_get_identical_payloads() {
    let server = TestServer::start(AppConfig::default()).await;
    let client = reqwest::Client::new();

    let mut tasks = Vec::new();
    for i in 0..32 {
        let client = client.clone();
        let path = if i % 2 == 0 { "/health" } else { "/api/ping" };
        let url = server.url(path);
        tasks.push(tokio::spawn(async move {
            let body = client.get(url).send().await.unwrap().text().await.unwrap();
            (path, body)
        }));
    }

    for task in tasks {
        let (path, body) = task.await.unwrap();
        let expected = if path == "/health" {
            r#"{"status":"ok"}"#
        } else {
            r#"{"message":"pong"}"#
        };
        assert_eq!(body, expected);
    }
}

#[tokio::test]
async fn unknown_path_and_wrong_method() {
    let server = TestServer::start(AppConfig::default()).await;
    let client = reqwest::Client::new();

    let response = client.get(server.url("/unknown")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), r#"{"detail":"Not Found"}"#);

    let response = client.post(server.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        response.text().await.unwrap(),
        r#"{"detail":"Method Not Allowed"}"#
    );
}

#[tokio::test]
async fn openapi_reflects_configured_title() {
    let config = AppConfig::from_toml("[service]\ntitle = \"konvo test\"\n").unwrap();
    let server = TestServer::start(config).await;

    let doc: serde_json::Value = reqwest::get(server.url("/openapi.json"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(doc["info"]["title"], "konvo test");
    assert_eq!(doc["info"]["version"], env!("CARGO_PKG_VERSION"));
}
