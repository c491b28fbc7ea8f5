//! Router-level tests driven through `tower::ServiceExt::oneshot`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{self, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chatrelay_ai::{AiClient, AiError, AiResponse, Message, Role, TokenUsage};
use chatrelay_config::schema::ServerConfig;
use tower::ServiceExt;

use super::*;

/// Answers every call with a fixed outcome and records what it was sent.
struct StubClient {
    reply: Box<dyn Fn() -> Result<String, AiError> + Send + Sync>,
    calls: AtomicUsize,
    last: Mutex<Vec<Message>>,
}

impl StubClient {
    fn replying(text: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Box::new(move || Ok(text.to_string())),
            calls: AtomicUsize::new(0),
            last: Mutex::new(Vec::new()),
        })
    }

    fn failing(make: fn() -> AiError) -> Arc<Self> {
        Arc::new(Self {
            reply: Box::new(move || Err(make())),
            calls: AtomicUsize::new(0),
            last: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AiClient for StubClient {
    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = messages.to_vec();
        (self.reply)().map(|content| AiResponse {
            content,
            usage: TokenUsage::default(),
        })
    }
}

fn router_with(client: Arc<StubClient>) -> Router {
    build_router(AppState::new(client), &ServerConfig::default())
}

fn post_json(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn chat_returns_result() {
    let client = StubClient::replying("Hi");
    let response = router_with(client.clone())
        .oneshot(post_json(
            "/api/chat",
            r#"{"conversation":[{"role":"user","text":"Hello"}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], br#"{"result":"Hi"}"#);
    assert_eq!(client.calls(), 1);

    let sent = client.last.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].role, Role::User);
    assert_eq!(sent[0].content, "Hello");
}

#[tokio::test]
async fn chat_forwards_whole_conversation_in_order() {
    let client = StubClient::replying("ok");
    let response = router_with(client.clone())
        .oneshot(post_json(
            "/api/chat",
            r#"{"conversation":[
                {"role":"user","text":"one"},
                {"role":"model","text":"two"},
                {"role":"user","content":"three"}
            ]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent = client.last.lock().unwrap().clone();
    let texts: Vec<&str> = sent.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(texts, ["one", "two", "three"]);
    assert_eq!(sent[1].role, Role::Model);
}

#[tokio::test]
async fn chat_prepends_system_prompt() {
    let client = StubClient::replying("ok");
    let state = AppState::new(client.clone()).with_system_prompt(Some("Be brief.".into()));
    let response = build_router(state, &ServerConfig::default())
        .oneshot(post_json(
            "/api/chat",
            r#"{"conversation":[{"role":"user","text":"Hello"}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent = client.last.lock().unwrap().clone();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].role, Role::System);
    assert_eq!(sent[0].content, "Be brief.");
}

#[tokio::test]
async fn chat_rejects_non_array_conversation() {
    let client = StubClient::replying("unused");
    let response = router_with(client.clone())
        .oneshot(post_json("/api/chat", r#"{"conversation":"hi"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid conversation format");
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn chat_rejects_missing_empty_and_malformed_bodies() {
    for body in [
        "{}",
        r#"{"conversation":[]}"#,
        r#"{"conversation":[{"role":"admin","text":"x"}]}"#,
        "not json",
    ] {
        let client = StubClient::replying("unused");
        let response = router_with(client.clone())
            .oneshot(post_json("/api/chat", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{body}");
        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid conversation format");
        assert_eq!(client.calls(), 0);
    }
}

#[tokio::test]
async fn chat_maps_rate_limit_to_429() {
    let client = StubClient::failing(|| AiError::RateLimited);
    let response = router_with(client.clone())
        .oneshot(post_json(
            "/api/chat",
            r#"{"conversation":[{"role":"user","text":"Hello"}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_json(response).await;
    assert_eq!(json["error"], RATE_LIMIT_MESSAGE);
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn chat_passes_upstream_message_through() {
    let client = StubClient::failing(|| AiError::ApiError("API key not valid".into()));
    let response = router_with(client)
        .oneshot(post_json(
            "/api/chat",
            r#"{"conversation":[{"role":"user","text":"Hello"}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "API key not valid");
}

#[tokio::test]
async fn chat_timeout_uses_fallback_message() {
    let client = StubClient::failing(|| AiError::Timeout);
    let response = router_with(client)
        .oneshot(post_json(
            "/api/chat",
            r#"{"conversation":[{"role":"user","text":"Hello"}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], INTERNAL_ERROR_MESSAGE);
}

#[tokio::test]
async fn render_endpoint_returns_escaped_html() {
    let response = router_with(StubClient::replying("unused"))
        .oneshot(post_json(
            "/api/render",
            r##"{"text":"# Title\n* **a** <b>"}"##,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["html"],
        "<h1>Title</h1><ul><li><strong>a</strong> &lt;b&gt;</li></ul>"
    );
}

#[tokio::test]
async fn render_endpoint_rejects_malformed_body_with_json_error() {
    for body in [r#"{"txt":"x"}"#, "not json", r#"{"text":42}"#] {
        let response = router_with(StubClient::replying("unused"))
            .oneshot(post_json("/api/render", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid render request", "{body}");
    }
}

#[tokio::test]
async fn healthz_is_ok() {
    let response = router_with(StubClient::replying("unused"))
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn unknown_paths_fall_back_to_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>chat page</h1>").unwrap();
    let config = ServerConfig {
        static_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let router = build_router(AppState::new(StubClient::replying("unused")), &config);

    let response = router
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<h1>chat page</h1>");

    let response = router
        .oneshot(Request::get("/missing.js").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_headers_present_when_enabled() {
    let response = router_with(StubClient::replying("unused"))
        .oneshot(
            Request::get("/healthz")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn cors_headers_absent_when_disabled() {
    let config = ServerConfig {
        cors: false,
        ..Default::default()
    };
    let response = build_router(AppState::new(StubClient::replying("unused")), &config)
        .oneshot(
            Request::get("/healthz")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(!response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
