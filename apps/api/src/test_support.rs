// Test helpers shared across modules.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::config::Config;
use crate::history::InMemoryHistoryStore;
use crate::llm_client::LlmClient;
use crate::state::AppState;

/// Starts a local chat-completions endpoint that always answers with `content`
/// and returns a client pointed at it.
pub async fn mock_llm(content: &str) -> LlmClient {
    let reply = json!({
        "choices": [{"message": {"role": "assistant", "content": content}}],
        "usage": {"prompt_tokens": 1, "completion_tokens": 1}
    });

    let app = Router::new()
        .route(
            "/chat/completions",
            post(|State(reply): State<Value>| async move { Json(reply) }),
        )
        .with_state(reply);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    LlmClient::new("test-key".to_string(), &format!("http://{addr}"), "test-model".to_string())
        .unwrap()
}

/// A client whose endpoint refuses connections, for paths that must not call the LLM.
pub fn offline_llm() -> LlmClient {
    LlmClient::new("test-key".to_string(), "http://127.0.0.1:9", "test-model".to_string()).unwrap()
}

/// Router over an in-memory history store and the given LLM client.
pub fn test_app(llm: LlmClient) -> Router {
    crate::routes::build_router(test_state(llm))
}

pub fn test_state(llm: LlmClient) -> AppState {
    AppState {
        llm,
        history: Arc::new(InMemoryHistoryStore::new()),
        config: Config::for_tests(),
    }
}

/// Sends `request` through `app` and returns the status and decoded JSON body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub const MULTIPART_BOUNDARY: &str = "cyrus-test-boundary";

/// A multipart/form-data request with one file part.
pub fn post_file(uri: &str, field: &str, filename: &str, data: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{MULTIPART_BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: application/pdf\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    Request::post(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
