/// LLM Client — the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: engines never talk to the provider directly.
/// Speaks the OpenAI-compatible `/chat/completions` protocol (Groq by default),
/// so the provider is swapped with `LLM_BASE_URL` / `LLM_MODEL` alone.
use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod fallback;
pub mod prompts;

pub use fallback::{decode_json, LlmOutcome};

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const RETRY_BASE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned no choices")]
    EmptyContent,
}

/// Sampling settings for one call. Each engine picks its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl LlmResponse {
    /// Text of the first choice. `None` when the provider returned no choices.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|c| c.message.content.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completion client with retry and structured-output helpers.
/// Built once at startup and shared through `AppState`.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    retry_delay: Duration,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: &str, model: String) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model,
            retry_delay: RETRY_BASE_DELAY,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    #[cfg(test)]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Makes a raw chat-completion call, returning the full response object.
    /// Retries on transport errors, 429 and 5xx with exponential backoff.
    pub async fn call(
        &self,
        system: &str,
        prompt: &str,
        options: ChatOptions,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 1x, 2x the base delay
                let delay = self.retry_delay * (1 << (attempt - 1));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: LlmResponse = response.json().await?;

            if let Some(usage) = &llm_response.usage {
                debug!(
                    "LLM call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                    self.model, usage.prompt_tokens, usage.completion_tokens
                );
            }

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Calls the LLM and decodes the reply as `T`.
    ///
    /// The outer `Err` is a failed call. A reply that arrives but does not decode
    /// comes back as `Ok(Err(RawFallback))` carrying the untouched text.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        system: &str,
        prompt: &str,
        options: ChatOptions,
    ) -> Result<LlmOutcome<T>, LlmError> {
        let response = self.call(system, prompt, options).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;

        let outcome = decode_json(text);
        if let Err(fallback) = &outcome {
            warn!("LLM reply did not decode: {}", fallback.kind);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::llm_client::fallback::FallbackKind;

    const OPTS: ChatOptions = ChatOptions {
        temperature: 0.2,
        max_tokens: 100,
    };

    #[derive(Debug, Deserialize, PartialEq)]
    struct Answer {
        answer: String,
    }

    fn completion(content: &str) -> Value {
        json!({
            "choices": [{"message": {"role": "assistant", "content": content}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 5}
        })
    }

    /// Serves `/chat/completions`; the first `failures` calls answer `fail_status`.
    async fn spawn_provider(
        failures: usize,
        fail_status: StatusCode,
        reply: Value,
    ) -> (SocketAddr, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = (hits.clone(), failures, fail_status, reply);

        let app = Router::new()
            .route(
                "/chat/completions",
                post(
                    |State((hits, failures, fail_status, reply)): State<(
                        Arc<AtomicUsize>,
                        usize,
                        StatusCode,
                        Value,
                    )>,
                     headers: HeaderMap,
                     Json(body): Json<Value>| async move {
                        let n = hits.fetch_add(1, Ordering::SeqCst);
                        assert_eq!(
                            headers.get("authorization").and_then(|v| v.to_str().ok()),
                            Some("Bearer test-key")
                        );
                        assert_eq!(body["messages"][0]["role"], "system");
                        assert_eq!(body["response_format"]["type"], "json_object");
                        if n < failures {
                            (fail_status, Json(json!({"error": {"message": "nope"}})))
                        } else {
                            (StatusCode::OK, Json(reply))
                        }
                    },
                ),
            )
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (addr, hits)
    }

    fn client_for(addr: SocketAddr) -> LlmClient {
        LlmClient::new(
            "test-key".to_string(),
            &format!("http://{addr}/"),
            "test-model".to_string(),
        )
        .unwrap()
        .with_retry_delay(Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_call_json_decodes_reply() {
        let (addr, hits) =
            spawn_provider(0, StatusCode::OK, completion(r#"{"answer": "42"}"#)).await;
        let outcome = client_for(addr)
            .call_json::<Answer>("sys", "prompt", OPTS)
            .await
            .unwrap();

        assert_eq!(
            outcome.unwrap(),
            Answer {
                answer: "42".to_string()
            }
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_call_json_keeps_raw_text_on_malformed_reply() {
        let (addr, _) =
            spawn_provider(0, StatusCode::OK, completion("Sure! Here you go: answer=42")).await;
        let outcome = client_for(addr)
            .call_json::<Answer>("sys", "prompt", OPTS)
            .await
            .unwrap();

        let fallback = outcome.unwrap_err();
        assert_eq!(fallback.raw, "Sure! Here you go: answer=42");
        assert!(matches!(fallback.kind, FallbackKind::Malformed(_)));
    }

    #[tokio::test]
    async fn test_retries_server_errors_then_succeeds() {
        let (addr, hits) = spawn_provider(
            2,
            StatusCode::SERVICE_UNAVAILABLE,
            completion(r#"{"answer": "ok"}"#),
        )
        .await;
        let outcome = client_for(addr)
            .call_json::<Answer>("sys", "prompt", OPTS)
            .await
            .unwrap();

        assert!(outcome.is_ok());
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let (addr, hits) =
            spawn_provider(10, StatusCode::TOO_MANY_REQUESTS, completion("{}")).await;
        let err = client_for(addr)
            .call("sys", "prompt", OPTS)
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Api { status: 429, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), MAX_RETRIES as usize);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let (addr, hits) = spawn_provider(10, StatusCode::UNAUTHORIZED, completion("{}")).await;
        let err = client_for(addr)
            .call("sys", "prompt", OPTS)
            .await
            .unwrap_err();

        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "nope");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_choices_is_an_error() {
        let (addr, _) = spawn_provider(0, StatusCode::OK, json!({"choices": []})).await;
        let err = client_for(addr)
            .call_json::<Answer>("sys", "prompt", OPTS)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let client =
            LlmClient::new("k".into(), "https://api.groq.com/openai/v1/", "m".into()).unwrap();
        assert_eq!(
            client.endpoint,
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }
}
