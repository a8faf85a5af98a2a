// LLM engines: each is a prompt pair plus one chat-completion call.
// All calls go through llm_client; a reply that fails to decode becomes the engine's
// fallback payload with the raw text attached, never an HTTP error.

pub mod assessment;
pub mod bullets;
pub mod interview;
pub mod prompts;
pub mod rewrite;
pub mod roadmap;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::AppError;
use crate::llm_client::{ChatOptions, LlmClient, LlmOutcome};

pub const FALLBACK_ERROR: &str = "Failed to parse LLM response";

/// Payload an engine reports when the model reply could not be decoded.
pub trait FallbackPayload {
    fn fallback() -> Self;
}

/// What handlers send back: the payload fields, plus `error` and `raw_response`
/// when the payload is a fallback.
#[derive(Debug, Clone, Serialize)]
pub struct EngineReply<T> {
    #[serde(flatten)]
    pub payload: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl<T> EngineReply<T> {
    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

impl<T: FallbackPayload> From<LlmOutcome<T>> for EngineReply<T> {
    fn from(outcome: LlmOutcome<T>) -> Self {
        match outcome {
            Ok(payload) => Self {
                payload,
                error: None,
                raw_response: None,
            },
            Err(fallback) => Self {
                payload: T::fallback(),
                error: Some(FALLBACK_ERROR.to_string()),
                raw_response: Some(fallback.raw),
            },
        }
    }
}

/// Sends one prompt pair and folds the outcome into an [`EngineReply`].
/// Only a failed call (transport, provider status) is an error.
async fn run_engine<T>(
    llm: &LlmClient,
    engine: &str,
    system: &str,
    prompt: &str,
    options: ChatOptions,
) -> Result<EngineReply<T>, AppError>
where
    T: DeserializeOwned + FallbackPayload,
{
    let outcome = llm
        .call_json::<T>(system, prompt, options)
        .await
        .map_err(|e| AppError::Llm(format!("{engine} engine failed: {e}")))?;

    let reply = EngineReply::from(outcome);
    if reply.is_fallback() {
        tracing::warn!("{engine} engine fell back to default payload");
    }
    Ok(reply)
}
