//! JSON-or-fallback decoding of model replies.
//!
//! A reply that arrives but cannot be decoded is never dropped: the caller gets
//! a [`RawFallback`] carrying the untouched text and why decoding failed.

use std::fmt;

use serde::de::DeserializeOwned;

/// Structured payload on success, raw reply on failure.
pub type LlmOutcome<T> = Result<T, RawFallback>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackKind {
    /// The model answered with nothing but whitespace.
    Empty,
    /// The text was not valid JSON for the expected shape.
    Malformed(String),
}

impl fmt::Display for FallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackKind::Empty => f.write_str("empty reply"),
            FallbackKind::Malformed(reason) => write!(f, "malformed JSON: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFallback {
    pub kind: FallbackKind,
    pub raw: String,
}

/// Decodes `raw` as `T`, tolerating markdown code fences around the JSON.
pub fn decode_json<T: DeserializeOwned>(raw: &str) -> LlmOutcome<T> {
    let body = strip_json_fences(raw);
    if body.is_empty() {
        return Err(RawFallback {
            kind: FallbackKind::Empty,
            raw: raw.to_string(),
        });
    }

    serde_json::from_str(body).map_err(|e| RawFallback {
        kind: FallbackKind::Malformed(e.to_string()),
        raw: raw.to_string(),
    })
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
