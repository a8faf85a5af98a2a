//! Session History — per-user record of tailoring sessions.
//!
//! `AppState` holds an `Arc<dyn HistoryStore>` built once in `main`:
//! `PgHistoryStore` when `DATABASE_URL` is set, `InMemoryHistoryStore` otherwise.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use memory::InMemoryHistoryStore;
pub use postgres::PgHistoryStore;

pub const DEFAULT_LIST_LIMIT: usize = 20;

/// Length, in characters, of the JD preview stored with each session.
pub const JD_SNIPPET_CHARS: usize = 120;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// What the client asks to save. Result blobs are stored as given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSession {
    pub jd_text: String,
    #[serde(default)]
    pub bullets: Value,
    #[serde(default)]
    pub match_analysis: Value,
    #[serde(default)]
    pub ats_scores: Value,
    #[serde(default)]
    pub jd_keywords: Vec<String>,
}

/// A stored session as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub user_id: String,
    pub jd_text: String,
    pub jd_snippet: String,
    pub bullets: Value,
    pub match_analysis: Value,
    pub ats_scores: Value,
    pub jd_keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Session storage keyed by `(user_id, session_id)`. A user never sees
/// another user's sessions.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Stores the session and returns its new id.
    async fn save_session(&self, user_id: &str, session: NewSession)
        -> Result<String, HistoryError>;

    /// Most recent sessions first, at most `limit`.
    async fn list_sessions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<SessionRecord>, HistoryError>;

    async fn get_session(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<SessionRecord>, HistoryError>;

    /// Backend label for startup logs.
    fn backend(&self) -> &'static str;
}

/// First [`JD_SNIPPET_CHARS`] characters of the JD.
pub fn jd_snippet(jd_text: &str) -> String {
    jd_text.chars().take(JD_SNIPPET_CHARS).collect()
}

/// Null blobs are stored as their empty shape: `[]` for bullets, `{}` otherwise.
fn normalize_blobs(session: &mut NewSession) {
    if session.bullets.is_null() {
        session.bullets = Value::Array(Vec::new());
    }
    for blob in [&mut session.match_analysis, &mut session.ats_scores] {
        if blob.is_null() {
            *blob = Value::Object(Default::default());
        }
    }
}
