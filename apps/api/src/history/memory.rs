use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{jd_snippet, normalize_blobs, HistoryError, HistoryStore, NewSession, SessionRecord};

/// Process-local store. Sessions live until the process exits.
#[derive(Default)]
pub struct InMemoryHistoryStore {
    // user_id → sessions in insertion (chronological) order
    sessions: RwLock<HashMap<String, Vec<SessionRecord>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn save_session(
        &self,
        user_id: &str,
        mut session: NewSession,
    ) -> Result<String, HistoryError> {
        normalize_blobs(&mut session);
        let id = Uuid::new_v4().to_string();

        let record = SessionRecord {
            id: id.clone(),
            user_id: user_id.to_string(),
            jd_snippet: jd_snippet(&session.jd_text),
            jd_text: session.jd_text,
            bullets: session.bullets,
            match_analysis: session.match_analysis,
            ats_scores: session.ats_scores,
            jd_keywords: session.jd_keywords,
            created_at: Utc::now(),
        };

        self.sessions
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .push(record);

        Ok(id)
    }

    async fn list_sessions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<SessionRecord>, HistoryError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(user_id)
            .map(|list| list.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn get_session(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<SessionRecord>, HistoryError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(user_id)
            .and_then(|list| list.iter().find(|s| s.id == session_id))
            .cloned())
    }

    fn backend(&self) -> &'static str {
        "in-memory"
    }
}
