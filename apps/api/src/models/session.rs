use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::history::SessionRecord;

#[derive(Debug, Clone, FromRow)]
pub struct HistorySessionRow {
    pub id: Uuid,
    pub user_id: String,
    pub jd_text: String,
    pub jd_snippet: String,
    pub bullets: Value,
    pub match_analysis: Value,
    pub ats_scores: Value,
    pub jd_keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<HistorySessionRow> for SessionRecord {
    fn from(row: HistorySessionRow) -> Self {
        Self {
            id: row.id.to_string(),
            user_id: row.user_id,
            jd_text: row.jd_text,
            jd_snippet: row.jd_snippet,
            bullets: row.bullets,
            match_analysis: row.match_analysis,
            ats_scores: row.ats_scores,
            jd_keywords: row.jd_keywords,
            created_at: row.created_at,
        }
    }
}
