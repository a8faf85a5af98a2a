use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{jd_snippet, normalize_blobs, HistoryError, HistoryStore, NewSession, SessionRecord};
use crate::models::session::HistorySessionRow;

/// Sessions in the `history_sessions` table (see `db::ensure_schema`).
pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn save_session(
        &self,
        user_id: &str,
        mut session: NewSession,
    ) -> Result<String, HistoryError> {
        normalize_blobs(&mut session);
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO history_sessions
                (id, user_id, jd_text, jd_snippet, bullets, match_analysis, ats_scores, jd_keywords)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&session.jd_text)
        .bind(jd_snippet(&session.jd_text))
        .bind(&session.bullets)
        .bind(&session.match_analysis)
        .bind(&session.ats_scores)
        .bind(&session.jd_keywords)
        .execute(&self.pool)
        .await?;

        Ok(id.to_string())
    }

    async fn list_sessions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<SessionRecord>, HistoryError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, HistorySessionRow>(
            r#"
            SELECT * FROM history_sessions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SessionRecord::from).collect())
    }

    async fn get_session(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<SessionRecord>, HistoryError> {
        // Ids are always UUIDs; anything else cannot exist.
        let Ok(id) = Uuid::parse_str(session_id) else {
            return Ok(None);
        };

        let row: Option<HistorySessionRow> =
            sqlx::query_as("SELECT * FROM history_sessions WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(SessionRecord::from))
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
