use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const CREATE_HISTORY_SESSIONS: &str = r#"
CREATE TABLE IF NOT EXISTS history_sessions (
    id              UUID PRIMARY KEY,
    user_id         TEXT NOT NULL,
    jd_text         TEXT NOT NULL,
    jd_snippet      TEXT NOT NULL,
    bullets         JSONB NOT NULL DEFAULT '[]'::jsonb,
    match_analysis  JSONB NOT NULL DEFAULT '{}'::jsonb,
    ats_scores      JSONB NOT NULL DEFAULT '{}'::jsonb,
    jd_keywords     TEXT[] NOT NULL DEFAULT '{}',
    created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_HISTORY_USER_INDEX: &str = "CREATE INDEX IF NOT EXISTS history_sessions_user_created_idx \
     ON history_sessions (user_id, created_at DESC)";

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the history table and its lookup index if they are missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(CREATE_HISTORY_SESSIONS).execute(pool).await?;
    sqlx::query(CREATE_HISTORY_USER_INDEX).execute(pool).await?;
    info!("history_sessions schema ready");
    Ok(())
}
