use std::sync::Arc;

use crate::config::Config;
use crate::history::HistoryStore;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Postgres-backed when `DATABASE_URL` is set, in-memory otherwise.
    pub history: Arc<dyn HistoryStore>,
    pub config: Config,
}
