use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::history::{NewSession, SessionRecord, DEFAULT_LIST_LIMIT};
use crate::routes::Success;
use crate::state::AppState;

fn require_user(user_id: &str) -> Result<(), AppError> {
    if user_id.trim().is_empty() {
        return Err(AppError::Validation("user_id is required".to_string()));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct SaveSessionRequest {
    pub user_id: String,
    #[serde(flatten)]
    pub session: NewSession,
}

#[derive(Debug, Serialize)]
pub struct SaveSessionResponse {
    pub session_id: String,
}

/// POST /api/history
pub async fn handle_save_session(
    State(state): State<AppState>,
    Json(req): Json<SaveSessionRequest>,
) -> Result<Json<Success<SaveSessionResponse>>, AppError> {
    require_user(&req.user_id)?;

    let session_id = state.history.save_session(&req.user_id, req.session).await?;
    info!("Saved session {session_id} for user {}", req.user_id);

    Ok(Json(Success::new(SaveSessionResponse { session_id })))
}

#[derive(Debug, Deserialize)]
pub struct ListSessionsQuery {
    pub user_id: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionRecord>,
    pub count: usize,
}

/// GET /api/history?user_id=...&limit=...
pub async fn handle_list_sessions(
    State(state): State<AppState>,
    Query(params): Query<ListSessionsQuery>,
) -> Result<Json<Success<SessionListResponse>>, AppError> {
    require_user(&params.user_id)?;

    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let sessions = state.history.list_sessions(&params.user_id, limit).await?;

    Ok(Json(Success::new(SessionListResponse {
        count: sessions.len(),
        sessions,
    })))
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: SessionRecord,
}

/// GET /api/history/:session_id?user_id=...
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Success<SessionResponse>>, AppError> {
    require_user(&params.user_id)?;

    let session = state
        .history
        .get_session(&params.user_id, &session_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

    Ok(Json(Success::new(SessionResponse { session })))
}
