pub mod health;
pub mod history;
pub mod resume;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::state::AppState;

/// Headroom above the upload limit for multipart framing and headers.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// `{"status": "success", ...fields}`, the envelope every successful handler returns.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    status: &'static str,
    #[serde(flatten)]
    body: T,
}

impl<T> Success<T> {
    pub fn new(body: T) -> Self {
        Self {
            status: "success",
            body,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes() + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(health::health_handler))
        .route("/health", get(health::health_handler))
        // Resume agent
        .route("/api/upload-resume", post(resume::handle_upload_resume))
        .route("/api/analyze-jd", post(resume::handle_analyze_jd))
        .route("/api/generate-bullets", post(resume::handle_generate_bullets))
        .route("/api/rewrite-bullet", post(resume::handle_rewrite_bullet))
        // Preparation tools
        .route("/api/interview-prep", post(resume::handle_interview_prep))
        .route("/api/assessment-prep", post(resume::handle_assessment_prep))
        .route("/api/career-roadmap", post(resume::handle_career_roadmap))
        // Session history
        .route(
            "/api/history",
            get(history::handle_list_sessions).post(history::handle_save_session),
        )
        .route("/api/history/:session_id", get(history::handle_get_session))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
