use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ats::{calculate_ats_score, extract_jd_keywords, AtsScoreResult};
use crate::engines::assessment::{generate_assessment_prep, AssessmentPrep};
use crate::engines::bullets::{generate_bullets, BulletSuggestions};
use crate::engines::interview::{generate_interview_prep, InterviewPrep, ProjectBrief};
use crate::engines::rewrite::{rewrite_bullet, RewriteRequest, RewriteResult};
use crate::engines::roadmap::{generate_career_roadmap, CareerRoadmap};
use crate::engines::EngineReply;
use crate::errors::AppError;
use crate::parser::{parse_resume, ParsedResume};
use crate::routes::Success;
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";
const EMPTY_JD: &str = "Job description text cannot be empty.";

fn require_text(value: &str, message: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}

// ─── Upload ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub parsed_resume: ParsedResume,
}

/// POST /api/upload-resume
/// Multipart upload of a single PDF in the `file` field.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Success<UploadResponse>>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if !filename.to_lowercase().ends_with(".pdf") {
            return Err(AppError::Validation("Only PDF files are accepted.".to_string()));
        }
        upload = Some((filename, field.bytes().await?));
        break;
    }

    let (filename, data) = upload.ok_or_else(|| {
        AppError::Validation(format!("A PDF file is required in the '{UPLOAD_FIELD}' field."))
    })?;

    if data.len() > state.config.max_upload_bytes() {
        return Err(AppError::Validation(format!(
            "File size exceeds {}MB limit.",
            state.config.max_upload_mb
        )));
    }

    // pdf-extract is CPU-bound and synchronous
    let parsed = tokio::task::spawn_blocking(move || parse_resume(&data))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Resume parser task failed: {e}")))??;

    info!(
        "Parsed {filename}: {} pages, {} words, sections [{}]",
        parsed.page_count,
        parsed.word_count,
        parsed.sections.headings().collect::<Vec<_>>().join(", ")
    );

    Ok(Json(Success::new(UploadResponse {
        filename,
        parsed_resume: parsed,
    })))
}

// ─── JD analysis and bullets ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeJdRequest {
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeJdResponse {
    pub keywords: Vec<String>,
    pub keyword_count: usize,
}

/// POST /api/analyze-jd
pub async fn handle_analyze_jd(
    Json(req): Json<AnalyzeJdRequest>,
) -> Result<Json<Success<AnalyzeJdResponse>>, AppError> {
    require_text(&req.jd_text, EMPTY_JD)?;

    let keywords = extract_jd_keywords(&req.jd_text);
    Ok(Json(Success::new(AnalyzeJdResponse {
        keyword_count: keywords.len(),
        keywords,
    })))
}

#[derive(Debug, Deserialize)]
pub struct GenerateBulletsRequest {
    #[serde(default)]
    pub parsed_resume: ParsedResume,
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateBulletsResponse {
    #[serde(flatten)]
    pub suggestions: EngineReply<BulletSuggestions>,
    pub ats_scores: AtsScoreResult,
    pub jd_keywords: Vec<String>,
}

/// POST /api/generate-bullets
/// JD keywords → three tailored bullets → before/after ATS scores.
pub async fn handle_generate_bullets(
    State(state): State<AppState>,
    Json(req): Json<GenerateBulletsRequest>,
) -> Result<Json<Success<GenerateBulletsResponse>>, AppError> {
    require_text(&req.jd_text, EMPTY_JD)?;
    require_text(
        &req.parsed_resume.raw_text,
        "Parsed resume is empty. Upload a resume first.",
    )?;

    let jd_keywords = extract_jd_keywords(&req.jd_text);
    let suggestions = generate_bullets(&state.llm, &req.parsed_resume, &req.jd_text).await?;

    let rewritten = suggestions.payload.rewritten_texts();
    let ats_scores = calculate_ats_score(
        &req.parsed_resume.raw_text,
        &jd_keywords,
        Some(rewritten.as_slice()),
    );

    info!(
        "Bullets generated: {} keywords, ATS {} → {}",
        jd_keywords.len(),
        ats_scores.before_score,
        ats_scores.after_score
    );

    Ok(Json(Success::new(GenerateBulletsResponse {
        suggestions,
        ats_scores,
        jd_keywords,
    })))
}

/// POST /api/rewrite-bullet
pub async fn handle_rewrite_bullet(
    State(state): State<AppState>,
    Json(req): Json<RewriteRequest>,
) -> Result<Json<Success<EngineReply<RewriteResult>>>, AppError> {
    require_text(&req.master_resume_text, "Master resume text cannot be empty.")?;
    require_text(&req.target_jd, EMPTY_JD)?;
    require_text(&req.target_experience, "Target experience cannot be empty.")?;

    let reply = rewrite_bullet(&state.llm, &req).await?;
    Ok(Json(Success::new(reply)))
}

// ─── Preparation tools ───────────────────────────────────────────────────────

/// POST /api/interview-prep
pub async fn handle_interview_prep(
    State(state): State<AppState>,
    Json(req): Json<ProjectBrief>,
) -> Result<Json<Success<EngineReply<InterviewPrep>>>, AppError> {
    require_text(&req.project_title, "Project title cannot be empty.")?;
    require_text(&req.project_description, "Project description cannot be empty.")?;

    let reply = generate_interview_prep(&state.llm, &req).await?;
    Ok(Json(Success::new(reply)))
}

#[derive(Debug, Deserialize)]
pub struct AssessmentRequest {
    pub target_jd: String,
}

/// POST /api/assessment-prep
pub async fn handle_assessment_prep(
    State(state): State<AppState>,
    Json(req): Json<AssessmentRequest>,
) -> Result<Json<Success<EngineReply<AssessmentPrep>>>, AppError> {
    require_text(&req.target_jd, EMPTY_JD)?;

    let reply = generate_assessment_prep(&state.llm, &req.target_jd).await?;
    Ok(Json(Success::new(reply)))
}

#[derive(Debug, Deserialize)]
pub struct RoadmapRequest {
    pub master_resume_text: String,
    pub target_jd: String,
}

/// POST /api/career-roadmap
pub async fn handle_career_roadmap(
    State(state): State<AppState>,
    Json(req): Json<RoadmapRequest>,
) -> Result<Json<Success<EngineReply<CareerRoadmap>>>, AppError> {
    require_text(&req.master_resume_text, "Master resume text cannot be empty.")?;
    require_text(&req.target_jd, EMPTY_JD)?;

    let reply = generate_career_roadmap(&state.llm, &req.master_resume_text, &req.target_jd).await?;
    Ok(Json(Success::new(reply)))
}
