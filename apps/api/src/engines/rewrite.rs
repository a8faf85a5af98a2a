//! Rewrite Engine — optimizes a single experience for a JD, checked against the master resume.

use serde::{Deserialize, Serialize};

use crate::engines::prompts::{REWRITE_PROMPT_TEMPLATE, REWRITE_SYSTEM};
use crate::engines::{run_engine, EngineReply, FallbackPayload};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, system_prompt};
use crate::llm_client::{ChatOptions, LlmClient};

const OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.3,
    max_tokens: 800,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteResult {
    pub optimized_bullet: String,
    pub original_source_snippet: String,
    pub mapping_logic: String,
    /// "Pass" or "Fail" under the zero-hallucination policy.
    pub honesty_check: String,
}

impl RewriteResult {
    pub fn passed_honesty_check(&self) -> bool {
        self.honesty_check.trim().eq_ignore_ascii_case("pass")
    }
}

impl FallbackPayload for RewriteResult {
    fn fallback() -> Self {
        Self {
            honesty_check: "Fail".to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewriteRequest {
    pub master_resume_text: String,
    pub target_jd: String,
    pub target_experience: String,
}

fn build_prompt(request: &RewriteRequest) -> String {
    fill_template(
        REWRITE_PROMPT_TEMPLATE,
        &[
            ("master_resume_text", &request.master_resume_text),
            ("target_jd", &request.target_jd),
            ("target_experience", &request.target_experience),
        ],
    )
}

pub async fn rewrite_bullet(
    llm: &LlmClient,
    request: &RewriteRequest,
) -> Result<EngineReply<RewriteResult>, AppError> {
    let system = system_prompt(REWRITE_SYSTEM);
    let reply: EngineReply<RewriteResult> = run_engine(llm, "Rewrite", &system, &build_prompt(request), OPTIONS).await?;
    if !reply.is_fallback() && !reply.payload.passed_honesty_check() {
        tracing::warn!(
            "Rewrite failed honesty check: {}",
            reply.payload.mapping_logic
        );
    }
    Ok(reply)
}
