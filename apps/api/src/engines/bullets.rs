//! Bullet Engine — three honesty-constrained rewrites of existing resume bullets for a JD.

use serde::{Deserialize, Serialize};

use crate::engines::prompts::{BULLETS_PROMPT_TEMPLATE, BULLETS_SYSTEM};
use crate::engines::{run_engine, EngineReply, FallbackPayload};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, system_prompt, HONESTY_RULES};
use crate::llm_client::{ChatOptions, LlmClient};
use crate::parser::ParsedResume;

const OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.4,
    max_tokens: 1500,
};

const NO_RESUME_CONTENT: &str = "No resume content found.";

/// One rewrite mapping a real resume line onto a JD requirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletRewrite {
    pub original: String,
    pub rewritten: String,
    pub jd_keywords_used: Vec<String>,
    pub rationale: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchAnalysis {
    pub strong_matches: Vec<String>,
    pub partial_matches: Vec<String>,
    pub gaps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletSuggestions {
    pub bullets: Vec<BulletRewrite>,
    pub match_analysis: MatchAnalysis,
}

impl FallbackPayload for BulletSuggestions {
    fn fallback() -> Self {
        Self::default()
    }
}

impl BulletSuggestions {
    /// Rewritten texts, in order, for ATS "after" scoring.
    pub fn rewritten_texts(&self) -> Vec<String> {
        self.bullets.iter().map(|b| b.rewritten.clone()).collect()
    }
}

/// Renders the resume for the prompt: each non-blank section as `### Heading`,
/// falling back to the raw text when no section has content.
pub fn build_resume_context(resume: &ParsedResume) -> String {
    let parts: Vec<String> = resume
        .sections
        .iter()
        .filter(|s| !s.content.trim().is_empty())
        .map(|s| format!("### {}\n{}", s.heading, s.content))
        .collect();

    if !parts.is_empty() {
        return parts.join("\n\n");
    }

    if resume.raw_text.trim().is_empty() {
        NO_RESUME_CONTENT.to_string()
    } else {
        resume.raw_text.clone()
    }
}

fn build_prompt(resume: &ParsedResume, jd_text: &str) -> String {
    fill_template(
        BULLETS_PROMPT_TEMPLATE,
        &[
            ("resume_context", &build_resume_context(resume)),
            ("jd_text", jd_text),
        ],
    )
}

/// Asks the LLM for exactly three tailored rewrites and a match analysis.
pub async fn generate_bullets(
    llm: &LlmClient,
    resume: &ParsedResume,
    jd_text: &str,
) -> Result<EngineReply<BulletSuggestions>, AppError> {
    let system = system_prompt(&fill_template(
        BULLETS_SYSTEM,
        &[("honesty_rules", HONESTY_RULES)],
    ));
    let prompt = build_prompt(resume, jd_text);

    run_engine(llm, "Bullet", &system, &prompt, OPTIONS).await
}
