//! Interview Engine — five "contextual ownership" questions about one project.

use serde::{Deserialize, Serialize};

use crate::engines::prompts::{INTERVIEW_PROMPT_TEMPLATE, INTERVIEW_SYSTEM};
use crate::engines::{run_engine, EngineReply, FallbackPayload};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, system_prompt};
use crate::llm_client::{ChatOptions, LlmClient};

const OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.5,
    max_tokens: 1500,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewQuestion {
    pub category: String,
    pub question: String,
    pub intent: String,
    pub hint_for_student: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewPrep {
    pub project_summary: String,
    pub interview_prep: Vec<InterviewQuestion>,
}

impl FallbackPayload for InterviewPrep {
    fn fallback() -> Self {
        Self::default()
    }
}

/// The project being grilled, as the student described it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectBrief {
    pub project_title: String,
    pub project_description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub github_url: Option<String>,
}

fn build_prompt(project: &ProjectBrief) -> String {
    let tech_stack = if project.tech_stack.is_empty() {
        "Not specified".to_string()
    } else {
        project.tech_stack.join(", ")
    };
    let github_line = project
        .github_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(|url| format!("\n- GITHUB_URL: {url}"))
        .unwrap_or_default();

    fill_template(
        INTERVIEW_PROMPT_TEMPLATE,
        &[
            ("project_title", &project.project_title),
            ("project_description", &project.project_description),
            ("tech_stack", &tech_stack),
            ("github_line", &github_line),
        ],
    )
}

pub async fn generate_interview_prep(
    llm: &LlmClient,
    project: &ProjectBrief,
) -> Result<EngineReply<InterviewPrep>, AppError> {
    let system = system_prompt(INTERVIEW_SYSTEM);
    run_engine(llm, "Interview", &system, &build_prompt(project), OPTIONS).await
}
