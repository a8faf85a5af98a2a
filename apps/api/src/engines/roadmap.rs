//! Roadmap Engine — skill gaps between a master resume and target JDs, with free resources.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engines::prompts::{ROADMAP_PROMPT_TEMPLATE, ROADMAP_SYSTEM};
use crate::engines::{run_engine, EngineReply, FallbackPayload};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, system_prompt};
use crate::llm_client::{ChatOptions, LlmClient};

const OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.4,
    max_tokens: 2000,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningResource {
    pub resource_name: String,
    pub provider: String,
    pub link_placeholder: String,
    pub estimated_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGap {
    pub skill: String,
    /// Usually "3/5"; some models answer with a bare number.
    pub frequency: Value,
    pub impact_score: Value,
    pub learning_path: Vec<LearningResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerRoadmap {
    pub identified_gaps: Vec<SkillGap>,
    pub overall_readiness_summary: String,
}

impl FallbackPayload for CareerRoadmap {
    fn fallback() -> Self {
        Self {
            identified_gaps: Vec::new(),
            overall_readiness_summary: "Failed to parse analysis results.".to_string(),
        }
    }
}

pub async fn generate_career_roadmap(
    llm: &LlmClient,
    master_resume_text: &str,
    target_jds: &str,
) -> Result<EngineReply<CareerRoadmap>, AppError> {
    let system = system_prompt(ROADMAP_SYSTEM);
    let prompt = fill_template(
        ROADMAP_PROMPT_TEMPLATE,
        &[
            ("master_resume_text", master_resume_text),
            ("target_jds", target_jds),
        ],
    );
    run_engine(llm, "Roadmap", &system, &prompt, OPTIONS).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::mock_llm;
    use serde_json::json;

    #[test]
    fn test_numeric_and_string_scores_both_decode() {
        let roadmap: CareerRoadmap = serde_json::from_value(json!({
            "identified_gaps": [
                {"skill": "SQL", "frequency": "3/5", "impact_score": 9, "learning_path": []},
                {"skill": "Docker", "frequency": 2, "impact_score": "6"}
            ],
            "overall_readiness_summary": "Solid base."
        }))
        .unwrap();

        assert_eq!(roadmap.identified_gaps[0].impact_score, json!(9));
        assert_eq!(roadmap.identified_gaps[1].frequency, json!(2));
        assert!(roadmap.identified_gaps[1].learning_path.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_reply_shape() {
        let llm = mock_llm("```json\n{ broken").await;
        let reply = generate_career_roadmap(&llm, "resume", "jd").await.unwrap();

        let body = serde_json::to_value(&reply).unwrap();
        assert_eq!(body["identified_gaps"], json!([]));
        assert_eq!(
            body["overall_readiness_summary"],
            "Failed to parse analysis results."
        );
        assert_eq!(body["error"], "Failed to parse LLM response");
        assert_eq!(body["raw_response"], "```json\n{ broken");
    }
}
