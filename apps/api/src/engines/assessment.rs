//! Assessment Engine — predicts a company's online-assessment pattern from its JD.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engines::prompts::{ASSESSMENT_PROMPT_TEMPLATE, ASSESSMENT_SYSTEM};
use crate::engines::{run_engine, EngineReply, FallbackPayload};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, system_prompt};
use crate::llm_client::{ChatOptions, LlmClient};

const OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.3,
    max_tokens: 1500,
};

const UNKNOWN: &str = "Unknown";

/// One section of the predicted test. Aptitude sections list topics, coding
/// sections list languages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentSection {
    pub name: String,
    pub difficulty: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub focus_topics: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestPattern {
    pub provider: String,
    pub sections: Vec<AssessmentSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentPrep {
    pub predicted_company: String,
    pub assessment_tier: String,
    pub test_pattern: TestPattern,
    /// Models return either a paragraph or a list of steps; kept as given.
    pub preparation_roadmap: Value,
}

impl FallbackPayload for AssessmentPrep {
    fn fallback() -> Self {
        Self {
            predicted_company: UNKNOWN.to_string(),
            assessment_tier: UNKNOWN.to_string(),
            test_pattern: TestPattern {
                provider: UNKNOWN.to_string(),
                sections: Vec::new(),
            },
            preparation_roadmap: Value::String("Failed to generate roadmap.".to_string()),
        }
    }
}

pub async fn generate_assessment_prep(
    llm: &LlmClient,
    target_jd: &str,
) -> Result<EngineReply<AssessmentPrep>, AppError> {
    let system = system_prompt(ASSESSMENT_SYSTEM);
    let prompt = fill_template(ASSESSMENT_PROMPT_TEMPLATE, &[("target_jd", target_jd)]);
    run_engine(llm, "Assessment", &system, &prompt, OPTIONS).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fallback_is_unknown_everywhere() {
        let prep = AssessmentPrep::fallback();
        assert_eq!(prep.predicted_company, "Unknown");
        assert_eq!(prep.assessment_tier, "Unknown");
        assert_eq!(prep.test_pattern.provider, "Unknown");
        assert!(prep.test_pattern.sections.is_empty());
        assert_eq!(prep.preparation_roadmap, json!("Failed to generate roadmap."));
    }

    #[test]
    fn test_mixed_section_shapes_decode() {
        let prep: AssessmentPrep = serde_json::from_value(json!({
            "predicted_company": "TCS",
            "assessment_tier": "Mass Recruiter",
            "test_pattern": {
                "provider": "TCS iON",
                "sections": [
                    {"name": "Numerical Ability", "difficulty": "Medium", "focus_topics": ["Percentages"]},
                    {"name": "Coding", "difficulty": "2 Easy DSA problems", "languages": ["C++", "Java"]}
                ]
            },
            "preparation_roadmap": ["Revise aptitude", "Practice arrays", "Mock test"]
        }))
        .unwrap();

        assert_eq!(prep.test_pattern.sections[0].focus_topics, vec!["Percentages"]);
        assert!(prep.test_pattern.sections[0].languages.is_empty());
        assert_eq!(prep.test_pattern.sections[1].languages, vec!["C++", "Java"]);
        assert!(prep.preparation_roadmap.is_array());
    }

    #[test]
    fn test_empty_section_lists_are_not_serialized() {
        let section = AssessmentSection {
            name: "Verbal".to_string(),
            difficulty: "Easy".to_string(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&section).unwrap(),
            json!({"name": "Verbal", "difficulty": "Easy"})
        );
    }
}
