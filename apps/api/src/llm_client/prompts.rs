// Shared prompt fragments. Each engine owns its task-specific prompts in engines::prompts;
// this file holds the cross-cutting pieces they all append.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").unwrap());

/// Appended to every system prompt. The client also requests `json_object` output.
pub const JSON_ONLY_INSTRUCTION: &str =
    "Only return valid JSON. No markdown fences, no extra text.";

/// Honesty-First rules shared by every engine that rewrites resume content.
pub const HONESTY_RULES: &str = "\
## ABSOLUTE RULES — HONESTY FIRST
1. You may ONLY rephrase, restructure, or reword experiences that ALREADY EXIST in the student's resume.
2. You must NEVER invent new skills, technologies, projects, or job titles.
3. You must NEVER fabricate metrics (revenue, percentages, user counts) unless they appear in the resume.
4. If the student lacks relevant experience for a JD requirement, say so honestly — do NOT make something up.";

/// Joins a task prompt with the JSON-only instruction.
pub fn system_prompt(task: &str) -> String {
    format!("{task}\n\n{JSON_ONLY_INSTRUCTION}")
}

/// Fills `{name}` placeholders from `values` in one pass over the template.
/// Substituted text is never rescanned, so user input containing `{jd_text}`
/// stays literal. Unknown placeholders are left as they are.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    RE_PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
