//! Section Segmenter — splits normalized resume text into named sections.
//!
//! Heading detection is a prioritized rule table: a line is a heading when it
//! matches one of the patterns AND has at most `MAX_HEADING_TOKENS` tokens.
//! The matched text is normalized through an alias table into a canonical name.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Name of the implicit section holding text before the first recognized heading.
pub const HEADER_SECTION: &str = "Header";

/// Guards against heading keywords appearing mid-sentence in body text.
pub const MAX_HEADING_TOKENS: usize = 5;

/// Heading patterns in evaluation order. First match wins.
/// Each pattern must expose the heading text as capture group 1.
pub const DEFAULT_HEADING_PATTERNS: &[&str] = &[
    r"(?i)\b(education)\b",
    r"(?i)\b(experience|work\s*experience|professional\s*experience)\b",
    r"(?i)\b(projects|personal\s*projects|academic\s*projects)\b",
    r"(?i)\b(skills|technical\s*skills|core\s*competencies)\b",
    r"(?i)\b(certifications?|certificates?)\b",
    r"(?i)\b(achievements?|awards?|honors?)\b",
    r"(?i)\b(summary|objective|profile)\b",
    r"(?i)\b(extracurricular|activities|volunteering)\b",
];

/// Lower-cased heading text → canonical section name.
pub const DEFAULT_HEADING_ALIASES: &[(&str, &str)] = &[
    ("education", "Education"),
    ("experience", "Experience"),
    ("work experience", "Experience"),
    ("professional experience", "Experience"),
    ("projects", "Projects"),
    ("personal projects", "Projects"),
    ("academic projects", "Projects"),
    ("skills", "Skills"),
    ("technical skills", "Skills"),
    ("core competencies", "Skills"),
    ("certifications", "Certifications"),
    ("certification", "Certifications"),
    ("certificates", "Certifications"),
    ("certificate", "Certifications"),
    ("achievements", "Achievements"),
    ("achievement", "Achievements"),
    ("awards", "Achievements"),
    ("award", "Achievements"),
    ("honors", "Achievements"),
    ("honor", "Achievements"),
    ("summary", "Summary"),
    ("objective", "Summary"),
    ("profile", "Summary"),
    ("extracurricular", "Activities"),
    ("activities", "Activities"),
    ("volunteering", "Activities"),
];

// ────────────────────────────────────────────────────────────────────────────
// Sections — ordered heading → body mapping
// ────────────────────────────────────────────────────────────────────────────

/// A single `(heading, content)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub content: String,
}

/// Sections in document order (first occurrence). Serializes as a JSON object
/// whose key order matches the document, never alphabetical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections(Vec<Section>);

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn get(&self, heading: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|s| s.heading == heading)
            .map(|s| s.content.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.0.iter()
    }

    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.heading.as_str())
    }

    /// Stores `content` under `heading`. A repeated heading appends to the
    /// existing body (newline-joined) and keeps its original position.
    pub fn insert(&mut self, heading: impl Into<String>, content: impl Into<String>) {
        let heading = heading.into();
        let content = content.into();
        match self.0.iter_mut().find(|s| s.heading == heading) {
            Some(existing) => {
                existing.content.push('\n');
                existing.content.push_str(&content);
            }
            None => self.0.push(Section { heading, content }),
        }
    }
}

impl Serialize for Sections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for section in &self.0 {
            map.serialize_entry(&section.heading, &section.content)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Sections {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SectionsVisitor;

        impl<'de> Visitor<'de> for SectionsVisitor {
            type Value = Sections;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of section heading to section content")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Sections, A::Error> {
                let mut sections = Sections::new();
                while let Some((heading, content)) = access.next_entry::<String, String>()? {
                    sections.insert(heading, content);
                }
                Ok(sections)
            }
        }

        deserializer.deserialize_map(SectionsVisitor)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Segmenter
// ────────────────────────────────────────────────────────────────────────────

/// Rule-driven heading classifier. Build once and reuse; it holds compiled regexes.
#[derive(Debug, Clone)]
pub struct SectionSegmenter {
    rules: Vec<Regex>,
    aliases: Vec<(String, String)>,
}

static DEFAULT_SEGMENTER: Lazy<SectionSegmenter> = Lazy::new(SectionSegmenter::default);

impl Default for SectionSegmenter {
    fn default() -> Self {
        let rules = DEFAULT_HEADING_PATTERNS
            .iter()
            .map(|p| Regex::new(p).unwrap())
            .collect();
        let aliases = DEFAULT_HEADING_ALIASES
            .iter()
            .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
            .collect();
        Self { rules, aliases }
    }
}

impl SectionSegmenter {
    /// Appends a heading rule evaluated after all existing ones.
    /// The pattern must capture the heading text as group 1.
    #[allow(dead_code)]
    pub fn with_rule(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.rules.push(Regex::new(pattern)?);
        Ok(self)
    }

    /// Maps a lower-cased heading spelling onto a canonical section name.
    #[allow(dead_code)]
    pub fn with_alias(mut self, raw: &str, canonical: &str) -> Self {
        self.aliases
            .push((raw.to_lowercase(), canonical.to_string()));
        self
    }

    /// Returns the canonical heading name if `line` is a section boundary.
    pub fn classify(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.split_whitespace().count() > MAX_HEADING_TOKENS {
            return None;
        }

        self.rules.iter().find_map(|rule| {
            rule.captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| self.canonical_name(m.as_str()))
        })
    }

    fn canonical_name(&self, raw: &str) -> String {
        let normalized = raw
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        self.aliases
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, canonical)| canonical.clone())
            .unwrap_or_else(|| title_case(&normalized))
    }

    /// Splits `text` into sections. Heading lines are consumed as delimiters;
    /// every other line lands in exactly one section. Sections whose body is
    /// blank after trimming are dropped.
    pub fn segment(&self, text: &str) -> Sections {
        let mut sections = Sections::new();
        let mut current = HEADER_SECTION.to_string();
        let mut content: Vec<&str> = Vec::new();

        for line in text.lines() {
            match self.classify(line) {
                Some(heading) => {
                    flush(&mut sections, &current, &content);
                    current = heading;
                    content.clear();
                }
                None => content.push(line),
            }
        }
        flush(&mut sections, &current, &content);

        tracing::debug!("Segmented resume into {} section(s)", sections.len());
        sections
    }
}

fn flush(sections: &mut Sections, heading: &str, lines: &[&str]) {
    let body = lines.join("\n");
    let body = body.trim();
    if !body.is_empty() {
        sections.insert(heading, body);
    }
}

/// Upper-cases the first letter of every alphabetic run, lower-cases the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Segments `text` with the default rule table.
pub fn segment_sections(text: &str) -> Sections {
    DEFAULT_SEGMENTER.segment(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projects_and_skills_without_header() {
        let text = "Projects\nBuilt a chat app using React and Node.js\nSkills\nReact, Node.js, MongoDB";
        let sections = segment_sections(text);

        assert_eq!(sections.get(HEADER_SECTION), None);
        assert_eq!(
            sections.get("Projects"),
            Some("Built a chat app using React and Node.js")
        );
        assert_eq!(sections.get("Skills"), Some("React, Node.js, MongoDB"));
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn test_text_before_first_heading_goes_to_header() {
        let text = "Jane Doe\njane@example.com\nEducation\nB.Tech, IIT Delhi";
        let sections = segment_sections(text);
        assert_eq!(sections.get("Header"), Some("Jane Doe\njane@example.com"));
        assert_eq!(sections.get("Education"), Some("B.Tech, IIT Delhi"));
    }

    #[test]
    fn test_aliases_map_to_canonical_names() {
        let seg = SectionSegmenter::default();
        assert_eq!(seg.classify("Work Experience").as_deref(), Some("Experience"));
        assert_eq!(
            seg.classify("PROFESSIONAL EXPERIENCE").as_deref(),
            Some("Experience")
        );
        assert_eq!(seg.classify("Technical Skills").as_deref(), Some("Skills"));
        assert_eq!(seg.classify("Core Competencies").as_deref(), Some("Skills"));
        assert_eq!(seg.classify("Certificate").as_deref(), Some("Certifications"));
        assert_eq!(seg.classify("Honors & Awards").as_deref(), Some("Achievements"));
        assert_eq!(seg.classify("Career Objective").as_deref(), Some("Summary"));
        assert_eq!(seg.classify("Volunteering").as_deref(), Some("Activities"));
    }

    #[test]
    fn test_unmapped_match_falls_back_to_title_case() {
        // `\s*` lets "workexperience" through the pattern, but it has no alias
        let seg = SectionSegmenter::default();
        assert_eq!(
            seg.classify("WORKEXPERIENCE").as_deref(),
            Some("Workexperience")
        );
    }

    #[test]
    fn test_extra_inner_whitespace_still_resolves_alias() {
        let seg = SectionSegmenter::default();
        assert_eq!(seg.classify("Work   Experience").as_deref(), Some("Experience"));
    }

    #[test]
    fn test_long_line_with_keyword_is_body_text() {
        let seg = SectionSegmenter::default();
        assert_eq!(
            seg.classify("Gained hands-on experience building REST APIs in Go"),
            None
        );
    }

    #[test]
    fn test_five_token_line_can_still_be_heading() {
        let seg = SectionSegmenter::default();
        assert_eq!(
            seg.classify("Relevant Projects and Side Work").as_deref(),
            Some("Projects")
        );
    }

    #[test]
    fn test_keyword_inside_word_is_not_heading() {
        let seg = SectionSegmenter::default();
        assert_eq!(seg.classify("Skillset"), None);
        assert_eq!(seg.classify("Reeducation"), None);
    }

    #[test]
    fn test_first_pattern_wins_on_multiple_matches() {
        // matches both the education and the skills rule
        let seg = SectionSegmenter::default();
        assert_eq!(seg.classify("Education & Skills").as_deref(), Some("Education"));
    }

    #[test]
    fn test_consecutive_headings_drop_the_empty_one() {
        let text = "Summary\nExperience\nSDE Intern at Acme";
        let sections = segment_sections(text);
        assert_eq!(sections.get("Summary"), None);
        assert_eq!(sections.get("Experience"), Some("SDE Intern at Acme"));
    }

    #[test]
    fn test_whitespace_only_body_is_dropped() {
        let sections = segment_sections("Skills\n   \n\nEducation\nBSc");
        assert_eq!(sections.get("Skills"), None);
        assert_eq!(sections.headings().collect::<Vec<_>>(), vec!["Education"]);
    }

    #[test]
    fn test_order_follows_document_layout() {
        let text = "Skills\nRust\nEducation\nBSc\nAchievements\nICPC regionalist";
        let sections = segment_sections(text);
        assert_eq!(
            sections.headings().collect::<Vec<_>>(),
            vec!["Skills", "Education", "Achievements"]
        );
    }

    #[test]
    fn test_repeated_heading_appends_instead_of_overwriting() {
        let text = "Projects\nChat app\nSkills\nRust\nProjects\nCompiler";
        let sections = segment_sections(text);
        assert_eq!(sections.get("Projects"), Some("Chat app\nCompiler"));
        assert_eq!(
            sections.headings().collect::<Vec<_>>(),
            vec!["Projects", "Skills"]
        );
    }

    #[test]
    fn test_no_body_line_is_lost_or_duplicated() {
        let text = "Jane Doe\nPune, India\nEducation\nBSc CS\n2020-2024\nExperience\nIntern, Acme\nBuilt dashboards\nSkills\nSQL, Python";
        let sections = segment_sections(text);

        let seg = SectionSegmenter::default();
        let body_lines: Vec<&str> = text.lines().filter(|l| seg.classify(l).is_none()).collect();
        let rebuilt: Vec<&str> = sections
            .iter()
            .flat_map(|s| s.content.lines())
            .collect();
        assert_eq!(rebuilt, body_lines);
    }

    #[test]
    fn test_with_rule_extends_rule_table() {
        let seg = SectionSegmenter::default()
            .with_rule(r"(?i)\b(publications)\b")
            .unwrap();
        let sections = seg.segment("Publications\nA paper on caches");
        assert_eq!(sections.get("Publications"), Some("A paper on caches"));
    }

    #[test]
    fn test_with_alias_extends_alias_table() {
        let seg = SectionSegmenter::default()
            .with_rule(r"(?i)\b(internships)\b")
            .unwrap()
            .with_alias("Internships", "Experience");
        assert_eq!(seg.classify("Internships").as_deref(), Some("Experience"));
    }

    #[test]
    fn test_sections_serialize_in_document_order() {
        let sections = segment_sections("Skills\nRust\nEducation\nBSc");
        let json = serde_json::to_string(&sections).unwrap();
        assert_eq!(json, r#"{"Skills":"Rust","Education":"BSc"}"#);
    }

    #[test]
    fn test_sections_deserialize_preserves_order() {
        let sections: Sections =
            serde_json::from_str(r#"{"Skills":"Rust","Education":"BSc"}"#).unwrap();
        assert_eq!(
            sections.headings().collect::<Vec<_>>(),
            vec!["Skills", "Education"]
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("open source"), "Open Source");
        assert_eq!(title_case("c++ stuff"), "C++ Stuff");
    }
}
