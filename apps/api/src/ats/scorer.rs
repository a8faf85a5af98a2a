//! ATS Scorer — before/after keyword coverage of a resume against JD keywords.
//!
//! Matching is plain substring containment on lower-cased text: "java" matches
//! inside "javascript". Percentages use round-half-to-even (12.5 → 12).

use serde::{Deserialize, Serialize};

/// Cap on the reported missing-keyword list.
pub const MAX_MISSING_KEYWORDS: usize = 15;

/// Match statistics for one scoring call. Computed fresh, never persisted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsScoreResult {
    pub before_score: u32,
    pub after_score: u32,
    /// Keywords already present in the resume, in keyword-list order.
    pub matched_keywords: Vec<String>,
    /// Keywords still absent, most frequent first, at most [`MAX_MISSING_KEYWORDS`].
    pub missing_keywords: Vec<String>,
    pub new_matches_from_bullets: Vec<String>,
    pub total_jd_keywords: usize,
}

/// Scores `resume_text` against `jd_keywords`, optionally with rewritten bullets
/// appended to get the "after" picture.
///
/// An empty keyword list yields the all-zero result: nothing to score against.
/// An empty bullet slice behaves exactly like `None`.
pub fn calculate_ats_score(
    resume_text: &str,
    jd_keywords: &[String],
    suggested_bullets: Option<&[String]>,
) -> AtsScoreResult {
    if jd_keywords.is_empty() {
        return AtsScoreResult::default();
    }

    let resume_lower = resume_text.to_lowercase();
    let before_matched = matching(jd_keywords, &resume_lower);

    let bullets = suggested_bullets.filter(|b| !b.is_empty());
    let (after_matched, new_matches) = match bullets {
        Some(bullets) => {
            let enhanced = format!("{} {}", resume_lower, bullets.join(" ").to_lowercase());
            let after = matching(jd_keywords, &enhanced);
            let new_matches = after
                .iter()
                .filter(|kw| !before_matched.contains(kw))
                .cloned()
                .collect();
            (after, new_matches)
        }
        None => (before_matched.clone(), Vec::new()),
    };

    let missing_keywords = jd_keywords
        .iter()
        .filter(|kw| !after_matched.contains(kw))
        .take(MAX_MISSING_KEYWORDS)
        .cloned()
        .collect();

    let total = jd_keywords.len();

    AtsScoreResult {
        before_score: percentage(before_matched.len(), total),
        after_score: percentage(after_matched.len(), total),
        matched_keywords: before_matched,
        missing_keywords,
        new_matches_from_bullets: new_matches,
        total_jd_keywords: total,
    }
}

fn matching(keywords: &[String], haystack: &str) -> Vec<String> {
    keywords
        .iter()
        .filter(|kw| haystack.contains(kw.as_str()))
        .cloned()
        .collect()
}

fn percentage(matched: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = (matched as f64 / total as f64) * 100.0;
    (pct.round_ties_even() as u32).min(100)
}
