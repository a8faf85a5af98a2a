//! Keyword Extractor — frequency-ranked keywords from a job description.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

/// Upper bound on the returned keyword list.
pub const MAX_KEYWORDS: usize = 50;

/// Articles, pronouns, and generic recruiting filler.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "will", "would", "could", "should", "may", "might", "shall", "can", "this",
    "that", "these", "those", "i", "me", "my", "we", "our", "you", "your", "he", "she", "it",
    "they", "them", "their", "its", "not", "no", "nor", "as", "if", "then", "than", "so", "up",
    "out", "about", "into", "through", "during", "before", "after", "above", "below",
    "between", "same", "each", "every", "all", "both", "few", "more", "most", "other", "some",
    "such", "only", "own", "also", "just", "very", "any", "who", "which", "what", "where",
    "when", "how", "able", "across", "within", "including", "well", "must", "role", "work",
    "working", "using", "based", "etc", "like", "new", "good", "great", "looking", "join",
    "team", "company", "position", "candidate", "required", "preferred", "years",
    "experience", "strong",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

// Keep `. # + -` so compound tech tokens (c++, c#, node.js, ci-cd) survive.
static RE_DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s.#+\-]").unwrap());

// A letter followed by a run ending in an alphanumeric, `+` or `#`; or a lone letter.
static RE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z][a-z0-9.#+\-]*[a-z0-9+#]|[a-z]").unwrap());

/// Lower-cases, strips punctuation, and returns the candidate tokens in order.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned = RE_DISALLOWED.replace_all(&lowered, " ");
    RE_TOKEN
        .find_iter(&cleaned)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn is_keyword(token: &str) -> bool {
    token.len() > 1 && !STOP_WORD_SET.contains(token)
}

/// Returns up to [`MAX_KEYWORDS`] distinct keywords, most frequent first.
/// Ties keep first-occurrence order, so output is deterministic.
pub fn extract_jd_keywords(jd_text: &str) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in tokenize(jd_text).into_iter().filter(|t| is_keyword(t)) {
        match index.get(&token) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(token.clone(), counts.len());
                counts.push((token, 1));
            }
        }
    }

    // stable sort keeps first-occurrence order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let keywords: Vec<String> = counts
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(token, _)| token)
        .collect();

    tracing::debug!("Extracted {} JD keyword(s)", keywords.len());
    keywords
}
