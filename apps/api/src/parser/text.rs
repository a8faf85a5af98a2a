//! Text Extractor — turns raw PDF bytes into per-page text and one normalized string.

use std::panic::{self, AssertUnwindSafe};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// The buffer could not be opened as a PDF, or extraction blew up.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("PDF extraction panicked (malformed document)")]
    Panicked,
}

/// Text pulled out of a PDF, one entry per page plus the joined and cleaned whole.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub pages: Vec<String>,
    pub raw_text: String,
}

static RE_EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Extracts machine-readable text from every page (no OCR).
///
/// Image-only PDFs come back with empty text, which is a valid result.
/// `pdf_extract` can panic on malformed input instead of returning an error,
/// so the call runs behind `catch_unwind`.
pub fn extract_text(bytes: &[u8]) -> Result<ExtractedText, ParseError> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));

    let pages = match result {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => return Err(ParseError::Extraction(e.to_string())),
        Err(_) => return Err(ParseError::Panicked),
    };

    let raw_text = normalize_pages(&pages);
    tracing::debug!(
        "Extracted {} page(s), {} chars of text",
        pages.len(),
        raw_text.len()
    );

    Ok(ExtractedText { pages, raw_text })
}

/// Joins pages with a trailing newline each, collapses 3+ newlines to a blank line,
/// then trims the whole string.
pub fn normalize_pages(pages: &[String]) -> String {
    let mut joined = String::with_capacity(pages.iter().map(|p| p.len() + 1).sum());
    for page in pages {
        joined.push_str(page);
        joined.push('\n');
    }

    RE_EXCESS_NEWLINES
        .replace_all(&joined, "\n\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_normalize_joins_pages_with_newline() {
        let text = normalize_pages(&pages(&["Page one", "Page two"]));
        assert_eq!(text, "Page one\nPage two");
    }

    #[test]
    fn test_normalize_collapses_three_or_more_newlines() {
        let text = normalize_pages(&pages(&["Education\n\n\n\nB.Tech CSE\n\n\nSkills"]));
        assert_eq!(text, "Education\n\nB.Tech CSE\n\nSkills");
    }

    #[test]
    fn test_normalize_keeps_single_blank_line() {
        let text = normalize_pages(&pages(&["a\n\nb"]));
        assert_eq!(text, "a\n\nb");
    }

    #[test]
    fn test_normalize_collapses_across_page_boundary() {
        // page ends with two newlines, separator adds a third
        let text = normalize_pages(&pages(&["first\n\n", "second"]));
        assert_eq!(text, "first\n\nsecond");
    }

    #[test]
    fn test_normalize_trims_outer_whitespace() {
        let text = normalize_pages(&pages(&["\n\n  Jane Doe  \n", "   "]));
        assert_eq!(text, "Jane Doe");
    }

    #[test]
    fn test_normalize_empty_pages_is_empty_string() {
        assert_eq!(normalize_pages(&pages(&["", ""])), "");
        assert_eq!(normalize_pages(&[]), "");
    }

    #[test]
    fn test_extract_rejects_non_pdf_bytes() {
        let result = extract_text(b"this is definitely not a pdf document");
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_rejects_empty_buffer() {
        assert!(extract_text(&[]).is_err());
    }
}
