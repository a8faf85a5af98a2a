// Resume parsing pipeline: PDF bytes → text → sections + contact info.
// Pure and synchronous. Callers on the async path run it inside spawn_blocking.

pub mod contact;
pub mod sections;
pub mod text;

use serde::{Deserialize, Serialize};

pub use contact::{extract_contact_info, ContactInfo};
pub use sections::{segment_sections, Sections};
pub use text::{extract_text, ParseError};

/// Structured view of one uploaded resume. Built once per upload, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub sections: Sections,
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub word_count: usize,
    #[serde(default)]
    pub page_count: usize,
}

impl ParsedResume {
    /// Builds the record from already-extracted text.
    pub fn from_text(raw_text: String, page_count: usize) -> Self {
        let sections = segment_sections(&raw_text);
        let contact_info = extract_contact_info(&raw_text);
        let word_count = raw_text.split_whitespace().count();

        Self {
            raw_text,
            sections,
            contact_info,
            word_count,
            page_count,
        }
    }
}

/// Full pipeline over an uploaded PDF buffer.
pub fn parse_resume(bytes: &[u8]) -> Result<ParsedResume, ParseError> {
    let extracted = extract_text(bytes)?;
    let page_count = extracted.pages.len();
    let parsed = ParsedResume::from_text(extracted.raw_text, page_count);

    if parsed.sections.is_empty() {
        tracing::debug!("No text extracted from {page_count} page(s)");
    }
    if parsed.contact_info.is_empty() {
        tracing::debug!("No contact details found in resume");
    }
    Ok(parsed)
}
