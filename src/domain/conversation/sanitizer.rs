//! Response sanitizer - turns a raw run answer into display text.
//!
//! The assistant service annotates answers with inline citation markers such
//! as `【4:0†source】`. They reference files internal to the service and are
//! removed before the text reaches the transcript.

use once_cell::sync::Lazy;
use regex::Regex;

/// Shortest `【 … 】` span on a single line.
static CITATION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"【.*?】").expect("citation marker pattern is valid"));

/// Strips citation markers from assistant answers.
///
/// Pure and idempotent: `clean(clean(x)) == clean(x)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseSanitizer;

impl ResponseSanitizer {
    /// Creates a sanitizer.
    pub fn new() -> Self {
        Self
    }

    /// Removes every citation marker, leaving all other characters in place.
    pub fn clean(&self, raw: &str) -> String {
        CITATION_MARKER.replace_all(raw, "").into_owned()
    }

    /// Returns true if `text` still contains a citation marker.
    pub fn has_markers(&self, text: &str) -> bool {
        CITATION_MARKER.is_match(text)
    }
}
