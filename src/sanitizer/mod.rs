//! Server-side HTML sanitizer for admin-submitted blog content.
//!
//! Input is parsed as a body fragment, copied into an owned tree, rebuilt
//! against a fixed allow-list and serialized again. Anything the parser or the
//! guards here refuse yields an empty string: no content is returned rather
//! than content that was not fully inspected.

pub mod policy;
pub mod style;
pub mod tree;

#[cfg(test)]
mod tests;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::content::reading::reading_time_for_words;
use tree::Node;

/// Upper bound on accepted input.
pub const MAX_INPUT_BYTES: usize = 512 * 1024;
/// Upper bound on element nesting.
pub const MAX_DEPTH: usize = 256;
/// Re-parse passes allowed before the output must be a fixed point.
const MAX_PASSES: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("input too large ({0} bytes)")]
    TooLarge(usize),

    #[error("document nested deeper than {0} elements")]
    TooDeep(usize),

    #[error("parser produced no root element")]
    MissingRoot,

    #[error("output did not settle after {0} re-parse passes")]
    Unstable(usize),
}

/// Cleaned HTML plus the text statistics computed while cleaning it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizedContent {
    pub html: String,
    pub word_count: usize,
    pub reading_time_minutes: u32,
}

impl SanitizedContent {
    fn empty() -> Self {
        Self {
            html: String::new(),
            word_count: 0,
            reading_time_minutes: reading_time_for_words(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.html.trim().is_empty()
    }
}

/// Sanitize `html`, failing closed to an empty string.
pub fn sanitize(html: &str) -> String {
    match try_sanitize(html) {
        Ok(clean) => clean,
        Err(e) => {
            warn!(error = %e, input_len = html.len(), "sanitizer rejected input");
            String::new()
        }
    }
}

/// Like [`sanitize`] but reports why the input was refused.
pub fn try_sanitize(html: &str) -> Result<String, SanitizeError> {
    let nodes = clean_fragment(html)?;
    Ok(tree::serialize(&nodes))
}

/// Sanitize blog post content and derive word count and reading time from
/// the cleaned tree.
pub fn sanitize_post(html: &str) -> SanitizedContent {
    match clean_fragment(html) {
        Ok(nodes) => {
            let word_count = tree::text_content(&nodes).split_whitespace().count();
            SanitizedContent {
                html: tree::serialize(&nodes),
                word_count,
                reading_time_minutes: reading_time_for_words(word_count),
            }
        }
        Err(e) => {
            warn!(error = %e, input_len = html.len(), "sanitizer rejected post content");
            SanitizedContent::empty()
        }
    }
}

/// Visible text of the sanitized fragment with whitespace collapsed. Text
/// inside dropped elements such as `<script>` does not appear.
pub fn plain_text(html: &str) -> String {
    match clean_fragment(html) {
        Ok(nodes) => tree::text_content(&nodes)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" "),
        Err(e) => {
            warn!(error = %e, input_len = html.len(), "sanitizer rejected text input");
            String::new()
        }
    }
}

// Dropping an element can leave nesting the parser never builds from markup
// (foster-parented content lifted out of a removed <table>). The cleaned tree
// is therefore serialized and re-parsed until the markup maps back to itself.
fn clean_fragment(html: &str) -> Result<Vec<Node>, SanitizeError> {
    if html.len() > MAX_INPUT_BYTES {
        return Err(SanitizeError::TooLarge(html.len()));
    }
    let mut serialized = tree::serialize(&policy::clean(&tree::parse_fragment(html)?));

    for _ in 0..MAX_PASSES {
        if serialized.len() > MAX_INPUT_BYTES {
            return Err(SanitizeError::TooLarge(serialized.len()));
        }
        let nodes = policy::clean(&tree::parse_fragment(&serialized)?);
        let reserialized = tree::serialize(&nodes);
        if reserialized == serialized {
            return Ok(nodes);
        }
        serialized = reserialized;
    }
    Err(SanitizeError::Unstable(MAX_PASSES))
}
